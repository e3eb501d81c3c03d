//! Write a synthetic `StudentPerformanceFactors.csv` with the reference schema.
//!
//! Usage: `generate_sample [OUT] [ROWS]`

use anyhow::{Context, Result};

const HEADER: [&str; 20] = [
    "Hours_Studied",
    "Attendance",
    "Parental_Involvement",
    "Access_to_Resources",
    "Extracurricular_Activities",
    "Sleep_Hours",
    "Previous_Scores",
    "Motivation_Level",
    "Internet_Access",
    "Tutoring_Sessions",
    "Family_Income",
    "Teacher_Quality",
    "School_Type",
    "Peer_Influence",
    "Physical_Activity",
    "Learning_Disabilities",
    "Parental_Education_Level",
    "Distance_from_Home",
    "Gender",
    "Exam_Score",
];

const LEVELS: [&str; 3] = ["Low", "Medium", "High"];
const YES_NO: [&str; 2] = ["Yes", "No"];
const PEER: [&str; 3] = ["Positive", "Neutral", "Negative"];
const EDUCATION: [&str; 3] = ["High School", "College", "Postgraduate"];
const DISTANCE: [&str; 3] = ["Near", "Moderate", "Far"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Normal draw rounded and clamped to `[lo, hi]`.
    fn int_between(&mut self, mean: f64, std_dev: f64, lo: i64, hi: i64) -> i64 {
        (self.gauss(mean, std_dev).round() as i64).clamp(lo, hi)
    }

    /// Pick from `choices` with the given relative weights.
    fn pick<'a>(&mut self, choices: &[&'a str], weights: &[f64]) -> (usize, &'a str) {
        let total: f64 = weights.iter().sum();
        let mut r = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if r < *w {
                return (i, choices[i]);
            }
            r -= w;
        }
        let last = choices.len() - 1;
        (last, choices[last])
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args
        .next()
        .unwrap_or_else(|| "StudentPerformanceFactors.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a row count"))?,
        None => 500,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(HEADER)?;

    for _ in 0..rows {
        let hours = rng.int_between(20.0, 6.0, 1, 44);
        let attendance = rng.int_between(80.0, 11.5, 60, 100);
        let (involvement, parental) = rng.pick(&LEVELS, &[0.2, 0.5, 0.3]);
        let (access, resources) = rng.pick(&LEVELS, &[0.2, 0.5, 0.3]);
        let (_, extracurricular) = rng.pick(&YES_NO, &[0.6, 0.4]);
        let sleep = rng.int_between(7.0, 1.5, 4, 10);
        let previous = rng.int_between(75.0, 14.0, 50, 100);
        let (motivation, motivation_level) = rng.pick(&LEVELS, &[0.3, 0.5, 0.2]);
        let (_, internet) = rng.pick(&YES_NO, &[0.92, 0.08]);
        let tutoring = rng.int_between(1.5, 1.2, 0, 8);
        let (_, income) = rng.pick(&LEVELS, &[0.4, 0.4, 0.2]);
        // About one percent of Teacher_Quality cells are left blank.
        let teacher = if rng.next_f64() < 0.01 {
            ""
        } else {
            rng.pick(&LEVELS, &[0.1, 0.6, 0.3]).1
        };
        let (_, school) = rng.pick(&["Public", "Private"], &[0.7, 0.3]);
        let (peer, peer_influence) = rng.pick(&PEER, &[0.4, 0.4, 0.2]);
        let activity = rng.int_between(3.0, 1.0, 0, 6);
        let (_, disabilities) = rng.pick(&YES_NO, &[0.1, 0.9]);
        let (_, education) = rng.pick(&EDUCATION, &[0.5, 0.3, 0.2]);
        let (_, distance) = rng.pick(&DISTANCE, &[0.6, 0.3, 0.1]);
        let (_, gender) = rng.pick(&["Male", "Female"], &[0.58, 0.42]);

        let score = 40.0
            + 0.30 * hours as f64
            + 0.20 * attendance as f64
            + 0.05 * previous as f64
            + 0.50 * tutoring as f64
            + 1.0 * (involvement + access + motivation) as f64
            + if peer == 0 { 1.0 } else { 0.0 }
            + rng.gauss(0.0, 2.0);
        let score = (score.round() as i64).clamp(55, 100);

        writer.write_record([
            hours.to_string(),
            attendance.to_string(),
            parental.to_string(),
            resources.to_string(),
            extracurricular.to_string(),
            sleep.to_string(),
            previous.to_string(),
            motivation_level.to_string(),
            internet.to_string(),
            tutoring.to_string(),
            income.to_string(),
            teacher.to_string(),
            school.to_string(),
            peer_influence.to_string(),
            activity.to_string(),
            disabilities.to_string(),
            education.to_string(),
            distance.to_string(),
            gender.to_string(),
            score.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} students to {output_path}");
    Ok(())
}
