/// egui rendering of [`AppState`](crate::state::AppState): widgets read the
/// state, call its setters, and draw the precomputed outputs.
pub mod panels;
pub mod plot;
pub mod table;
