/// Parley-backed shaping and measurement.
pub mod engine;
