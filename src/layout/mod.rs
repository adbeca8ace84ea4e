/// Greedy character-granularity caption wrapping.
pub mod wrap;
