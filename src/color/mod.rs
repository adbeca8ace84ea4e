/// Center-region sampling and caption color recommendation.
pub mod analyze;
/// HSL color model and hex conversions.
pub mod model;
