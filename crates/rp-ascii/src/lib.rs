/// ASCII conversion engine for rampart.
///
/// Converts grayscale sample grids to text blocks.
pub mod luminance;

pub use luminance::rasterize;
