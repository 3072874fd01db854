/// Configuration, types, and shared structures for rampart.
///
/// This crate contains the sample grid, rendered frame and ramp types,
/// the configuration layer, and the error type used across the workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::Ramp;
pub use config::{RenderConfig, RenderSettings};
pub use error::CoreError;
pub use frame::{FrameSequence, GrayGrid, RenderedFrame};
