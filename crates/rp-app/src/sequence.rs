use image::{DynamicImage, RgbaImage};
use rp_core::charset::Ramp;
use rp_core::config::RenderConfig;
use rp_core::error::CoreError;
use rp_core::frame::FrameSequence;
use rp_source::image::to_gray;
use rp_source::resize::Resizer;

/// Rend chaque frame dans l'ordre de décodage.
///
/// Per frame: grayscale, resize with the animation settings (`invert` is
/// always `false` here), rasterize, append. No transparency flattening on
/// this path, no reordering, no deduplication.
///
/// # Errors
/// Returns an error if a frame cannot be resampled; nothing is returned then.
pub fn build_sequence(
    frames: Vec<RgbaImage>,
    config: &RenderConfig,
    ramp: &Ramp,
) -> Result<FrameSequence, CoreError> {
    let settings = config.animation_settings();
    let mut resizer = Resizer::new();
    let mut sequence = FrameSequence::with_capacity(frames.len());

    for (index, frame) in frames.into_iter().enumerate() {
        let grid = to_gray(DynamicImage::ImageRgba8(frame));
        let resized = resizer.resize(grid, &settings)?;
        log::trace!("Frame {index} : {}×{}", resized.width, resized.height);
        sequence.push(rp_ascii::rasterize(&resized, ramp));
    }

    log::info!("Séquence prête : {} frame(s)", sequence.len());
    Ok(sequence)
}
