use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use rp_core::charset::Ramp;
use rp_core::config::RenderSettings;
use rp_core::error::CoreError;
use rp_core::frame::RenderedFrame;
use rp_source::image::to_gray;
use rp_source::resize::Resizer;

/// Chemin statique : niveaux de gris → resize → rasterisation.
///
/// La transparence est traitée avant, par l'appelant.
///
/// # Errors
/// Returns an error if the resampler rejects the dimensions.
pub fn render_static(
    img: DynamicImage,
    settings: &RenderSettings,
    ramp: &Ramp,
    resizer: &mut Resizer,
) -> Result<RenderedFrame, CoreError> {
    let grid = to_gray(img);
    let resized = resizer.resize(grid, settings)?;
    Ok(rp_ascii::rasterize(&resized, ramp))
}

/// Write the rendered text verbatim. Creates or overwrites `path`.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn save_render(frame: &RenderedFrame, path: &Path) -> Result<()> {
    std::fs::write(path, frame.as_str())
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Rendu sauvegardé dans {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    fn settings(invert: bool) -> RenderSettings {
        RenderSettings {
            max_box: (8, 4),
            compensation: (1.0, 1.0),
            multiplier: 1.0,
            invert,
        }
    }

    fn white(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([255])))
    }

    #[test]
    fn white_image_renders_densest_glyph_by_default() {
        let ramp = Ramp::new("#.").unwrap();
        let frame =
            render_static(white(8, 4), &settings(false), &ramp, &mut Resizer::new()).unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 4));
        assert!(frame.lines().all(|l| l == "########"));
    }

    #[test]
    fn invert_answer_cancels_the_pre_inversion() {
        let ramp = Ramp::new("#.").unwrap();
        let frame =
            render_static(white(8, 4), &settings(true), &ramp, &mut Resizer::new()).unwrap();
        assert!(frame.lines().all(|l| l == "........"));
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        std::fs::write(&path, "old content that is longer").unwrap();
        let frame = RenderedFrame::new("#.\n.#\n".into(), 2, 2);
        save_render(&frame, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "#.\n.#\n");
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let frame = RenderedFrame::new("#\n".into(), 1, 1);
        assert!(save_render(&frame, Path::new("/no/such/dir/out.txt")).is_err());
    }
}
