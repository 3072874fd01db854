use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use rp_core::config::RenderSettings;
use rp_core::error::CoreError;
use rp_core::frame::GrayGrid;

/// Résolution cible en cellules, ratio préservé dans la boîte englobante.
///
/// `ratio = min(W / w, H / h)`, puis chaque axe est multiplié par sa
/// compensation et par le multiplicateur, tronqué vers zéro.
/// A zero-sized source gives `(0, 0)`.
///
/// # Example
/// ```
/// use rp_source::resize::target_resolution;
/// // 200×100 in a 100×100 box: ratio 0.5, then x doubled for the cell.
/// assert_eq!(target_resolution((200, 100), (100, 100), (2.0, 1.0), 1.0), (200, 50));
/// assert_eq!(target_resolution((0, 10), (100, 100), (2.0, 1.0), 1.0), (0, 0));
/// ```
#[must_use]
pub fn target_resolution(
    size: (u32, u32),
    max_box: (u32, u32),
    compensation: (f64, f64),
    multiplier: f64,
) -> (u32, u32) {
    let (width, height) = size;
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let ratio = (f64::from(max_box.0) / w).min(f64::from(max_box.1) / h);
    let target_w = w * ratio * compensation.0 * multiplier;
    let target_h = h * ratio * compensation.1 * multiplier;
    // `as` sature : NaN → 0, négatif → 0.
    (target_w as u32, target_h as u32)
}

/// Resizer réutilisable wrappant fast_image_resize, filtre Lanczos3.
///
/// # Example
/// ```
/// use rp_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
        }
    }

    /// Pré-inverse (sauf si `settings.invert`) puis rééchantillonne `grid`
    /// à la résolution cible.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if the buffer does not match
    /// its dimensions or the resampler rejects them.
    ///
    /// # Example
    /// ```
    /// use rp_core::config::RenderConfig;
    /// use rp_core::frame::GrayGrid;
    /// use rp_source::resize::Resizer;
    ///
    /// let settings = RenderConfig::default().static_settings(true);
    /// let out = Resizer::new().resize(GrayGrid::filled(20, 10, 0), &settings).unwrap();
    /// assert_eq!((out.width, out.height), (832, 208));
    /// ```
    pub fn resize(
        &mut self,
        mut grid: GrayGrid,
        settings: &RenderSettings,
    ) -> Result<GrayGrid, CoreError> {
        let (target_w, target_h) = target_resolution(
            (grid.width, grid.height),
            settings.max_box,
            settings.compensation,
            settings.multiplier,
        );
        log::debug!(
            "Resize {}×{} → {target_w}×{target_h}",
            grid.width,
            grid.height
        );

        if !settings.invert {
            grid.invert();
        }

        if target_w == 0 || target_h == 0 {
            return Ok(GrayGrid::new(target_w, target_h));
        }
        if (grid.width, grid.height) == (target_w, target_h) {
            return Ok(grid);
        }

        let invalid_src = CoreError::InvalidDimensions {
            width: grid.width,
            height: grid.height,
        };
        let src_image = Image::from_vec_u8(grid.width, grid.height, grid.data, PixelType::U8)
            .map_err(|_| invalid_src)?;
        let mut dst_image = Image::new(target_w, target_h, PixelType::U8);

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .map_err(|_| CoreError::InvalidDimensions {
                width: target_w,
                height: target_h,
            })?;

        GrayGrid::from_raw(target_w, target_h, dst_image.into_vec())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage.
///
/// # Errors
/// Returns an error if the resize operation fails.
pub fn resize_grid(grid: GrayGrid, settings: &RenderSettings) -> Result<GrayGrid, CoreError> {
    Resizer::new().resize(grid, settings)
}

#[cfg(test)]
mod tests {
    use rp_core::config::RenderConfig;

    use super::*;

    fn settings(
        max_box: (u32, u32),
        compensation: (f64, f64),
        multiplier: f64,
        invert: bool,
    ) -> RenderSettings {
        RenderSettings {
            max_box,
            compensation,
            multiplier,
            invert,
        }
    }

    #[test]
    fn aspect_ratio_is_preserved_within_truncation() {
        let sizes = [(640, 480), (100, 300), (1920, 1080), (33, 7), (1, 1)];
        let boxes = [(104, 55), (80, 24), (10, 10), (300, 40)];
        for &(w, h) in &sizes {
            for &max_box in &boxes {
                let (cx, cy) = (1.9f64, 1.0f64);
                let (tw, th) = target_resolution((w, h), max_box, (cx, cy), 1.0);
                if tw < 2 || th < 2 {
                    continue;
                }
                let expected = (f64::from(w) * cx) / (f64::from(h) * cy);
                let lo = f64::from(tw) / f64::from(th + 1);
                let hi = f64::from(tw + 1) / f64::from(th);
                assert!(
                    lo <= expected && expected <= hi,
                    "{w}×{h} in {max_box:?} → {tw}×{th}, expected ratio {expected}"
                );
            }
        }
    }

    #[test]
    fn default_animation_settings_keep_whole_products() {
        let s = RenderConfig::default().animation_settings();
        assert_eq!(s.compensation, (1.9, 1.0));
        assert_eq!(
            target_resolution((200, 110), s.max_box, s.compensation, s.multiplier),
            (760, 220)
        );
        assert_eq!(
            target_resolution((100, 100), s.max_box, s.compensation, s.multiplier),
            (418, 220)
        );
    }

    #[test]
    fn fits_the_box_without_compensation() {
        let (tw, th) = target_resolution((400, 200), (104, 55), (1.0, 1.0), 1.0);
        assert!(tw <= 104 && th <= 55);
        assert_eq!(tw, 104);
    }

    #[test]
    fn multiplier_scales_both_axes() {
        let base = target_resolution((100, 100), (50, 50), (1.0, 1.0), 1.0);
        let doubled = target_resolution((100, 100), (50, 50), (1.0, 1.0), 2.0);
        assert_eq!(base, (50, 50));
        assert_eq!(doubled, (100, 100));
    }

    #[test]
    fn default_invert_pre_inverts_luminosity() {
        let s = settings((4, 4), (1.0, 1.0), 1.0, false);
        let out = resize_grid(GrayGrid::filled(4, 4, 0), &s).unwrap();
        assert_eq!((out.width, out.height), (4, 4));
        assert!(out.data.iter().all(|&v| v == 255));
    }

    #[test]
    fn invert_true_keeps_literal_luminosity() {
        let s = settings((4, 4), (1.0, 1.0), 1.0, true);
        let out = resize_grid(GrayGrid::filled(4, 4, 30), &s).unwrap();
        assert!(out.data.iter().all(|&v| v == 30));
    }

    #[test]
    fn uniform_grid_stays_uniform_after_resampling() {
        let s = settings((10, 10), (2.0, 1.0), 1.0, true);
        let out = resize_grid(GrayGrid::filled(20, 20, 200), &s).unwrap();
        assert_eq!((out.width, out.height), (20, 10));
        assert!(out.data.iter().all(|&v| v.abs_diff(200) <= 1));
    }

    #[test]
    fn zero_sized_input_gives_zero_sized_output() {
        let s = settings((104, 55), (2.0, 1.0), 4.0, false);
        let out = resize_grid(GrayGrid::new(0, 0), &s).unwrap();
        assert!(out.is_empty());
        assert!(out.data.is_empty());
    }

    #[test]
    fn tiny_target_collapses_to_zero_width() {
        let s = settings((1, 1), (0.1, 1.0), 1.0, false);
        let out = resize_grid(GrayGrid::filled(5, 5, 9), &s).unwrap();
        assert_eq!(out.width, 0);
    }
}
