use rp_core::charset::Ramp;
use rp_core::frame::{GrayGrid, RenderedFrame};

/// Rasterise une grille en niveaux de gris : un glyphe par pixel.
///
/// Rows top to bottom, columns left to right, `\n` after every row.
/// The result has exactly `height` line breaks and `width` glyphs per line.
///
/// # Example
/// ```
/// use rp_core::charset::Ramp;
/// use rp_core::frame::GrayGrid;
/// use rp_ascii::luminance::rasterize;
///
/// let ramp = Ramp::new("#.").unwrap();
/// let grid = GrayGrid::from_raw(2, 1, vec![0, 255]).unwrap();
/// assert_eq!(rasterize(&grid, &ramp).as_str(), "#.\n");
/// ```
#[must_use]
pub fn rasterize(grid: &GrayGrid, ramp: &Ramp) -> RenderedFrame {
    let glyph_bytes = ramp.glyphs().iter().map(|c| c.len_utf8()).max().unwrap_or(1);
    let mut text =
        String::with_capacity((grid.width as usize * glyph_bytes + 1) * grid.height as usize);

    for y in 0..grid.height {
        text.extend(grid.row(y).iter().map(|&lum| ramp.map(lum)));
        text.push('\n');
    }

    RenderedFrame::new(text, grid.width, grid.height)
}

#[cfg(test)]
mod tests {
    use rp_core::charset::{BUILTIN_RAMPS, RAMP_COMPACT};

    use super::*;

    #[test]
    fn two_glyph_scenario() {
        let ramp = Ramp::new("#.").unwrap();
        let grid = GrayGrid::from_raw(2, 1, vec![0, 255]).unwrap();
        assert_eq!(rasterize(&grid, &ramp).as_str(), "#.\n");
    }

    #[test]
    fn line_count_and_width_match_the_grid() {
        let ramp = Ramp::new(RAMP_COMPACT).unwrap();
        let data: Vec<u8> = (0..7 * 5).map(|i| (i * 7) as u8).collect();
        let grid = GrayGrid::from_raw(7, 5, data).unwrap();
        let frame = rasterize(&grid, &ramp);
        assert_eq!(frame.as_str().matches('\n').count(), 5);
        assert!(frame.lines().all(|l| l.chars().count() == 7));
        assert_eq!((frame.width(), frame.height()), (7, 5));
    }

    #[test]
    fn uniform_grid_gives_identical_lines() {
        for charset in BUILTIN_RAMPS {
            let ramp = Ramp::new(charset).unwrap();
            for lum in [0u8, 17, 128, 200, 255] {
                let frame = rasterize(&GrayGrid::filled(6, 3, lum), &ramp);
                let expected: String = std::iter::repeat_n(ramp.map(lum), 6).collect();
                let lines: Vec<&str> = frame.lines().collect();
                assert_eq!(lines.len(), 3);
                assert!(lines.iter().all(|l| *l == expected));
            }
        }
    }

    #[test]
    fn multibyte_glyphs_keep_char_width() {
        let ramp = Ramp::new(" ░▒▓█").unwrap();
        let frame = rasterize(&GrayGrid::filled(4, 2, 255), &ramp);
        assert_eq!(frame.as_str(), "████\n████\n");
    }

    #[test]
    fn zero_width_grid_gives_empty_lines() {
        let ramp = Ramp::new("#.").unwrap();
        assert_eq!(rasterize(&GrayGrid::new(0, 3), &ramp).as_str(), "\n\n\n");
        assert_eq!(rasterize(&GrayGrid::new(0, 0), &ramp).as_str(), "");
    }
}
