use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use rp_core::error::CoreError;

const TRANSPARENT_BLACK: Rgba<u8> = Rgba([0, 0, 0, 0]);
const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);
const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// `true` if the image carries an alpha channel whose minimum is below opaque.
///
/// Alpha is read at the image's native depth, so a 16-bit alpha of 65534
/// still counts. Declared but unused transparency is not visible here, see
/// [`declares_transparency`].
///
/// # Example
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
/// use rp_source::transparency::has_transparency;
///
/// let opaque = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
/// assert!(!has_transparency(&opaque));
/// let clear = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])));
/// assert!(has_transparency(&clear));
/// ```
#[must_use]
pub fn has_transparency(img: &DynamicImage) -> bool {
    if !img.color().has_alpha() {
        return false;
    }
    match img {
        DynamicImage::ImageRgba8(buf) => buf.pixels().any(|p| p[3] < u8::MAX),
        DynamicImage::ImageLumaA8(buf) => buf.pixels().any(|p| p[1] < u8::MAX),
        DynamicImage::ImageRgba16(buf) => buf.pixels().any(|p| p[3] < u16::MAX),
        DynamicImage::ImageLumaA16(buf) => buf.pixels().any(|p| p[1] < u16::MAX),
        DynamicImage::ImageRgba32F(buf) => buf.pixels().any(|p| p[3] < 1.0),
        other => other.to_rgba8().pixels().any(|p| p[3] < u8::MAX),
    }
}

/// Transparence déclarée par le format : chunk `tRNS` d'un PNG, index
/// transparent dans la première frame d'un GIF.
///
/// Vrai même si aucun pixel n'utilise la couleur clé. Un en-tête illisible
/// compte comme "rien de déclaré".
#[must_use]
pub fn declares_transparency(bytes: &[u8], format: ImageFormat) -> bool {
    let declared = match format {
        ImageFormat::Png => png_has_trns(bytes).map_err(|e| e.to_string()),
        ImageFormat::Gif => gif_has_transparent_index(bytes).map_err(|e| e.to_string()),
        _ => Ok(false),
    };
    declared.unwrap_or_else(|reason| {
        log::debug!("En-tête {format:?} illisible ({reason}), transparence ignorée");
        false
    })
}

fn png_has_trns(bytes: &[u8]) -> Result<bool, png::DecodingError> {
    let reader = png::Decoder::new(Cursor::new(bytes)).read_info()?;
    Ok(reader.info().trns.is_some())
}

fn gif_has_transparent_index(bytes: &[u8]) -> Result<bool, gif::DecodingError> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options.read_info(Cursor::new(bytes))?;
    Ok(decoder
        .next_frame_info()?
        .is_some_and(|frame| frame.transparent.is_some()))
}

/// Remplace les pixels transparents noirs ou blancs par du blanc opaque.
///
/// Règle étroite : seuls `(0,0,0,0)` et `(255,255,255,0)` changent, pas de
/// composition alpha. O(largeur × hauteur). En cas d'échec de conversion,
/// l'image d'origine est rendue telle quelle.
///
/// # Example
/// ```
/// use image::{DynamicImage, Rgba, RgbaImage};
/// use rp_source::transparency::flatten_to_opaque;
///
/// let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])));
/// let flat = flatten_to_opaque(img).to_rgba8();
/// assert_eq!(flat.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
/// ```
#[must_use]
pub fn flatten_to_opaque(img: DynamicImage) -> DynamicImage {
    match try_flatten(&img) {
        Ok(flat) => DynamicImage::ImageRgba8(flat),
        Err(e) => {
            log::warn!("{e}, on continue avec la transparence noire");
            img
        }
    }
}

fn try_flatten(img: &DynamicImage) -> Result<RgbaImage, CoreError> {
    let (width, height) = (img.width(), img.height());
    let mut raw = img.to_rgba8().into_raw();
    for px in raw.chunks_exact_mut(4) {
        let current = Rgba([px[0], px[1], px[2], px[3]]);
        if current == TRANSPARENT_BLACK || current == TRANSPARENT_WHITE {
            px.copy_from_slice(&OPAQUE_WHITE.0);
        }
    }
    RgbaImage::from_raw(width, height, raw).ok_or_else(|| {
        CoreError::Transparency(format!("buffer RGBA incohérent pour {width}×{height}"))
    })
}
