use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat, RgbaImage};
use rp_core::error::CoreError;
use rp_core::frame::GrayGrid;

use crate::transparency::declares_transparency;

/// Extensions qui annoncent un format multi-frame.
pub const MULTI_FRAME_EXTENSIONS: &[&str] = &["gif"];

/// Image décodée : une seule frame, ou une séquence.
///
/// Le pipeline fait un `match` sur cette union plutôt que de sonder l'objet.
pub enum SourceImage {
    /// Image fixe (ou GIF d'une seule frame).
    Static {
        /// Pixels décodés.
        image: DynamicImage,
        /// Transparence annoncée par l'en-tête, utilisée ou non.
        declared_transparency: bool,
    },
    /// Frames RGBA composées, dans l'ordre de décodage.
    MultiFrame(Vec<RgbaImage>),
}

impl SourceImage {
    /// Number of frames: 1 for a still image.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Static { .. } => 1,
            Self::MultiFrame(frames) => frames.len(),
        }
    }

    /// Pixel dimensions of the first frame.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Static { image, .. } => (image.width(), image.height()),
            Self::MultiFrame(frames) => frames.first().map_or((0, 0), RgbaImage::dimensions),
        }
    }
}

/// Chemin de rendu choisi pour une entrée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Rendu unique, avec questions transparence/inversion.
    Static,
    /// Séquence de frames rejouée dans le terminal.
    Animated,
}

/// Lowercased extension of a path or URL, ignoring any query or fragment.
///
/// # Example
/// ```
/// use rp_source::image::extension_of;
/// assert_eq!(extension_of("cat.GIF").as_deref(), Some("gif"));
/// assert_eq!(extension_of("https://x.org/a/b.gif?s=2").as_deref(), Some("gif"));
/// assert_eq!(extension_of("noext"), None);
/// ```
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    let path_part = name.split(['?', '#']).next().unwrap_or(name);
    Path::new(path_part)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

/// Animated iff the extension names a multi-frame format AND there is more
/// than one frame.
///
/// # Example
/// ```
/// use rp_source::image::{classify, Route};
/// assert_eq!(classify("photo.png", 1), Route::Static);
/// assert_eq!(classify("anim.gif", 12), Route::Animated);
/// assert_eq!(classify("anim.gif", 1), Route::Static);
/// ```
#[must_use]
pub fn classify(name: &str, frame_count: usize) -> Route {
    let multi_frame_ext = extension_of(name)
        .is_some_and(|ext| MULTI_FRAME_EXTENSIONS.contains(&ext.as_str()));
    if multi_frame_ext && frame_count > 1 {
        Route::Animated
    } else {
        Route::Static
    }
}

fn decode_error(name: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::Decode {
        source_name: name.to_string(),
        reason: err.to_string(),
    }
}

/// Decode in-memory bytes. `name` is the path or URL they came from and is
/// only used for the extension check and error messages.
///
/// # Errors
/// Returns [`CoreError::Decode`] if the bytes are not a supported image.
pub fn decode_bytes(bytes: &[u8], name: &str) -> Result<SourceImage, CoreError> {
    let format = image::guess_format(bytes).map_err(|e| decode_error(name, e))?;
    let declared_transparency = declares_transparency(bytes, format);

    if format == ImageFormat::Gif && extension_of(name).is_some_and(|e| e == "gif") {
        let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| decode_error(name, e))?;
        let frames: Vec<RgbaImage> = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| decode_error(name, e))?
            .into_iter()
            .map(image::Frame::into_buffer)
            .collect();
        log::debug!("{name} : {} frame(s) GIF", frames.len());

        match classify(name, frames.len()) {
            Route::Animated => return Ok(SourceImage::MultiFrame(frames)),
            Route::Static => {
                if let Some(first) = frames.into_iter().next() {
                    return Ok(SourceImage::Static {
                        image: DynamicImage::ImageRgba8(first),
                        declared_transparency,
                    });
                }
            }
        }
    }

    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| decode_error(name, e))?;
    Ok(SourceImage::Static {
        image,
        declared_transparency,
    })
}

/// Lit et décode un fichier local.
///
/// # Errors
/// Returns [`CoreError::Io`] if the file cannot be read, or
/// [`CoreError::Decode`] if it is not a supported image.
///
/// # Example
/// ```no_run
/// use rp_source::image::load_local;
/// use std::path::Path;
/// let img = load_local(Path::new("cat.gif")).unwrap();
/// ```
pub fn load_local(path: &Path) -> Result<SourceImage, CoreError> {
    let bytes = std::fs::read(path).map_err(|source| CoreError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_bytes(&bytes, &path.to_string_lossy())
}

/// Conversion en niveaux de gris (canal alpha ignoré).
#[must_use]
pub fn to_gray(img: DynamicImage) -> GrayGrid {
    let luma = img.into_luma8();
    let (width, height) = luma.dimensions();
    GrayGrid {
        data: luma.into_raw(),
        width,
        height,
    }
}
