use std::fmt;

use crate::error::CoreError;

/// Grille d'intensités 8 bits, row-major, 1 byte par pixel.
///
/// Produite par la conversion en niveaux de gris, consommée par le resizer
/// puis le rasterizer. Chaque étape prend possession de la grille.
///
/// # Example
/// ```
/// use rp_core::frame::GrayGrid;
/// let grid = GrayGrid::new(10, 4);
/// assert_eq!(grid.data.len(), 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayGrid {
    /// Intensités [0, 255], row-major.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl GrayGrid {
    /// Crée une grille noire aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Grille uniforme de luminosité `value`.
    ///
    /// # Example
    /// ```
    /// use rp_core::frame::GrayGrid;
    /// let grid = GrayGrid::filled(3, 2, 200);
    /// assert!(grid.data.iter().all(|&v| v == 200));
    /// ```
    #[must_use]
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data.len() != width * height`.
    ///
    /// # Example
    /// ```
    /// use rp_core::frame::GrayGrid;
    /// assert!(GrayGrid::from_raw(2, 1, vec![0, 255]).is_ok());
    /// assert!(GrayGrid::from_raw(2, 2, vec![0, 255]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Intensité au pixel (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
            .unwrap_or(0)
    }

    /// One row of intensities.
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        self.data.get(start..start + w).unwrap_or(&[])
    }

    /// `true` if either dimension is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Inverse la luminosité en place (`255 - v`).
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = u8::MAX - *v;
        }
    }
}

/// Bloc de texte rendu : une ligne par rangée, `\n` en fin de chaque ligne.
///
/// Immutable une fois créé.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedFrame {
    text: String,
    width: u32,
    height: u32,
}

impl RenderedFrame {
    /// Wrap rasterized text. `width`/`height` are the grid dimensions it came from.
    #[must_use]
    pub fn new(text: String, width: u32, height: u32) -> Self {
        Self {
            text,
            width,
            height,
        }
    }

    /// The full text block, newline-terminated per row.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Lines without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Characters per line.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of lines.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for RenderedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Séquence ordonnée de frames rendues, append-only.
///
/// Construite par le séquenceur, lue seulement pendant l'animation.
///
/// # Example
/// ```
/// use rp_core::frame::{FrameSequence, RenderedFrame};
/// let mut seq = FrameSequence::default();
/// seq.push(RenderedFrame::new("#\n".into(), 1, 1));
/// assert_eq!(seq.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<RenderedFrame>,
}

impl FrameSequence {
    /// Empty sequence with room for `capacity` frames.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    /// Append a frame at the end.
    pub fn push(&mut self, frame: RenderedFrame) {
        self.frames.push(frame);
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if no frame was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, RenderedFrame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a RenderedFrame;
    type IntoIter = std::slice::Iter<'a, RenderedFrame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
