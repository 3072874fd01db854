use crate::error::CoreError;

/// 16 caractères — compact, bon contraste. Index 0, défaut.
pub const RAMP_COMPACT: &str = "@&#BG5YJ?7!~^:. ";

/// 19 caractères — un peu plus de nuances que le compact.
pub const RAMP_STANDARD: &str = "@#&B0G5YJ?7*!~^:,. ";

/// 70 caractères — Paul Bourke, résolution maximale (dense→clair).
pub const RAMP_FULL: &str =
    "@#$%&8BMW*mwqpdbkhaoQ0OZXYUJCLtfjzxnuvcr][}{1)(|\\/?Il!i><+_-~;\":^,`'. ";

/// Built-in ramps, addressable by `charset_index`.
pub const BUILTIN_RAMPS: [&str; 3] = [RAMP_COMPACT, RAMP_STANDARD, RAMP_FULL];

/// Index of the glyph for `luminosity` in a ramp of `len` glyphs.
///
/// Linear buckets: `floor(luminosity / 255 * (len - 1))`, computed in
/// integers so 255 lands exactly on `len - 1`.
///
/// # Example
/// ```
/// use rp_core::charset::quantize_index;
/// assert_eq!(quantize_index(0, 16), 0);
/// assert_eq!(quantize_index(255, 16), 15);
/// assert_eq!(quantize_index(128, 2), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn quantize_index(luminosity: u8, len: usize) -> usize {
    let last = len.saturating_sub(1);
    (usize::from(luminosity) * last / 255).min(last)
}

/// Character ramp with a lookup table mapping luminance [0..255] → glyph.
///
/// Pre-computed once at configuration time for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use rp_core::charset::Ramp;
/// let ramp = Ramp::new("#.").unwrap();
/// assert_eq!(ramp.map(0), '#');
/// assert_eq!(ramp.map(255), '.');
/// ```
#[derive(Clone, Debug)]
pub struct Ramp {
    glyphs: Vec<char>,
    lut: [char; 256],
}

impl Ramp {
    /// Build a ramp from a charset ordered `ramp[0]` → `ramp[last]`.
    ///
    /// A single glyph is accepted; every luminance then maps to it.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the charset is empty.
    pub fn new(charset: &str) -> Result<Self, CoreError> {
        let glyphs: Vec<char> = charset.chars().collect();
        if glyphs.is_empty() {
            return Err(CoreError::Config("le charset ne peut pas être vide".into()));
        }
        if glyphs.len() == 1 {
            log::warn!("Charset d'un seul caractère : la quantification est dégénérée");
        }
        let mut lut = [glyphs[0]; 256];
        for (lum, slot) in (0..=u8::MAX).zip(lut.iter_mut()) {
            *slot = glyphs[quantize_index(lum, glyphs.len())];
        }
        Ok(Self { glyphs, lut })
    }

    /// One of the [`BUILTIN_RAMPS`].
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `index` is out of range.
    ///
    /// # Example
    /// ```
    /// use rp_core::charset::Ramp;
    /// assert_eq!(Ramp::builtin(2).unwrap().len(), 70);
    /// assert!(Ramp::builtin(3).is_err());
    /// ```
    pub fn builtin(index: usize) -> Result<Self, CoreError> {
        let charset = BUILTIN_RAMPS.get(index).ok_or_else(|| {
            CoreError::Config(format!(
                "charset_index {index} hors limites (0..{})",
                BUILTIN_RAMPS.len()
            ))
        })?;
        Self::new(charset)
    }

    /// Map a luminance value [0..255] to a glyph.
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[usize::from(luminance)]
    }

    /// Glyphs in ramp order.
    #[must_use]
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Number of glyphs. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; a ramp cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
