use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{BUILTIN_RAMPS, Ramp};
use crate::error::CoreError;

/// Configuration complète d'une exécution.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine,
/// calquée sur l'outil d'origine.
///
/// # Example
/// ```
/// use rp_core::config::RenderConfig;
/// let config = RenderConfig::default();
/// assert_eq!(config.animation_repeat, 3);
/// assert_eq!(config.frame_delay_ms, 100);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct RenderConfig {
    // === Rendu ===
    /// Ramp, du glyphe le plus dense au plus clair.
    pub charset: String,
    /// Index du ramp actif parmi les presets built-in.
    pub charset_index: usize,
    /// Compensation horizontale de la cellule (chemin statique).
    pub cell_compensation_x: f64,
    /// Compensation verticale de la cellule (chemin statique).
    pub cell_compensation_y: f64,
    /// Multiplicateur de résolution, appliqué aux deux axes.
    pub resolution_multiplier: f64,
    /// Largeur de la boîte englobante, en cellules.
    pub max_width: u32,
    /// Hauteur de la boîte englobante, en cellules.
    pub max_height: u32,

    // === Animation ===
    /// Compensation horizontale sur le chemin animé.
    pub anim_compensation_x: f64,
    /// Compensation verticale sur le chemin animé.
    pub anim_compensation_y: f64,
    /// Nombre de passes complètes sur la séquence.
    pub animation_repeat: u32,
    /// Délai entre deux frames, en millisecondes.
    pub frame_delay_ms: u64,
    /// Lignes vides émises avant chaque frame. `None` = hauteur du terminal.
    pub clear_lines: Option<u16>,

    // === Sortie ===
    /// Fichier texte pour la variante "save".
    pub output_path: PathBuf,
    /// Écrire le rendu statique dans `output_path`.
    pub save_output: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            charset: crate::charset::RAMP_COMPACT.to_string(),
            charset_index: 0,
            cell_compensation_x: 2.0,
            cell_compensation_y: 1.0,
            resolution_multiplier: 4.0,
            max_width: 104,
            max_height: 55,
            anim_compensation_x: 1.9,
            anim_compensation_y: 1.0,
            animation_repeat: 3,
            frame_delay_ms: 100,
            clear_lines: None,
            output_path: PathBuf::from("output.txt"),
            save_output: false,
        }
    }
}

/// Paramètres d'un rendu : boîte, compensation, multiplicateur, inversion.
///
/// Immutable pendant une exécution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Bounding box (width, height) in character cells.
    pub max_box: (u32, u32),
    /// Character cell compensation (x, y).
    pub compensation: (f64, f64),
    /// Resolution multiplier.
    pub multiplier: f64,
    /// Skip the resizer's pre-inversion.
    pub invert: bool,
}

impl RenderConfig {
    /// Settings for the static path, with the user's `invert` answer.
    ///
    /// # Example
    /// ```
    /// use rp_core::config::RenderConfig;
    /// let s = RenderConfig::default().static_settings(true);
    /// assert_eq!(s.compensation, (2.0, 1.0));
    /// assert!(s.invert);
    /// ```
    #[must_use]
    pub fn static_settings(&self, invert: bool) -> RenderSettings {
        RenderSettings {
            max_box: (self.max_width, self.max_height),
            compensation: (self.cell_compensation_x, self.cell_compensation_y),
            multiplier: self.resolution_multiplier,
            invert,
        }
    }

    /// Settings for the animation path. `invert` is always `false` there.
    #[must_use]
    pub fn animation_settings(&self) -> RenderSettings {
        RenderSettings {
            max_box: (self.max_width, self.max_height),
            compensation: (self.anim_compensation_x, self.anim_compensation_y),
            multiplier: self.resolution_multiplier,
            invert: false,
        }
    }

    /// Build the configured ramp.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the charset is empty.
    pub fn ramp(&self) -> Result<Ramp, CoreError> {
        Ramp::new(&self.charset)
    }

    /// Select one of the built-in ramps by index.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if `index` is out of range.
    pub fn select_builtin_charset(&mut self, index: usize) -> Result<(), CoreError> {
        let charset = BUILTIN_RAMPS.get(index).ok_or_else(|| {
            CoreError::Config(format!("charset_index {index} hors limites"))
        })?;
        self.charset = (*charset).to_string();
        self.charset_index = index;
        Ok(())
    }

    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.cell_compensation_x = self.cell_compensation_x.clamp(0.1, 10.0);
        self.cell_compensation_y = self.cell_compensation_y.clamp(0.1, 10.0);
        self.anim_compensation_x = self.anim_compensation_x.clamp(0.1, 10.0);
        self.anim_compensation_y = self.anim_compensation_y.clamp(0.1, 10.0);
        self.resolution_multiplier = self.resolution_multiplier.clamp(0.1, 16.0);
        self.max_width = self.max_width.clamp(1, 4096);
        self.max_height = self.max_height.clamp(1, 4096);
        self.frame_delay_ms = self.frame_delay_ms.min(60_000);
        self.charset_index = self.charset_index.min(BUILTIN_RAMPS.len() - 1);
        if self.charset.is_empty() {
            log::warn!("Charset vide, retour au preset {}", self.charset_index);
            self.charset = BUILTIN_RAMPS[self.charset_index].to_string();
        }
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    render: Option<RenderSection>,
    animation: Option<AnimationSection>,
    output: Option<OutputSection>,
}

/// Render section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct RenderSection {
    charset: Option<String>,
    charset_index: Option<usize>,
    cell_compensation_x: Option<f64>,
    cell_compensation_y: Option<f64>,
    resolution_multiplier: Option<f64>,
    max_width: Option<u32>,
    max_height: Option<u32>,
}

#[derive(Deserialize)]
struct AnimationSection {
    cell_compensation_x: Option<f64>,
    cell_compensation_y: Option<f64>,
    repeat: Option<u32>,
    frame_delay_ms: Option<u64>,
    clear_lines: Option<u16>,
}

#[derive(Deserialize)]
struct OutputSection {
    path: Option<PathBuf>,
    save: Option<bool>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// An explicit `charset` wins over `charset_index`.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use rp_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema.
///
/// # Example
/// ```
/// use rp_core::config::parse_config;
/// let config = parse_config("[animation]\nrepeat = 1").unwrap();
/// assert_eq!(config.animation_repeat, 1);
/// ```
pub fn parse_config(content: &str) -> Result<RenderConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RenderConfig::default();

    if let Some(r) = file.render {
        if let Some(v) = r.charset_index {
            if let Err(e) = config.select_builtin_charset(v) {
                log::warn!("{e}, preset par défaut conservé");
            }
        }
        if let Some(v) = r.charset {
            config.charset = v;
        }
        if let Some(v) = r.cell_compensation_x {
            config.cell_compensation_x = v;
        }
        if let Some(v) = r.cell_compensation_y {
            config.cell_compensation_y = v;
        }
        if let Some(v) = r.resolution_multiplier {
            config.resolution_multiplier = v;
        }
        if let Some(v) = r.max_width {
            config.max_width = v;
        }
        if let Some(v) = r.max_height {
            config.max_height = v;
        }
    }

    if let Some(a) = file.animation {
        if let Some(v) = a.cell_compensation_x {
            config.anim_compensation_x = v;
        }
        if let Some(v) = a.cell_compensation_y {
            config.anim_compensation_y = v;
        }
        if let Some(v) = a.repeat {
            config.animation_repeat = v;
        }
        if let Some(v) = a.frame_delay_ms {
            config.frame_delay_ms = v;
        }
        if a.clear_lines.is_some() {
            config.clear_lines = a.clear_lines;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.path {
            config.output_path = v;
        }
        if let Some(v) = o.save {
            config.save_output = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn partial_sections_override_only_their_fields() {
        let config = parse_config(
            "[render]\nresolution_multiplier = 1.5\n\n[output]\npath = \"art.txt\"\nsave = true\n",
        )
        .unwrap();
        assert!((config.resolution_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.output_path, PathBuf::from("art.txt"));
        assert!(config.save_output);
        assert_eq!(config.max_width, 104);
        assert_eq!(config.animation_repeat, 3);
    }

    #[test]
    fn charset_index_selects_builtin() {
        let config = parse_config("[render]\ncharset_index = 2\n").unwrap();
        assert_eq!(config.charset, BUILTIN_RAMPS[2]);
        assert_eq!(config.charset_index, 2);
    }

    #[test]
    fn explicit_charset_wins_over_index() {
        let config = parse_config("[render]\ncharset_index = 1\ncharset = \"#.\"\n").unwrap();
        assert_eq!(config.charset, "#.");
    }

    #[test]
    fn out_of_range_index_keeps_default() {
        let config = parse_config("[render]\ncharset_index = 9\n").unwrap();
        assert_eq!(config.charset, BUILTIN_RAMPS[0]);
    }

    #[test]
    fn values_are_clamped() {
        let config = parse_config(
            "[render]\nresolution_multiplier = -3.0\nmax_width = 0\ncharset = \"\"\n",
        )
        .unwrap();
        assert!(config.resolution_multiplier > 0.0);
        assert_eq!(config.max_width, 1);
        assert!(!config.charset.is_empty());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[render\ncharset = 3").is_err());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[animation]\nrepeat = 7\nframe_delay_ms = 40\nclear_lines = 12").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.animation_repeat, 7);
        assert_eq!(config.frame_delay_ms, 40);
        assert_eq!(config.clear_lines, Some(12));
    }

    #[test]
    fn load_config_missing_file_is_an_error() {
        assert!(load_config(Path::new("/definitely/not/here.toml")).is_err());
    }

    #[test]
    fn animation_settings_never_invert() {
        let s = RenderConfig::default().animation_settings();
        assert!(!s.invert);
        assert_eq!(s.compensation, (1.9, 1.0));
        assert_eq!(s.max_box, (104, 55));
    }
}
