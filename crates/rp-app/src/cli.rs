use std::path::PathBuf;

use clap::Parser;
use rp_core::config::RenderConfig;

/// rampart — image and GIF to ASCII art in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Chemin de l'image ou URL HTTP(S). Demandé interactivement si absent.
    pub input: Option<String>,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Écrire le rendu statique dans le fichier de sortie configuré.
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Fichier de sortie (implique --save).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ramp built-in : 0 (16 glyphes), 1 (19), 2 (70).
    #[arg(long)]
    pub charset_index: Option<usize>,

    /// Pas de questions : --invert et --flatten donnent les réponses.
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// Réponse "oui" à "Invert the image?" en mode --batch.
    #[arg(long, default_value_t = false, requires = "batch")]
    pub invert: bool,

    /// Réponse "oui" au remplacement du fond transparent en mode --batch.
    #[arg(long, default_value_t = false, requires = "batch")]
    pub flatten: bool,

    /// Nombre de passes de l'animation.
    #[arg(long)]
    pub repeat: Option<u32>,

    /// Délai entre frames, en millisecondes.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    ///
    /// # Errors
    /// Returns an error if `--charset-index` is out of range.
    pub fn apply_overrides(&self, config: &mut RenderConfig) -> anyhow::Result<()> {
        if let Some(index) = self.charset_index {
            config.select_builtin_charset(index)?;
        }
        if let Some(repeat) = self.repeat {
            config.animation_repeat = repeat;
        }
        if let Some(delay) = self.delay_ms {
            config.frame_delay_ms = delay;
        }
        if let Some(ref path) = self.output {
            config.output_path.clone_from(path);
            config.save_output = true;
        }
        if self.save {
            config.save_output = true;
        }
        config.clamp_all();
        Ok(())
    }
}
