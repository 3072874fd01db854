use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{DynamicImage, RgbaImage};
use rp_core::charset::Ramp;
use rp_core::config::RenderConfig;
use rp_core::error::CoreError;
use rp_core::traits::{Prompter, Question};
use rp_source::image::{SourceImage, load_local};
use rp_source::resize::Resizer;
use rp_source::transparency::{flatten_to_opaque, has_transparency};

use crate::animate::Animator;
use crate::render::{render_static, save_render};
use crate::sequence::build_sequence;

/// Ce que l'exécution a produit.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// One text block printed, optionally saved.
    Static {
        /// Output file, if the save variant was used.
        saved_to: Option<PathBuf>,
    },
    /// A sequence was played.
    Animated {
        /// Number of frames in the sequence.
        frames: usize,
    },
}

/// Nettoie la ligne saisie : supprime tous les espaces (les chemins qui en
/// contiennent ne sont pas supportés) et une paire de guillemets autour.
#[must_use]
pub fn normalize_input(raw: &str) -> String {
    let compact: String = raw
        .trim_end_matches(['\r', '\n'])
        .chars()
        .filter(|&c| c != ' ')
        .collect();
    for quote in ['"', '\''] {
        if let Some(inner) = compact
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    compact
}

/// Résolution de l'entrée en deux étapes explicites : fichier local, puis
/// URL si l'entrée en a l'air.
///
/// # Errors
/// Returns the local error when the input is not a URL, or the URL error
/// when the remote attempt fails too.
pub fn resolve_input(input: &str) -> Result<SourceImage, CoreError> {
    match load_local(Path::new(input)) {
        Ok(img) => {
            log::info!("{input} : fichier local");
            Ok(img)
        }
        Err(local_err) => fallback_to_url(input, local_err),
    }
}

#[cfg(feature = "url-source")]
fn fallback_to_url(input: &str, local_err: CoreError) -> Result<SourceImage, CoreError> {
    if rp_source::fetch::is_url(input) {
        log::info!("{input} : pas un fichier local ({local_err}), tentative en URL");
        rp_source::fetch::fetch_image(input)
    } else {
        Err(local_err)
    }
}

#[cfg(not(feature = "url-source"))]
fn fallback_to_url(_input: &str, local_err: CoreError) -> Result<SourceImage, CoreError> {
    Err(local_err)
}

/// Pilote une exécution : résolution, classification, puis chemin statique
/// ou animé.
pub struct Driver<'a, P, W> {
    config: &'a RenderConfig,
    ramp: Ramp,
    prompter: P,
    out: W,
    animator: Animator,
    resizer: Resizer,
}

impl<'a, P: Prompter, W: Write> Driver<'a, P, W> {
    /// Build a driver.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the configured charset is empty.
    pub fn new(
        config: &'a RenderConfig,
        prompter: P,
        out: W,
        animator: Animator,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            config,
            ramp: config.ramp()?,
            prompter,
            out,
            animator,
            resizer: Resizer::new(),
        })
    }

    /// Run the whole pipeline on one raw input line.
    ///
    /// Nothing is written to the output if resolution or rendering fails.
    ///
    /// # Errors
    /// Returns an error if the input cannot be decoded locally or remotely,
    /// or if rendering, printing or saving fails.
    pub fn run(&mut self, raw_input: &str) -> Result<Outcome> {
        let input = normalize_input(raw_input);
        let image = resolve_input(&input)?;
        match image {
            SourceImage::Static {
                image,
                declared_transparency,
            } => self.run_static(image, declared_transparency),
            SourceImage::MultiFrame(frames) => self.run_animated(frames),
        }
    }

    fn run_static(&mut self, img: DynamicImage, declared_transparency: bool) -> Result<Outcome> {
        log::info!("Chemin statique ({}×{})", img.width(), img.height());
        let transparent = declared_transparency || has_transparency(&img);
        let img = if transparent && self.prompter.confirm(Question::FlattenTransparency)
        {
            flatten_to_opaque(img)
        } else {
            img
        };
        let invert = self.prompter.confirm(Question::Invert);
        let settings = self.config.static_settings(invert);
        let frame = render_static(img, &settings, &self.ramp, &mut self.resizer)?;

        // Fichier d'abord : un échec de sauvegarde ne laisse rien à l'écran.
        let saved_to = if self.config.save_output {
            save_render(&frame, &self.config.output_path)?;
            Some(self.config.output_path.clone())
        } else {
            None
        };

        writeln!(self.out, "{frame}").context("Écriture sur la sortie impossible")?;
        self.out.flush()?;
        Ok(Outcome::Static { saved_to })
    }

    fn run_animated(&mut self, frames: Vec<RgbaImage>) -> Result<Outcome> {
        log::info!(
            "Chemin animé : {} frames, {} passe(s), {:?} entre frames",
            frames.len(),
            self.animator.repeat_count(),
            self.animator.delay()
        );
        let sequence = build_sequence(frames, self.config, &self.ramp)?;
        self.animator
            .play(&mut self.out, &sequence)
            .context("Écriture de l'animation impossible")?;
        Ok(Outcome::Animated {
            frames: sequence.len(),
        })
    }
}
