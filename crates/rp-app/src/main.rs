use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use rp_core::config::RenderConfig;

pub mod animate;
pub mod cli;
pub mod pipeline;
pub mod prompt;
pub mod render;
pub mod sequence;

use animate::Animator;
use pipeline::{Driver, Outcome};
use prompt::{FixedAnswers, StdinPrompter};

fn main() -> ExitCode {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Toute erreur s'arrête ici : message simple, pas de panique.
    match run(&cli) {
        Ok(outcome) => {
            log::info!("Terminé : {outcome:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &cli::Cli) -> Result<Outcome> {
    // Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(cli)?;
    cli.apply_overrides(&mut config)?;

    let mut prompter = StdinPrompter::stdio();
    let raw_input = match cli.input {
        Some(ref input) => input.clone(),
        None => prompter
            .ask_input()
            .context("Lecture du chemin de l'image impossible")?,
    };

    let animator = Animator::from_config(&config);
    let stdout = io::stdout().lock();
    if cli.batch {
        let answers = FixedAnswers {
            flatten: cli.flatten,
            invert: cli.invert,
        };
        Driver::new(&config, answers, stdout, animator)?.run(&raw_input)
    } else {
        Driver::new(&config, prompter, stdout, animator)?.run(&raw_input)
    }
}

/// Config file if present, defaults otherwise.
fn resolve_config(cli: &cli::Cli) -> Result<RenderConfig> {
    if cli.config.exists() {
        rp_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(RenderConfig::default())
    }
}
