use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rp_core::config::RenderConfig;
use rp_core::frame::FrameSequence;

/// Message émis une fois toutes les passes terminées.
pub const COMPLETION_NOTICE: &str = "done!";

/// Lignes vides par défaut quand la taille du terminal est inconnue.
pub const FALLBACK_CLEAR_LINES: usize = 80;

/// Rejoue une séquence de frames à délai fixe.
///
/// Repeat count and delay are fixed at construction. No cancellation: the
/// loop runs to completion or until the process is killed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animator {
    repeat_count: u32,
    delay: Duration,
    clear_lines: usize,
}

impl Animator {
    /// Animator with explicit timing.
    #[must_use]
    pub fn new(repeat_count: u32, delay: Duration, clear_lines: usize) -> Self {
        Self {
            repeat_count,
            delay,
            clear_lines,
        }
    }

    /// Timing from the configuration. Without `clear_lines`, the terminal
    /// height is used, falling back to [`FALLBACK_CLEAR_LINES`].
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        let clear_lines = config.clear_lines.map_or_else(terminal_rows, usize::from);
        Self::new(
            config.animation_repeat,
            Duration::from_millis(config.frame_delay_ms),
            clear_lines,
        )
    }

    /// Passes over the sequence.
    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Pause after each frame.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Pour chaque passe, pour chaque frame : lignes vides, frame, pause.
    /// Puis un seul [`COMPLETION_NOTICE`].
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    pub fn play<W: Write>(&self, out: &mut W, sequence: &FrameSequence) -> io::Result<()> {
        let clear = "\n".repeat(self.clear_lines);
        for pass in 0..self.repeat_count {
            log::debug!("Passe {}/{}", pass + 1, self.repeat_count);
            for frame in sequence {
                write!(out, "{clear}{frame}")?;
                writeln!(out)?;
                out.flush()?;
                if !self.delay.is_zero() {
                    thread::sleep(self.delay);
                }
            }
        }
        writeln!(out, "{COMPLETION_NOTICE}")?;
        out.flush()
    }
}

fn terminal_rows() -> usize {
    match crossterm::terminal::size() {
        Ok((_, rows)) if rows > 0 => usize::from(rows),
        Ok(_) => FALLBACK_CLEAR_LINES,
        Err(e) => {
            log::debug!("Taille du terminal inconnue ({e}), {FALLBACK_CLEAR_LINES} lignes");
            FALLBACK_CLEAR_LINES
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use rp_core::frame::RenderedFrame;

    use super::*;

    fn two_frames() -> FrameSequence {
        let mut seq = FrameSequence::default();
        seq.push(RenderedFrame::new("f0\n".into(), 2, 1));
        seq.push(RenderedFrame::new("f1\n".into(), 2, 1));
        seq
    }

    fn printed(animator: &Animator, seq: &FrameSequence) -> String {
        let mut out = Vec::new();
        animator.play(&mut out, seq).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plays_every_frame_per_pass_then_one_notice() {
        let text = printed(&Animator::new(2, Duration::ZERO, 3), &two_frames());
        let shown: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(shown, ["f0", "f1", "f0", "f1", COMPLETION_NOTICE]);
        assert_eq!(text.matches(COMPLETION_NOTICE).count(), 1);
    }

    #[test]
    fn blank_lines_precede_each_frame() {
        let text = printed(&Animator::new(1, Duration::ZERO, 3), &two_frames());
        assert_eq!(text, "\n\n\nf0\n\n\n\n\nf1\n\ndone!\n");
    }

    #[test]
    fn zero_repeats_only_prints_the_notice() {
        let text = printed(&Animator::new(0, Duration::ZERO, 5), &two_frames());
        assert_eq!(text, "done!\n");
    }

    #[test]
    fn sleeps_between_frames() {
        let start = Instant::now();
        printed(&Animator::new(1, Duration::from_millis(15), 0), &two_frames());
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn from_config_uses_configured_timing() {
        let config = RenderConfig {
            animation_repeat: 5,
            frame_delay_ms: 40,
            clear_lines: Some(7),
            ..RenderConfig::default()
        };
        assert_eq!(
            Animator::from_config(&config),
            Animator::new(5, Duration::from_millis(40), 7)
        );
    }
}
