use std::io::{self, BufRead, Write};

use rp_core::traits::{Prompter, Question, is_affirmative};

/// Question posée au démarrage quand aucune entrée n'est passée en argument.
pub const INPUT_QUESTION: &str = "Drag and drop the image or write the image path";

/// Prompter interactif : affiche la question, lit une ligne.
pub struct StdinPrompter<R, W> {
    input: R,
    output: W,
}

impl StdinPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin/stdout.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinPrompter<R, W> {
    /// Prompter over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, text: &str) -> io::Result<String> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line)
    }

    /// Ask for the image path or URL. Returns the raw line.
    ///
    /// # Errors
    /// Returns an error if stdin cannot be read or is closed.
    pub fn ask_input(&mut self) -> io::Result<String> {
        let line = self.ask(INPUT_QUESTION)?;
        if line.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "aucune entrée fournie",
            ));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for StdinPrompter<R, W> {
    fn confirm(&mut self, question: Question) -> bool {
        match self.ask(question.text()) {
            Ok(line) => is_affirmative(&line),
            Err(e) => {
                log::warn!("Lecture de la réponse impossible ({e}), réponse « non »");
                false
            }
        }
    }
}

/// Réponses fixées à l'avance (`--batch`).
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedAnswers {
    /// Answer to [`Question::FlattenTransparency`].
    pub flatten: bool,
    /// Answer to [`Question::Invert`].
    pub invert: bool,
}

impl Prompter for FixedAnswers {
    fn confirm(&mut self, question: Question) -> bool {
        match question {
            Question::FlattenTransparency => self.flatten,
            Question::Invert => self.invert,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn only_lowercase_y_is_yes() {
        for (answer, expected) in [("y\n", true), ("Y\n", false), ("yes\n", false), ("\n", false)] {
            let mut out = Vec::new();
            let mut p = StdinPrompter::new(Cursor::new(answer), &mut out);
            assert_eq!(p.confirm(Question::Invert), expected, "answer {answer:?}");
        }
    }

    #[test]
    fn question_text_is_displayed() {
        let mut out = Vec::new();
        StdinPrompter::new(Cursor::new("n\n"), &mut out).confirm(Question::FlattenTransparency);
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("transparent background white"));
    }

    #[test]
    fn closed_stdin_counts_as_no() {
        let mut p = StdinPrompter::new(Cursor::new(""), Vec::new());
        assert!(!p.confirm(Question::Invert));
    }

    #[test]
    fn ask_input_returns_raw_line() {
        let mut p = StdinPrompter::new(Cursor::new("my cat.png\n"), Vec::new());
        assert_eq!(p.ask_input().unwrap(), "my cat.png\n");
        let mut closed = StdinPrompter::new(Cursor::new(""), Vec::new());
        assert!(closed.ask_input().is_err());
    }

    #[test]
    fn fixed_answers_follow_flags() {
        let mut answers = FixedAnswers {
            flatten: true,
            invert: false,
        };
        assert!(answers.confirm(Question::FlattenTransparency));
        assert!(!answers.confirm(Question::Invert));
    }
}
