/// Questions posées à l'utilisateur sur le chemin statique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Question {
    /// Remplacer le fond transparent par du blanc opaque ?
    FlattenTransparency,
    /// Inverser l'image ?
    Invert,
}

impl Question {
    /// Text shown to the user.
    #[must_use]
    pub fn text(self) -> &'static str {
        match self {
            Self::FlattenTransparency => {
                "Do you want to make the transparent background white? (y/n)"
            }
            Self::Invert => "Invert the image? (y/n)",
        }
    }
}

/// Répond aux questions oui/non du pipeline.
///
/// Implémenté par : `StdinPrompter` (interactif), `FixedAnswers` (`--batch`).
///
/// # Example
/// ```
/// use rp_core::traits::{Prompter, Question};
///
/// struct AlwaysYes;
/// impl Prompter for AlwaysYes {
///     fn confirm(&mut self, _question: Question) -> bool { true }
/// }
/// assert!(AlwaysYes.confirm(Question::Invert));
/// ```
pub trait Prompter {
    /// `true` for "yes". Anything unreadable counts as "no".
    fn confirm(&mut self, question: Question) -> bool;
}

/// Affirmative token. Matched exactly, case-sensitive.
pub const AFFIRMATIVE: &str = "y";

/// Interpret one line of user input as a yes/no answer.
///
/// Only the trailing line terminator is removed before the comparison.
///
/// # Example
/// ```
/// use rp_core::traits::is_affirmative;
/// assert!(is_affirmative("y\n"));
/// assert!(!is_affirmative("Y"));
/// assert!(!is_affirmative("yes"));
/// ```
#[must_use]
pub fn is_affirmative(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == AFFIRMATIVE
}
