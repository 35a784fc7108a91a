//! Interactive Confirmation
//!
//! Asks the operator on the terminal via dialoguer.

use dialoguer::Confirm as Prompt;

use crate::domain::ports::Confirm;

/// Terminal yes/no prompt defaulting to "no".
///
/// A prompt that cannot be shown (closed stdin, Ctrl+C) counts as "no".
pub struct DialoguerConfirm;

impl Confirm for DialoguerConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        Prompt::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
