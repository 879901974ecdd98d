//! Confirmation prompts owned by the presentation layer

use std::io::{self, BufRead, Write};

/// Ask the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Prompt on stderr and read the answer from a line-based reader (stdin by default)
pub struct StdinConfirm<R: BufRead> {
    input: R,
}

impl StdinConfirm<io::StdinLock<'static>> {
    pub fn new() -> Self {
        StdinConfirm {
            input: io::stdin().lock(),
        }
    }
}

impl Default for StdinConfirm<io::StdinLock<'static>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead> StdinConfirm<R> {
    pub fn from_reader(input: R) -> Self {
        StdinConfirm { input }
    }
}

impl<R: BufRead> Confirm for StdinConfirm<R> {
    /// Only an explicit "y" or "yes" confirms; EOF declines
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut stderr = io::stderr();
        write!(stderr, "{} [y/N] ", question)?;
        stderr.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;

        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

/// Confirmation that always answers yes, for `--yes`
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}
