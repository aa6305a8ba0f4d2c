use minitools_core::confirm::Confirm;
use std::io::{self, BufRead, IsTerminal, Write};

/// Asks `y/N` on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy)]
pub struct StdinConfirm {
    assume_yes: bool,
}

impl StdinConfirm {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Fails when a prompt could not be answered: stdin already carried the
    /// command's input, or is not a terminal at all.
    pub fn ensure_answerable(&self, stdin_consumed: bool) -> anyhow::Result<()> {
        check_answerable(self.assume_yes, stdin_consumed, io::stdin().is_terminal())
    }
}

fn check_answerable(
    assume_yes: bool,
    stdin_consumed: bool,
    stdin_is_terminal: bool,
) -> anyhow::Result<()> {
    if assume_yes || (stdin_is_terminal && !stdin_consumed) {
        return Ok(());
    }
    anyhow::bail!("cannot ask for confirmation without an interactive stdin; pass --yes to proceed")
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{prompt} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
