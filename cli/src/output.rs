//! Human or JSON rendering shared by every command.

use serde_json::Value;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Writes `value` as JSON, or calls `human` with stdout.
pub fn render(
    mode: OutputMode,
    value: &Value,
    human: impl FnOnce(&mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut w, value)?;
        writeln!(w)?;
    } else {
        human(&mut w)?;
    }
    Ok(())
}

/// A one-line status message, e.g. after a mutation.
pub fn render_message(mode: OutputMode, message: &str, value: Value) -> anyhow::Result<()> {
    render(mode, &value, |w| writeln!(w, "{message}"))
}
