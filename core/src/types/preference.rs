use std::fmt;

/// Layout the benefit list was last shown in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Cards,
    Table,
}

impl ViewMode {
    pub const KEY: &'static str = "mini-tools:benefits:viewMode";

    /// Reads a stored preference. Unknown strings mean "no preference".
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "cards" => Some(ViewMode::Cards),
            "table" => Some(ViewMode::Table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
