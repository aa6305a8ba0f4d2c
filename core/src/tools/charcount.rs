//! Character statistics for pasted text.

pub const KEY: &str = "mini_tools_charcount_text_v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStats {
    /// Unicode scalar values, so an emoji counts once.
    pub chars: usize,
    pub chars_without_spaces: usize,
    /// Lines separated by `\n` or `\r\n`; empty text has none.
    pub lines: usize,
    /// `(limit, limit - chars)` for each configured limit. Negative when over.
    pub remaining: Vec<(u32, i64)>,
}

impl CharStats {
    pub fn measure(text: &str, limits: &[u32]) -> Self {
        let chars = text.chars().count();
        let chars_without_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
        let lines = if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        };

        let used = i64::try_from(chars).unwrap_or(i64::MAX);
        let remaining = limits
            .iter()
            .map(|limit| (*limit, i64::from(*limit) - used))
            .collect();

        Self {
            chars,
            chars_without_spaces,
            lines,
            remaining,
        }
    }

    pub fn over_limit(&self, limit: u32) -> bool {
        self.remaining
            .iter()
            .any(|(l, remaining)| *l == limit && *remaining < 0)
    }
}
