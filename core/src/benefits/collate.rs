//! Name ordering close to Japanese locale collation.
//!
//! Case and full-width/half-width ASCII differences are ignored, and hiragana
//! sorts together with the corresponding katakana. Strings equal under that
//! folding fall back to code-point order so the ordering stays total.

use std::cmp::Ordering;

fn fold(c: char) -> char {
    let code = c as u32;
    let folded = match code {
        // ぁ..ゖ → ァ..ヶ
        0x3041..=0x3096 => code + 0x60,
        // ！..～ → !..~
        0xFF01..=0xFF5E => code - 0xFEE0,
        _ => code,
    };
    char::from_u32(folded).unwrap_or(c)
}

fn key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().map(fold).flat_map(char::to_lowercase)
}

pub fn compare(a: &str, b: &str) -> Ordering {
    key(a).cmp(key(b)).then_with(|| a.cmp(b))
}
