//! The two single-text tools: a number summer and a character counter.

pub mod charcount;
mod pad;
pub mod total;

pub use pad::TextPad;
