//! `minitools total` and `minitools charcount`

use crate::Context;
use crate::output::render;
use anyhow::Context as _;
use clap::Args;
use minitools_core::tools::charcount::{self, CharStats};
use minitools_core::tools::{TextPad, total};
use serde_json::json;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TextArgs {
    /// Replace the saved text with this file's contents (`-` for stdin).
    /// Without it the previously saved text is used.
    input: Option<PathBuf>,

    /// Forget the saved text.
    #[arg(long, conflicts_with = "input")]
    clear: bool,
}

/// Applies `--clear` or a new input to the pad and returns the current text.
fn current_text(pad: &TextPad<minitools_core::DiskBackend>, args: &TextArgs) -> anyhow::Result<String> {
    if args.clear {
        pad.clear()?;
        return Ok(String::new());
    }

    let Some(input) = &args.input else {
        return Ok(pad.load());
    };

    let text = if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };
    pad.save(&text)?;
    Ok(text)
}

pub fn run_total(args: &TextArgs, ctx: &Context) -> anyhow::Result<()> {
    let pad = TextPad::new(ctx.backend.clone(), total::KEY);
    let text = current_text(&pad, args)?;
    ctx.track("total", "open");

    let numbers = total::parse_numbers(&text);
    let sum = total::sum(&numbers);

    render(ctx.output, &json!({ "count": numbers.len(), "total": sum }), |w| {
        writeln!(w, "入力された数値：{}件", numbers.len())?;
        writeln!(w, "合計：{}", total::format_grouped(sum))
    })
}

pub fn run_charcount(args: &TextArgs, ctx: &Context) -> anyhow::Result<()> {
    let pad = TextPad::new(ctx.backend.clone(), charcount::KEY);
    let text = current_text(&pad, args)?;
    ctx.track("charcount", "open");

    let stats = CharStats::measure(&text, &ctx.settings.charcount.limits);
    let remaining: Vec<_> = stats
        .remaining
        .iter()
        .map(|(limit, left)| json!({ "limit": limit, "remaining": left }))
        .collect();

    let value = json!({
        "chars": stats.chars,
        "charsWithoutSpaces": stats.chars_without_spaces,
        "lines": stats.lines,
        "remaining": remaining,
    });

    render(ctx.output, &value, |w| {
        writeln!(w, "文字数：{}", stats.chars)?;
        writeln!(w, "空白・改行を除く：{}", stats.chars_without_spaces)?;
        writeln!(w, "行数：{}", stats.lines)?;
        for (limit, left) in &stats.remaining {
            let status = if *left < 0 { "オーバーしています" } else { "OK" };
            writeln!(w, "{limit}字 残り：{left} {status}")?;
        }
        Ok(())
    })
}
