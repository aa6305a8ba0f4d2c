//! `minitools benefits …`

use super::{now, today};
use crate::Context;
use crate::output::{render, render_message};
use anyhow::{Context as _, bail};
use clap::{Args, Subcommand};
use minitools_core::BenefitBook;
use minitools_core::benefits::{Draft, DueBadge, ImportMode, SortKey, Tab, ViewQuery, transfer};
use minitools_core::confirm::Outcome;
use minitools_core::types::{BenefitItem, ItemId, ViewMode};
use serde_json::json;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum BenefitsCommand {
    /// List benefits, nearest expiry first by default.
    List(ListArgs),
    /// Add a benefit.
    Add(FieldArgs),
    /// Change fields of an existing benefit.
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Flip the used flag.
    Toggle { id: String },
    /// Delete one benefit.
    Rm { id: String },
    /// Delete every benefit.
    Clear,
    /// Write the list as JSON.
    Export {
        /// Output file. `-` or omitted prints to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Save as benefits_YYYY-MM-DD.json in the current directory.
        #[arg(long, conflicts_with = "out")]
        save: bool,
    },
    /// Read a JSON array from a file or stdin.
    Import {
        /// Input file. `-` or omitted reads stdin.
        file: Option<PathBuf>,
        /// Merge by id instead of replacing the whole list.
        #[arg(long)]
        merge: bool,
    },
    /// Show or set the preferred layout (`cards` or `table`).
    ViewMode { mode: Option<String> },
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Free-text filter over title, company and memo.
    #[arg(short, long, default_value = "")]
    query: String,
    /// this-month, later or all. Defaults to the configured tab.
    #[arg(long)]
    tab: Option<Tab>,
    /// expiry, company or created. Defaults to the configured sort.
    #[arg(long)]
    sort: Option<SortKey>,
    /// Hide used benefits.
    #[arg(long)]
    hide_used: bool,
}

#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    /// YYYY-MM-DD, or an empty string for no expiry.
    #[arg(long)]
    expires: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    amount: Option<String>,
    #[arg(long)]
    memo: Option<String>,
    #[arg(long)]
    used: Option<bool>,
}

impl FieldArgs {
    fn apply(&self, draft: &mut Draft) {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(value) = value {
                target.clone_from(value);
            }
        };
        set(&mut draft.title, &self.title);
        set(&mut draft.company, &self.company);
        set(&mut draft.expires_on, &self.expires);
        set(&mut draft.quantity, &self.quantity);
        set(&mut draft.amount_yen, &self.amount);
        set(&mut draft.memo, &self.memo);
        if let Some(used) = self.used {
            draft.is_used = used;
        }
    }
}

fn parse_id(id: &str) -> anyhow::Result<ItemId> {
    ItemId::try_new(id.to_string()).with_context(|| format!("invalid id: {id:?}"))
}

fn outcome_message(outcome: Outcome, applied: &str) -> &str {
    match outcome {
        Outcome::Applied => applied,
        Outcome::Declined => "キャンセルしました",
    }
}

fn format_yen(amount: Option<f64>) -> String {
    amount
        .map(|n| format!("¥{}", minitools_core::tools::total::format_grouped(n)))
        .unwrap_or_default()
}

fn write_row(
    w: &mut dyn Write,
    item: &BenefitItem,
    badge: Option<DueBadge>,
) -> io::Result<()> {
    let expiry = item
        .expires_on
        .map(|d| d.to_string())
        .unwrap_or_else(|| "期限なし".to_string());
    let badge = badge.map(|b| format!("[{}]", b.label())).unwrap_or_default();
    let used = if item.is_used { "✓" } else { " " };

    writeln!(
        w,
        "{used} {expiry:<10} {badge:<10} {company} / {title} {amount}  ({id})",
        company = item.company,
        title = item.title,
        amount = format_yen(item.amount_yen),
        id = item.id,
    )
}

pub fn run(command: BenefitsCommand, ctx: &Context) -> anyhow::Result<()> {
    let book = BenefitBook::open(ctx.backend.clone(), now())?;
    ctx.track("benefits", "open");

    match command {
        BenefitsCommand::List(args) => list(&book, &args, ctx),
        BenefitsCommand::Add(fields) => {
            let mut draft = Draft::new();
            fields.apply(&mut draft);
            save(&book, &draft, ctx)
        }
        BenefitsCommand::Edit { id, fields } => {
            let id = parse_id(&id)?;
            let Some(item) = book.get(&id) else {
                bail!("benefit not found: {id}");
            };
            let mut draft = Draft::from_item(&item);
            fields.apply(&mut draft);
            save(&book, &draft, ctx)
        }
        BenefitsCommand::Toggle { id } => {
            let id = parse_id(&id)?;
            let is_used = book.toggle_used(&id, now())?;
            ctx.track("benefits", "toggle_used");
            let message = if is_used { "使用済みにしました" } else { "未使用に戻しました" };
            render_message(ctx.output, message, json!({ "id": id, "isUsed": is_used }))
        }
        BenefitsCommand::Rm { id } => {
            let id = parse_id(&id)?;
            let outcome = book.remove(&id, &ctx.confirm)?;
            let message = outcome_message(outcome, "削除しました");
            render_message(
                ctx.output,
                message,
                json!({ "id": id, "removed": outcome == Outcome::Applied }),
            )
        }
        BenefitsCommand::Clear => {
            let outcome = book.clear(&ctx.confirm)?;
            let message = outcome_message(outcome, "全データを削除しました");
            render_message(
                ctx.output,
                message,
                json!({ "cleared": outcome == Outcome::Applied }),
            )
        }
        BenefitsCommand::Export { out, save } => {
            let text = book.export()?;
            ctx.track("benefits", "export");
            let path = if save {
                Some(PathBuf::from(transfer::export_file_name(today())))
            } else {
                out.filter(|p| p.as_os_str() != "-")
            };
            match path {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    render_message(
                        ctx.output,
                        &format!("書き出しました: {}", path.display()),
                        json!({ "path": path }),
                    )
                }
                None => {
                    println!("{text}");
                    Ok(())
                }
            }
        }
        BenefitsCommand::Import { file, merge } => {
            let (text, from_stdin) = match file.filter(|p| p.as_os_str() != "-") {
                Some(path) => (
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?,
                    false,
                ),
                None => {
                    let mut text = String::new();
                    io::stdin().read_to_string(&mut text)?;
                    (text, true)
                }
            };
            let mode = if merge {
                ImportMode::Merge
            } else {
                ImportMode::Replace
            };
            if mode == ImportMode::Replace {
                ctx.confirm
                    .ensure_answerable(from_stdin)
                    .context("replace import needs confirmation")?;
            }
            let outcome = book.import(&text, mode, &ctx.confirm, now())?;
            ctx.track("benefits", "import");
            let message = outcome_message(outcome, "読み込みました");
            render_message(
                ctx.output,
                message,
                json!({ "imported": outcome == Outcome::Applied, "count": book.items().len() }),
            )
        }
        BenefitsCommand::ViewMode { mode } => match mode {
            None => {
                let mode = book.view_mode();
                let label = mode.map(|m| m.as_str()).unwrap_or("(未設定)");
                render_message(ctx.output, label, json!({ "viewMode": mode.map(|m| m.as_str()) }))
            }
            Some(raw) => {
                let Some(mode) = ViewMode::from_stored(&raw) else {
                    bail!("view mode must be `cards` or `table`, got {raw:?}");
                };
                book.set_view_mode(mode)?;
                render_message(ctx.output, mode.as_str(), json!({ "viewMode": mode.as_str() }))
            }
        },
    }
}

fn save(
    book: &BenefitBook<minitools_core::DiskBackend>,
    draft: &Draft,
    ctx: &Context,
) -> anyhow::Result<()> {
    let committed = book.save_draft(draft, now())?;
    ctx.track("benefits", "save");
    render_message(
        ctx.output,
        committed.message(),
        json!({ "id": committed.id(), "message": committed.message() }),
    )
}

fn list(
    book: &BenefitBook<minitools_core::DiskBackend>,
    args: &ListArgs,
    ctx: &Context,
) -> anyhow::Result<()> {
    let today = today();
    let query = ViewQuery {
        query: args.query.clone(),
        tab: args.tab.unwrap_or(ctx.settings.expiry.default_tab),
        show_used: !args.hide_used,
        sort: args.sort.unwrap_or(ctx.settings.expiry.default_sort),
    };
    let items = book.view(&query, today);
    let counts = book.counts(today);
    let due_soon_days = ctx.settings.expiry.due_soon_days;

    let value = json!({
        "tab": query.tab,
        "counts": {
            "thisMonth": counts.this_month,
            "later": counts.later,
            "all": counts.all,
        },
        "items": items,
    });

    render(ctx.output, &value, |w| {
        writeln!(
            w,
            "今月 {} / 来月以降 {} / すべて {}",
            counts.this_month, counts.later, counts.all
        )?;
        if items.is_empty() {
            return writeln!(w, "{}", query.tab.empty_message());
        }
        for item in &items {
            let badge = DueBadge::for_date(item.expires_on, today, due_soon_days);
            write_row(w, item, badge)?;
        }
        Ok(())
    })
}
