//! `minitools memo …` and `minitools tag …`

use super::now;
use crate::Context;
use crate::output::{render, render_message};
use anyhow::Context as _;
use clap::{Args, Subcommand};
use minitools_core::MemoBook;
use minitools_core::confirm::Outcome;
use minitools_core::memo::{MemoDraft, MemoFilter};
use minitools_core::types::{ItemId, Priority, TagId};
use serde_json::json;

#[derive(Subcommand, Debug)]
pub enum MemoCommand {
    /// List notes, most recently updated first.
    List {
        #[arg(short, long, default_value = "")]
        query: String,
        /// Only notes with this record month (1-12).
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,
        /// Only notes with this tag id.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Add a note, or replace one with `--id`.
    Add(MemoArgs),
    /// Delete a note.
    Rm { id: String },
}

#[derive(Args, Debug)]
pub struct MemoArgs {
    /// Existing note to overwrite.
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    name: String,
    #[arg(long)]
    code: Option<String>,
    /// Record month; repeat for several.
    #[arg(long = "month", required = true, value_parser = clap::value_parser!(u8).range(1..=12))]
    months: Vec<u8>,
    /// Tag id; repeat for several.
    #[arg(long = "tag")]
    tags: Vec<String>,
    #[arg(long)]
    entry_timing: Option<String>,
    #[arg(long)]
    tenure_rule: Option<String>,
    #[arg(long)]
    one_share: bool,
    /// 1 to 3 stars.
    #[arg(long, default_value_t = 2)]
    priority: u8,
    #[arg(long, default_value = "")]
    memo: String,
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    List,
    Add { name: String },
    Rename { id: String, name: String },
    Rm { id: String },
}

fn item_id(id: &str) -> anyhow::Result<ItemId> {
    ItemId::try_new(id.to_string()).with_context(|| format!("invalid id: {id:?}"))
}

fn tag_id(id: &str) -> anyhow::Result<TagId> {
    TagId::try_new(id.to_string()).with_context(|| format!("invalid tag id: {id:?}"))
}

impl MemoArgs {
    fn draft(&self) -> anyhow::Result<MemoDraft> {
        let mut draft = MemoDraft {
            id: self.id.as_deref().map(item_id).transpose()?,
            name: self.name.clone(),
            code: self.code.clone().unwrap_or_default(),
            entry_timing: self.entry_timing.clone().unwrap_or_default(),
            tenure_rule: self.tenure_rule.clone().unwrap_or_default(),
            one_share_hold: self.one_share,
            priority: Priority::try_from(self.priority).map_err(anyhow::Error::msg)?,
            memo: self.memo.clone(),
            ..MemoDraft::new()
        };
        for month in &self.months {
            if !draft.months.contains(month) {
                draft.toggle_month(*month);
            }
        }
        for tag in &self.tags {
            let id = tag_id(tag)?;
            if !draft.tag_ids.contains(&id) {
                draft.toggle_tag(&id);
            }
        }
        Ok(draft)
    }
}

pub fn run_memo(command: MemoCommand, ctx: &Context) -> anyhow::Result<()> {
    let book = MemoBook::open(ctx.backend.clone(), now())?;
    ctx.track("memo", "open");

    match command {
        MemoCommand::List { query, month, tag } => {
            let filter = MemoFilter {
                query,
                month,
                tag: tag.as_deref().map(tag_id).transpose()?,
            };
            let items = book.filter(&filter);

            render(ctx.output, &json!(items), |w| {
                if items.is_empty() {
                    return writeln!(w, "メモはありません");
                }
                for item in &items {
                    let months = item
                        .months
                        .iter()
                        .map(|m| format!("{m}月"))
                        .collect::<Vec<_>>()
                        .join("・");
                    let tags = item
                        .tag_ids
                        .iter()
                        .map(|id| format!("#{}", book.tag_name(id)))
                        .collect::<Vec<_>>()
                        .join(" ");
                    writeln!(
                        w,
                        "{} {}{} [{months}] {tags}  ({})",
                        item.priority,
                        item.name,
                        item.code.as_deref().map(|c| format!("（{c}）")).unwrap_or_default(),
                        item.id,
                    )?;
                }
                Ok(())
            })
        }
        MemoCommand::Add(args) => {
            let committed = book.save_draft(&args.draft()?, now())?;
            ctx.track("memo", "save");
            render_message(
                ctx.output,
                committed.message(),
                json!({ "id": committed.id(), "message": committed.message() }),
            )
        }
        MemoCommand::Rm { id } => {
            let id = item_id(&id)?;
            let outcome = book.remove(&id, &ctx.confirm)?;
            let message = match outcome {
                Outcome::Applied => "削除しました",
                Outcome::Declined => "キャンセルしました",
            };
            render_message(
                ctx.output,
                message,
                json!({ "id": id, "removed": outcome == Outcome::Applied }),
            )
        }
    }
}

pub fn run_tag(command: TagCommand, ctx: &Context) -> anyhow::Result<()> {
    let book = MemoBook::open(ctx.backend.clone(), now())?;

    match command {
        TagCommand::List => {
            let tags = book.tags();
            render(ctx.output, &json!(*tags), |w| {
                for tag in tags.iter() {
                    writeln!(w, "{:<12} {}", tag.id.to_string(), tag.name)?;
                }
                Ok(())
            })
        }
        TagCommand::Add { name } => match book.add_tag(&name, now())? {
            Some(id) => render_message(ctx.output, &format!("追加しました: {id}"), json!({ "id": id })),
            None => anyhow::bail!("tag name must not be blank"),
        },
        TagCommand::Rename { id, name } => {
            let id = tag_id(&id)?;
            if !book.rename_tag(&id, &name)? {
                anyhow::bail!("tag name must not be blank");
            }
            render_message(ctx.output, "更新しました", json!({ "id": id, "name": name.trim() }))
        }
        TagCommand::Rm { id } => {
            let id = tag_id(&id)?;
            let outcome = book.delete_tag(&id, &ctx.confirm)?;
            let message = match outcome {
                Outcome::Applied => "削除しました",
                Outcome::Declined => "キャンセルしました",
            };
            render_message(
                ctx.output,
                message,
                json!({ "id": id, "removed": outcome == Outcome::Applied }),
            )
        }
    }
}
