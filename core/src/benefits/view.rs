//! Filtering, sorting and summary counts for the benefit list.
//!
//! Everything here is a pure function of the item list, the query and the
//! current local date.

use super::collate;
use crate::types::BenefitItem;
use crate::types::date::{first_of_next_month, same_month};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Date scope of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    /// Expiring in the current calendar month. Undated items excluded.
    #[serde(rename = "this-month")]
    ThisMonth,
    /// Expiring on or after the first day of next month. Undated items excluded.
    #[serde(rename = "later")]
    Later,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::ThisMonth => "this-month",
            Tab::Later => "later",
            Tab::All => "all",
        }
    }

    /// Text shown when the tab has nothing to list.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Tab::ThisMonth => "今月の期限はありません",
            Tab::Later => "今後の期限（来月以降）はありません",
            Tab::All => "まだデータがありません",
        }
    }

    fn contains(&self, item: &BenefitItem, today: NaiveDate) -> bool {
        match self {
            Tab::ThisMonth => item.expires_on.is_some_and(|d| same_month(d, today)),
            Tab::Later => item
                .expires_on
                .is_some_and(|d| d >= first_of_next_month(today)),
            Tab::All => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Nearest expiry first; undated items last, by company.
    #[default]
    #[serde(rename = "expiry")]
    ExpiryAsc,
    #[serde(rename = "company")]
    CompanyAsc,
    /// Newest first.
    #[serde(rename = "created")]
    CreatedDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::ExpiryAsc => "expiry",
            SortKey::CompanyAsc => "company",
            SortKey::CreatedDesc => "created",
        }
    }

    fn compare(&self, a: &BenefitItem, b: &BenefitItem) -> Ordering {
        match self {
            SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
            SortKey::CompanyAsc => collate::compare(&a.company, &b.company),
            SortKey::ExpiryAsc => match (a.expires_on, b.expires_on) {
                (Some(x), Some(y)) => x
                    .cmp(&y)
                    .then_with(|| collate::compare(&a.company, &b.company)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => collate::compare(&a.company, &b.company),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Tab {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this-month" => Ok(Tab::ThisMonth),
            "later" => Ok(Tab::Later),
            "all" => Ok(Tab::All),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expiry" => Ok(SortKey::ExpiryAsc),
            "company" => Ok(SortKey::CompanyAsc),
            "created" => Ok(SortKey::CreatedDesc),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI filter and sort state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewQuery {
    /// Case-insensitive substring over title, company and memo.
    pub query: String,
    pub tab: Tab,
    pub show_used: bool,
    pub sort: SortKey,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            tab: Tab::All,
            show_used: true,
            sort: SortKey::ExpiryAsc,
        }
    }
}

fn matches_text(item: &BenefitItem, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    format!("{} {} {}", item.title, item.company, item.memo)
        .to_lowercase()
        .contains(needle)
}

/// Filters then sorts `items` for display. The input is never reordered.
///
/// Filters apply in order: used visibility, free text, tab scope.
pub fn derive_view<'a>(
    items: &'a [BenefitItem],
    query: &ViewQuery,
    today: NaiveDate,
) -> Vec<&'a BenefitItem> {
    let needle = query.query.trim().to_lowercase();

    let mut view: Vec<&BenefitItem> = items
        .iter()
        .filter(|item| query.show_used || !item.is_used)
        .filter(|item| matches_text(item, &needle))
        .filter(|item| query.tab.contains(item, today))
        .collect();

    // Stable: equal keys keep list order.
    view.sort_by(|a, b| query.sort.compare(a, b));
    view
}

/// Unused-item counts per tab, for the tab badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabCounts {
    pub this_month: usize,
    pub later: usize,
    pub all: usize,
}

impl TabCounts {
    pub fn get(&self, tab: Tab) -> usize {
        match tab {
            Tab::ThisMonth => self.this_month,
            Tab::Later => self.later,
            Tab::All => self.all,
        }
    }
}

pub fn tab_counts(items: &[BenefitItem], today: NaiveDate) -> TabCounts {
    let count = |tab: Tab| {
        items
            .iter()
            .filter(|item| !item.is_used && tab.contains(item, today))
            .count()
    };

    TabCounts {
        this_month: count(Tab::ThisMonth),
        later: count(Tab::Later),
        all: count(Tab::All),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Muted,
    Warn,
    Danger,
}

/// Urgency marker shown next to a dated item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DueBadge {
    Expired,
    DueToday,
    DueSoon { days: i64 },
    Dated,
}

impl DueBadge {
    /// `None` for undated items.
    pub fn for_date(
        expires_on: Option<NaiveDate>,
        today: NaiveDate,
        due_soon_days: u32,
    ) -> Option<Self> {
        let days = (expires_on? - today).num_days();
        Some(match days {
            d if d < 0 => DueBadge::Expired,
            0 => DueBadge::DueToday,
            d if d <= i64::from(due_soon_days) => DueBadge::DueSoon { days: d },
            _ => DueBadge::Dated,
        })
    }

    pub fn label(&self) -> String {
        match self {
            DueBadge::Expired => "期限切れ".to_string(),
            DueBadge::DueToday => "今日まで".to_string(),
            DueBadge::DueSoon { days } => format!("あと{days}日"),
            DueBadge::Dated => "期限あり".to_string(),
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            DueBadge::Expired | DueBadge::DueToday => Tone::Danger,
            DueBadge::DueSoon { .. } => Tone::Warn,
            DueBadge::Dated => Tone::Muted,
        }
    }
}
