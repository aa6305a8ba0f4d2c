//! Populates a minitools database with sample data for trying out the CLI.
//!
//! Run with: `cargo run -q --example seed_data -p minitools_core -- <data-dir>`
//! then `minitools --data-dir <data-dir> benefits list`.

use chrono::{Days, Local, Utc};
use minitools_core::benefits::Draft;
use minitools_core::memo::MemoDraft;
use minitools_core::storage::Backend;
use minitools_core::types::{Config, TagId};
use minitools_core::{BenefitBook, DiskBackend, MemoBook};
use std::path::PathBuf;

fn main() {
    let base_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("minitools-demo"));
    println!("Using data path: {}", base_path.display());

    let backend =
        DiskBackend::open(&Config { base_path }).expect("Failed to open minitools database");

    println!("\n[Legacy Data]");
    seed_legacy(&backend);

    println!("\n[Benefits]");
    seed_benefits(&backend);

    println!("\n[Memo]");
    seed_memo(&backend);
}

/// An old-shape list that the tracker folds in on first open.
fn seed_legacy(backend: &DiskBackend) {
    let legacy = r#"[
        {"id": "legacy-1", "name": "お食事券", "issuer": "すかいらーく", "expiresAt": "2026-09-30T14:59:59.000Z", "amount": "¥3,000", "note": "家族で使う"},
        {"name": "カタログギフト", "issuer": "オリックス", "used": true}
    ]"#;
    match backend.set("benefits-tracker-items", legacy) {
        Ok(()) => println!("  Wrote benefits-tracker-items"),
        Err(e) => println!("  Skipped legacy data ({e})"),
    }
}

fn seed_benefits(backend: &DiskBackend) {
    let now = Utc::now();
    let today = Local::now().date_naive();
    let book = BenefitBook::open(backend.clone(), now).expect("Failed to open benefit list");

    let samples = [
        ("QUOカード", "ビックカメラ", today.checked_add_days(Days::new(3))),
        ("優待券", "イオン", today.checked_add_days(Days::new(20))),
        ("割引券", "KDDI", today.checked_add_days(Days::new(60))),
        ("お米券", "ヤマダHD", None),
    ];

    for (title, company, expires_on) in samples {
        let draft = Draft {
            title: title.to_string(),
            company: company.to_string(),
            expires_on: expires_on.map(|d| d.to_string()).unwrap_or_default(),
            ..Draft::new()
        };
        match book.save_draft(&draft, now) {
            Ok(committed) => println!("  Created: {title} ({})", committed.id()),
            Err(e) => println!("  Skipped {title} ({e})"),
        }
    }

    println!("\nBenefit list now has {} items", book.items().len());
}

fn seed_memo(backend: &DiskBackend) {
    let now = Utc::now();
    let book = MemoBook::open(backend.clone(), now).expect("Failed to open memo notebook");

    let samples: [(&str, &[u8], &[&str]); 3] = [
        ("オリックス", &[3, 9], &["must", "one_share"]),
        ("KDDI", &[3, 9], &["early"]),
        ("イオン", &[2, 8], &["tenure"]),
    ];

    for (name, months, tags) in samples {
        let mut draft = MemoDraft {
            name: name.to_string(),
            ..MemoDraft::new()
        };
        for month in months {
            draft.toggle_month(*month);
        }
        for tag in tags {
            let id = TagId::try_new((*tag).to_string()).expect("Invalid tag id");
            draft.toggle_tag(&id);
        }
        match book.save_draft(&draft, now) {
            Ok(_) => println!("  Created: {name}"),
            Err(e) => println!("  Skipped {name} ({e})"),
        }
    }
}
