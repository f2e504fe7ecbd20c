// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::{
    cli,
    commands::{categories, doctor},
    errors::TrackerError,
    models::{Settings, Transaction, DEFAULT_CATEGORIES},
    session::Session,
    store::{Store, UserId},
};
use rust_decimal::Decimal;
use std::path::Path;
use tempfile::tempdir;

fn open(dir: &Path, user: &str) -> Session {
    Session::open(Store::open(Some(dir.to_path_buf())).unwrap(), user).unwrap()
}

fn add_category(session: &mut Session, name: &str) -> anyhow::Result<()> {
    let matches =
        cli::build_cli().get_matches_from(["fintrack", "--user", "dave", "category", "add", name]);
    if let Some(("category", cat_m)) = matches.subcommand() {
        categories::handle(session, cat_m)
    } else {
        panic!("no category subcommand");
    }
}

#[test]
fn missing_settings_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let session = open(dir.path(), "dave");
    assert_eq!(session.settings(), &Settings::default());
    assert_eq!(session.settings().categories, DEFAULT_CATEGORIES.to_vec());
    assert!(!dir.path().join("dave_settings.json").exists());
}

#[test]
fn category_added_once_despite_whitespace() {
    let dir = tempdir().unwrap();
    let mut session = open(dir.path(), "dave");
    add_category(&mut session, "Travel").unwrap();

    let err = session.add_category("  Travel ").unwrap_err();
    assert!(matches!(err, TrackerError::CategoryExists(ref c) if c == "Travel"));
    assert!(add_category(&mut session, "   ").is_err());

    let reopened = open(dir.path(), "dave");
    let count = reopened
        .settings()
        .categories
        .iter()
        .filter(|c| *c == "Travel")
        .count();
    assert_eq!(count, 1);
    assert_eq!(reopened.settings().categories.len(), DEFAULT_CATEGORIES.len() + 1);
}

#[test]
fn save_trims_categories_and_drops_blanks() {
    let dir = tempdir().unwrap();
    let store = Store::open(Some(dir.path().to_path_buf())).unwrap();
    let user = UserId::parse("erin").unwrap();
    let messy = Settings {
        monthly_budget: Decimal::from(300),
        categories: vec![" Food ".into(), "".into(), "  ".into(), "Pets".into()],
    };
    let saved = store.save_settings(&user, &messy).unwrap();
    assert_eq!(saved.categories, vec!["Food", "Pets"]);
    assert_eq!(store.load_settings(&user).unwrap(), saved);
}

#[test]
fn settings_written_by_hand_are_read() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("frank_settings.json"),
        r#"{"monthly_budget": 1800, "categories": ["Food", "Games"]}"#,
    )
    .unwrap();
    let session = open(dir.path(), "frank");
    assert_eq!(session.settings().monthly_budget, Decimal::from(1800));
    assert_eq!(session.settings().categories, vec!["Food", "Games"]);
}

#[test]
fn unsafe_user_names_are_refused() {
    let dir = tempdir().unwrap();
    let store = Store::open(Some(dir.path().to_path_buf())).unwrap();
    for bad in ["../evil", "a b", "x/y", ""] {
        assert!(matches!(
            Session::open(store.clone(), bad),
            Err(TrackerError::InvalidUser(_))
        ));
    }
}

#[test]
fn users_do_not_see_each_other() {
    let dir = tempdir().unwrap();
    let mut alice = open(dir.path(), "alice");
    alice
        .add_transaction(Transaction::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            "Rent",
            Decimal::from(900),
            "Rent",
        ))
        .unwrap();
    alice.add_category("Pets").unwrap();
    let bob = open(dir.path(), "bob");
    assert!(bob.ledger().is_empty());
    assert!(!bob.settings().has_category("Pets"));
}

#[test]
fn doctor_flags_orphaned_categories() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("gina_data.csv"),
        "Date,Description,Amount,Category\n2025-01-01,Ticket,30,Concerts\n2025-01-02,Bread,3,Food\n",
    )
    .unwrap();
    let mut session = open(dir.path(), "gina");
    let issues = doctor::find_issues(&session);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "unknown_category");
    assert!(issues[0][1].contains("Concerts"));

    session.add_category("Concerts").unwrap();
    assert!(doctor::find_issues(&session).is_empty());
}
