// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::anyhow;
use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::Cell;
use std::rc::Rc;
use tempfile::tempdir;
use walletwise::db::{
    MemorySlot, STATE_SLOT, SnapshotAdapter, SqliteSlot, decode_snapshot, encode_snapshot,
};
use walletwise::errors::StoreError;
use walletwise::models::{Adjustments, Currency, ExpenseDraft, GoalDraft};
use walletwise::seed::{seed_id, seed_state};
use walletwise::store::{LoadSource, Store};

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tea() -> ExpenseDraft {
    ExpenseDraft {
        name: " Tea ".into(),
        category: "Drinks".into(),
        amount: dec("3.5"),
        date: day("2026-02-20"),
        icon: String::new(),
        note: Some("   ".into()),
        recurring: false,
    }
}

/// Accepts reads, counts writes, and fails every write.
struct BrokenSlot {
    writes: Rc<Cell<usize>>,
}

impl SnapshotAdapter for BrokenSlot {
    fn read_slot(&self) -> anyhow::Result<Option<String>> {
        Ok(None)
    }

    fn write_slot(&self, _data: &str) -> anyhow::Result<()> {
        self.writes.set(self.writes.get() + 1);
        Err(anyhow!("disk full"))
    }
}

#[test]
fn missing_or_corrupt_snapshot_loads_seed() {
    let (store, source) = Store::load(Box::new(MemorySlot::default()));
    assert_eq!(source, LoadSource::Seed);
    assert_eq!(*store.state(), seed_state());

    let (store, source) = Store::load(Box::new(MemorySlot::with_contents("{not json")));
    assert_eq!(source, LoadSource::Seed);
    assert_eq!(*store.state(), seed_state());

    let future = r#"{"version": 99, "state": {}}"#;
    let (_, source) = Store::load(Box::new(MemorySlot::with_contents(future)));
    assert_eq!(source, LoadSource::Seed);
}

#[test]
fn committed_actions_round_trip_through_the_slot() {
    let slot = MemorySlot::default();
    let mut store = Store::open(Box::new(slot.clone()));
    store.set_currency(Currency::Inr).unwrap();
    let id = store.add_expense(tea()).unwrap();

    let raw = slot.contents().expect("snapshot written");
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["version"], 1);
    assert_eq!(doc["state"]["currency"], "INR");
    assert_eq!(doc["state"]["selectedMonth"], "2026-02");

    let (reopened, source) = Store::load(Box::new(slot));
    assert_eq!(source, LoadSource::Snapshot);
    assert_eq!(reopened.state(), store.state());
    let added = reopened
        .state()
        .expenses
        .iter()
        .find(|e| e.id == id)
        .unwrap();
    assert_eq!(added.name, "Tea");
    assert_eq!(added.note, None);
}

#[test]
fn rejected_actions_leave_state_and_slot_untouched() {
    let slot = MemorySlot::default();
    let mut store = Store::with_state(Box::new(slot.clone()), seed_state());
    let before = store.state().clone();

    let blank = ExpenseDraft {
        name: "   ".into(),
        ..tea()
    };
    assert!(matches!(
        store.add_expense(blank).unwrap_err(),
        StoreError::EmptyField { field: "name" }
    ));
    let free = ExpenseDraft {
        amount: Decimal::ZERO,
        ..tea()
    };
    assert!(matches!(
        store.add_expense(free).unwrap_err(),
        StoreError::NotPositive { .. }
    ));
    assert!(matches!(
        store
            .withdraw_from_goal(seed_id(0x2001), dec("900"))
            .unwrap_err(),
        StoreError::ExceedsOutstanding { .. }
    ));
    assert!(matches!(
        store.delete_expense(uuid::Uuid::new_v4()).unwrap_err(),
        StoreError::NotFound { .. }
    ));
    assert!(matches!(
        store.clear_category_limit("Travel").unwrap_err(),
        StoreError::InvalidValue { .. }
    ));
    assert!(matches!(
        store
            .set_adjustments(Adjustments {
                emergency_target_months: 0,
                ..Adjustments::default()
            })
            .unwrap_err(),
        StoreError::NotPositive { .. }
    ));

    assert_eq!(*store.state(), before);
    assert!(slot.contents().is_none());
}

#[test]
fn goal_deposits_and_withdrawals() {
    let mut store = Store::with_state(Box::new(MemorySlot::default()), seed_state());
    let id = seed_id(0x2002);
    store.deposit_to_goal(id, dec("1500")).unwrap();
    let goal = store.state().saving_goals.iter().find(|g| g.id == id).unwrap();
    assert_eq!(goal.saved_amount, dec("1800"));
    assert_eq!(goal.progress_percent(), dec("100"));

    store.withdraw_from_goal(id, dec("1800")).unwrap();
    let goal = store.state().saving_goals.iter().find(|g| g.id == id).unwrap();
    assert_eq!(goal.saved_amount, Decimal::ZERO);
    assert!(store.deposit_to_goal(id, dec("-5")).is_err());

    let err = store
        .add_goal(GoalDraft {
            name: "House".into(),
            category: "Home".into(),
            target_amount: Decimal::ZERO,
            saved_amount: Decimal::ZERO,
            date: day("2030-01-01"),
            icon: String::new(),
            emergency: false,
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::NotPositive { .. }));
}

#[test]
fn failed_save_keeps_the_commit_in_memory() {
    let writes = Rc::new(Cell::new(0));
    let mut store = Store::open(Box::new(BrokenSlot {
        writes: writes.clone(),
    }));
    let err = store.set_currency(Currency::Eur).unwrap_err();
    assert!(matches!(err, StoreError::Persistence(_)));
    assert_eq!(store.state().currency, Some(Currency::Eur));
    assert_eq!(writes.get(), 1);

    // Rejections never reach the adapter.
    assert!(store.set_savings_budget(dec("-1")).is_err());
    assert_eq!(writes.get(), 1);
}

#[test]
fn reset_restores_seed() {
    let mut store = Store::with_state(Box::new(MemorySlot::default()), seed_state());
    store.set_currency(Currency::Gbp).unwrap();
    store.delete_loan(seed_id(0x4001)).unwrap();
    store.reset_to_seed().unwrap();
    assert_eq!(*store.state(), seed_state());
}

#[test]
fn sqlite_slot_upserts_one_row() {
    let conn = Connection::open_in_memory().unwrap();
    let slot = SqliteSlot::from_connection(conn).unwrap();
    assert_eq!(slot.read_slot().unwrap(), None);
    slot.write_slot("first").unwrap();
    slot.write_slot("second").unwrap();
    assert_eq!(slot.read_slot().unwrap().as_deref(), Some("second"));
    let rows: i64 = slot
        .connection()
        .query_row(
            "SELECT COUNT(*) FROM kv WHERE key=?1",
            [STATE_SLOT],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn sqlite_file_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("walletwise.sqlite");
    {
        let mut store = Store::open(Box::new(SqliteSlot::open(&path).unwrap()));
        store.set_currency(Currency::Jpy).unwrap();
        store
            .set_selected_month("2026-05".parse().unwrap())
            .unwrap();
    }
    let (store, source) = Store::load(Box::new(SqliteSlot::open(&path).unwrap()));
    assert_eq!(source, LoadSource::Snapshot);
    assert_eq!(store.state().currency, Some(Currency::Jpy));
    assert_eq!(store.state().selected_month.to_string(), "2026-05");
}

#[test]
fn snapshot_codec_keeps_month_keyed_maps() {
    let mut state = seed_state();
    state
        .monthly_budgets
        .insert("2026-03".parse().unwrap(), dec("2500"));
    let raw = encode_snapshot(&state).unwrap();
    assert!(raw.contains("\"2026-03\""));
    assert_eq!(decode_snapshot(&raw).unwrap(), state);
    assert!(decode_snapshot(r#"{"state": {}}"#).is_err());
}
