// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::FinanceState;
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Walletwise", "walletwise"));

/// Overrides the platform data directory when set.
pub const DB_ENV: &str = "WALLETWISE_DB";
/// The single slot holding the whole tracker.
pub const STATE_SLOT: &str = "walletwise-state";
pub const SNAPSHOT_VERSION: u32 = 1;

pub fn db_path() -> Result<PathBuf> {
    if let Some(custom) = std::env::var_os(DB_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(custom));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("walletwise.sqlite"))
}

/// Durable key-value storage for the serialized snapshot.
pub trait SnapshotAdapter {
    fn read_slot(&self) -> Result<Option<String>>;
    fn write_slot(&self, data: &str) -> Result<()>;
}

/// Snapshot slot in a SQLite key-value table. Concurrent writers are not
/// coordinated; the last write wins.
pub struct SqliteSlot {
    conn: Connection,
    key: String,
}

impl SqliteSlot {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn open_or_init() -> Result<Self> {
        Self::open(&db_path()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self {
            conn,
            key: STATE_SLOT.to_string(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

impl SnapshotAdapter for SqliteSlot {
    fn read_slot(&self) -> Result<Option<String>> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key=?1",
                params![self.key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn write_slot(&self, data: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
            params![self.key, data],
        )?;
        Ok(())
    }
}

/// In-process slot. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn with_contents(data: impl Into<String>) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(data.into()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.cell.borrow().clone()
    }
}

impl SnapshotAdapter for MemorySlot {
    fn read_slot(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn write_slot(&self, data: &str) -> Result<()> {
        *self.cell.borrow_mut() = Some(data.to_string());
        Ok(())
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    state: &'a FinanceState,
}

#[derive(Deserialize)]
struct SnapshotIn {
    version: u32,
    state: FinanceState,
}

pub fn encode_snapshot(state: &FinanceState) -> Result<String> {
    let doc = SnapshotOut {
        version: SNAPSHOT_VERSION,
        state,
    };
    Ok(serde_json::to_string(&doc)?)
}

pub fn decode_snapshot(raw: &str) -> Result<FinanceState> {
    let doc: SnapshotIn = serde_json::from_str(raw).context("Malformed snapshot")?;
    if doc.version > SNAPSHOT_VERSION {
        return Err(anyhow!(
            "Snapshot version {} is newer than supported {}",
            doc.version,
            SNAPSHOT_VERSION
        ));
    }
    Ok(doc.state)
}
