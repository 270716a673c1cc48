pub mod models;
pub mod repositories;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use self::models::{CommentRecord, ConnectionRecord, LikeRecord, PostRecord, UserRecord};
use self::repositories::MemRepositories;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("connection {0} not found")]
    ConnectionNotFound(i64),
    #[error("storage mutex poisoned")]
    Poisoned,
}

/// One table of the in-memory store: rows keyed by id plus the counter for
/// the next insert. Ids start at 1 and are never reused, so iterating the
/// map in key order yields rows in insertion order.
#[derive(Debug)]
pub(crate) struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Assigns the next id, stores the row built from it, and returns the row.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub(crate) fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }
}

#[derive(Debug)]
pub(crate) struct Tables {
    pub(crate) users: Table<UserRecord>,
    pub(crate) posts: Table<PostRecord>,
    pub(crate) comments: Table<CommentRecord>,
    pub(crate) connections: Table<ConnectionRecord>,
    pub(crate) likes: Table<LikeRecord>,
}

impl Tables {
    fn new() -> Self {
        Self {
            users: Table::new(),
            posts: Table::new(),
            comments: Table::new(),
            connections: Table::new(),
            likes: Table::new(),
        }
    }
}

/// Process-wide storage handle. Every table lives behind one mutex, and
/// repository calls run synchronously inside [`Store::with_repositories`],
/// so the lock is never held across an await point.
#[derive(Clone)]
pub struct Store {
    tables: Arc<Mutex<Tables>>,
}

impl Store {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::new())),
        }
    }

    /// Runs `f` against the repositories with the table lock held.
    pub fn with_repositories<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut MemRepositories<'_>) -> StoreResult<T>,
    {
        let mut tables = self.tables.lock().map_err(|_| StoreError::Poisoned)?;
        let mut repos = MemRepositories::new(&mut tables);
        f(&mut repos)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
