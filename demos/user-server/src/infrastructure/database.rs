use anyhow::anyhow;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// In-memory table store
///
/// Rows are kept as JSON strings keyed by table and id.
#[derive(Clone, Default)]
pub struct Database {
    storage: Arc<Mutex<BTreeMap<(String, u32), String>>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, BTreeMap<(String, u32), String>>> {
        self.storage
            .lock()
            .map_err(|_| anyhow!("database storage lock poisoned"))
    }

    pub fn insert(&self, table: &str, id: u32, data: String) -> anyhow::Result<()> {
        self.lock()?.insert((table.to_string(), id), data);
        Ok(())
    }

    pub fn get(&self, table: &str, id: u32) -> anyhow::Result<Option<String>> {
        Ok(self.lock()?.get(&(table.to_string(), id)).cloned())
    }

    pub fn remove(&self, table: &str, id: u32) -> anyhow::Result<Option<String>> {
        Ok(self.lock()?.remove(&(table.to_string(), id)))
    }

    /// All rows of a table, ordered by id
    pub fn scan(&self, table: &str) -> anyhow::Result<Vec<String>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|((name, _), _)| name == table)
            .map(|(_, data)| data.clone())
            .collect())
    }
}
