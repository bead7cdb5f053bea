//! Key/value storage backends

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Result, bail};

/// Synchronous string key/value storage
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory store. Clones share the same contents, so a caller can keep a
/// handle to inspect what the game wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Make every read fail, as an unavailable backend would
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    /// Make every write fail, as a full or read-only backend would
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Successful writes in order
    pub fn writes(&self) -> Vec<(String, String)> {
        self.inner.borrow().writes.clone()
    }

    /// Successful writes to one key, in order
    pub fn writes_to(&self, key: &str) -> Vec<String> {
        self.inner
            .borrow()
            .writes
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            bail!("memory store: reads disabled");
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            bail!("memory store: writes disabled");
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage> {
        use anyhow::anyhow;

        let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
        window
            .local_storage()
            .map_err(|e| anyhow!("localStorage access denied: {e:?}"))?
            .ok_or_else(|| anyhow!("localStorage unavailable"))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| anyhow::anyhow!("localStorage read of {key} failed: {e:?}"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("localStorage write of {key} failed: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_write_log() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "1").unwrap();
        store.set("k", "2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.writes_to("k"), vec!["1", "2"]);
    }

    #[test]
    fn test_clones_share_contents() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.set("best", "7").unwrap();
        assert_eq!(store.get("best").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_failure_injection() {
        let mut store = MemoryStore::with_value("k", "v");
        store.set_fail_reads(true);
        assert!(store.get("k").is_err());
        store.set_fail_writes(true);
        assert!(store.set("k", "w").is_err());
        assert!(store.writes().is_empty());
        store.set_fail_reads(false);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
