use std::collections::HashMap;
use std::sync::Mutex;

use super::{Backend, Error};

/// Non-durable storage that lives as long as the process. Used by tests and
/// throwaway runs.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(|_| Error::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}
