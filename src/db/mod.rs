use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Mutex;

pub mod disk;
pub mod memory;

pub use disk::DiskBackend;
pub use memory::MemoryBackend;

#[macro_export]
macro_rules! define_uuid_key {
    ($T:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            Eq,
            PartialEq,
            Hash,
            Ord,
            PartialOrd,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $T(pub uuid::Uuid);

        impl $T {
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl std::str::FromStr for $T {
            type Err = uuid::Error;
            fn from_str(s: &str) -> Result<$T, Self::Err> {
                Ok(Self(uuid::Uuid::from_str(s)?))
            }
        }

        impl AsRef<[u8]> for $T {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }

        impl std::fmt::Display for $T {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to deserialize stored value: {0}")]
    DeserializeError(bincode::Error),
    #[error("failed to serialize value: {0}")]
    SerializeError(bincode::Error),
    // The wrapped error contains additional information and is available
    // via the source() method.
    #[error("storage error: {0}")]
    DbError(#[from] sled::Error),
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Raw byte storage under string keys.
///
/// Every call completes synchronously; implementations must not hand out
/// partially written values.
pub trait Backend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;
    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Error>;
    fn remove(&self, key: &str) -> Result<(), Error>;

    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// A simple wrapper around a key-value backend to allow us to store arbitrary types.
pub struct Database {
    backend: Box<dyn Backend>,
    lock_map: Mutex<Vec<String>>,
}

impl Database {
    /// Opens (or creates) a sled database in the given directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self::with_backend(DiskBackend::open(path)?))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn with_backend<B: Backend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
            lock_map: Mutex::new(Vec::new()),
        }
    }

    pub fn insert<V: Serialize>(&self, key: &str, value: &V) -> Result<(), Error> {
        match bincode::serialize(value) {
            Ok(bytes) => self.backend.set(key, bytes),
            Err(e) => Err(Error::SerializeError(e)),
        }
    }

    pub fn fetch<V: DeserializeOwned>(&self, key: &str) -> Result<Option<V>, Error> {
        match self.backend.get(key)? {
            Some(bytes) => match bincode::deserialize::<V>(&bytes) {
                Ok(v) => Ok(Some(v)),
                Err(e) => Err(Error::DeserializeError(e)),
            },
            None => Ok(None),
        }
    }

    /// Missing keys read as the type's default (empty collection, zeroed record).
    pub fn fetch_or_default<V: DeserializeOwned + Default>(&self, key: &str) -> Result<V, Error> {
        Ok(self.fetch(key)?.unwrap_or_default())
    }

    pub fn remove_silent(&self, key: &str) -> Result<(), Error> {
        self.backend.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> Result<bool, Error> {
        Ok(self.backend.get(key)?.is_some())
    }

    pub fn flush(&self) -> Result<(), Error> {
        self.backend.flush()
    }

    /// Locks `key` and reads its current value (default if absent) for a
    /// read-modify-write cycle.
    pub fn write_lock<V>(&self, key: &str) -> Result<WriteGuard<'_, V>, Error>
    where
        V: Serialize + DeserializeOwned + Default,
    {
        self.lock(key)?;
        match self.fetch_or_default(key) {
            Ok(value) => Ok(WriteGuard {
                db: self,
                key: key.to_owned(),
                value,
                mutated: false,
                committed: false,
            }),
            Err(e) => {
                self.unlock(key);
                Err(e)
            }
        }
    }

    fn lock(&self, key: &str) -> Result<(), Error> {
        loop {
            match self.lock_map.lock() {
                Ok(mut list) => {
                    if !list.iter().any(|k| k == key) {
                        list.push(key.to_owned());
                        return Ok(());
                    }
                }
                Err(_) => return Err(Error::LockPoisoned),
            }
            std::thread::sleep(std::time::Duration::from_micros(50));
        }
    }

    fn unlock(&self, key: &str) {
        if let Ok(mut list) = self.lock_map.lock() {
            list.retain(|x| x != key);
        }
    }
}

/// Only writes if the data is fetched in a mutable fashion.
pub struct WriteGuard<'db, V: Serialize + DeserializeOwned> {
    db: &'db Database,
    key: String,
    value: V,
    mutated: bool,
    committed: bool,
}

impl<'db, V: Serialize + DeserializeOwned> WriteGuard<'db, V> {
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut V {
        self.mutated = true;
        &mut self.value
    }

    /// Writes the value back (if it was mutated) and releases the key.
    pub fn commit(mut self) -> Result<(), Error> {
        self.committed = true;
        if self.mutated {
            self.db.insert(&self.key, &self.value)
        } else {
            Ok(())
        }
    }
}

impl<'db, V: Serialize + DeserializeOwned> std::ops::Deref for WriteGuard<'db, V> {
    type Target = V;
    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<'db, V: Serialize + DeserializeOwned> std::ops::DerefMut for WriteGuard<'db, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value_mut()
    }
}

impl<'db, V: Serialize + DeserializeOwned> Drop for WriteGuard<'db, V> {
    fn drop(&mut self) {
        if self.mutated && !self.committed {
            if let Err(e) = self.db.insert(&self.key, &self.value) {
                log::error!(
                    "Failed to re-insert value for key {} with WriteGuard: {}",
                    self.key,
                    e
                );
            }
        }
        self.db.unlock(&self.key)
    }
}
