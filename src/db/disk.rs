use std::path::Path;

use super::{Backend, Error};

/// Durable storage in a sled tree on the local filesystem.
pub struct DiskBackend {
    db: sled::Db,
}

impl DiskBackend {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }
}

impl Backend for DiskBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.db.get(key)?.map(|bytes| bytes.to_vec()))
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        self.db.insert(key, sled::IVec::from(value))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.db.remove(key)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.db.flush()?;
        Ok(())
    }
}
