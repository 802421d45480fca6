//! In-memory [`Storage`] implementation.

use std::{collections::HashMap, sync::Arc};

use common::operations::{By, Delete, Insert, Select};
use tokio::sync::Mutex;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Storage;
use crate::infra::storage::{self, Entry, Key};

/// [`Storage`] keeping its entries in memory only.
///
/// Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Mutex<HashMap<Key, String>>>);

impl storage::Storage<Select<By<Option<String>, Key>>> for Memory {
    type Ok = Option<String>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.0.lock().await.get(&by.into_inner()).cloned())
    }
}

impl storage::Storage<Insert<Entry>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.lock().await.insert(key, value));
        Ok(())
    }
}

impl storage::Storage<Delete<Key>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        drop(self.0.lock().await.remove(&key));
        Ok(())
    }
}
