//! File-system [`Storage`] implementation.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use common::operations::{By, Delete, Insert, Select};
use tokio::fs;
use tracerr::Traced;

#[cfg(doc)]
use crate::infra::Storage;
use crate::infra::storage::{self, Entry, Key};

/// [`Storage`] keeping each entry in its own file inside a directory.
///
/// Entries are replaced atomically by writing a temporary file first and
/// renaming it over the previous one.
#[derive(Clone, Debug)]
pub struct File {
    /// Directory holding the entries.
    root: Arc<Path>,
}

impl File {
    /// Creates a new [`File`] storage rooted at the provided directory.
    ///
    /// The directory is created lazily, on the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        Self { root: root.into() }
    }

    /// Returns the path of the file holding the entry with the provided
    /// [`Key`].
    fn path_of(&self, key: Key) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl storage::Storage<Select<By<Option<String>, Key>>> for File {
    type Ok = Option<String>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<String>, Key>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::read_to_string(self.path_of(by.into_inner())).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(tracerr::new!(storage::Error::Io(e))),
        }
    }
}

impl storage::Storage<Insert<Entry>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Insert(Entry { key, value }): Insert<Entry>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = self.path_of(key);
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.root)
            .await
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        fs::write(&tmp, value)
            .await
            .map_err(tracerr::from_and_wrap!(=> storage::Error))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(tracerr::from_and_wrap!(=> storage::Error))
    }
}

impl storage::Storage<Delete<Key>> for File {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(key): Delete<Key>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.path_of(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(storage::Error::Io(e))),
        }
    }
}
