//! Durable key-value [`Storage`] of opaque strings.

mod file;
mod memory;

use std::io;

use common::operations::{By, Delete, Insert, Select};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;

pub use self::{file::File, memory::Memory};

/// Storage operation.
pub use common::Handler as Storage;

/// Well-known key of a [`Storage`] entry.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct Key(&'static str);

impl Key {
    /// [`Key`] of the persisted session record.
    pub const SESSION: Self = Self("userData");

    /// [`Key`] of the persisted dark mode preference.
    pub const DARK_MODE: Self = Self("darkMode");

    /// Returns the string representation of this [`Key`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Entry to be put into a [`Storage`].
#[derive(Clone, Debug)]
pub struct Entry {
    /// [`Key`] of this [`Entry`].
    pub key: Key,

    /// Opaque value of this [`Entry`].
    pub value: String,
}

/// [`Storage`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// I/O error.
    #[display("I/O operation failed: {_0}")]
    Io(io::Error),
}

/// [`Storage`] able to get, set and clear its entries.
pub trait KeyValue:
    Storage<
        Select<By<Option<String>, Key>>,
        Ok = Option<String>,
        Err = Traced<Error>,
    > + Storage<Insert<Entry>, Ok = (), Err = Traced<Error>>
    + Storage<Delete<Key>, Ok = (), Err = Traced<Error>>
{
}

impl<T> KeyValue for T where
    T: Storage<
            Select<By<Option<String>, Key>>,
            Ok = Option<String>,
            Err = Traced<Error>,
        > + Storage<Insert<Entry>, Ok = (), Err = Traced<Error>>
        + Storage<Delete<Key>, Ok = (), Err = Traced<Error>>
{
}
