//! Infrastructure layer.

pub mod directory;
pub mod storage;

#[cfg(feature = "http")]
pub use self::directory::Http;
pub use self::{
    directory::Directory,
    storage::{KeyValue, Storage},
};
