//! Service contains the session lifecycle and the partner search logic of the
//! study partners directory.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;

use std::{sync::Arc, time::Duration};

use smart_default::SmartDefault;
use tokio::sync::Mutex;

#[cfg(doc)]
use self::infra::{Directory, Storage};
use self::domain::user::Session;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// [`Duration`] a [`Session`] lasts for since it has been created.
    #[default(Duration::from_secs(30 * 24 * 60 * 60))]
    pub session_lifetime: Duration,

    /// Indicator whether the dark [`Theme`] is preferred when no preference
    /// has been stored yet.
    ///
    /// [`Theme`]: domain::Theme
    pub prefers_dark: bool,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<St, Dir> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Storage`] of this [`Service`].
    storage: St,

    /// [`Directory`] of this [`Service`].
    directory: Dir,

    /// Current [`Session`], if any.
    ///
    /// Locked across the [`Storage`] writes, so the persisted record never
    /// diverges from this one.
    session: Arc<Mutex<Option<Session>>>,
}

impl<St, Dir> Service<St, Dir> {
    /// Creates a new signed out [`Service`] with the provided parameters.
    ///
    /// Execute [`command::RestoreSession`] to pick up a persisted
    /// [`Session`].
    #[must_use]
    pub fn new(config: Config, storage: St, directory: Dir) -> Self {
        Self {
            config,
            storage,
            directory,
            session: Arc::default(),
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }

    /// Returns [`Directory`] of this [`Service`].
    #[must_use]
    pub fn directory(&self) -> &Dir {
        &self.directory
    }
}
