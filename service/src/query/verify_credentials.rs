//! [`Query`] resolving a [`Profile`] by [`user::Credentials`].

use common::operations::By;

use crate::domain::{user, Profile};
#[cfg(doc)]
use crate::Query;

use super::DirectoryQuery;

/// Resolves the [`Profile`] matching the provided [`user::Credentials`],
/// without signing the member in.
pub type VerifyCredentials = DirectoryQuery<By<Profile, user::Credentials>>;
