//! [`Session`] definitions.

use common::{unit, DateTime, DateTimeOf};
use serde::{Deserialize, Serialize};

use super::{Patch, Profile};

/// Locally cached identity of the signed-in member.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Session {
    /// [`Profile`] of the signed-in member.
    #[serde(flatten)]
    pub profile: Profile,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "expiry", with = "common::datetime::serde::rfc3339")]
    pub expires_at: ExpirationDateTime,
}

impl Session {
    /// Indicates whether this [`Session`] is expired at the provided moment.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime) -> bool {
        self.expires_at.is_reached_at(now)
    }

    /// Merges the provided [`Patch`] into this [`Session`].
    ///
    /// [`Session::expires_at`] is never touched.
    pub fn merge(&mut self, patch: Patch) {
        patch.apply_to(&mut self.profile);
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;
