//! [`Query`] definition.

pub mod current_session;
pub mod current_theme;
pub mod find_partners;
pub mod search_nearby_partners;
pub mod search_partners;
pub mod verify_credentials;

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    infra::{directory, Directory},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

pub use self::{
    current_session::CurrentSession, current_theme::CurrentTheme,
    find_partners::FindPartners, search_nearby_partners::SearchNearbyPartners,
    search_partners::SearchPartners, verify_credentials::VerifyCredentials,
};

/// [`Query`] [`Select`]ing a `T`ype from a [`Directory`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DirectoryQuery<T>(T);

impl<W, B> DirectoryQuery<By<W, B>> {
    /// Creates a new [`DirectoryQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<St, Dir, W, B> Query<DirectoryQuery<By<W, B>>> for Service<St, Dir>
where
    Dir: Directory<Select<By<W, B>>, Ok = W, Err = Traced<directory::Error>>,
{
    type Ok = W;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        DirectoryQuery(by): DirectoryQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.directory()
            .execute(Select(by))
            .await
            .map_err(tracerr::wrap!())
    }
}
