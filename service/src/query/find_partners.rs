//! [`Query`] dispatching a search [`Filter`].

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::Session;
use crate::{
    domain::{
        search::{Criteria, DistanceMode, Filter, Nearby},
        Partner,
    },
    infra::{directory, Directory, KeyValue},
    Service,
};

use super::{
    current_session, search_nearby_partners, CurrentSession, Query,
    SearchNearbyPartners, SearchPartners,
};

/// [`Query`] searching [`Partner`]s by a [`Filter`] filled in by a member.
///
/// The signed-in member's postal code is searched around when the [`Filter`]
/// has none, and the signed-in member is excluded from the results unless
/// the [`Filter`] excludes someone else.
#[derive(Clone, Debug, From)]
pub struct FindPartners(pub Filter);

impl<St, Dir> Query<FindPartners> for Service<St, Dir>
where
    St: KeyValue,
    Dir: Directory<
            Select<By<Vec<Partner>, Criteria>>,
            Ok = Vec<Partner>,
            Err = Traced<directory::Error>,
        > + Directory<
            Select<By<Vec<Partner>, Nearby>>,
            Ok = Vec<Partner>,
            Err = Traced<directory::Error>,
        >,
{
    type Ok = Vec<Partner>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        FindPartners(filter): FindPartners,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Filter {
            mut criteria,
            distance,
            postal_code,
        } = filter;

        let session = self
            .execute(CurrentSession)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        if criteria.exclude_email.is_none() {
            criteria.exclude_email =
                session.as_ref().map(|s| s.profile.email.clone());
        }

        let partners = match distance {
            DistanceMode::IgnoreLocation => self
                .execute(SearchPartners::by(criteria))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?,
            DistanceMode::Within(radius) => {
                let postal_code = postal_code
                    .filter(|c| !c.trim().is_empty())
                    .or_else(|| {
                        session.map(|s| s.profile.cep.digits().to_owned())
                    })
                    .ok_or(E::MissingPostalCode)
                    .map_err(tracerr::wrap!())?;

                self.execute(SearchNearbyPartners {
                    postal_code,
                    radius,
                    criteria,
                })
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
            }
        };

        log::debug!("Found {} partners", partners.len());

        Ok(partners)
    }
}

/// Error of [`FindPartners`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`CurrentSession`] error.
    #[display("Failed to read `Session`: {_0}")]
    CurrentSession(current_session::ExecutionError),

    /// [`Directory`] error.
    #[display("`Directory` operation failed: {_0}")]
    Directory(directory::Error),

    /// Location search requested without a postal code, and no [`Session`]
    /// to take it from.
    #[display("A postal code is required to search by distance")]
    MissingPostalCode,

    /// [`SearchNearbyPartners`] error.
    #[display("Nearby search failed: {_0}")]
    Nearby(search_nearby_partners::ExecutionError),
}
