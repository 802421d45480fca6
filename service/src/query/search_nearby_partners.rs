//! [`Query`] searching [`Partner`]s around a postal code.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::PostalCode;
use crate::{
    domain::{
        search::{Criteria, Nearby, Radius},
        user, Partner,
    },
    infra::{directory, Directory},
    Service,
};

use super::Query;

/// [`Query`] searching [`Partner`]s within the [`Radius`] around the
/// provided postal code.
///
/// The postal code is validated before reaching the [`Directory`].
#[derive(Clone, Debug)]
pub struct SearchNearbyPartners {
    /// Raw postal code to search around.
    pub postal_code: String,

    /// [`Radius`] to search within.
    pub radius: Radius,

    /// Other [`Criteria`] of the search.
    pub criteria: Criteria,
}

impl<St, Dir> Query<SearchNearbyPartners> for Service<St, Dir>
where
    Dir: Directory<
        Select<By<Vec<Partner>, Nearby>>,
        Ok = Vec<Partner>,
        Err = Traced<directory::Error>,
    >,
{
    type Ok = Vec<Partner>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: SearchNearbyPartners,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SearchNearbyPartners {
            postal_code,
            radius,
            criteria,
        } = query;

        let Some(postal_code) = user::PostalCode::new(&postal_code) else {
            return Err(tracerr::new!(E::InvalidPostalCode(postal_code)));
        };

        self.directory()
            .execute(Select(By::new(Nearby {
                postal_code,
                radius,
                criteria,
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SearchNearbyPartners`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Directory`] error.
    #[display("`Directory` operation failed: {_0}")]
    Directory(directory::Error),

    /// Provided string is not a valid [`PostalCode`].
    #[display("`{_0}` is not a valid postal code")]
    #[from(ignore)]
    InvalidPostalCode(#[error(not(source))] String),
}
