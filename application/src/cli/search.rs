//! Commands searching study partners.

use std::io;

use service::{
    domain::search::{Criteria, Filter, Radius},
    query::{
        find_partners, search_nearby_partners, CurrentSession, FindPartners,
        SearchNearbyPartners,
    },
    Query as _,
};

use crate::{args, define_error, AsError, Error, Service};

use super::{render, write};

/// Searches partners the way the search page does.
pub(crate) async fn find(
    service: &Service,
    search: args::Search,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    let distance = search.distance_mode();
    let args::Search {
        level,
        study_times,
        distance: _,
        cep,
    } = search;

    let partners = service
        .execute(FindPartners(Filter {
            criteria: Criteria {
                level,
                study_times: study_times.into_iter().collect(),
                exclude_email: None,
            },
            distance,
            postal_code: cep,
        }))
        .await
        .map_err(AsError::into_error)?;

    write(out, &render::partners(&partners))
}

/// Searches partners around a postal code.
pub(crate) async fn nearby(
    service: &Service,
    nearby: args::Nearby,
    out: &mut impl io::Write,
) -> Result<(), Error> {
    define_error! {
        enum Error {
            #[code = "INVALID_RADIUS"]
            #[exit_code = 64]
            #[message = "Radius must be at least 1 km"]
            InvalidRadius,
        }
    }

    let args::Nearby {
        cep,
        radius,
        level,
        study_times,
    } = nearby;
    let radius = Radius::km(radius).ok_or(Error::InvalidRadius)?;

    let session = service
        .execute(CurrentSession)
        .await
        .map_err(AsError::into_error)?;

    let partners = service
        .execute(SearchNearbyPartners {
            postal_code: cep,
            radius,
            criteria: Criteria {
                level,
                study_times: study_times.into_iter().collect(),
                exclude_email: session.map(|s| s.profile.email),
            },
        })
        .await
        .map_err(AsError::into_error)?;

    write(out, &render::partners(&partners))
}

impl AsError for search_nearby_partners::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Directory(e) => e.try_as_error(),
            Self::InvalidPostalCode(_) => Some(Error {
                code: "INVALID_POSTAL_CODE",
                exit_code: Error::DATA_ERR,
                message: self.to_string(),
                backtrace: None,
            }),
        }
    }
}

impl AsError for find_partners::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "MISSING_POSTAL_CODE"]
                #[exit_code = 64]
                #[message = "Sign in or provide a postal code to search \
                             by distance"]
                MissingPostalCode,
            }
        }

        match self {
            Self::CurrentSession(e) => e.try_as_error(),
            Self::Directory(e) => e.try_as_error(),
            Self::MissingPostalCode => Some(Error::MissingPostalCode.into()),
            Self::Nearby(e) => e.try_as_error(),
        }
    }
}
