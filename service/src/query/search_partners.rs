//! [`Query`] searching [`Partner`]s regardless of their location.

use common::operations::By;

use crate::domain::{search::Criteria, Partner};
#[cfg(doc)]
use crate::Query;

use super::DirectoryQuery;

/// Searches [`Partner`]s matching the provided [`Criteria`], in the order
/// the directory returns them.
pub type SearchPartners = DirectoryQuery<By<Vec<Partner>, Criteria>>;
