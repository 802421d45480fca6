//! Partner search definitions.

use std::{collections::BTreeSet, num::NonZeroU16};

use derive_more::Display;

#[cfg(doc)]
use super::Partner;
use super::user::{Email, Level, PostalCode, StudyTime};

/// Criteria shared by every kind of [`Partner`] search.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Criteria {
    /// [`Level`] the [`Partner`]s must have.
    ///
    /// [`None`] means any [`Level`].
    pub level: Option<Level>,

    /// [`StudyTime`]s the [`Partner`]s should match.
    ///
    /// Empty means any [`StudyTime`].
    pub study_times: BTreeSet<StudyTime>,

    /// [`Email`] of the searching member, excluded from the results.
    pub exclude_email: Option<Email>,
}

/// Search of [`Partner`]s around a [`PostalCode`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Nearby {
    /// [`PostalCode`] to search around.
    pub postal_code: PostalCode,

    /// [`Radius`] to search within.
    pub radius: Radius,

    /// Other [`Criteria`] of the search.
    pub criteria: Criteria,
}

/// Search radius in kilometers.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Radius(NonZeroU16);

impl Radius {
    /// Radius of the narrow distance selection.
    pub const NARROW: Self = Self(NonZeroU16::MIN.saturating_add(9));

    /// Radius of the wide distance selection.
    pub const WIDE: Self = Self(NonZeroU16::MIN.saturating_add(99));

    /// Creates a new [`Radius`] of the provided kilometers.
    ///
    /// [`None`] is returned for zero kilometers.
    #[must_use]
    pub fn km(km: u16) -> Option<Self> {
        NonZeroU16::new(km).map(Self)
    }

    /// Returns kilometers of this [`Radius`].
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

/// How the location of [`Partner`]s is taken into account.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DistanceMode {
    /// Location is not considered at all.
    IgnoreLocation,

    /// [`Partner`]s must be within the [`Radius`].
    Within(Radius),
}

impl DistanceMode {
    /// Interprets the distance selection of a search form.
    ///
    /// Only two radii are offered: `"10"` selects [`Radius::NARROW`], `"any"`
    /// ignores location and anything else selects [`Radius::WIDE`].
    #[must_use]
    pub fn from_selection(selection: &str) -> Self {
        match selection.trim() {
            "any" => Self::IgnoreLocation,
            "10" => Self::Within(Radius::NARROW),
            _ => Self::Within(Radius::WIDE),
        }
    }
}

/// Full search filter, as filled by a member.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
    /// [`Criteria`] of the search.
    pub criteria: Criteria,

    /// [`DistanceMode`] of the search.
    pub distance: DistanceMode,

    /// Raw postal code to search around.
    ///
    /// Validated only when the [`DistanceMode`] requires it.
    pub postal_code: Option<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            criteria: Criteria::default(),
            distance: DistanceMode::IgnoreLocation,
            postal_code: None,
        }
    }
}
