//! [`Partner`] definitions.

use std::{borrow::Cow, fmt};

use common::format;
use itertools::Itertools as _;
use serde::Deserialize;

use super::user::{self, AvatarUrl, Level, Name, StudyTime};

/// Directory member exposed as a search result.
///
/// Its WhatsApp number, [`Level`] and [`StudyTime`]s are kept as the
/// directory sent them, so a single odd record doesn't spoil a whole search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    /// ID of this [`Partner`].
    #[serde(alias = "_id")]
    pub id: user::Id,

    /// [`Name`] of this [`Partner`].
    pub name: Name,

    /// [`AvatarUrl`] of this [`Partner`].
    #[serde(default)]
    pub avatar_url: Option<AvatarUrl>,

    /// WhatsApp number of this [`Partner`], in any formatting.
    pub whatsapp: String,

    /// Raw programming [`Level`] of this [`Partner`].
    pub level: String,

    /// Raw [`StudyTime`]s of this [`Partner`].
    #[serde(default)]
    pub study_times: Vec<String>,

    /// Free-text biography of this [`Partner`].
    #[serde(default)]
    pub about: String,

    /// [`Distance`] to this [`Partner`].
    ///
    /// Present only in proximity search results.
    #[serde(default)]
    pub distance: Option<Distance>,
}

impl Partner {
    /// Returns the link handing the conversation with this [`Partner`] off to
    /// WhatsApp.
    #[must_use]
    pub fn contact_link(&self) -> String {
        format!("https://wa.me/{}", format::unformat_phone(&self.whatsapp))
    }

    /// Returns the human-readable label of this [`Partner`]'s [`Level`].
    #[must_use]
    pub fn level_label(&self) -> Cow<'_, str> {
        Level::label_of(&self.level)
    }

    /// Describes this [`Partner`]'s [`StudyTime`]s as comma-separated
    /// labels, in the order the directory listed them.
    #[must_use]
    pub fn study_times_label(&self) -> String {
        if self.study_times.is_empty() {
            return StudyTime::UNSPECIFIED.to_owned();
        }
        self.study_times
            .iter()
            .map(|t| StudyTime::label_of(t))
            .join(", ")
    }
}

/// Distance in kilometers, as computed by the directory.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct Distance(f64);

impl From<f64> for Distance {
    fn from(km: f64) -> Self {
        Self(km)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format_distance(self.0))
    }
}

#[cfg(test)]
mod spec {
    use super::{Distance, Partner};

    #[test]
    fn nearby_record_carries_distance() {
        let partners: Vec<Partner> = serde_json::from_str(
            r#"[
                {
                    "id": "1",
                    "name": "Bia",
                    "avatarUrl": "https://robohash.org/bia",
                    "whatsapp": "(21) 98888-7777",
                    "level": "intermediate",
                    "studyTimes": ["morning"],
                    "about": "Frontend",
                    "distance": 3.26
                },
                {
                    "_id": "2",
                    "name": "Caio",
                    "whatsapp": "2133334444",
                    "level": "beginner"
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(partners[0].distance, Some(Distance::from(3.26)));
        assert_eq!(partners[0].distance.unwrap().to_string(), "3.3km");
        assert_eq!(partners[0].contact_link(), "https://wa.me/21988887777");

        assert_eq!(partners[1].id.as_ref(), "2");
        assert_eq!(partners[1].distance, None);
        assert_eq!(partners[1].study_times_label(), "Não especificado");
    }

    #[test]
    fn accepts_unusual_record() {
        let partners: Vec<Partner> = serde_json::from_str(
            r#"[
                {
                    "id": "1",
                    "name": "Bia",
                    "whatsapp": "(21) 98888-7777",
                    "level": "advanced",
                    "studyTimes": ["night", "morning"]
                },
                {
                    "id": "2",
                    "name": "Duda",
                    "whatsapp": "+55 21 98888-7777",
                    "level": "expert",
                    "studyTimes": ["weekend", "afternoon"]
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].level_label(), "Avançado");
        assert_eq!(partners[0].study_times_label(), "Noite, Manhã");

        assert_eq!(partners[1].contact_link(), "https://wa.me/5521988887777");
        assert_eq!(partners[1].level_label(), "expert");
        assert_eq!(partners[1].study_times_label(), "weekend, Tarde");
    }
}
