//! Community member [`Profile`] definitions.

pub mod session;

use std::{collections::BTreeSet, str::FromStr, sync::LazyLock};

use common::{define_kind, format};
use derive_more::{AsRef, Display, Error, From, Into};
use itertools::Itertools as _;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use self::session::Session;

/// Profile of a community member, as known by the directory.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// ID of this [`Profile`].
    #[serde(alias = "_id")]
    pub id: Id,

    /// [`Name`] of the member.
    pub name: Name,

    /// [`Email`] of the member.
    pub email: Email,

    /// WhatsApp [`Phone`] of the member.
    pub whatsapp: Phone,

    /// [`AvatarUrl`] of the member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<AvatarUrl>,

    /// [`PostalCode`] the member studies around.
    pub cep: PostalCode,

    /// Programming [`Level`] of the member.
    pub level: Level,

    /// [`StudyTime`]s the member is available at.
    #[serde(default)]
    pub study_times: BTreeSet<StudyTime>,

    /// Free-text biography of the member.
    #[serde(default)]
    pub about: String,
}

/// ID of a [`Profile`], assigned by the directory.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct Id(String);

/// Display name of a member.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Maximum length of a [`Name`] in bytes.
    const MAX_LEN: usize = 512;

    /// Creates a new [`Name`] out of the trimmed `name`, if it's valid.
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Option<Self> {
        let name = name.as_ref().trim();
        (!name.is_empty() && name.len() <= Self::MAX_LEN)
            .then(|| Self(name.to_owned()))
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Name`")
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Email address of a member.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Option<Self> {
        let address = address.as_ref().trim();
        Self::check(address).then(|| Self(address.to_owned()))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(
                "^([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                  |\\x5c[\\x00-\\x7f])*\\x22)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x22([^\\x0d\\x22\\x5c\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x22))*\\x40\
                  ([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                     \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                  |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d)\
                  (\\x2e([^\\x00-\\x20\\x22\\x28\\x29\\x2c\\x2e\\x3a-\
                           \\x3c\\x3e\\x40\\x5b-\\x5d\\x7f-\\xff]+\
                        |\\x5b([^\\x0d\\x5b-\\x5d\\x80-\\xff]\
                        |\\x5c[\\x00-\\x7f])*\\x5d))*$",
            )
            .expect("valid regex")
        });

        REGEX.is_match(address.as_ref())
    }
}

impl TryFrom<String> for Email {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Email`")
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// WhatsApp phone number of a member, kept in the `(DD) DDDDD-DDDD` mask.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Into,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Creates a new [`Phone`] if the given `number` has a valid amount of
    /// digits, regardless of its formatting.
    #[must_use]
    pub fn new(number: impl AsRef<str>) -> Option<Self> {
        let number = number.as_ref();
        format::is_valid_phone(number)
            .then(|| Self(format::format_phone(number)))
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Phone`")
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Brazilian postal code (CEP) of exactly 8 digits.
///
/// Serialized as bare digits, displayed as `DDDDD-DDD`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Into, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PostalCode(String);

impl PostalCode {
    /// Creates a new [`PostalCode`] if the given `code` contains exactly 8
    /// digits, regardless of its formatting.
    #[must_use]
    pub fn new(code: impl AsRef<str>) -> Option<Self> {
        let code = code.as_ref();
        format::is_valid_postal_code(code)
            .then(|| Self(format::digits(code)))
    }

    /// Returns digits of this [`PostalCode`].
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format::format_postal_code(&self.0))
    }
}

impl TryFrom<String> for PostalCode {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `PostalCode`")
    }
}

impl FromStr for PostalCode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `PostalCode`")
    }
}

/// URL of a member's avatar picture.
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
#[serde(transparent)]
pub struct AvatarUrl(String);

impl AvatarUrl {
    /// Generates an [`AvatarUrl`] deterministically derived from the
    /// provided [`Email`].
    #[must_use]
    pub fn generated_for(email: &Email) -> Self {
        Self(format!(
            "https://robohash.org/{}?set=set3&size=200x200",
            urlencoding::encode(email.as_ref()),
        ))
    }
}

define_kind! {
    #[doc = "Self-reported programming level of a member."]
    enum Level {
        #[doc = "Is just starting with programming."]
        #[label = "Iniciante"]
        Beginner,

        #[doc = "Is comfortable with the basics."]
        #[label = "Intermediário"]
        Intermediate,

        #[doc = "Is experienced."]
        #[label = "Avançado"]
        Advanced,
    }
}

define_kind! {
    #[doc = "Time of the day a member is available to study at."]
    enum StudyTime {
        #[doc = "Before noon."]
        #[label = "Manhã"]
        Morning,

        #[doc = "After noon."]
        #[label = "Tarde"]
        Afternoon,

        #[doc = "In the evening."]
        #[label = "Noite"]
        Night,
    }
}

impl StudyTime {
    /// Text describing an empty set of [`StudyTime`]s.
    pub const UNSPECIFIED: &'static str = "Não especificado";

    /// Describes the provided [`StudyTime`]s as comma-separated labels.
    #[must_use]
    pub fn describe<'t>(times: impl IntoIterator<Item = &'t Self>) -> String {
        let described = times.into_iter().map(|t| t.label()).join(", ");
        if described.is_empty() {
            Self::UNSPECIFIED.to_owned()
        } else {
            described
        }
    }
}

/// Credentials identifying a member in the directory.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Credentials {
    /// [`Email`] of the member.
    pub email: Email,

    /// WhatsApp [`Phone`] of the member.
    pub whatsapp: Phone,
}

/// Data registering a new member in the directory.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// [`Name`] of the new member.
    pub name: Name,

    /// [`Email`] of the new member.
    pub email: Email,

    /// WhatsApp [`Phone`] of the new member.
    pub whatsapp: Phone,

    /// [`PostalCode`] of the new member.
    pub cep: PostalCode,

    /// Programming [`Level`] of the new member.
    pub level: Level,

    /// [`StudyTime`]s of the new member.
    pub study_times: BTreeSet<StudyTime>,

    /// Free-text biography of the new member.
    pub about: String,

    /// [`AvatarUrl`] of the new member.
    ///
    /// Generated from the [`Email`] when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<AvatarUrl>,
}

impl Registration {
    /// Checks the parts of this [`Registration`] its types don't guarantee.
    ///
    /// # Errors
    ///
    /// With the first [`Violation`] found.
    pub fn check(&self) -> Result<(), Violation> {
        check_study_times(&self.study_times)?;
        check_about(&self.about)
    }
}

/// Partial update of a [`Profile`].
///
/// Unknown fields are ignored on deserialization.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    /// New [`Id`].
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    /// New [`Name`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,

    /// New [`Email`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,

    /// New WhatsApp [`Phone`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<Phone>,

    /// New [`AvatarUrl`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<AvatarUrl>,

    /// New [`PostalCode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<PostalCode>,

    /// New [`Level`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,

    /// New [`StudyTime`]s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub study_times: Option<BTreeSet<StudyTime>>,

    /// New biography.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl Patch {
    /// Indicates whether this [`Patch`] changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Checks the parts of this [`Patch`] its types don't guarantee.
    ///
    /// # Errors
    ///
    /// With the first [`Violation`] found.
    pub fn check(&self) -> Result<(), Violation> {
        if let Some(times) = &self.study_times {
            check_study_times(times)?;
        }
        if let Some(about) = &self.about {
            check_about(about)?;
        }
        Ok(())
    }

    /// Applies this [`Patch`] to the provided [`Profile`].
    pub fn apply_to(self, profile: &mut Profile) {
        let Self {
            id,
            name,
            email,
            whatsapp,
            avatar_url,
            cep,
            level,
            study_times,
            about,
        } = self;

        if let Some(id) = id {
            profile.id = id;
        }
        if let Some(name) = name {
            profile.name = name;
        }
        if let Some(email) = email {
            profile.email = email;
        }
        if let Some(whatsapp) = whatsapp {
            profile.whatsapp = whatsapp;
        }
        if avatar_url.is_some() {
            profile.avatar_url = avatar_url;
        }
        if let Some(cep) = cep {
            profile.cep = cep;
        }
        if let Some(level) = level {
            profile.level = level;
        }
        if let Some(times) = study_times {
            profile.study_times = times;
        }
        if let Some(about) = about {
            profile.about = about;
        }
    }
}

impl From<Profile> for Patch {
    fn from(profile: Profile) -> Self {
        let Profile {
            id,
            name,
            email,
            whatsapp,
            avatar_url,
            cep,
            level,
            study_times,
            about,
        } = profile;

        Self {
            id: Some(id),
            name: Some(name),
            email: Some(email),
            whatsapp: Some(whatsapp),
            avatar_url,
            cep: Some(cep),
            level: Some(level),
            study_times: Some(study_times),
            about: Some(about),
        }
    }
}

/// Violation of a [`Profile`] requirement not expressed by its types.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum Violation {
    /// No [`StudyTime`] is selected.
    #[display("At least one study time must be selected")]
    NoStudyTimes,

    /// Biography is blank.
    #[display("The `about` text must not be blank")]
    BlankAbout,
}

/// Checks that at least one [`StudyTime`] is selected.
fn check_study_times(times: &BTreeSet<StudyTime>) -> Result<(), Violation> {
    if times.is_empty() {
        Err(Violation::NoStudyTimes)
    } else {
        Ok(())
    }
}

/// Checks that the biography is not blank.
fn check_about(about: &str) -> Result<(), Violation> {
    if about.trim().is_empty() {
        Err(Violation::BlankAbout)
    } else {
        Ok(())
    }
}
