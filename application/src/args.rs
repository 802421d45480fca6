//! [`Args`] definitions.

use clap::{Parser, Subcommand, ValueEnum};
use service::domain::{
    search::DistanceMode,
    user::{self, Level, StudyTime},
};

/// Finds study partners nearby and hands the conversation off to WhatsApp.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Action to perform.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Signs in with the email and WhatsApp number known to the directory.
    SignIn {
        /// Email of the member.
        #[arg(long)]
        email: user::Email,

        /// WhatsApp number of the member, formatted or not.
        #[arg(long)]
        whatsapp: user::Phone,
    },

    /// Registers a new member and signs them in.
    Register(Registration),

    /// Shows the profile of the signed-in member.
    Profile,

    /// Updates the profile of the signed-in member.
    Update(Update),

    /// Signs the current member out.
    SignOut,

    /// Searches partners by the filters of the search page.
    Search(Search),

    /// Searches partners around a postal code.
    Nearby(Nearby),

    /// Shows or changes the color theme.
    Theme {
        /// New theme, shows the current one if omitted.
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

/// Arguments of [`Command::Register`].
#[derive(Clone, Debug, clap::Args)]
pub struct Registration {
    /// Full name.
    #[arg(long)]
    pub name: user::Name,

    /// Email.
    #[arg(long)]
    pub email: user::Email,

    /// WhatsApp number with the area code.
    #[arg(long)]
    pub whatsapp: user::Phone,

    /// Postal code (CEP) to search partners around.
    #[arg(long)]
    pub cep: user::PostalCode,

    /// Programming level: beginner, intermediate or advanced.
    #[arg(long)]
    pub level: Level,

    /// Times of the day to study at: morning, afternoon or night.
    #[arg(long = "study-time", required = true)]
    pub study_times: Vec<StudyTime>,

    /// A few words about yourself.
    #[arg(long)]
    pub about: String,

    /// Avatar picture URL, generated from the email if omitted.
    #[arg(long)]
    pub avatar_url: Option<String>,
}

impl From<Registration> for user::Registration {
    fn from(value: Registration) -> Self {
        let Registration {
            name,
            email,
            whatsapp,
            cep,
            level,
            study_times,
            about,
            avatar_url,
        } = value;

        Self {
            name,
            email,
            whatsapp,
            cep,
            level,
            study_times: study_times.into_iter().collect(),
            about,
            avatar_url: avatar_url.map(Into::into),
        }
    }
}

/// Arguments of [`Command::Update`].
#[derive(Clone, Debug, clap::Args)]
pub struct Update {
    /// New full name.
    #[arg(long)]
    pub name: Option<user::Name>,

    /// New email.
    #[arg(long)]
    pub email: Option<user::Email>,

    /// New WhatsApp number.
    #[arg(long)]
    pub whatsapp: Option<user::Phone>,

    /// New postal code (CEP).
    #[arg(long)]
    pub cep: Option<user::PostalCode>,

    /// New programming level.
    #[arg(long)]
    pub level: Option<Level>,

    /// New times of the day to study at, replacing the current ones.
    #[arg(long = "study-time")]
    pub study_times: Vec<StudyTime>,

    /// New text about yourself.
    #[arg(long)]
    pub about: Option<String>,

    /// New avatar picture URL.
    #[arg(long)]
    pub avatar_url: Option<String>,
}

impl From<Update> for user::Patch {
    fn from(value: Update) -> Self {
        let Update {
            name,
            email,
            whatsapp,
            cep,
            level,
            study_times,
            about,
            avatar_url,
        } = value;

        Self {
            id: None,
            name,
            email,
            whatsapp,
            avatar_url: avatar_url.map(Into::into),
            cep,
            level,
            study_times: (!study_times.is_empty())
                .then(|| study_times.into_iter().collect()),
            about,
        }
    }
}

/// Arguments of [`Command::Search`].
#[derive(Clone, Debug, clap::Args)]
pub struct Search {
    /// Programming level of the partners, any if omitted.
    #[arg(long)]
    pub level: Option<Level>,

    /// Times of the day the partners study at, any if omitted.
    #[arg(long = "study-time")]
    pub study_times: Vec<StudyTime>,

    /// Distance to search within: `10`, `100` or `any`.
    #[arg(long, default_value = "any")]
    pub distance: String,

    /// Postal code (CEP) to search around, the signed-in member's one if
    /// omitted.
    #[arg(long)]
    pub cep: Option<String>,
}

impl Search {
    /// Returns the [`DistanceMode`] selected by these arguments.
    #[must_use]
    pub fn distance_mode(&self) -> DistanceMode {
        DistanceMode::from_selection(&self.distance)
    }
}

/// Arguments of [`Command::Nearby`].
#[derive(Clone, Debug, clap::Args)]
pub struct Nearby {
    /// Postal code (CEP) to search around.
    pub cep: String,

    /// Radius in kilometers.
    #[arg(long, default_value_t = 10)]
    pub radius: u16,

    /// Programming level of the partners, any if omitted.
    #[arg(long)]
    pub level: Option<Level>,

    /// Times of the day the partners study at, any if omitted.
    #[arg(long = "study-time")]
    pub study_times: Vec<StudyTime>,
}

/// Change of the color theme.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ThemeAction {
    /// Switches to the light theme.
    Light,

    /// Switches to the dark theme.
    Dark,

    /// Switches to the opposite theme.
    Toggle,
}
