//! [`Theme`] definitions.

use derive_more::Display;

/// Color theme preferred by the member.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Theme {
    /// Light colors.
    #[display("light")]
    Light,

    /// Dark colors.
    #[display("dark")]
    Dark,
}

impl Theme {
    /// Creates a [`Theme`] out of the dark mode flag.
    #[must_use]
    pub const fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Indicates whether this [`Theme`] is the dark one.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Returns the opposite [`Theme`].
    #[must_use]
    pub const fn toggled(self) -> Self {
        Self::from_dark_mode(!self.is_dark())
    }
}
