//! Domain definitions.

pub mod partner;
pub mod search;
pub mod theme;
pub mod user;

pub use self::{partner::Partner, theme::Theme, user::Profile};
