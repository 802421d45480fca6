//! Text rendering of the values shown to a member.

use itertools::Itertools as _;
use service::domain::{
    user::{Session, StudyTime},
    Partner, Profile,
};

/// Text shown when a search finds nobody.
pub(crate) const NO_PARTNERS: &str = "Nenhum parceiro encontrado.";

/// Renders the provided [`Profile`] as a card.
pub(crate) fn profile(profile: &Profile) -> String {
    let Profile {
        id: _,
        name,
        email,
        whatsapp,
        avatar_url,
        cep,
        level,
        study_times,
        about,
    } = profile;

    let mut lines = vec![
        format!("{name} <{email}>"),
        format!("  WhatsApp: {whatsapp}"),
        format!("  CEP: {cep}"),
        format!("  Nível: {}", level.label()),
        format!("  Horários: {}", StudyTime::describe(study_times)),
        format!("  Sobre: {about}"),
    ];
    if let Some(url) = avatar_url {
        lines.push(format!("  Avatar: {url}"));
    }
    lines.join("\n")
}

/// Renders the provided [`Session`] as the card of its member followed by
/// its expiration.
pub(crate) fn session(session: &Session) -> String {
    format!(
        "{}\n  Sessão válida até: {}",
        profile(&session.profile),
        session.expires_at.to_rfc3339(),
    )
}

/// Renders the provided [`Partner`] as a card ending with the link to
/// contact them.
pub(crate) fn partner(partner: &Partner) -> String {
    let mut lines = vec![
        format!("{} ({})", partner.name, partner.level_label()),
        format!("  Horários: {}", partner.study_times_label()),
    ];
    if let Some(distance) = partner.distance {
        lines.push(format!("  Distância: {distance}"));
    }
    if !partner.about.trim().is_empty() {
        lines.push(format!("  Sobre: {}", partner.about));
    }
    lines.push(format!("  Conversar: {}", partner.contact_link()));
    lines.join("\n")
}

/// Renders the provided [`Partner`]s separated by blank lines.
pub(crate) fn partners(partners: &[Partner]) -> String {
    if partners.is_empty() {
        return NO_PARTNERS.to_owned();
    }
    partners.iter().map(partner).join("\n\n")
}
