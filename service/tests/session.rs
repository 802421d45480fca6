mod support;

use std::time::Duration;

use common::DateTime;
use service::{
    command::{
        log_in, register, update_profile, LogIn, LogOut, Register,
        RestoreSession, SignIn, UpdateProfile, UpdateSession,
    },
    domain::user::{self, session::ExpirationDateTime, Level, StudyTime},
    infra::storage::{Key, Memory},
    query::CurrentSession,
    Command as _, Config, Service,
};

use self::support::{
    credentials, profile, service, store, stored_session, Fake,
};

const THIRTY_DAYS: Duration = Duration::from_secs(30 * 24 * 60 * 60);

fn record(expiry: &str) -> String {
    let mut json = serde_json::to_value(profile("42", "ana@example.com"))
        .unwrap();
    json["expiry"] = expiry.into();
    json.to_string()
}

#[tokio::test]
async fn restoring_expired_record_clears_it() {
    let (svc, storage) = service(Fake::default());
    store(&storage, Key::SESSION, record("2020-01-01T00:00:00Z")).await;

    let restored = svc.execute(RestoreSession).await.unwrap();

    assert_eq!(restored, None);
    assert_eq!(stored_session(&storage).await, None);
    assert_eq!(svc.execute(CurrentSession).await.unwrap(), None);
}

#[tokio::test]
async fn restores_valid_record() {
    let (svc, storage) = service(Fake::default());
    store(&storage, Key::SESSION, record("2999-01-01T00:00:00Z")).await;

    let restored = svc.execute(RestoreSession).await.unwrap().unwrap();

    assert_eq!(restored.profile.id, "42".into());
    assert_eq!(restored.expires_at.to_rfc3339(), "2999-01-01T00:00:00Z");
    assert_eq!(
        svc.execute(CurrentSession).await.unwrap(),
        Some(restored.clone()),
    );

    // Restoring twice changes nothing.
    assert_eq!(svc.execute(RestoreSession).await.unwrap(), Some(restored));
}

#[tokio::test]
async fn restoring_corrupt_record_clears_it() {
    let (svc, storage) = service(Fake::default());
    store(&storage, Key::SESSION, r#"{"name": "#).await;

    assert_eq!(svc.execute(RestoreSession).await.unwrap(), None);
    assert_eq!(stored_session(&storage).await, None);
}

#[tokio::test]
async fn restoring_without_record_is_signed_out() {
    let (svc, _) = service(Fake::default());

    assert_eq!(svc.execute(RestoreSession).await.unwrap(), None);
}

#[tokio::test]
async fn log_in_lasts_thirty_days_by_default() {
    let (svc, storage) = service(Fake::default());

    let before = DateTime::now();
    let session = svc
        .execute(LogIn::from(profile("42", "ana@example.com")))
        .await
        .unwrap();
    let after = DateTime::now();

    let earliest: ExpirationDateTime = (before + THIRTY_DAYS).coerce();
    let latest: ExpirationDateTime = (after + THIRTY_DAYS).coerce();
    assert!(session.expires_at >= earliest);
    assert!(session.expires_at <= latest);

    assert_eq!(stored_session(&storage).await, Some(session));
}

#[tokio::test]
async fn log_in_keeps_provided_expiry() {
    let (svc, storage) = service(Fake::default());
    let expires_at = ExpirationDateTime::from_rfc3339("2999-06-01T12:00:00Z")
        .unwrap();

    let session = svc
        .execute(LogIn {
            profile: profile("42", "ana@example.com"),
            expires_at: Some(expires_at),
        })
        .await
        .unwrap();

    assert_eq!(session.expires_at, expires_at);
    assert_eq!(
        stored_session(&storage).await.unwrap().expires_at,
        expires_at,
    );
}

#[tokio::test]
async fn log_in_rejects_out_of_range_lifetime() {
    let storage = Memory::default();
    let svc = Service::new(
        Config {
            session_lifetime: Duration::from_secs(u64::MAX / 4),
            ..Config::default()
        },
        storage.clone(),
        Fake::default(),
    );

    let err = svc
        .execute(LogIn::from(profile("42", "ana@example.com")))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.as_ref(),
            log_in::ExecutionError::LifetimeOutOfRange(_),
        ),
        "{err}",
    );
    assert_eq!(svc.execute(CurrentSession).await.unwrap(), None);
    assert_eq!(stored_session(&storage).await, None);
}

#[tokio::test]
async fn update_session_never_touches_expiry() {
    let (svc, storage) = service(Fake::default());
    let session = svc
        .execute(LogIn::from(profile("42", "ana@example.com")))
        .await
        .unwrap();

    let patches: [user::Patch; 3] = [
        serde_json::from_str(
            r#"{"name": "Ana Clara", "expiry": "2100-01-01T00:00:00Z"}"#,
        )
        .unwrap(),
        user::Patch {
            level: Some(Level::Advanced),
            study_times: Some([StudyTime::Afternoon].into()),
            ..user::Patch::default()
        },
        user::Patch::default(),
    ];
    for patch in patches {
        let updated =
            svc.execute(UpdateSession(patch)).await.unwrap().unwrap();
        assert_eq!(updated.expires_at, session.expires_at);
    }

    let stored = stored_session(&storage).await.unwrap();
    assert_eq!(stored.expires_at, session.expires_at);
    assert_eq!(stored.profile.name.as_ref(), "Ana Clara");
    assert_eq!(stored.profile.level, Level::Advanced);
    assert_eq!(
        stored.profile.study_times,
        [StudyTime::Afternoon].into_iter().collect(),
    );
    assert_eq!(stored.profile.email, session.profile.email);
}

#[tokio::test]
async fn update_session_without_session_does_nothing() {
    let (svc, storage) = service(Fake::default());

    let updated = svc
        .execute(UpdateSession(user::Patch {
            about: Some("Hello".into()),
            ..user::Patch::default()
        }))
        .await
        .unwrap();

    assert_eq!(updated, None);
    assert_eq!(stored_session(&storage).await, None);
}

#[tokio::test]
async fn expired_session_ends_on_read() {
    let (svc, storage) = service(Fake::default());
    _ = svc
        .execute(LogIn {
            profile: profile("42", "ana@example.com"),
            expires_at: Some(
                (DateTime::now() - Duration::from_secs(1)).coerce(),
            ),
        })
        .await
        .unwrap();

    assert_eq!(svc.execute(CurrentSession).await.unwrap(), None);
    assert_eq!(stored_session(&storage).await, None);
}

#[tokio::test]
async fn signs_in_and_out() {
    let directory =
        Fake::default().with_member(profile("42", "ana@example.com"));
    let (svc, storage) = service(directory);

    let before = DateTime::now();
    let session = svc
        .execute(SignIn(credentials("ana@example.com", "(11) 99999-8888")))
        .await
        .unwrap();

    assert_eq!(session.profile, profile("42", "ana@example.com"));
    assert!(session.expires_at >= (before + THIRTY_DAYS).coerce());
    assert_eq!(stored_session(&storage).await, Some(session.clone()));
    assert_eq!(svc.execute(CurrentSession).await.unwrap(), Some(session));

    svc.execute(LogOut).await.unwrap();
    assert_eq!(svc.execute(CurrentSession).await.unwrap(), None);
    assert_eq!(stored_session(&storage).await, None);

    svc.execute(LogOut).await.unwrap();
}

#[tokio::test]
async fn wrong_credentials_keep_signed_out() {
    let directory =
        Fake::default().with_member(profile("42", "ana@example.com"));
    let (svc, storage) = service(directory);

    let err = svc
        .execute(SignIn(credentials("ana@example.com", "(11) 91111-2222")))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("User not found"), "{err}");
    assert_eq!(stored_session(&storage).await, None);
}

fn registration(email: &str) -> user::Registration {
    user::Registration {
        name: user::Name::new("Carla Dias").unwrap(),
        email: user::Email::new(email).unwrap(),
        whatsapp: user::Phone::new("31977776666").unwrap(),
        cep: user::PostalCode::new("30130-010").unwrap(),
        level: Level::Beginner,
        study_times: [StudyTime::Night].into(),
        about: "Career switcher".into(),
        avatar_url: None,
    }
}

#[tokio::test]
async fn registers_and_signs_in() {
    let directory = Fake::default();
    let (svc, storage) = service(directory.clone());

    let session = svc
        .execute(Register(registration("carla@example.com")))
        .await
        .unwrap();

    assert_eq!(session.profile.id, "member-1".into());
    assert_eq!(
        session
            .profile
            .avatar_url
            .as_ref()
            .map(ToString::to_string)
            .as_deref(),
        Some(
            "https://robohash.org/carla%40example.com?set=set3&size=200x200"
        ),
    );
    assert_eq!(stored_session(&storage).await, Some(session));
    assert_eq!(directory.calls().len(), 1);
}

#[tokio::test]
async fn registering_occupied_email_conflicts() {
    let directory =
        Fake::default().with_member(profile("42", "ana@example.com"));
    let (svc, storage) = service(directory);

    let err = svc
        .execute(Register(registration("ana@example.com")))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.as_ref(),
            register::ExecutionError::EmailOccupied(e)
                if e.as_ref() == "ana@example.com"
        ),
        "{err}",
    );
    assert_eq!(stored_session(&storage).await, None);
}

#[tokio::test]
async fn invalid_registration_reaches_no_directory() {
    let directory = Fake::default();
    let (svc, _) = service(directory.clone());

    let mut reg = registration("carla@example.com");
    reg.study_times.clear();
    let err = svc.execute(Register(reg)).await.unwrap_err();

    assert!(matches!(
        err.as_ref(),
        register::ExecutionError::InvalidRegistration(
            user::Violation::NoStudyTimes
        ),
    ));
    assert!(directory.calls().is_empty());
}

#[tokio::test]
async fn updates_profile_of_signed_in_member() {
    let directory =
        Fake::default().with_member(profile("42", "ana@example.com"));
    let (svc, storage) = service(directory);
    let session = svc
        .execute(SignIn(credentials("ana@example.com", "11999998888")))
        .await
        .unwrap();

    let updated = svc
        .execute(UpdateProfile(user::Patch {
            about: Some("Now pairing on Rust".into()),
            cep: user::PostalCode::new("20040020"),
            ..user::Patch::default()
        }))
        .await
        .unwrap();

    assert_eq!(updated.expires_at, session.expires_at);
    assert_eq!(updated.profile.about, "Now pairing on Rust");
    assert_eq!(updated.profile.cep.digits(), "20040020");
    assert_eq!(stored_session(&storage).await, Some(updated));
}

#[tokio::test]
async fn updating_profile_requires_session() {
    let directory = Fake::default();
    let (svc, _) = service(directory.clone());

    let err = svc
        .execute(UpdateProfile(user::Patch {
            about: Some("Hi".into()),
            ..user::Patch::default()
        }))
        .await
        .unwrap_err();

    assert!(matches!(
        err.as_ref(),
        update_profile::ExecutionError::NotSignedIn,
    ));
    assert!(directory.calls().is_empty());
}
