use std::collections::BTreeSet;

use axum::{
    extract::{Path, RawQuery},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use common::operations::{By, Insert, Select, Update};
use serde_json::{json, Value};
use service::{
    domain::{
        search::{Criteria, Nearby, Radius},
        user::{self, Level, StudyTime},
        Partner, Profile,
    },
    infra::{
        directory::{self, http, Rejection},
        Directory as _, Http,
    },
};

fn member(id: &str, body: &Value) -> Value {
    json!({
        "_id": id,
        "name": body["name"].as_str().unwrap_or("Ana Souza"),
        "email": body["email"].as_str().unwrap_or("ana@example.com"),
        "whatsapp": body["whatsapp"].as_str().unwrap_or("(11) 99999-8888"),
        "avatarUrl": body["avatarUrl"],
        "cep": body["cep"].as_str().unwrap_or("01310100"),
        "level": body["level"].as_str().unwrap_or("beginner"),
        "studyTimes": body.get("studyTimes").cloned().unwrap_or(json!([])),
        "about": body["about"].as_str().unwrap_or(""),
    })
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already in use" })),
        );
    }
    (StatusCode::CREATED, Json(member("new-1", &body)))
}

async fn verify(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["whatsapp"] == "(11) 99999-8888" {
        (StatusCode::OK, Json(member("42", &body)))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
    }
}

async fn update(
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    Json(member(&id, &body))
}

async fn search(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!([{
        "id": "7",
        "name": "Bruno Lima",
        "whatsapp": "21988887777",
        "level": "advanced",
        "about": query.unwrap_or_default(),
    }]))
}

async fn nearby(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!([{
        "_id": "8",
        "name": "Carla Dias",
        "whatsapp": "31977776666",
        "level": "beginner",
        "studyTimes": ["night"],
        "about": query.unwrap_or_default(),
        "distance": 3.26,
    }]))
}

async fn odd_nearby() -> Json<Value> {
    Json(json!([
        {
            "_id": "8",
            "name": "Carla Dias",
            "whatsapp": "31977776666",
            "level": "beginner",
            "distance": 0.4,
        },
        {
            "_id": "9",
            "name": "Duda Reis",
            "whatsapp": "+55 21 98888-7777",
            "level": "expert",
            "studyTimes": ["weekend"],
        },
        { "_id": "10", "name": "", "whatsapp": "", "level": "" },
    ]))
}

async fn spawn_backend() -> Http {
    let app = Router::new()
        .route("/api/users", post(register))
        .route("/api/users/verify", post(verify))
        .route("/api/users/:id", put(update))
        .route("/api/search/partners", get(search))
        .route("/api/search/nearby", get(nearby))
        .route(
            "/api/broken/search/partners",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route("/api/odd/search/nearby", get(odd_nearby))
        .route(
            "/api/garbled/search/partners",
            get(|| async { "<html>maintenance</html>" }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    }));

    Http::new(&http::Config {
        base_url: format!("http://{addr}/api/"),
        ..http::Config::default()
    })
    .unwrap()
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
async fn registers_member() {
    let http = spawn_backend().await;

    let profile: Profile = http
        .execute(Insert(registration("carla@example.com")))
        .await
        .unwrap();

    assert_eq!(profile.id, "new-1".into());
    assert_eq!(profile.email.as_ref(), "carla@example.com");
    assert_eq!(profile.whatsapp.as_ref(), "(31) 97777-6666");
    assert_eq!(profile.study_times, BTreeSet::from([StudyTime::Night]));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let http = spawn_backend().await;

    let err = http
        .execute(Insert(registration("taken@example.com")))
        .await
        .unwrap_err();

    assert!(err.as_ref().is_conflict(), "{err}");
    assert_eq!(
        err.as_ref().rejection(),
        Some(&Rejection {
            status: 409,
            message: Some("Email already in use".into()),
        }),
    );
}

#[tokio::test]
async fn verifies_credentials() {
    let http = spawn_backend().await;
    let credentials = |phone: &str| user::Credentials {
        email: user::Email::new("ana@example.com").unwrap(),
        whatsapp: user::Phone::new(phone).unwrap(),
    };

    let profile = http
        .execute(Select(By::<Profile, _>::new(credentials("11999998888"))))
        .await
        .unwrap();
    assert_eq!(profile.id, "42".into());

    let err = http
        .execute(Select(By::<Profile, _>::new(credentials("11911112222"))))
        .await
        .unwrap_err();
    assert!(!err.as_ref().is_conflict());
    assert_eq!(
        err.as_ref().rejection(),
        Some(&Rejection {
            status: 404,
            message: Some("User not found".into()),
        }),
    );
}

#[tokio::test]
async fn updates_profile_by_id() {
    let http = spawn_backend().await;

    let profile = http
        .execute(Update((
            user::Id::from("id with space"),
            user::Patch {
                about: Some("Updated".into()),
                ..user::Patch::default()
            },
        )))
        .await
        .unwrap();

    assert_eq!(profile.id, "id with space".into());
    assert_eq!(profile.about, "Updated");
}

#[tokio::test]
async fn searches_with_encoded_criteria() {
    let http = spawn_backend().await;

    let partners: Vec<Partner> = http
        .execute(Select(By::<Vec<Partner>, _>::new(Criteria {
            level: Some(Level::Advanced),
            study_times: [StudyTime::Morning, StudyTime::Night].into(),
            exclude_email: user::Email::new("me@example.com"),
        })))
        .await
        .unwrap();

    assert_eq!(partners.len(), 1);
    assert_eq!(
        partners[0].about,
        "level=advanced&studyTimes%5B%5D=morning&studyTimes%5B%5D=night\
         &excludeEmail=me%40example.com",
    );
    assert_eq!(partners[0].distance, None);
    assert_eq!(partners[0].contact_link(), "https://wa.me/21988887777");
}

#[tokio::test]
async fn searches_nearby_with_postal_code_and_radius() {
    let http = spawn_backend().await;

    let partners = http
        .execute(Select(By::<Vec<Partner>, _>::new(Nearby {
            postal_code: user::PostalCode::new("01310-100").unwrap(),
            radius: Radius::NARROW,
            criteria: Criteria::default(),
        })))
        .await
        .unwrap();

    assert_eq!(partners[0].about, "cep=01310100&radius=10");
    assert_eq!(
        partners[0].distance.map(|d| d.to_string()).as_deref(),
        Some("3.3km"),
    );
}

#[tokio::test]
async fn plain_text_failure_is_rejected() {
    let http = backend_at("broken").await;

    let err = http
        .execute(Select(By::<Vec<Partner>, _>::new(Criteria::default())))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.as_ref(),
            directory::Error::Rejected(Rejection { status: 502, message })
                if message.as_deref() == Some("upstream down")
        ),
        "{err}",
    );
}

async fn backend_at(prefix: &str) -> Http {
    Http::new(&http::Config {
        base_url: format!("{}/{prefix}", spawn_backend().await.base_url()),
        ..http::Config::default()
    })
    .unwrap()
}

#[tokio::test]
async fn nearby_keeps_unusual_records() {
    let http = backend_at("odd").await;

    let partners = http
        .execute(Select(By::<Vec<Partner>, _>::new(Nearby {
            postal_code: user::PostalCode::new("01310-100").unwrap(),
            radius: Radius::WIDE,
            criteria: Criteria::default(),
        })))
        .await
        .unwrap();

    assert_eq!(partners.len(), 2);
    assert_eq!(partners[0].contact_link(), "https://wa.me/31977776666");
    assert_eq!(partners[1].contact_link(), "https://wa.me/5521988887777");
    assert_eq!(partners[1].level_label(), "expert");
    assert_eq!(partners[1].study_times_label(), "weekend");
}

#[tokio::test]
async fn garbled_body_is_decode_failure() {
    let http = backend_at("garbled").await;

    let err = http
        .execute(Select(By::<Vec<Partner>, _>::new(Criteria::default())))
        .await
        .unwrap_err();

    assert!(
        matches!(err.as_ref(), directory::Error::Http(http::Error::Decode(_))),
        "{err}",
    );
    assert_eq!(err.as_ref().rejection(), None);
}

#[tokio::test]
async fn unreachable_directory_is_transport_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = Http::new(&http::Config {
        base_url: format!("http://{addr}/api"),
        ..http::Config::default()
    })
    .unwrap();

    let err = http
        .execute(Select(By::<Vec<Partner>, _>::new(Criteria::default())))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err.as_ref(),
            directory::Error::Http(http::Error::Transport(_)),
        ),
        "{err}",
    );
    assert_eq!(err.as_ref().rejection(), None);
}
