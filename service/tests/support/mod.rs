//! Doubles shared by the integration tests.

#![allow(dead_code, reason = "not every test crate uses every helper")]

use std::sync::{Arc, Mutex, PoisonError};

use common::operations::{By, Insert, Select, Update};
use serde_json::json;
use service::{
    domain::{
        search::{Criteria, Nearby},
        user::{self, Session},
        Partner, Profile,
    },
    infra::{
        directory::{self, Directory, Rejection},
        storage::{Entry, Key, Memory},
    },
    Config, Service,
};
use tracerr::Traced;

/// Request received by a [`Fake`] directory.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Register(user::Registration),
    Verify(user::Credentials),
    Update(user::Id, user::Patch),
    Search(Criteria),
    Nearby(Nearby),
}

/// In-memory directory recording every request it receives.
#[derive(Clone, Debug, Default)]
pub struct Fake(Arc<Mutex<State>>);

#[derive(Debug, Default)]
struct State {
    members: Vec<Profile>,
    partners: Vec<Partner>,
    calls: Vec<Call>,
}

impl Fake {
    pub fn with_member(self, profile: Profile) -> Self {
        self.state().members.push(profile);
        self
    }

    pub fn with_partner(self, partner: Partner) -> Self {
        self.state().partners.push(partner);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn rejection(status: u16, message: &str) -> Traced<directory::Error> {
    tracerr::new!(directory::Error::Rejected(Rejection {
        status,
        message: Some(message.into()),
    }))
}

impl Directory<Insert<user::Registration>> for Fake {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Insert(reg): Insert<user::Registration>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.calls.push(Call::Register(reg.clone()));

        if state.members.iter().any(|m| m.email == reg.email) {
            return Err(tracerr::new!(directory::Error::Conflict(
                Rejection {
                    status: 409,
                    message: Some("Email already in use".into()),
                }
            )));
        }

        let profile = Profile {
            id: format!("member-{}", state.members.len() + 1).into(),
            name: reg.name,
            email: reg.email,
            whatsapp: reg.whatsapp,
            avatar_url: reg.avatar_url,
            cep: reg.cep,
            level: reg.level,
            study_times: reg.study_times,
            about: reg.about,
        };
        state.members.push(profile.clone());
        Ok(profile)
    }
}

impl Directory<Select<By<Profile, user::Credentials>>> for Fake {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Profile, user::Credentials>>,
    ) -> Result<Self::Ok, Self::Err> {
        let creds = by.into_inner();
        let mut state = self.state();
        state.calls.push(Call::Verify(creds.clone()));

        state
            .members
            .iter()
            .find(|m| m.email == creds.email && m.whatsapp == creds.whatsapp)
            .cloned()
            .ok_or_else(|| rejection(404, "User not found"))
    }
}

impl Directory<Update<(user::Id, user::Patch)>> for Fake {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Update((id, patch)): Update<(user::Id, user::Patch)>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.calls.push(Call::Update(id.clone(), patch.clone()));

        let member = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| rejection(404, "User not found"))?;
        patch.apply_to(member);
        Ok(member.clone())
    }
}

impl Directory<Select<By<Vec<Partner>, Criteria>>> for Fake {
    type Ok = Vec<Partner>;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Partner>, Criteria>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.calls.push(Call::Search(by.into_inner()));
        Ok(state.partners.clone())
    }
}

impl Directory<Select<By<Vec<Partner>, Nearby>>> for Fake {
    type Ok = Vec<Partner>;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Partner>, Nearby>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state();
        state.calls.push(Call::Nearby(by.into_inner()));
        Ok(state.partners.clone())
    }
}

pub fn service(directory: Fake) -> (Service<Memory, Fake>, Memory) {
    let storage = Memory::default();
    let svc = Service::new(Config::default(), storage.clone(), directory);
    (svc, storage)
}

pub fn profile(id: &str, email: &str) -> Profile {
    serde_json::from_value(json!({
        "_id": id,
        "name": "Ana Souza",
        "email": email,
        "whatsapp": "11999998888",
        "cep": "01310-100",
        "level": "intermediate",
        "studyTimes": ["morning", "night"],
        "about": "Learning Rust",
    }))
    .unwrap()
}

pub fn partner(id: &str, distance: Option<f64>) -> Partner {
    serde_json::from_value(json!({
        "_id": id,
        "name": "Bruno Lima",
        "whatsapp": "(21) 98888-7777",
        "level": "beginner",
        "studyTimes": ["afternoon"],
        "about": "Frontend",
        "distance": distance,
    }))
    .unwrap()
}

pub fn credentials(email: &str, whatsapp: &str) -> user::Credentials {
    user::Credentials {
        email: user::Email::new(email).unwrap(),
        whatsapp: user::Phone::new(whatsapp).unwrap(),
    }
}

pub async fn stored_session(storage: &Memory) -> Option<Session> {
    storage
        .execute(Select(By::<Option<String>, _>::new(Key::SESSION)))
        .await
        .unwrap()
        .map(|record| serde_json::from_str(&record).unwrap())
}

pub async fn store(storage: &Memory, key: Key, value: impl Into<String>) {
    storage
        .execute(Insert(Entry {
            key,
            value: value.into(),
        }))
        .await
        .unwrap();
}
