//! HTTP [`Directory`] implementation.

use std::time::Duration;

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing::{self as log, Instrument as _};

#[cfg(doc)]
use crate::infra::Directory;
use crate::{
    domain::{
        search::{Criteria, Nearby},
        user, Partner, Profile,
    },
    infra::directory::{self, Rejection},
};

/// [`Http`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the directory API.
    #[default("http://localhost:5000/api".into())]
    pub base_url: String,

    /// Timeout of a single request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

/// [`Directory`] reached over its JSON HTTP API.
#[derive(Clone, Debug)]
pub struct Http {
    /// Client performing the requests.
    client: reqwest::Client,

    /// Base URL every request path is appended to, without a trailing `/`.
    base_url: String,
}

impl Http {
    /// Creates a new [`Http`] directory with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to build the underlying HTTP client.
    pub fn new(conf: &Config) -> Result<Self, Traced<directory::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(|e| tracerr::new!(Error::Build(e)))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            client,
            base_url: conf.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Returns the base URL of this [`Http`] directory.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request to the provided `path` of the directory API.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, format!("{}{path}", self.base_url))
    }

    /// Sends the provided request and decodes its JSON response.
    ///
    /// Non-successful responses become a [`directory::Error::Conflict`] for
    /// `409 Conflict` and a [`directory::Error::Rejected`] otherwise.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<T, Traced<directory::Error>> {
        let span = log::info_span!(
            "directory",
            %method,
            path,
            status = log::field::Empty,
        );
        async {
            let resp = prepare(self.request(method, path))
                .send()
                .await
                .map_err(|e| tracerr::new!(Error::Transport(e)))
                .map_err(tracerr::map_from)?;

            let status = resp.status();
            _ = log::Span::current().record("status", status.as_u16());

            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                let rejection = Rejection {
                    status: status.as_u16(),
                    message: Rejection::message_of(&body),
                };
                log::debug!("rejected: {rejection}");
                return Err(tracerr::new!(if status == StatusCode::CONFLICT {
                    directory::Error::Conflict(rejection)
                } else {
                    directory::Error::Rejected(rejection)
                }));
            }

            resp.json::<T>()
                .await
                .map_err(|e| tracerr::new!(Error::Decode(e)))
                .map_err(tracerr::map_from)
        }
        .instrument(span)
        .await
    }
}

/// Decodes the provided search result `records` into [`Partner`]s.
///
/// Records that cannot be shown at all are skipped with a warning.
fn partners_of(records: Vec<serde_json::Value>) -> Vec<Partner> {
    records
        .into_iter()
        .filter_map(|record| {
            serde_json::from_value(record)
                .map_err(|e| log::warn!("skipped `Partner` record: {e}"))
                .ok()
        })
        .collect()
}

/// Builds query parameters of the provided search [`Criteria`].
fn criteria_params(criteria: &Criteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(2 + criteria.study_times.len());
    if let Some(level) = criteria.level {
        params.push(("level", level.to_string()));
    }
    params.extend(
        criteria
            .study_times
            .iter()
            .map(|t| ("studyTimes[]", t.to_string())),
    );
    if let Some(email) = &criteria.exclude_email {
        params.push(("excludeEmail", email.to_string()));
    }
    params
}

impl directory::Directory<Insert<user::Registration>> for Http {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Insert(registration): Insert<user::Registration>,
    ) -> Result<Self::Ok, Self::Err> {
        self.send(Method::POST, "/users", |r| r.json(&registration))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl directory::Directory<Select<By<Profile, user::Credentials>>> for Http {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Profile, user::Credentials>>,
    ) -> Result<Self::Ok, Self::Err> {
        let credentials = by.into_inner();
        self.send(Method::POST, "/users/verify", |r| r.json(&credentials))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl directory::Directory<Update<(user::Id, user::Patch)>> for Http {
    type Ok = Profile;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Update((id, patch)): Update<(user::Id, user::Patch)>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("/users/{}", urlencoding::encode(id.as_ref()));
        self.send(Method::PUT, &path, |r| r.json(&patch))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl directory::Directory<Select<By<Vec<Partner>, Criteria>>> for Http {
    type Ok = Vec<Partner>;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Partner>, Criteria>>,
    ) -> Result<Self::Ok, Self::Err> {
        let params = criteria_params(by.as_inner());
        self.send(Method::GET, "/search/partners", |r| r.query(&params))
            .await
            .map(partners_of)
            .map_err(tracerr::wrap!())
    }
}

impl directory::Directory<Select<By<Vec<Partner>, Nearby>>> for Http {
    type Ok = Vec<Partner>;
    type Err = Traced<directory::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Partner>, Nearby>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Nearby {
            postal_code,
            radius,
            criteria,
        } = by.as_inner();

        let mut params = vec![
            ("cep", postal_code.digits().to_owned()),
            ("radius", radius.to_string()),
        ];
        params.extend(criteria_params(criteria));

        self.send(Method::GET, "/search/nearby", |r| r.query(&params))
            .await
            .map(partners_of)
            .map_err(tracerr::wrap!())
    }
}

/// [`Http`] transport error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Failed to build the HTTP client.
    #[display("Failed to build HTTP client: {_0}")]
    Build(reqwest::Error),

    /// Failed to perform a request.
    #[display("HTTP request failed: {_0}")]
    Transport(reqwest::Error),

    /// Failed to decode a response body.
    #[display("Failed to decode response: {_0}")]
    Decode(reqwest::Error),
}
