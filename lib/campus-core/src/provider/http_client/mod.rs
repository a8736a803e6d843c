pub mod reqwest_client;


use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Moves a prepared request over the wire.
///
/// Status handling, JSON encoding and logging are done by [`RequestBuilder`] and
/// [`Response`], so implementations stay transport-only.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Response, Error>;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub fn is_error(self) -> bool {
        self.0 >= 400
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
    method: Method,
    url: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP status {0}")]
    Status(StatusCode),
}

impl Error {
    fn logged(self, location: &Location, method: Method, url: &str) -> Self {
        tracing::error!(%method, url, %location, error = %self, "HTTP request failed");
        self
    }
}

impl Response {
    pub fn new(request: &Request, status: StatusCode, body: Vec<u8>) -> Self {
        Self {
            status,
            body,
            method: request.method,
            url: request.url.clone(),
        }
    }

    #[track_caller]
    pub fn error_for_status(self) -> Result<Self, Error> {
        if !self.status.is_error() {
            return Ok(self);
        }

        let location = Location::caller();
        tracing::trace!(body = %format_body(&self.body), %location, "Error response body");
        Err(Error::Status(self.status).logged(location, self.method, &self.url))
    }

    #[track_caller]
    pub fn json<T: DeserializeOwned>(self) -> Result<T, Error> {
        let location = Location::caller();
        serde_json::from_slice(&self.body)
            .map_err(|error| Error::Json(error).logged(location, self.method, &self.url))
    }
}

pub struct RequestBuilder {
    client: Arc<dyn HttpClient>,
    request: Request,
}

impl RequestBuilder {
    pub fn new(client: Arc<dyn HttpClient>, method: Method, url: impl Into<String>) -> Self {
        Self {
            client,
            request: Request {
                method,
                url: url.into(),
                headers: vec![],
                body: None,
            },
        }
    }

    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.request
            .headers
            .push(("authorization", format!("Bearer {token}")));
        self
    }

    #[track_caller]
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, Error> {
        let location = Location::caller();
        let body = serde_json::to_vec(value).map_err(|error| {
            Error::Json(error).logged(location, self.request.method, &self.request.url)
        })?;

        self.request
            .headers
            .push(("content-type", "application/json".to_owned()));
        self.request.body = Some(body);
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, Error> {
        let Self { client, request } = self;
        tracing::trace!(
            method = %request.method,
            url = %request.url,
            headers = %format_headers(&request.headers),
            body = %request.body.as_deref().map(format_body).unwrap_or_default(),
            "Sending HTTP request"
        );

        match client.send(&request).await {
            Ok(response) => {
                tracing::debug!(method = %request.method, url = %request.url, status = %response.status, "HTTP response");
                Ok(response)
            }
            Err(error) => {
                tracing::error!(method = %request.method, url = %request.url, %error, "HTTP request failed");
                Err(error)
            }
        }
    }
}

fn format_headers(headers: &[(&'static str, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| match *name {
            "authorization" => format!("{name}: <redacted>"),
            _ => format!("{name}: {value}"),
        })
        .join(", ")
}

fn format_body(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}
