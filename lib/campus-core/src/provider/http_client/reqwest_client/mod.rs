use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::{Error, HttpClient, Method, Request, Response, StatusCode};

/// [`HttpClient`] backed by a shared `reqwest` connection pool.
#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, Error> {
        reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map(Self::new)
            .map_err(|e| Error::Transport(e.to_string()))
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: &Request) -> Result<Response, Error> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str())
            .headers(header_map(&request.headers)?);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = StatusCode(response.status().as_u16());
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?
            .to_vec();

        Ok(Response::new(request, status, body))
    }
}

fn header_map(headers: &[(&'static str, String)]) -> Result<HeaderMap, Error> {
    headers
        .iter()
        .map(|(name, value)| {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidRequest(e.to_string()))?;
            let value =
                HeaderValue::from_str(value).map_err(|e| Error::InvalidRequest(e.to_string()))?;

            Ok((name, value))
        })
        .collect()
}
