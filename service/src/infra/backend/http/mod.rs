//! REST [`Backend`] implementation over HTTP.

mod impls;

use std::{fmt, time::Duration};

use derive_more::{Display, Error as StdError, From};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;
use url::Url;

use crate::infra::backend;
#[cfg(doc)]
use crate::infra::Backend;

/// Query parameters of a request without any.
const NO_QUERY: &[(&str, &str)] = &[];

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base [`Url`] of the REST backend, like `http://localhost:8000`.
    pub url: Url,

    /// Timeout of a single request to the REST backend.
    pub timeout: Duration,
}

/// REST [`Backend`] client.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base [`Url`] every endpoint is resolved against.
    ///
    /// Always ends with a `/`.
    base_url: Url,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to create a new [`Http`] client.
    pub fn new(conf: &Config) -> Result<Self, Traced<backend::Error>> {
        let client = reqwest::Client::builder()
            .timeout(conf.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        let mut base_url = conf.url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    /// Returns the base [`Url`] of this [`Http`] client.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts a request to the provided relative `path`.
    fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, Traced<backend::Error>> {
        let url = self
            .base_url
            .join(path)
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(self.client.request(method, url))
    }

    /// Sends the provided request, failing on a non-success status.
    async fn send(
        &self,
        request: RequestBuilder,
    ) -> Result<reqwest::Response, Traced<backend::Error>> {
        let request = request
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let (method, url) = (request.method().clone(), request.url().clone());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        let status = response.status();
        log::debug!("{method} {url} -> {status}");

        if status.is_success() {
            return Ok(response);
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message);
        Err(tracerr::new!(Error::Status { status, detail }))
            .map_err(tracerr::map_from)
    }

    /// Requests the provided `path` and decodes the JSON response.
    async fn json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Traced<backend::Error>> {
        self.send(request)
            .await
            .map_err(tracerr::wrap!())?
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// `GET`s the provided `path` with the provided `query` parameters.
    async fn get<T, Q>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, Traced<backend::Error>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self
            .request(Method::GET, path)
            .map_err(tracerr::wrap!())?
            .query(query);
        self.json(request).await.map_err(tracerr::wrap!())
    }

    /// `GET`s the provided `path` as plain text.
    async fn get_text(
        &self,
        path: &str,
    ) -> Result<String, Traced<backend::Error>> {
        let request = self
            .request(Method::GET, path)
            .map_err(tracerr::wrap!())?;
        self.send(request)
            .await
            .map_err(tracerr::wrap!())?
            .text()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)
    }

    /// Sends the provided JSON `body` to the provided `path`.
    async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, Traced<backend::Error>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self
            .request(method, path)
            .map_err(tracerr::wrap!())?
            .json(body);
        self.json(request).await.map_err(tracerr::wrap!())
    }

    /// Sends a bodyless request to the provided `path`, decoding the JSON
    /// response.
    async fn perform<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> Result<T, Traced<backend::Error>> {
        let request = self.request(method, path).map_err(tracerr::wrap!())?;
        self.json(request).await.map_err(tracerr::wrap!())
    }

    /// `DELETE`s the provided `path`, ignoring the response body.
    async fn delete(&self, path: &str) -> Result<(), Traced<backend::Error>> {
        let request = self
            .request(Method::DELETE, path)
            .map_err(tracerr::wrap!())?;
        self.send(request)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

/// [`Http`] client error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Request couldn't be performed, or its response couldn't be read.
    #[display("HTTP request failed: {_0}")]
    #[from]
    Request(reqwest::Error),

    /// Endpoint [`Url`] couldn't be built.
    #[display("invalid endpoint URL: {_0}")]
    #[from]
    Url(url::ParseError),

    /// REST backend responded with a non-success [`StatusCode`].
    #[display(
        "REST backend responded with `{status}`: {}",
        detail.as_deref().unwrap_or("no details")
    )]
    Status {
        /// [`StatusCode`] of the response.
        status: StatusCode,

        /// Human-readable reason reported by the REST backend, if any.
        detail: Option<String>,
    },

    /// REST backend returned data violating the domain invariants.
    #[display("REST backend returned malformed data: {_0}")]
    Malformed(#[error(not(source))] String),
}

impl Error {
    /// Creates a new [`Error::Malformed`] describing `what` is wrong.
    pub(crate) fn malformed(what: impl fmt::Display) -> Self {
        Self::Malformed(what.to_string())
    }

    /// Indicates whether the REST backend responded with `404 Not Found`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }

    /// Indicates whether the REST backend responded with `409 Conflict`.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::CONFLICT)
    }
}

/// Body of an error response of the REST backend.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    /// Reason of the error.
    #[serde(default)]
    detail: Option<Detail>,
}

impl ErrorBody {
    /// Extracts the human-readable message of this [`ErrorBody`], if any.
    fn into_message(self) -> Option<String> {
        match self.detail? {
            Detail::Message(msg) => Some(msg),
            Detail::Structured(_) => None,
        }
    }
}

/// `detail` of an [`ErrorBody`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    /// Plain message.
    Message(String),

    /// Structured validation report, not shown to users.
    Structured(serde::de::IgnoredAny),
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::Error;

    #[test]
    fn distinguishes_not_found_and_conflict() {
        let not_found = Error::Status {
            status: StatusCode::NOT_FOUND,
            detail: None,
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let conflict = Error::Status {
            status: StatusCode::CONFLICT,
            detail: Some("property has an active contract".into()),
        };
        assert!(conflict.is_conflict());
        assert!(!conflict.is_not_found());

        assert!(!Error::malformed("negative price").is_not_found());
    }

    #[test]
    fn displays_backend_detail() {
        let err = Error::Status {
            status: StatusCode::CONFLICT,
            detail: Some("property has an active contract".into()),
        };
        assert_eq!(
            err.to_string(),
            "REST backend responded with `409 Conflict`: \
             property has an active contract",
        );

        let err = Error::Status {
            status: StatusCode::BAD_GATEWAY,
            detail: None,
        };
        assert_eq!(
            err.to_string(),
            "REST backend responded with `502 Bad Gateway`: no details",
        );
    }
}
