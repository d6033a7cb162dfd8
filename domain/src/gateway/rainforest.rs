//! Rainforest QA API client.
//!
//! Maps each operation onto one authenticated request against the Rainforest REST API
//! and hands the response back as received: run the selected tests, manage tests,
//! and manage generators and their rows.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::generator::{row_data, Column, Generator};
use crate::response::ApiResponse;
use crate::test::Test;
use log::*;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{Map, Value};
use service::config::Config;
use std::fmt;

/// Production Rainforest QA API host.
pub const DEFAULT_BASE_URL: &str = service::config::DEFAULT_RAINFOREST_BASE_URL;

/// Sentinel test selection meaning "run every test".
pub const ALL_TESTS: &str = "all";

/// Number of tests requested by `list_tests`.
pub const TEST_PAGE_SIZE: u32 = 100;

const CLIENT_TOKEN_HEADER: &str = "client_token";

#[derive(Serialize)]
struct TestsPayload<'a, T: Serialize> {
    tests: &'a [T],
}

#[derive(Serialize)]
struct RowPayload {
    data: Map<String, Value>,
}

/// Construction settings for a `RainforestClient`.
///
/// `ClientConfig::new` fills in the defaults: `base_url` is [`DEFAULT_BASE_URL`] and
/// `selected_tests` is `["all"]`.
#[derive(Clone)]
pub struct ClientConfig {
    pub token: SecretString,
    pub base_url: String,
    pub selected_tests: Vec<String>,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            selected_tests: vec![ALL_TESTS.to_string()],
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("selected_tests", &self.selected_tests)
            .finish()
    }
}

/// Rainforest API client.
///
/// Every request carries the `CLIENT_TOKEN` header and a JSON content type. Responses
/// are returned whatever their status; only failures to complete the exchange, and
/// payloads rejected before sending, surface as `Err`.
#[derive(Clone)]
pub struct RainforestClient {
    client: reqwest::Client,
    base_url: String,
    selected_tests: Vec<String>,
}

impl fmt::Debug for RainforestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RainforestClient")
            .field("base_url", &self.base_url)
            .field("selected_tests", &self.selected_tests)
            .finish()
    }
}

impl RainforestClient {
    /// Create a new Rainforest client authenticated with the configured token
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let headers = build_headers(&config.token)?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            selected_tests: config.selected_tests,
        })
    }

    /// Create a client from the service configuration. Fails when no token is configured.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let token = config.rainforest_token().ok_or_else(|| {
            warn!("Failed to get Rainforest token from config");
            Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
            }
        })?;

        Self::new(ClientConfig::new(token).with_base_url(config.rainforest_base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn selected_tests(&self) -> &[String] {
        &self.selected_tests
    }

    /// Select a test for the next `run`. Chainable.
    pub fn add_test(mut self, id: impl Into<String>) -> Self {
        self.selected_tests.push(id.into());
        self
    }

    /// Enqueue a run of the selected tests.
    pub async fn run(&self) -> Result<ApiResponse, Error> {
        debug!("Enqueueing Rainforest run for tests: {:?}", self.selected_tests);
        let body = TestsPayload {
            tests: self.selected_tests.as_slice(),
        };
        self.send(Method::POST, "/api/1/runs".to_string(), Some(&body))
            .await
    }

    /// Fetch the first page of tests.
    pub async fn list_tests(&self) -> Result<ApiResponse, Error> {
        let path = format!("/api/1/tests?page_size={TEST_PAGE_SIZE}");
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn create_test(&self, test: &Test) -> Result<ApiResponse, Error> {
        self.send(Method::POST, "/api/1/tests".to_string(), Some(test))
            .await
    }

    /// Replace a test with `test`.
    pub async fn update_test(
        &self,
        id: impl fmt::Display,
        test: &Test,
    ) -> Result<ApiResponse, Error> {
        self.send(Method::PUT, format!("/api/1/tests/{id}"), Some(test))
            .await
    }

    pub async fn remove_tests<I: Serialize>(&self, ids: &[I]) -> Result<ApiResponse, Error> {
        let body = TestsPayload { tests: ids };
        self.send(Method::DELETE, "/api/1/tests".to_string(), Some(&body))
            .await
    }

    pub async fn list_generators(&self) -> Result<ApiResponse, Error> {
        self.send(Method::GET, "/api/1/generators".to_string(), None::<&()>)
            .await
    }

    /// Create a generator. Rejected locally, without a request, if it has no name
    /// or no columns.
    pub async fn create_generator(&self, generator: &Generator) -> Result<ApiResponse, Error> {
        generator.validate()?;
        self.send(
            Method::POST,
            "/api/1/generators".to_string(),
            Some(generator),
        )
        .await
    }

    pub async fn update_generator<U: Serialize + ?Sized>(
        &self,
        id: impl fmt::Display,
        updates: &U,
    ) -> Result<ApiResponse, Error> {
        self.send(Method::PUT, format!("/api/1/generators/{id}"), Some(updates))
            .await
    }

    pub async fn remove_generator(&self, id: impl fmt::Display) -> Result<ApiResponse, Error> {
        self.send(Method::DELETE, format!("/api/1/generators/{id}"), None::<&()>)
            .await
    }

    pub async fn list_generator_rows(
        &self,
        generator_id: impl fmt::Display,
    ) -> Result<ApiResponse, Error> {
        let path = format!("/api/1/generators/{generator_id}/rows");
        self.send(Method::GET, path, None::<&()>).await
    }

    /// Create a row from positional values. `columns` must carry the server-assigned
    /// column ids, as returned when the generator was created.
    pub async fn create_generator_row(
        &self,
        generator_id: impl fmt::Display,
        row: &[Value],
        columns: &[Column],
    ) -> Result<ApiResponse, Error> {
        let body = RowPayload {
            data: row_data(row, columns)?,
        };
        let path = format!("/api/1/generators/{generator_id}/rows");
        self.send(Method::POST, path, Some(&body)).await
    }

    pub async fn update_generator_row(
        &self,
        generator_id: impl fmt::Display,
        row_id: impl fmt::Display,
        row: &[Value],
        columns: &[Column],
    ) -> Result<ApiResponse, Error> {
        let body = RowPayload {
            data: row_data(row, columns)?,
        };
        let path = format!("/api/1/generators/{generator_id}/rows/{row_id}");
        self.send(Method::PUT, path, Some(&body)).await
    }

    pub async fn remove_generator_row(
        &self,
        generator_id: impl fmt::Display,
        row_id: impl fmt::Display,
    ) -> Result<ApiResponse, Error> {
        let path = format!("/api/1/generators/{generator_id}/rows/{row_id}");
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: String,
        body: Option<&B>,
    ) -> Result<ApiResponse, Error> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!("Rainforest request {method} {path} failed: {e:?}");
            Error::from(e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            warn!("Failed to read Rainforest response to {method} {path}: {e:?}");
            Error::from(e)
        })?;

        let response = ApiResponse::new(method, path, status, text);
        debug!("{}", response.log_line());

        Ok(response)
    }
}

/// Build the authentication and content negotiation headers sent with every request
fn build_headers(token: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let mut token_value = HeaderValue::from_str(token.expose_secret()).map_err(|err| {
        warn!("Failed to create CLIENT_TOKEN header value: {err:?}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                "Invalid Rainforest token format".to_string(),
            )),
        }
    })?;
    token_value.set_sensitive(true);
    headers.insert(HeaderName::from_static(CLIENT_TOKEN_HEADER), token_value);

    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    Ok(headers)
}
