//! REST API Client
//!
//! Talks to the LMS backend: paged list reads plus create/update/delete for
//! announcements, sections and comments.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, Request, Response, StatusCode};
use serde::Deserialize;

use crate::connection::ClientConfig;
use crate::domain::Resource;
use crate::error::{Error, Result};
use crate::paging::{PageFetcher, PageRequest, PageResult};

/// Opaque bearer token handed over by the session layer
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Server-side pagination metadata; only true table views use it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    pub total: Option<u64>,
    pub total_pages: Option<u32>,
}

/// List response body
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(alias = "items")]
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

/// Single-record response body
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RecordEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> RecordEnvelope<T> {
    fn into_inner(self) -> T {
        match self {
            RecordEnvelope::Wrapped { data } => data,
            RecordEnvelope::Bare(record) => record,
        }
    }
}

/// HTTP client for the LMS REST API
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<SessionToken>,
}

impl ApiClient {
    /// Build a client with the given base URL and per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::invalid("API base URL is empty"));
        }
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Build a client from the persisted configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(match &config.session_token {
            Some(token) if !token.trim().is_empty() => {
                client.with_token(SessionToken::new(token.clone()))
            }
            _ => client,
        })
    }

    /// Attach a session token sent as `Authorization: Bearer`
    pub fn with_token(mut self, token: SessionToken) -> Self {
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build the GET request for one page of `R`
    pub fn list_request<R: Resource>(&self, request: &PageRequest) -> Result<Request> {
        if request.kind != R::KIND {
            return Err(Error::invalid(format!(
                "page request for {} used with {}",
                request.kind,
                R::KIND
            )));
        }
        let url = format!("{}/{}", self.base_url, R::KIND.path());
        let page = request.page_number.to_string();
        let limit = request.page_size.to_string();
        let builder = self.http.get(url).query(&[
            ("page", page.as_str()),
            ("limit", limit.as_str()),
            (R::KIND.parent_param(), request.resource_id.as_str()),
        ]);
        Ok(self.authorize(builder).build()?)
    }

    /// Fetch one page of `R`
    pub async fn fetch_page<R: Resource>(&self, request: &PageRequest) -> Result<PageResult<R>> {
        let http_request = self.list_request::<R>(request)?;
        tracing::debug!("GET {}", http_request.url());
        let response = check_status(self.http.execute(http_request).await?).await?;
        let envelope: ListEnvelope<R> = response.json().await?;
        Ok(PageResult::new(envelope.data))
    }

    /// `POST /{resource}` with the parent id merged into the draft
    pub async fn create<R: Resource>(&self, parent_id: &str, draft: &R::Draft) -> Result<R> {
        if parent_id.trim().is_empty() {
            return Err(Error::invalid(format!("{}: empty parent id", R::KIND)));
        }
        let mut body = serde_json::to_value(draft)?;
        match body.as_object_mut() {
            Some(fields) => {
                fields.insert(
                    R::KIND.parent_param().to_string(),
                    serde_json::Value::String(parent_id.to_string()),
                );
            }
            None => return Err(Error::invalid("draft must serialize to an object")),
        }

        let url = format!("{}/{}", self.base_url, R::KIND.path());
        tracing::info!("Creating {} under {}", R::KIND, parent_id);
        self.send_record(Method::POST, url, Some(body)).await
    }

    /// `PATCH /{resource}/{id}`
    pub async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R> {
        let url = self.record_url::<R>(id)?;
        let body = serde_json::to_value(draft)?;
        tracing::info!("Updating {} {}", R::KIND, id);
        self.send_record(Method::PATCH, url, Some(body)).await
    }

    /// `DELETE /{resource}/{id}`
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let url = self.record_url::<R>(id)?;
        tracing::info!("Deleting {} {}", R::KIND, id);
        let builder = self.authorize(self.http.request(Method::DELETE, url));
        check_status(builder.send().await?).await?;
        Ok(())
    }

    fn record_url<R: Resource>(&self, id: &str) -> Result<String> {
        if id.trim().is_empty() {
            return Err(Error::invalid(format!("{}: empty record id", R::KIND)));
        }
        Ok(format!("{}/{}/{}", self.base_url, R::KIND.path(), id))
    }

    async fn send_record<R: Resource>(
        &self,
        method: Method,
        url: String,
        body: Option<serde_json::Value>,
    ) -> Result<R> {
        let mut builder = self.authorize(self.http.request(method, url));
        if let Some(body) = body {
            builder = builder.json(&body);
        }
        let response = check_status(builder.send().await?).await?;
        let envelope: RecordEnvelope<R> = response.json().await?;
        Ok(envelope.into_inner())
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token)
            .finish()
    }
}

impl<R: Resource> PageFetcher<R> for ApiClient {
    fn fetch(&self, request: &PageRequest) -> impl Future<Output = Result<PageResult<R>>> + Send {
        self.fetch_page::<R>(request)
    }
}

/// Backend that can page through `R` and write it
pub trait RecordStore<R: Resource>: PageFetcher<R> {
    fn create(&self, parent_id: &str, draft: &R::Draft) -> impl Future<Output = Result<R>> + Send;

    fn update(&self, id: &str, draft: &R::Draft) -> impl Future<Output = Result<R>> + Send;

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;
}

impl<R: Resource> RecordStore<R> for ApiClient {
    fn create(&self, parent_id: &str, draft: &R::Draft) -> impl Future<Output = Result<R>> + Send {
        ApiClient::create::<R>(self, parent_id, draft)
    }

    fn update(&self, id: &str, draft: &R::Draft) -> impl Future<Output = Result<R>> + Send {
        ApiClient::update::<R>(self, id, draft)
    }

    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send {
        ApiClient::delete::<R>(self, id)
    }
}

/// Map non-success statuses to typed errors
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| error_message(&body))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(status_error(status, message))
}

fn status_error(status: StatusCode, message: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized { message },
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Error::Timeout { message },
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull `message` (or `error`) out of a JSON error body, else use the raw text
fn error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let field = parsed.as_ref().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
    });
    Some(field.unwrap_or_else(|| body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Announcement, Comment, ResourceKind, Section};

    fn client() -> ApiClient {
        ApiClient::new("https://lms.example.com/api/", Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn list_request_carries_page_limit_and_parent() {
        let request = PageRequest::new(ResourceKind::Sections, "mod-7", 3, 10).expect("request");
        let http = client().list_request::<Section>(&request).expect("build");

        assert_eq!(http.method(), Method::GET);
        assert_eq!(
            http.url().as_str(),
            "https://lms.example.com/api/sections?page=3&limit=10&module=mod-7"
        );
        assert!(http.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn token_is_sent_as_bearer() {
        let api = client().with_token(SessionToken::new("abc"));
        let request = PageRequest::new(ResourceKind::Comments, "d1", 1, 20).expect("request");
        let http = api.list_request::<Comment>(&request).expect("build");

        let header = http
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        assert_eq!(header, Some("Bearer abc"));
    }

    #[test]
    fn blank_token_is_ignored() {
        let api = client().with_token(SessionToken::new("  "));
        assert!(!api.has_token());
    }

    #[test]
    fn mismatched_resource_is_rejected() {
        let request = PageRequest::new(ResourceKind::Comments, "d1", 1, 20).expect("request");
        assert!(client().list_request::<Announcement>(&request).is_err());
    }

    #[test]
    fn empty_base_url_is_rejected() {
        assert!(ApiClient::new("", Duration::from_secs(1)).is_err());
        assert!(ApiClient::new("  /", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn envelope_accepts_data_or_items() {
        let with_data: ListEnvelope<u32> =
            serde_json::from_str(r#"{ "data": [1, 2], "meta": { "total": 12, "totalPages": 2 } }"#)
                .expect("data");
        assert_eq!(with_data.data, vec![1, 2]);
        assert_eq!(with_data.meta.and_then(|m| m.total_pages), Some(2));

        let with_items: ListEnvelope<u32> =
            serde_json::from_str(r#"{ "items": [3] }"#).expect("items");
        assert_eq!(with_items.data, vec![3]);
        assert!(with_items.meta.is_none());
    }

    #[test]
    fn record_envelope_unwraps_both_shapes() {
        let wrapped: RecordEnvelope<u32> = serde_json::from_str(r#"{ "data": 5 }"#).expect("wrapped");
        let bare: RecordEnvelope<u32> = serde_json::from_str("6").expect("bare");
        assert_eq!(wrapped.into_inner(), 5);
        assert_eq!(bare.into_inner(), 6);
    }

    #[test]
    fn status_errors_are_typed() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, "no".into()),
            Error::Unauthorized { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::GATEWAY_TIMEOUT, "slow".into()),
            Error::Timeout { .. }
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, "gone".into()),
            Error::Api { status: 404, .. }
        ));
    }

    #[test]
    fn error_message_prefers_json_field() {
        assert_eq!(
            error_message(r#"{ "message": "Course not found" }"#).as_deref(),
            Some("Course not found")
        );
        assert_eq!(error_message("plain failure").as_deref(), Some("plain failure"));
        assert_eq!(error_message("   "), None);
    }
}
