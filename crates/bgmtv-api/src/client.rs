//! `BangumiClient` - bgm.tv API client implementation.

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::api::LocalBangumiApi;
use crate::error::{ApiError, Result};
use crate::params::{
    CollectionAction, CollectionCategory, CollectionPayload, EpStatus, Protocol, ResponseGroup,
    SearchParams,
};
use crate::types::{
    AuthUser, CalendarDay, SearchResponse, StatusReply, Subject, SubjectCollection,
    SubjectEpisodes, SubjectProgress, User, UserCollection,
};

/// Default REST host.
const DEFAULT_HOST: &str = "api.bgm.tv";

/// Default User-Agent, sent unless the caller overrides the header.
const DEFAULT_USER_AGENT: &str = concat!("bgmtv-api/", env!("CARGO_PKG_VERSION"));

/// Maximum response-body length quoted in decode errors.
const PREVIEW_LEN: usize = 500;

/// bgm.tv API client.
///
/// Configuration is immutable after `build()`; reconfiguration means
/// building a new client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BangumiClient {
    /// HTTP client (reqwest, gzip enabled).
    http_client: Client,
    /// Base URL (scheme + host).
    base_url: Url,
    /// Application identifier, sent as the `source` query parameter.
    app_id: Option<String>,
    /// OAuth bearer token.
    access_token: Option<String>,
    /// OAuth redirect URL; stored for callers driving an authorization
    /// flow, unused by the request executor.
    callback_url: Option<String>,
}

/// Builder for `BangumiClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct BangumiClientBuilder {
    host: Option<String>,
    protocol: Protocol,
    headers: Vec<(String, String)>,
    app_id: Option<String>,
    access_token: Option<String>,
    callback_url: Option<String>,
    cookie_store: bool,
}

impl BangumiClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            host: None,
            protocol: Protocol::Https,
            headers: Vec::new(),
            app_id: None,
            access_token: None,
            callback_url: None,
            cookie_store: false,
        }
    }

    /// Overrides the REST host (default: `api.bgm.tv`). A port may be
    /// included, which is how tests point the client at wiremock.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the URL scheme (default: HTTPS).
    #[must_use]
    pub const fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Adds a default header, merged over the built-in defaults.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the application identifier (`source` query parameter).
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Sets the OAuth bearer token (`Authorization` header).
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the OAuth redirect URL.
    #[must_use]
    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Enables the transport-level cookie store (default: disabled).
    #[must_use]
    pub const fn cookie_store(mut self, enabled: bool) -> Self {
        self.cookie_store = enabled;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - The scheme/host pair does not form a valid URL.
    /// - A configured header name or value is malformed.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<BangumiClient> {
        let host = self.host.unwrap_or_else(|| String::from(DEFAULT_HOST));
        let base_url = Url::parse(&format!("{}://{host}/", self.protocol.scheme()))
            .map_err(|e| ApiError::Config(format!("invalid host {host:?}: {e}")))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Config(format!("invalid header name {name:?}: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Config(format!("invalid value for header {name}: {e}")))?;
            default_headers.insert(header_name, header_value);
        }

        let http_client = Client::builder()
            .default_headers(default_headers)
            .cookie_store(self.cookie_store)
            .gzip(true)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(BangumiClient {
            http_client,
            base_url,
            app_id: self.app_id,
            access_token: self.access_token,
            callback_url: self.callback_url,
        })
    }
}

/// Truncates a body to the preview length on a char boundary.
fn preview(body: &str) -> String {
    let end = body.floor_char_boundary(PREVIEW_LEN);
    String::from(body.get(..end).unwrap_or(body))
}

/// Builds the search path with the keywords percent-encoded as one path
/// segment, so `?`, `#`, and `/` in keywords cannot truncate the path.
fn search_path(keywords: &str) -> Result<String> {
    let mut url = Url::parse("https://api.bgm.tv/search/subject")
        .map_err(|e| ApiError::Config(format!("invalid search base: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::Config(String::from("search base cannot hold path segments")))?
        .push(keywords);
    Ok(String::from(url.path()))
}

impl BangumiClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> BangumiClientBuilder {
        BangumiClientBuilder::new()
    }

    /// Returns the configured OAuth redirect URL, if any.
    #[must_use]
    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    /// Validates the path and joins it onto the base URL.
    ///
    /// Runs before any I/O, so a malformed path never reaches the network.
    fn checked_url(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidPath {
                path: String::from(path),
            });
        }
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("failed to join URL path {path:?}: {e}")))
    }

    /// Classifies a response body.
    ///
    /// Unparseable text is a decode failure; a payload carrying an `error`
    /// field is a remote error regardless of HTTP status; anything else is
    /// deserialized into the expected type.
    pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
        let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Decode {
            source: e,
            preview: preview(body),
        })?;

        if let Some(error) = value.get("error") {
            let message = error.as_str().map_or_else(|| error.to_string(), String::from);
            return Err(ApiError::Remote {
                message,
                payload: value,
            });
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            source: e,
            preview: preview(body),
        })
    }

    /// Sends a GET request and decodes the JSON response.
    ///
    /// The configured `app_id` is merged into the query as `source`, and
    /// the access token (if any) is attached as a bearer header.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidPath`] if `path` does not start with `/`
    ///   (raised before any network activity).
    /// - [`ApiError::Transport`] on connect/send/body-read failure.
    /// - [`ApiError::Decode`] if the body is not the expected JSON shape.
    /// - [`ApiError::Remote`] if the payload carries an `error` field.
    #[instrument(skip_all)]
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.checked_url(path)?;

        let mut builder = self.http_client.get(url).query(query);
        if let Some(ref app_id) = self.app_id {
            builder = builder.query(&[("source", app_id.as_str())]);
        }
        if let Some(ref token) = self.access_token {
            builder = builder.bearer_auth(token);
        }
        let request = builder.build()?;

        tracing::debug!(url = %request.url(), "GET request");

        let response = self.http_client.execute(request).await?;
        let body = response.text().await?;
        tracing::debug!(body_len = body.len(), "response body received");

        Self::parse_body(&body)
    }

    /// Sends a POST request with a form-encoded body and decodes the JSON
    /// response.
    ///
    /// Form pairs go in the `application/x-www-form-urlencoded` body; the
    /// configured `app_id` is appended to the URL query as `source`, never
    /// to the body.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`Self::get`].
    #[instrument(skip_all)]
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T> {
        let mut url = self.checked_url(path)?;
        if let Some(ref app_id) = self.app_id {
            url.query_pairs_mut().append_pair("source", app_id);
        }

        let mut builder = self.http_client.post(url).form(form);
        if let Some(ref token) = self.access_token {
            builder = builder.bearer_auth(token);
        }
        let request = builder.build()?;

        tracing::debug!(url = %request.url(), "POST request");

        let response = self.http_client.execute(request).await?;
        let body = response.text().await?;
        tracing::debug!(body_len = body.len(), "response body received");

        Self::parse_body(&body)
    }
}

impl LocalBangumiApi for BangumiClient {
    #[instrument(skip_all)]
    async fn calendar(&self) -> Result<Vec<CalendarDay>> {
        self.get("/calendar", &[]).await
    }

    #[instrument(skip_all)]
    async fn user(&self, username: &str) -> Result<User> {
        self.get(&format!("/user/{username}"), &[]).await
    }

    #[instrument(skip_all)]
    async fn subject(
        &self,
        subject_id: u32,
        response_group: Option<ResponseGroup>,
    ) -> Result<Subject> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(group) = response_group {
            query.push(("responseGroup", String::from(group.as_str())));
        }
        self.get(&format!("/subject/{subject_id}"), &query).await
    }

    #[instrument(skip_all)]
    async fn subject_episodes(&self, subject_id: u32) -> Result<SubjectEpisodes> {
        self.get(&format!("/subject/{subject_id}/ep"), &[]).await
    }

    #[instrument(skip_all)]
    async fn user_collection(
        &self,
        username: &str,
        cat: Option<CollectionCategory>,
    ) -> Result<Vec<UserCollection>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(cat) = cat {
            query.push(("cat", String::from(cat.as_str())));
        }
        self.get(&format!("/user/{username}/collection"), &query)
            .await
    }

    #[instrument(skip_all)]
    async fn search_subjects(&self, params: &SearchParams) -> Result<SearchResponse> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(subject_type) = params.subject_type {
            query.push(("type", subject_type.code().to_string()));
        }
        if let Some(group) = params.response_group {
            query.push(("responseGroup", String::from(group.as_str())));
        }
        if let Some(start) = params.start {
            query.push(("start", start.to_string()));
        }
        if let Some(max_results) = params.max_results {
            query.push(("max_results", max_results.to_string()));
        }
        self.get(&search_path(&params.keywords)?, &query).await
    }

    #[instrument(skip_all)]
    async fn collection_status(&self, subject_id: u32, auth: &str) -> Result<SubjectCollection> {
        let query = [("auth", String::from(auth))];
        self.get(&format!("/collection/{subject_id}"), &query).await
    }

    #[instrument(skip_all)]
    async fn user_progress(
        &self,
        username: &str,
        auth: &str,
        subject_id: Option<u32>,
    ) -> Result<Vec<SubjectProgress>> {
        let mut query: Vec<(&str, String)> = vec![("auth", String::from(auth))];
        if let Some(subject_id) = subject_id {
            query.push(("subject_id", subject_id.to_string()));
        }
        self.get(&format!("/user/{username}/progress"), &query)
            .await
    }

    #[allow(deprecated)]
    #[instrument(skip_all)]
    async fn login(&self, username: &str, password: &str) -> Result<AuthUser> {
        let form = [
            ("username", String::from(username)),
            ("password", String::from(password)),
            ("auth", String::from("0")),
            ("sysuid", String::from("0")),
            ("sysusername", String::from("0")),
        ];
        self.post("/auth", &form).await
    }

    #[instrument(skip_all)]
    async fn update_collection(
        &self,
        subject_id: u32,
        action: CollectionAction,
        payload: &CollectionPayload,
        auth: &str,
    ) -> Result<SubjectCollection> {
        let path = format!("/collection/{subject_id}/{}", action.as_str());
        self.post(&path, &payload.to_form(auth)).await
    }

    #[instrument(skip_all)]
    async fn update_episode_status(
        &self,
        ep_id: u32,
        status: EpStatus,
        ep_ids: Option<&[u32]>,
        auth: &str,
    ) -> Result<StatusReply> {
        let mut form: Vec<(&str, String)> = vec![("auth", String::from(auth))];
        if let Some(ep_ids) = ep_ids {
            let ep_id_str = ep_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            form.push(("ep_id", ep_id_str));
        }
        let path = format!("/ep/{ep_id}/status/{}", status.as_str());
        self.post(&path, &form).await
    }

    #[instrument(skip_all)]
    async fn update_watched_eps(
        &self,
        subject_id: u32,
        watched_eps: u32,
        auth: &str,
    ) -> Result<StatusReply> {
        let form = [
            ("watched_eps", watched_eps.to_string()),
            ("auth", String::from(auth)),
        ];
        self.post(&format!("/subject/{subject_id}/update/watched_eps"), &form)
            .await
    }
}
