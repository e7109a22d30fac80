//! Authenticated API client
//!
//! Every request reads the access token from the [`TokenStore`] right before
//! it is sent. A 401 is handed to [`AuthFailurePolicy`]; when the session can
//! be renewed the client joins (or starts) the single refresh episode tracked
//! by its [`RefreshCoordinator`] and replays the request with the new token.
//!
//! ```text
//!  request ──► dispatch ──► 2xx ──────────────────────────────────────► Ok
//!                      └──► error ──► not a 401 / auth endpoint ───────► Err(original)
//!                                 └─► 401 ──► begin episode
//!                                      ├─ follower: wait ─► replay | Err(original)
//!                                      └─ leader: read stored tokens
//!                                           ├─ access renewed ─────────► replay
//!                                           ├─ no refresh token ─ clear, notify ► Err(original)
//!                                           └─ POST /auth/refresh ────► replay
//! ```

use std::sync::Arc;
use std::time::Duration;

use importdesk_core::{
    AuthFailureAction, AuthFailurePolicy, NoopSessionListener, RefreshCoordinator, RefreshLease, RefreshTicket,
    SessionListener, TokenStore,
};
use importdesk_domain::constants::DEFAULT_LOGIN_PATH;
use importdesk_domain::{Config, RefreshRequest, TokenPair};
use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::errors::ApiError;
use super::request::ApiRequest;
use crate::http::HttpClient;
use crate::storage::{self, MemoryTokenStore};

/// HTTP client for the brokerage backend with transparent token refresh.
///
/// Clones share the transport, the token store and the refresh state, so a
/// clone handed to another task still takes part in the same refresh episode.
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    login_path: String,
    tokens: Arc<dyn TokenStore>,
    listener: Arc<dyn SessionListener>,
    policy: AuthFailurePolicy,
    refresh: RefreshCoordinator,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("login_path", &self.login_path)
            .field("refresh", &self.refresh)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the token store cannot be opened or the transport
    /// cannot be built.
    pub fn from_config(
        config: &Config,
        listener: Arc<dyn SessionListener>,
    ) -> Result<Self, ApiError> {
        let tokens = storage::open(&config.storage)?;

        Self::builder()
            .base_url(&config.api.base_url)
            .timeout(config.api.timeout())
            .user_agent(&config.api.user_agent)
            .login_path(&config.api.login_path)
            .token_store(tokens)
            .session_listener(listener)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn policy(&self) -> &AuthFailurePolicy {
        &self.policy
    }

    /// Store the client reads credentials from
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Refresh state shared by this client and its clones
    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    /// Send `request`, refreshing the session on a 401 when possible.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Status`] for any non-2xx response that is not recovered,
    ///   including the original 401 when the session cannot be renewed
    /// - [`ApiError::RefreshFailed`] to the caller whose 401 started a refresh
    ///   that failed
    /// - [`ApiError::Network`] / [`ApiError::Timeout`] for transport failures
    #[instrument(skip(self, request), fields(method = %request.method(), path = %request.path()))]
    pub async fn execute(&self, request: ApiRequest) -> Result<Response, ApiError> {
        let bearer = self.bearer_for(&request).await?;

        match self.dispatch(&request, bearer.as_deref()).await {
            Ok(response) => Ok(response),
            Err(err) => self.recover(&request, bearer.as_deref(), err).await,
        }
    }

    /// Send `request` and decode the JSON response.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.execute(request).await?;
        decode(response).await
    }

    /// Execute a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch(ApiRequest::get(path)).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::post(path).with_json(body)?).await
    }

    /// Execute a PUT request with a JSON body
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::put(path).with_json(body)?).await
    }

    /// Execute a PATCH request with a JSON body
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.fetch(ApiRequest::patch(path).with_json(body)?).await
    }

    /// Execute a DELETE request, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(ApiRequest::delete(path)).await.map(|_| ())
    }

    /// Drop both stored credentials and announce the expired session.
    pub async fn expire_session(&self) {
        if let Err(err) = self.tokens.clear().await {
            warn!(error = %err, "Failed to clear stored credentials");
        }
        warn!(login_path = %self.login_path, "Session expired, credentials cleared");
        self.listener.session_expired(&self.login_path);
    }

    async fn bearer_for(&self, request: &ApiRequest) -> Result<Option<String>, ApiError> {
        if self.policy.is_auth_endpoint(request.path()) {
            return Ok(None);
        }
        Ok(self.tokens.access_token().await?)
    }

    /// Send one attempt. Non-2xx statuses become [`ApiError::Status`].
    async fn dispatch(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<Response, ApiError> {
        let builder = request.build(&self.http, &self.base_url, bearer)?;
        let timeout = self.http.timeout();

        let response = match tokio::time::timeout(timeout, self.http.send(builder)).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => return Err(ApiError::Timeout(timeout)),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), path = %request.path(), "Request failed");
        Err(ApiError::Status { status: status.as_u16(), path: request.path().to_string(), body })
    }

    async fn recover(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
        original: ApiError,
    ) -> Result<Response, ApiError> {
        let Some(status) = original.status() else {
            return Err(original);
        };

        if self.policy.classify(status, request.path(), true) == AuthFailureAction::Propagate {
            return Err(original);
        }

        match self.refresh.begin() {
            RefreshTicket::Leader(lease) => self.lead_refresh(lease, request, bearer, original).await,
            RefreshTicket::Follower(waiter) => match waiter.wait().await {
                Some(access_token) => self.replay(request, &access_token).await,
                None => Err(original),
            },
        }
    }

    /// Run one refresh episode while holding its lease.
    ///
    /// Credentials are only read under the lease: a refresh that settled
    /// while this request was in flight has already rotated the refresh
    /// token, and its access token is reused instead of refreshing again.
    async fn lead_refresh(
        &self,
        lease: RefreshLease,
        request: &ApiRequest,
        bearer: Option<&str>,
        original: ApiError,
    ) -> Result<Response, ApiError> {
        let status = original.status().unwrap_or_default();

        let stored_access = self.tokens.access_token().await?;
        if let (Some(sent), Some(stored)) = (bearer, stored_access.as_deref()) {
            if sent != stored {
                debug!("Access token renewed since the request was sent");
                lease.succeed(stored);
                return self.replay(request, stored).await;
            }
        }

        let refresh_token = self.tokens.refresh_token().await?;

        match (self.policy.classify(status, request.path(), refresh_token.is_some()), refresh_token) {
            (AuthFailureAction::Refresh, Some(refresh_token)) => {
                match self.refresh_session(refresh_token).await {
                    Ok(tokens) => {
                        let resolved = lease.succeed(&tokens.access_token);
                        debug!(resolved, "Replaying queued requests");
                        self.replay(request, &tokens.access_token).await
                    }
                    Err(err) => {
                        warn!(error = %err, "Token refresh failed");
                        self.expire_session().await;
                        lease.fail();
                        Err(ApiError::RefreshFailed(Box::new(err)))
                    }
                }
            }
            _ => {
                debug!("No refresh token stored");
                self.expire_session().await;
                lease.fail();
                Err(original)
            }
        }
    }

    /// Exchange the refresh token for a new pair and persist it.
    async fn refresh_session(&self, refresh_token: String) -> Result<TokenPair, ApiError> {
        let request = ApiRequest::post(self.policy.refresh_endpoint())
            .with_json(&RefreshRequest { refresh_token })?;

        let response = self.dispatch(&request, None).await?;
        let tokens: TokenPair = decode(response).await?;
        self.tokens.store(&tokens).await?;

        info!("Access token refreshed");
        Ok(tokens)
    }

    /// A replay is sent once; its failures are returned as they are.
    async fn replay(&self, request: &ApiRequest, access_token: &str) -> Result<Response, ApiError> {
        debug!(path = %request.path(), "Replaying request with refreshed token");
        self.dispatch(request, Some(access_token)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    // 204/205 carry no body
    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            ApiError::Decode(format!(
                "No content response ({}), but response type cannot be deserialized from empty body",
                status.as_u16()
            ))
        });
    }

    response.json().await.map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")))
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    login_path: String,
    default_headers: Option<HeaderMap>,
    policy: AuthFailurePolicy,
    tokens: Option<Arc<dyn TokenStore>>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        let api = importdesk_domain::ApiConfig::default();
        let timeout = api.timeout();
        Self {
            base_url: api.base_url,
            timeout,
            user_agent: None,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            default_headers: None,
            policy: AuthFailurePolicy::default(),
            tokens: None,
            listener: None,
        }
    }
}

impl ApiClientBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Path passed to the session listener when the session expires
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn policy(mut self, policy: AuthFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Defaults to an in-memory store
    pub fn token_store(mut self, tokens: Arc<dyn TokenStore>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Defaults to a listener that ignores expiry
    pub fn session_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Config`] for an unusable base URL or transport
    /// settings.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = url::Url::parse(&self.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;

        let mut http = HttpClient::builder().timeout(self.timeout);
        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }
        if let Some(headers) = self.default_headers {
            http = http.default_headers(headers);
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        Ok(ApiClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            login_path: self.login_path,
            tokens: self.tokens.unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            listener: self.listener.unwrap_or_else(|| Arc::new(NoopSessionListener)),
            policy: self.policy,
            refresh: RefreshCoordinator::new(),
        })
    }
}
