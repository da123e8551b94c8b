//! REST API client for the marketplace backend.
//!
//! Every call goes through [`ApiClient::send`], which attaches the session
//! token, normalizes the body into an [`ApiResponse`] and turns a 401 on an
//! authenticated endpoint into a sign-out plus a redirect to the login page.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;

use fundhub_core::navigation::{NavigateMode, Navigator};
use fundhub_core::query_state::paging::PER_GROUP_KEY;
use fundhub_core::query_state::{BrowseQueryState, ListFilterQueryState, QueryParams};
use fundhub_core::reward::{assert_valid_reward_list, RewardContext, RewardDraft, RewardInput};
use fundhub_core::types::DbId;

use crate::config::ClientConfig;
use crate::endpoints::Endpoint;
use crate::error::{ClientError, ClientResult};
use crate::models::{LoginRequest, LoginResponse, PageResponse, ProjectSummary};
use crate::notifications::{Notification, NotificationStore};
use crate::response::ApiResponse;
use crate::session::SessionStore;

/// Where the user is sent when the session is rejected.
pub const LOGIN_PATH: &str = "/login";

/// HTTP client bound to one API origin and one session.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            session,
            navigator,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Absolute URL for a path relative to the API origin.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send one request and normalize the response.
    ///
    /// Non-2xx statuses become [`ClientError::Api`]; a 401 from an endpoint
    /// that needs a session becomes [`ClientError::Unauthorized`] after the
    /// session is cleared.
    pub async fn send(
        &self,
        endpoint: Endpoint,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> ClientResult<ApiResponse<Value>> {
        let method = endpoint.method();
        let path = endpoint.path();

        let mut request = self.http.request(method.clone(), self.url_for(&path));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let pairs: Vec<(&str, &str)> = query.iter().collect();
            request = request.query(&pairs);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request",
        );

        let raw = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        let normalized = ApiResponse::normalize(status.as_u16(), raw);

        if status == reqwest::StatusCode::UNAUTHORIZED && endpoint.requires_auth() {
            self.handle_unauthorized(&path).await;
            return Err(ClientError::Unauthorized);
        }
        if !normalized.is_success() {
            let message = normalized.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            tracing::warn!(path = %path, status = status.as_u16(), %message, "API error");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(normalized)
    }

    /// Send a request and decode `data` into `T`. A missing `data` decodes
    /// as JSON `null`, so `T` may be `()` or an `Option`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> ClientResult<T> {
        let response = self.send(endpoint, query, body).await?;
        Ok(serde_json::from_value(response.data.unwrap_or(Value::Null))?)
    }

    async fn handle_unauthorized(&self, path: &str) {
        tracing::warn!(path, "Session rejected; redirecting to login");
        self.session.sign_out().await;
        self.navigator.navigate(LOGIN_PATH, NavigateMode::Replace);
    }

    // -- Auth -------------------------------------------------------------

    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = serde_json::to_value(LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let login: LoginResponse = self.fetch(Endpoint::Login, None, Some(&body)).await?;
        self.session
            .sign_in(login.user.clone(), login.access_token.clone())
            .await;
        Ok(login)
    }

    /// Sign out on the server, then locally. The local session is cleared
    /// even if the server call fails.
    pub async fn sign_out(&self) -> ClientResult<()> {
        let result = self.send(Endpoint::Logout, None, None).await;
        self.session.sign_out().await;
        result.map(|_| ())
    }

    // -- Projects ---------------------------------------------------------

    /// Search projects with the paging and keyword held in the URL.
    pub async fn search_projects(
        &self,
        state: &BrowseQueryState,
    ) -> ClientResult<PageResponse<ProjectSummary>> {
        let query = request_params(state.params());
        self.fetch(Endpoint::SearchProjects, Some(&query), None).await
    }

    /// Admin project list with the range and status filters held in the URL.
    pub async fn list_admin_projects(
        &self,
        state: &ListFilterQueryState,
    ) -> ClientResult<PageResponse<ProjectSummary>> {
        let query = request_params(state.params());
        self.fetch(Endpoint::AdminProjects, Some(&query), None).await
    }

    /// Validate and save a project's full reward list.
    ///
    /// Nothing is sent unless every reward passes and no names collide.
    pub async fn save_rewards(
        &self,
        project_id: DbId,
        inputs: &[RewardInput],
        ctx: &RewardContext,
    ) -> ClientResult<Vec<RewardDraft>> {
        let drafts = assert_valid_reward_list(inputs, ctx)?;
        let body = serde_json::to_value(&drafts)?;
        self.send(Endpoint::SaveRewards { project_id }, None, Some(&body))
            .await?;
        tracing::info!(project_id, rewards = drafts.len(), "Rewards saved");
        Ok(drafts)
    }

    // -- Notifications ----------------------------------------------------

    /// Load notification history into the store.
    pub async fn load_notifications(&self, store: &NotificationStore) -> ClientResult<usize> {
        let items: Vec<Notification> = self.fetch(Endpoint::Notifications, None, None).await?;
        let count = items.len();
        store.replace_all(items).await;
        Ok(count)
    }

    pub async fn mark_notification_read(
        &self,
        store: &NotificationStore,
        notification_id: DbId,
    ) -> ClientResult<()> {
        self.send(Endpoint::MarkNotificationRead { notification_id }, None, None)
            .await?;
        store.mark_read(notification_id).await;
        Ok(())
    }

    pub async fn mark_all_notifications_read(&self, store: &NotificationStore) -> ClientResult<()> {
        self.send(Endpoint::MarkAllNotificationsRead, None, None)
            .await?;
        store.mark_all_read().await;
        Ok(())
    }
}

/// Query parameters as sent to the API. The page-group width only drives
/// the pager and is not a server parameter.
fn request_params(mut params: QueryParams) -> QueryParams {
    params.remove(PER_GROUP_KEY);
    params
}
