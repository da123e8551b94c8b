//! Login-user store.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use fundhub_core::types::DbId;

/// What a signed-in user is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Backer,
    Creator,
    Admin,
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub user_id: DbId,
    pub nickname: String,
    pub role: UserRole,
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<LoginUser>,
    access_token: Option<String>,
}

/// Shared session: the current user and their access token.
///
/// Designed to be wrapped in `Arc` and shared between the REST client and
/// the notification listener.
#[derive(Debug, Default)]
pub struct SessionStore {
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token whose user has not been loaded yet.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(SessionState {
                user: None,
                access_token: Some(token.into()),
            }),
        }
    }

    pub async fn sign_in(&self, user: LoginUser, access_token: impl Into<String>) {
        tracing::info!(user_id = user.user_id, role = ?user.role, "Signed in");
        let mut state = self.state.write().await;
        state.user = Some(user);
        state.access_token = Some(access_token.into());
    }

    /// Replace the loaded user while keeping the token.
    pub async fn set_user(&self, user: LoginUser) {
        self.state.write().await.user = Some(user);
    }

    pub async fn sign_out(&self) {
        let mut state = self.state.write().await;
        if state.access_token.is_some() || state.user.is_some() {
            tracing::info!("Signed out");
        }
        *state = SessionState::default();
    }

    pub async fn current(&self) -> Option<LoginUser> {
        self.state.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.access_token.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.state.read().await.access_token.is_some()
    }

    pub async fn has_role(&self, role: UserRole) -> bool {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .is_some_and(|user| user.role == role)
    }
}
