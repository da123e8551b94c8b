//! Wire models shared by several endpoints.

use serde::{Deserialize, Serialize};

use fundhub_core::types::DbId;

use crate::session::LoginUser;

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    #[serde(alias = "content", alias = "list")]
    pub items: Vec<T>,
    #[serde(alias = "totalElements", alias = "totalCount", default)]
    pub total: u64,
}

/// A project as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: DbId,
    pub title: String,
    #[serde(default)]
    pub creator_name: Option<String>,
    #[serde(default)]
    pub project_status: Option<String>,
    #[serde(default)]
    pub achievement_rate: Option<f64>,
    #[serde(default)]
    pub funding_end_date: Option<String>,
}

/// Credentials for [`Endpoint::Login`](crate::endpoints::Endpoint::Login).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}
