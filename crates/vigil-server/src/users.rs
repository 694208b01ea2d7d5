//! In-memory user store backing the stub user endpoints.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl CreateUserRequest {
    /// Checks required fields in order: email, username, password.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email.is_empty() {
            return Err(AppError::bad_request("Email is required", "email"));
        }
        if self.username.is_empty() {
            return Err(AppError::bad_request("Username is required", "username"));
        }
        if self.password.is_empty() {
            return Err(AppError::bad_request("Password is required", "password"));
        }
        Ok(())
    }
}

/// Users keyed by id, in insertion order.
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<IndexMap<Uuid, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a new user. The password is accepted but never kept.
    pub fn create(&self, request: CreateUserRequest) -> Result<User, AppError> {
        let mut users = self.users.write();

        if users.values().any(|u| u.email.eq_ignore_ascii_case(&request.email)) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: request.email,
            username: request.username,
            full_name: request.full_name.filter(|n| !n.is_empty()),
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.users.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}
