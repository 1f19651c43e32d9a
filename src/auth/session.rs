//! Users and in-memory login sessions.
//!
//! A session only attaches a role to later requests. Tokens are random
//! uuids held in memory and are forgotten on restart, on logout, or once
//! they outlive the session TTL.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::access::Role;
use crate::error::AuthError;

/// A login account. The password is stored as a SHA-256 hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password_sha256: String,
    pub role: Role,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: &str, role: Role) -> Self {
        Self {
            username: username.into(),
            password_sha256: hash_password(password),
            role,
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        constant_time_eq(&hash_password(password), &self.password_sha256.to_ascii_lowercase())
    }
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// How long a session stays valid after login.
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(12);

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.created_at >= ttl
    }
}

pub struct SessionStore {
    users: Vec<UserRecord>,
    sessions: RwLock<HashMap<String, Session>>,
    ttl: TimeDelta,
}

impl SessionStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            sessions: RwLock::new(HashMap::new()),
            ttl: SESSION_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = ttl;
        self
    }

    /// Check credentials and open a session.
    ///
    /// Blank username or password is `MissingCredentials`; an unknown user
    /// and a wrong password are both `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self.users.iter().find(|u| u.username == username);
        let Some(user) = user.filter(|u| u.verify(password)) else {
            warn!(username, "Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            role: user.role,
            created_at: now,
        };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now, self.ttl));
        sessions.insert(session.token.clone(), session.clone());
        info!(username, role = %user.role, active = sessions.len(), "Session opened");
        Ok(session)
    }

    /// Forget a session. Returns whether it existed.
    pub async fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.write().await.remove(token);
        if let Some(session) = &removed {
            info!(username = %session.username, "Session closed");
        }
        removed.is_some()
    }

    /// The live session for `token`. An expired one is dropped.
    pub async fn lookup(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            let session = sessions.get(token)?;
            if !session.is_expired(now, self.ttl) {
                return Some(session.clone());
            }
        }

        if let Some(expired) = self.sessions.write().await.remove(token) {
            info!(username = %expired.username, "Session expired");
        }
        None
    }
}
