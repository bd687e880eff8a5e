//! Server-side admin sessions keyed by an opaque cookie token

use chrono::{DateTime, Duration, Utc};
use medinfo_core::AdminUser;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Logged-in admin, inserted into request extensions by the admin gate
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin_id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<String, AdminSession>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs.min(i64::MAX as u64 / 1000) as i64),
        }
    }

    /// Start a session and return its token
    pub async fn create(&self, admin: &AdminUser) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let session = AdminSession {
            admin_id: admin.id,
            name: admin.name.clone(),
            email: admin.email.clone(),
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        // prune
        let ttl = self.ttl;
        sessions.retain(|_, s| !is_expired(s, ttl));
        sessions.insert(token.clone(), session);
        token
    }

    /// Resolve a token to a live session
    pub async fn get(&self, token: &str) -> Option<AdminSession> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if !is_expired(session, self.ttl) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: remove it
        self.sessions.write().await.remove(token);
        None
    }

    pub async fn revoke(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

fn is_expired(session: &AdminSession, ttl: Duration) -> bool {
    Utc::now() - session.created_at > ttl
}
