// ============================
// netguessr-backend-lib/src/session.rs
// ============================
//! Request-scoped caller context.
//!
//! The HTTP layer owns identity continuity: it mints an opaque token on
//! first contact, keeps it in a cookie, and resolves it back to a
//! [`PlayerSession`] on every request. The party core never sees tokens and
//! never synthesizes ids; it only receives the resolved `user_id` and
//! current party code per call.
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Session TTL (time to live)
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

/// Everything the server remembers about one browser session.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    /// Opaque stable user id handed to the party core on every call
    pub user_id: String,
    /// Code of the party this caller currently belongs to, if any
    pub party_code: Option<String>,
    /// Name of the celeb the caller is currently guessing, if any
    pub celeb: Option<String>,
    /// Solo score, independent of any party leaderboard
    pub solo_score: i64,
    /// When this session stops resolving and becomes eligible for eviction
    pub expires_at: DateTime<Utc>,
}

/// Token → session table.
///
/// Sessions expire after [`SESSION_TTL_SECS`]: an expired token no longer
/// resolves, and every mint sweeps expired entries out of the table. Like
/// party pruning, eviction rides on traffic instead of a background task,
/// so the table is bounded by the number of sessions minted per TTL window.
pub struct SessionStore {
    sessions: DashMap<String, PlayerSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        SessionStore {
            sessions: DashMap::new(),
        }
    }

    /// Mint a fresh token backed by a fresh user id, evicting expired
    /// sessions first.
    pub fn create(&self) -> String {
        let now = Utc::now();
        self.evict_expired(now);

        let token = Uuid::new_v4().to_string();
        let session = PlayerSession {
            user_id: Uuid::new_v4().to_string(),
            party_code: None,
            celeb: None,
            solo_score: 0,
            expires_at: now + Duration::seconds(SESSION_TTL_SECS),
        };
        self.sessions.insert(token.clone(), session);
        token
    }

    /// Resolve a token. Expired sessions stop resolving immediately, even
    /// before an eviction pass removes them.
    pub fn get(&self, token: &str) -> Option<PlayerSession> {
        self.sessions
            .get(token)
            .filter(|session| session.expires_at > Utc::now())
            .map(|entry| entry.value().clone())
    }

    /// Apply `f` to the session behind `token`. Returns false for an
    /// unknown or expired token.
    pub fn update(&self, token: &str, f: impl FnOnce(&mut PlayerSession)) -> bool {
        match self.sessions.get_mut(token) {
            Some(mut entry) if entry.expires_at > Utc::now() => {
                f(entry.value_mut());
                true
            }
            _ => false,
        }
    }

    /// Drop every session past its expiry.
    fn evict_expired(&self, now: DateTime<Utc>) {
        self.sessions.retain(|_, session| session.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expire(store: &SessionStore, token: &str) {
        let mut entry = store.sessions.get_mut(token).unwrap();
        entry.expires_at = Utc::now() - Duration::seconds(1);
    }

    #[test]
    fn create_mints_distinct_tokens_and_user_ids() {
        let store = SessionStore::new();
        let t1 = store.create();
        let t2 = store.create();
        assert_ne!(t1, t2);

        let s1 = store.get(&t1).unwrap();
        let s2 = store.get(&t2).unwrap();
        assert_ne!(s1.user_id, s2.user_id);
        assert_eq!(s1.solo_score, 0);
        assert!(s1.party_code.is_none());
        assert!(s1.expires_at > Utc::now());
    }

    #[test]
    fn update_is_visible_to_later_reads() {
        let store = SessionStore::new();
        let token = store.create();
        assert!(store.update(&token, |s| s.solo_score = 7));
        assert_eq!(store.get(&token).unwrap().solo_score, 7);
    }

    #[test]
    fn update_of_unknown_token_reports_failure() {
        let store = SessionStore::new();
        assert!(!store.update("nope", |s| s.solo_score = 7));
    }

    #[test]
    fn expired_sessions_stop_resolving() {
        let store = SessionStore::new();
        let token = store.create();
        expire(&store, &token);

        assert!(store.get(&token).is_none());
        assert!(!store.update(&token, |s| s.solo_score = 7));
    }

    #[test]
    fn minting_evicts_expired_sessions() {
        let store = SessionStore::new();
        let stale = store.create();
        expire(&store, &stale);

        let fresh = store.create();

        // the stale entry is gone from the table, not just unresolvable
        assert_eq!(store.len(), 1);
        assert!(store.get(&stale).is_none());
        assert!(store.get(&fresh).is_some());
    }

    #[test]
    fn cookieless_traffic_cannot_grow_the_table_past_its_ttl_window() {
        let store = SessionStore::new();
        for _ in 0..20 {
            let token = store.create();
            expire(&store, &token);
        }
        // one live entry at most: each mint swept the previous expired one
        let survivor = store.create();
        assert_eq!(store.len(), 1);
        assert!(store.get(&survivor).is_some());
    }
}
