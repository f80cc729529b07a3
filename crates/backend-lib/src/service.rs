// ============================
// netguessr-backend-lib/src/service.rs
// ============================
//! Orchestrates party operations on behalf of resolved callers.
//!
//! The service is a pure state machine over explicit inputs: the HTTP layer
//! resolves the caller's opaque id and current party code from its session
//! store and passes both in on every call. Nothing here synthesizes
//! identity, blocks on I/O, or retries.
use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use netguessr_common::{PartyAck, PartyCreated, RoomInfo};

use crate::error::AppError;
use crate::party::Member;
use crate::registry::PartyRegistry;

/// Default member-inactivity threshold in seconds.
pub const DEFAULT_PRUNE_AFTER_SECS: u64 = 300;

pub struct PartyService {
    registry: Arc<PartyRegistry>,
    prune_after: Duration,
}

impl PartyService {
    pub fn new(registry: Arc<PartyRegistry>, prune_after_secs: u64) -> Self {
        PartyService {
            registry,
            prune_after: Duration::seconds(prune_after_secs as i64),
        }
    }

    /// Create a room with the caller as sole initial member. Any prior
    /// membership is torn down first: a caller belongs to at most one room
    /// at a time, and there is no state in which they belong to two.
    pub fn create_room(
        &self,
        caller_id: &str,
        prior_code: Option<&str>,
        passcode: &str,
        display_name: Option<&str>,
    ) -> PartyCreated {
        let member = Member::new(caller_id, display_name);
        let code = self.registry.create_party(passcode, member, prior_code);
        info!(code, caller = caller_id, "party created");
        PartyCreated {
            room_code: code,
            message: "Party created.".to_string(),
        }
    }

    /// Join the room at `code`. `NotFound` for a dead code, `Unauthorized`
    /// for a passcode mismatch; otherwise prior membership is torn down and
    /// the caller enters fresh: rejoining deliberately resets their score.
    pub fn join_room(
        &self,
        caller_id: &str,
        prior_code: Option<&str>,
        code: &str,
        passcode: &str,
        display_name: Option<&str>,
    ) -> Result<PartyAck, AppError> {
        let member = Member::new(caller_id, display_name);
        self.registry.join_party(code, passcode, prior_code, member)?;
        info!(code, caller = caller_id, "party joined");
        Ok(PartyAck {
            message: format!("Joined party {code}."),
        })
    }

    /// Leave the named room. Idempotent: a room or membership that is
    /// already gone is not an error.
    pub fn leave_room(&self, caller_id: &str, code: &str) -> PartyAck {
        self.registry.remove_member(code, caller_id);
        debug!(code, caller = caller_id, "party left");
        PartyAck {
            message: "Left party.".to_string(),
        }
    }

    /// Award `points` to the caller's member in `code` (a no-op if either is
    /// gone), then unconditionally prune that party's idle members.
    ///
    /// The coupling is deliberate: score traffic is the heartbeat that
    /// bounds registry growth, instead of a separate timer. A party that
    /// sees no further submissions is never pruned.
    pub fn submit_score(&self, caller_id: &str, code: &str, points: i64) {
        let prune_after = self.prune_after;
        let pruned = self.registry.with_party_mut(code, |party| {
            party.award_points(caller_id, points);
            let before = party.len();
            party.prune_inactive(prune_after);
            before - party.len()
        });
        if let Some(pruned) = pruned.filter(|n| *n > 0) {
            info!(code, pruned, "pruned idle members");
        }
    }

    /// Sorted leaderboard plus the caller's own score. `NotFound` when the
    /// room, or the caller's membership in it, does not exist.
    pub fn room_info(&self, caller_id: &str, code: &str) -> Result<RoomInfo, AppError> {
        self.registry
            .with_party_mut(code, |party| {
                let caller_score = party.member_score(caller_id)?;
                Some(RoomInfo {
                    code: party.code().to_string(),
                    leaderboard: party.snapshot_stats(),
                    caller_score,
                })
            })
            .flatten()
            .ok_or_else(|| AppError::NotFound(format!("no membership in party {code}")))
    }
}
