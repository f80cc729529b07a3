// ============================
// netguessr-backend-lib/src/party.rs
// ============================
//! Parties and their members.
use chrono::{DateTime, Duration, Utc};

use netguessr_common::LeaderboardRow;

/// How long the display-name prefix taken from the caller id is.
const DISPLAY_NAME_PREFIX_LEN: usize = 8;

/// One participant's state inside a single party. A member exists in exactly
/// one party at a time and dies with its membership.
#[derive(Debug, Clone)]
pub struct Member {
    id: String,
    display_name: String,
    score: i64,
    last_active: DateTime<Utc>,
}

impl Member {
    /// Create a fresh member with a zero score. Without an explicit display
    /// name, a prefix of the id is used.
    pub fn new(id: impl Into<String>, display_name: Option<&str>) -> Self {
        let id = id.into();
        let display_name = match display_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => id.chars().take(DISPLAY_NAME_PREFIX_LEN).collect(),
        };
        Member {
            id,
            display_name,
            score: 0,
            last_active: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current score. Reading counts as activity.
    pub fn score(&mut self) -> i64 {
        self.last_active = Utc::now();
        self.score
    }

    /// Add `delta` to the score. An award that would take the score negative
    /// is rejected outright; the pre-award value is kept. Either way the
    /// member counts as active.
    pub fn award(&mut self, delta: i64) {
        self.last_active = Utc::now();
        if self.score + delta >= 0 {
            self.score += delta;
        }
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    fn idle_longer_than(&self, threshold: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_active > threshold
    }
}

/// A live game room: immutable code, optional passcode, ordered member list.
///
/// A party never sits empty in the registry: every removal path reports
/// whether it just emptied the party, and the registry reaps it under the
/// same lock before anyone can observe it.
#[derive(Debug, Clone)]
pub struct Party {
    code: String,
    passcode: String,
    members: Vec<Member>,
}

impl Party {
    pub fn new(code: impl Into<String>, passcode: impl Into<String>) -> Self {
        Party {
            code: code.into(),
            passcode: passcode.into(),
            members: Vec::new(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Exact comparison; an empty stored passcode only matches empty input.
    pub fn passcode_matches(&self, supplied: &str) -> bool {
        self.passcode == supplied
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Append unless a member with the same id already exists (idempotent
    /// join-guard; duplicate prevention across rooms is the service's job).
    pub fn add_member(&mut self, member: Member) {
        if !self.contains(member.id()) {
            self.members.push(member);
        }
    }

    /// Remove by id. Removing a non-member is a silent no-op; callers remove
    /// speculatively. Returns true when the party is now empty and must be
    /// reaped by its registry.
    pub fn remove_member(&mut self, id: &str) -> bool {
        self.members.retain(|m| m.id != id);
        self.members.is_empty()
    }

    pub fn get_member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn get_member_mut(&mut self, id: &str) -> Option<&mut Member> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// A member's score, refreshing their activity timestamp.
    pub fn member_score(&mut self, id: &str) -> Option<i64> {
        self.get_member_mut(id).map(Member::score)
    }

    /// Award points to a member. No-op (not an error) when the member is
    /// absent; the award guard in [`Member::award`] applies.
    pub fn award_points(&mut self, id: &str, points: i64) {
        if let Some(member) = self.get_member_mut(id) {
            member.award(points);
        }
    }

    /// Leaderboard snapshot: score descending, ties keep join order. The
    /// stable sort is the leaderboard contract; equal scores must come out
    /// deterministically.
    pub fn snapshot_stats(&self) -> Vec<LeaderboardRow> {
        let mut ranked: Vec<&Member> = self.members.iter().collect();
        ranked.sort_by_key(|m| std::cmp::Reverse(m.score));
        ranked
            .into_iter()
            .map(|m| LeaderboardRow {
                display_name: m.display_name.clone(),
                score: m.score,
            })
            .collect()
    }

    /// Drop every member idle longer than `threshold`. Returns true when the
    /// party emptied and must be reaped.
    ///
    /// This only ever runs in the wake of a score submission; there is no
    /// background sweep. A party whose members all go quiet stays live until
    /// one of them submits again. That traffic-coupled cleanup is a
    /// documented trade-off, not an oversight.
    pub fn prune_inactive(&mut self, threshold: Duration) -> bool {
        self.prune_inactive_at(threshold, Utc::now())
    }

    fn prune_inactive_at(&mut self, threshold: Duration, now: DateTime<Utc>) -> bool {
        self.members.retain(|m| !m.idle_longer_than(threshold, now));
        self.members.is_empty()
    }
}
