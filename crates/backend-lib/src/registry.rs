// ============================
// netguessr-backend-lib/src/registry.rs
// ============================
//! The process-wide table of live parties.
use std::collections::HashMap;

use parking_lot::Mutex;

use crate::codes::RoomCodeAllocator;
use crate::error::AppError;
use crate::party::{Member, Party};

/// Maps room code → live party; the single source of truth for which rooms
/// exist. Every key equals its party's code, and no party sits in two slots.
///
/// One coarse lock serializes every registry and party mutation. That also
/// makes code allocation's check-then-insert atomic, and lets a membership
/// transfer (leave old party, enter new one) complete without any observable
/// intermediate state. Operations are in-memory and finish in microseconds,
/// so plain mutual exclusion is the right tool; nothing here suspends.
///
/// The registry is an explicit instance owned by the composition root and
/// handed to the service, never a process global.
pub struct PartyRegistry {
    allocator: RoomCodeAllocator,
    parties: Mutex<HashMap<String, Party>>,
}

impl PartyRegistry {
    pub fn new() -> Self {
        PartyRegistry {
            allocator: RoomCodeAllocator,
            parties: Mutex::new(HashMap::new()),
        }
    }

    /// Create a party under a freshly allocated code with `founder` as its
    /// sole member, tearing down the founder's membership in `prior_code`
    /// first (which may reap that party). Candidates are redrawn until one is
    /// absent from the table; allocation is only finalized by the insert, and
    /// both happen under the same lock, so two concurrent callers can never
    /// be handed the same code.
    pub fn create_party(&self, passcode: &str, founder: Member, prior_code: Option<&str>) -> String {
        let mut parties = self.parties.lock();

        if let Some(prior) = prior_code {
            if let Some(prior_party) = parties.get_mut(prior) {
                if prior_party.remove_member(founder.id()) {
                    parties.remove(prior);
                }
            }
        }

        let code = loop {
            let candidate = self.allocator.candidate();
            if !parties.contains_key(&candidate) {
                break candidate;
            }
        };

        let mut party = Party::new(code.clone(), passcode);
        party.add_member(founder);
        parties.insert(code.clone(), party);
        code
    }

    /// Move `member` into the party at `code`, tearing down any prior
    /// membership first. Both checks run before anything mutates, so a
    /// failed join leaves every party untouched. Rejoining the same party
    /// replaces the old membership: the stale score is discarded.
    pub fn join_party(
        &self,
        code: &str,
        passcode: &str,
        prior_code: Option<&str>,
        member: Member,
    ) -> Result<(), AppError> {
        let mut parties = self.parties.lock();

        {
            let party = parties
                .get(code)
                .ok_or_else(|| AppError::NotFound(format!("no party with code {code}")))?;
            if !party.passcode_matches(passcode) {
                return Err(AppError::Unauthorized);
            }
        }

        if let Some(prior) = prior_code.filter(|p| *p != code) {
            if let Some(prior_party) = parties.get_mut(prior) {
                if prior_party.remove_member(member.id()) {
                    parties.remove(prior);
                }
            }
        }

        if let Some(party) = parties.get_mut(code) {
            party.remove_member(member.id());
            party.add_member(member);
        }
        Ok(())
    }

    /// Remove `user_id` from the named party, reaping it the moment it
    /// empties. Tolerates the party or membership already being gone.
    pub fn remove_member(&self, code: &str, user_id: &str) {
        let mut parties = self.parties.lock();
        if let Some(party) = parties.get_mut(code) {
            if party.remove_member(user_id) {
                parties.remove(code);
            }
        }
    }

    /// Run `f` against the named party, reaping it before the lock drops if
    /// `f` left it empty. Returns `None` when the code is not live.
    pub fn with_party_mut<R>(&self, code: &str, f: impl FnOnce(&mut Party) -> R) -> Option<R> {
        let mut parties = self.parties.lock();
        let party = parties.get_mut(code)?;
        let result = f(party);
        if party.is_empty() {
            parties.remove(code);
        }
        Some(result)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.parties.lock().contains_key(code)
    }

    pub fn party_count(&self) -> usize {
        self.parties.lock().len()
    }
}

impl Default for PartyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
