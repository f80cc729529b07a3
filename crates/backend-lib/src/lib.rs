// ============================
// netguessr-backend-lib/src/lib.rs
// ============================
//! Core backend functionality for the NetGuessr game server.
//!
//! The heart of the crate is the party subsystem: ephemeral multiplayer
//! rooms ([`party::Party`]) tracked by an injectable [`registry::PartyRegistry`]
//! and orchestrated by [`service::PartyService`]. The rest (celeb dataset,
//! guess scoring, sessions, HTTP routing) are thin collaborators around it.

pub mod celebs;
pub mod codes;
pub mod config;
pub mod error;
pub mod party;
pub mod registry;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

use std::sync::Arc;

use crate::celebs::CelebDirectory;
use crate::config::Settings;
use crate::error::AppError;
use crate::registry::PartyRegistry;
use crate::service::PartyService;
use crate::session::SessionStore;

/// Where bare dataset image filenames are served from.
pub const CELEB_IMAGE_PREFIX: &str = "/static/celeb-images";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Party orchestration
    pub parties: Arc<PartyService>,
    /// Live party table, owned by the composition root and injected into
    /// the service (never a process global)
    pub registry: Arc<PartyRegistry>,
    /// Cookie-token session table
    pub sessions: Arc<SessionStore>,
    /// Net-worth dataset
    pub celebs: Arc<CelebDirectory>,
}

impl AppState {
    /// Build state from settings, loading the celeb dataset from disk.
    pub fn new(settings: &Settings) -> Result<Self, AppError> {
        let celebs = CelebDirectory::load(&settings.celebs_path, CELEB_IMAGE_PREFIX)?;
        Ok(Self::with_celebs(celebs, settings))
    }

    /// Build state around an already-loaded dataset.
    pub fn with_celebs(celebs: CelebDirectory, settings: &Settings) -> Self {
        let registry = Arc::new(PartyRegistry::new());
        let parties = Arc::new(PartyService::new(
            registry.clone(),
            settings.prune_after_secs,
        ));
        AppState {
            parties,
            registry,
            sessions: Arc::new(SessionStore::new()),
            celebs: Arc::new(celebs),
        }
    }
}
