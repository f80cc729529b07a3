// ================
// common/src/lib.rs
// ================
//! Shared types for the NetGuessr HTTP API.
//! These mirror the JSON contract consumed by the browser client, so the
//! wire names stay camelCase (and `celeb_data`, which the client already
//! expects snake_cased).

use serde::{Deserialize, Serialize};

/// A celebrity record from the net-worth dataset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Celeb {
    /// Display name, unique within the dataset
    pub name: String,
    /// Full image URL, or a bare filename the server prefixes before serving
    pub image: String,
    /// Net worth exactly as stored, e.g. `"$1,500,000"`
    pub networth: String,
}

/// One leaderboard row. Ordering is the server's job: score descending,
/// ties in original join order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub score: i64,
}

/// Request body for `POST /party/create`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CreatePartyRequest {
    /// Empty string means the party is open to anyone with the code
    #[serde(default)]
    pub passcode: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Request body for `POST /party/join`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JoinPartyRequest {
    pub code: String,
    #[serde(default)]
    pub passcode: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

/// Request body for `POST /party/leave`. With no explicit code the server
/// falls back to the caller's current party.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LeavePartyRequest {
    #[serde(default)]
    pub code: Option<String>,
}

/// Response to `POST /party/create`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PartyCreated {
    #[serde(rename = "roomCode")]
    pub room_code: String,
    pub message: String,
}

/// Response to join/leave calls.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PartyAck {
    pub message: String,
}

/// Response to `GET /party/info`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RoomInfo {
    pub code: String,
    pub leaderboard: Vec<LeaderboardRow>,
    #[serde(rename = "callerScore")]
    pub caller_score: i64,
}

/// Request body for `POST /game/submit`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GuessRequest {
    pub guess: i64,
}

/// Response to `POST /game/submit`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GuessResult {
    pub message: String,
    pub statcode: String,
    /// The caller's solo score after this guess
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celeb_data: Option<Celeb>,
}

/// Response to `GET /game/start`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameStart {
    #[serde(rename = "celebName")]
    pub celeb_name: String,
    #[serde(rename = "celebImageUrl")]
    pub celeb_image_url: String,
    /// The caller's current solo score
    pub score: i64,
}
