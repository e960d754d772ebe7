//! Telemetry event types shared across the riftline workspace.
//!
//! The wire contract is a two-level discriminated union: [`EventKind`]
//! categorizes the envelope and `payloadKind` selects the payload shape. The
//! two axes are deliberately independent; no pairing between them is
//! enforced.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Millisecond timestamp sourced from the game client. Epoch-like; no
/// monotonicity is enforced.
pub type TimestampMs = u64;

/// Accepted telemetry event kinds.
///
/// The set is closed: parsing any other string fails with
/// [`SchemaError::UnknownEventKind`] and there is no runtime extension.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// A champion takedown credited to the player.
    Kill,
    /// The player died.
    Death,
    /// The player assisted on a takedown.
    Assist,
    /// The player reached a new champion level.
    LevelUp,
    /// The player ranked up an ability.
    SkillLevelUp,
    /// An item entered the player's inventory.
    ItemAdded,
    /// An item left the player's inventory.
    ItemRemoved,
    /// The player's gold total changed.
    GoldDelta,
    /// The player respawned.
    Respawn,
    /// The game moved to a new phase.
    PhaseChange,
    /// Periodic liveness signal from the daemon.
    Heartbeat,
}

impl EventKind {
    /// Every member of the closed set, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Kill,
        Self::Death,
        Self::Assist,
        Self::LevelUp,
        Self::SkillLevelUp,
        Self::ItemAdded,
        Self::ItemRemoved,
        Self::GoldDelta,
        Self::Respawn,
        Self::PhaseChange,
        Self::Heartbeat,
    ];

    /// Render the kind as its camelCase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kill => "kill",
            Self::Death => "death",
            Self::Assist => "assist",
            Self::LevelUp => "levelUp",
            Self::SkillLevelUp => "skillLevelUp",
            Self::ItemAdded => "itemAdded",
            Self::ItemRemoved => "itemRemoved",
            Self::GoldDelta => "goldDelta",
            Self::Respawn => "respawn",
            Self::PhaseChange => "phaseChange",
            Self::Heartbeat => "heartbeat",
        }
    }
}

impl FromStr for EventKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kill" => Ok(Self::Kill),
            "death" => Ok(Self::Death),
            "assist" => Ok(Self::Assist),
            "levelUp" => Ok(Self::LevelUp),
            "skillLevelUp" => Ok(Self::SkillLevelUp),
            "itemAdded" => Ok(Self::ItemAdded),
            "itemRemoved" => Ok(Self::ItemRemoved),
            "goldDelta" => Ok(Self::GoldDelta),
            "respawn" => Ok(Self::Respawn),
            "phaseChange" => Ok(Self::PhaseChange),
            "heartbeat" => Ok(Self::Heartbeat),
            other => Err(SchemaError::UnknownEventKind {
                value: other.to_string(),
            }),
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Identifies a participant within the current game session.
///
/// Structural only; no uniqueness is enforced across events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRef {
    /// Display name reported by the game client.
    pub summoner_name: String,
    /// Team label as carried on the wire (`order`, `chaos`, ...).
    pub team: String,
    /// Roster slot index.
    pub slot: u8,
}

/// Event payload variants, tagged by `payloadKind` on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(tag = "payloadKind", rename_all = "camelCase")]
pub enum EventPayload {
    /// Payload carrying only the acting player.
    Player(PlayerEvent),
    /// Inventory change for a player.
    PlayerItem(ItemEvent),
    /// Champion level change for a player.
    PlayerLevel(LevelEvent),
    /// Ability rank change for a player.
    PlayerSkillLevel(SkillLevelEvent),
    /// Gold delta and running total for a player.
    PlayerGold(GoldEvent),
    /// Game phase transition.
    Phase(PhaseEvent),
    /// Daemon liveness signal.
    Heartbeat(HeartbeatEvent),
    /// Open escape hatch for payloads the schema does not model.
    Custom(CustomEvent),
}

impl EventPayload {
    /// Render the variant's `payloadKind` discriminator.
    #[must_use]
    pub const fn payload_kind(&self) -> &'static str {
        match self {
            Self::Player(_) => "player",
            Self::PlayerItem(_) => "playerItem",
            Self::PlayerLevel(_) => "playerLevel",
            Self::PlayerSkillLevel(_) => "playerSkillLevel",
            Self::PlayerGold(_) => "playerGold",
            Self::Phase(_) => "phase",
            Self::Heartbeat(_) => "heartbeat",
            Self::Custom(_) => "custom",
        }
    }
}

/// Payload for events that only name the acting player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct PlayerEvent {
    /// Player the event is about.
    pub player: PlayerRef,
}

/// Payload for inventory changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemEvent {
    /// Player whose inventory changed.
    pub player: PlayerRef,
    /// Numeric item identifier from the game data files.
    pub item_id: u32,
    /// Localized item name, when the daemon resolved one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
}

/// Payload for champion level changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct LevelEvent {
    /// Player who leveled.
    pub player: PlayerRef,
    /// New champion level.
    pub level: u8,
}

/// Payload for ability rank changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct SkillLevelEvent {
    /// Player who ranked an ability.
    pub player: PlayerRef,
    /// Ability slot identifier (`Q`, `W`, ...).
    pub ability: String,
    /// New rank of the ability.
    pub level: u8,
}

/// Payload for gold changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct GoldEvent {
    /// Player whose gold changed.
    pub player: PlayerRef,
    /// Signed change applied by this event.
    pub delta: i32,
    /// Running total after the change.
    pub total: i32,
}

/// Payload for game phase transitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct PhaseEvent {
    /// Name of the phase the game entered.
    pub phase: String,
}

/// Payload for daemon liveness signals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct HeartbeatEvent {
    /// Monotonic heartbeat sequence number.
    pub seq: u64,
}

/// Open payload carrying arbitrary structured data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CustomEvent {
    /// Free-form mapping passed through validation untouched.
    pub data: HashMap<String, Value>,
}

/// Envelope for one telemetry occurrence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Event {
    /// Category of the occurrence.
    pub kind: EventKind,
    /// When the daemon observed the occurrence.
    pub ts: TimestampMs,
    /// Payload variant; not required to pair semantically with `kind`.
    pub payload: EventPayload,
}

/// Batch of events delivered in a single poll cycle.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct EventBatch {
    /// Events in the order the daemon observed them.
    pub events: Vec<Event>,
}
