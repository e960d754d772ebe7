//! Wire-shape validation and serialization for telemetry envelopes.
//!
//! Both discriminator sets are closed, so parsing is an explicit match per
//! discriminator with one constructor per arm. Validation is all-or-nothing:
//! the first failure wins and no partial event is built. Unknown extra
//! fields are ignored everywhere except the open `custom` data map.

use std::str::FromStr;

use serde_json::{Map, Value, json};

use crate::error::{SchemaError, SchemaResult};
use crate::event::{
    CustomEvent, Event, EventKind, EventPayload, GoldEvent, HeartbeatEvent, ItemEvent, LevelEvent,
    PhaseEvent, PlayerEvent, PlayerRef, SkillLevelEvent,
};

/// Validate one raw envelope into a typed [`Event`].
///
/// # Errors
///
/// Fails with [`SchemaError`] when `kind` or `payloadKind` falls outside its
/// closed set, a required field is absent, or a field carries the wrong
/// shape.
pub fn parse_event(raw: &Value) -> SchemaResult<Event> {
    let envelope = as_object(raw, "event")?;
    let kind = EventKind::from_str(require_str(envelope, "event", "kind")?)?;
    let ts = require_u64(envelope, "event", "ts")?;
    let payload = parse_payload(require(envelope, "event", "payload")?)?;
    Ok(Event { kind, ts, payload })
}

/// Serialize a typed [`Event`] back to its wire shape.
///
/// Machine aliases (`summonerName`, `itemId`, `payloadKind`) are emitted and
/// absent optionals are omitted, so `parse_event(&serialize_event(e))`
/// returns `e` for every valid event.
#[must_use]
pub fn serialize_event(event: &Event) -> Value {
    json!({
        "kind": event.kind.as_str(),
        "ts": event.ts,
        "payload": serialize_payload(&event.payload),
    })
}

fn parse_payload(raw: &Value) -> SchemaResult<EventPayload> {
    let payload = as_object(raw, "payload")?;
    match require_str(payload, "payload", "payloadKind")? {
        "player" => Ok(EventPayload::Player(PlayerEvent {
            player: require_player(payload, "player")?,
        })),
        "playerItem" => Ok(EventPayload::PlayerItem(ItemEvent {
            player: require_player(payload, "playerItem")?,
            item_id: require_u32(payload, "playerItem", "itemId")?,
            item_name: optional_str(payload, "playerItem", "itemName")?,
        })),
        "playerLevel" => Ok(EventPayload::PlayerLevel(LevelEvent {
            player: require_player(payload, "playerLevel")?,
            level: require_u8(payload, "playerLevel", "level")?,
        })),
        "playerSkillLevel" => Ok(EventPayload::PlayerSkillLevel(SkillLevelEvent {
            player: require_player(payload, "playerSkillLevel")?,
            ability: require_str(payload, "playerSkillLevel", "ability")?.to_string(),
            level: require_u8(payload, "playerSkillLevel", "level")?,
        })),
        "playerGold" => Ok(EventPayload::PlayerGold(GoldEvent {
            player: require_player(payload, "playerGold")?,
            delta: require_i32(payload, "playerGold", "delta")?,
            total: require_i32(payload, "playerGold", "total")?,
        })),
        "phase" => Ok(EventPayload::Phase(PhaseEvent {
            phase: require_str(payload, "phase", "phase")?.to_string(),
        })),
        "heartbeat" => Ok(EventPayload::Heartbeat(HeartbeatEvent {
            seq: require_u64(payload, "heartbeat", "seq")?,
        })),
        "custom" => {
            let data = require(payload, "custom", "data")?;
            let data = as_object(data, "data")?;
            Ok(EventPayload::Custom(CustomEvent {
                data: data
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            }))
        }
        other => Err(SchemaError::UnknownPayloadKind {
            value: other.to_string(),
        }),
    }
}

fn serialize_payload(payload: &EventPayload) -> Value {
    match payload {
        EventPayload::Player(body) => json!({
            "payloadKind": "player",
            "player": player_value(&body.player),
        }),
        EventPayload::PlayerItem(body) => {
            let mut value = json!({
                "payloadKind": "playerItem",
                "player": player_value(&body.player),
                "itemId": body.item_id,
            });
            if let Some(name) = &body.item_name {
                value["itemName"] = Value::from(name.clone());
            }
            value
        }
        EventPayload::PlayerLevel(body) => json!({
            "payloadKind": "playerLevel",
            "player": player_value(&body.player),
            "level": body.level,
        }),
        EventPayload::PlayerSkillLevel(body) => json!({
            "payloadKind": "playerSkillLevel",
            "player": player_value(&body.player),
            "ability": body.ability,
            "level": body.level,
        }),
        EventPayload::PlayerGold(body) => json!({
            "payloadKind": "playerGold",
            "player": player_value(&body.player),
            "delta": body.delta,
            "total": body.total,
        }),
        EventPayload::Phase(body) => json!({
            "payloadKind": "phase",
            "phase": body.phase,
        }),
        EventPayload::Heartbeat(body) => json!({
            "payloadKind": "heartbeat",
            "seq": body.seq,
        }),
        EventPayload::Custom(body) => json!({
            "payloadKind": "custom",
            "data": body.data,
        }),
    }
}

fn player_value(player: &PlayerRef) -> Value {
    json!({
        "summonerName": player.summoner_name,
        "team": player.team,
        "slot": player.slot,
    })
}

fn as_object<'a>(value: &'a Value, context: &'static str) -> SchemaResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or(SchemaError::NotAnObject { context })
}

fn require<'a>(
    object: &'a Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<&'a Value> {
    object
        .get(field)
        .ok_or(SchemaError::MissingField { context, field })
}

fn require_str<'a>(
    object: &'a Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<&'a str> {
    require(object, context, field)?
        .as_str()
        .ok_or(SchemaError::InvalidField {
            context,
            field,
            expected: "a string",
        })
}

fn optional_str(
    object: &Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<Option<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let text = value.as_str().ok_or(SchemaError::InvalidField {
                context,
                field,
                expected: "a string",
            })?;
            Ok(Some(text.to_string()))
        }
    }
}

fn require_u64(
    object: &Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<u64> {
    require(object, context, field)?
        .as_u64()
        .ok_or(SchemaError::InvalidField {
            context,
            field,
            expected: "an unsigned integer",
        })
}

fn require_u32(
    object: &Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<u32> {
    let wide = require_u64(object, context, field)?;
    u32::try_from(wide).map_err(|_| SchemaError::InvalidField {
        context,
        field,
        expected: "an unsigned 32-bit integer",
    })
}

fn require_u8(
    object: &Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<u8> {
    let wide = require_u64(object, context, field)?;
    u8::try_from(wide).map_err(|_| SchemaError::InvalidField {
        context,
        field,
        expected: "an unsigned 8-bit integer",
    })
}

fn require_i32(
    object: &Map<String, Value>,
    context: &'static str,
    field: &'static str,
) -> SchemaResult<i32> {
    let wide = require(object, context, field)?
        .as_i64()
        .ok_or(SchemaError::InvalidField {
            context,
            field,
            expected: "a signed 32-bit integer",
        })?;
    i32::try_from(wide).map_err(|_| SchemaError::InvalidField {
        context,
        field,
        expected: "a signed 32-bit integer",
    })
}

fn require_player(
    object: &Map<String, Value>,
    context: &'static str,
) -> SchemaResult<PlayerRef> {
    let raw = require(object, context, "player")?;
    let player = as_object(raw, "player")?;
    Ok(PlayerRef {
        summoner_name: require_str(player, "player", "summonerName")?.to_string(),
        team: require_str(player, "player", "team")?.to_string(),
        slot: require_u8(player, "player", "slot")?,
    })
}
