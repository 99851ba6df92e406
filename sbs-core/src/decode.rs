//! Decode BaseStation (SBS-1) CSV lines into typed message entities.
//!
//! Fixed layout for every kind:
//! - token 0:    message kind (`SEL`, `ID`, `AIR`, `STA`, `CLK`, `MSG`)
//! - token 1:    transmission subtype (`MSG` only)
//! - token 4:    ICAO address
//! - tokens 6-7: date/time generated
//! - tokens 8-9: date/time logged
//! - token 10:   call sign (`ID`, `MSG` 1) or status subtype (`STA`)
//!
//! `MSG` payload tokens 11-21, populated per subtype:
//!
//! | Subtype | Fields |
//! |---|---|
//! | 1 identification     | call sign |
//! | 2 surface position   | altitude, ground speed, track, position, on ground |
//! | 3 airborne position  | altitude, position, alert, emergency, ident, on ground |
//! | 4 airborne velocity  | ground speed, track, vertical rate |
//! | 5 surveillance alt   | altitude, alert, ident, on ground |
//! | 6 surveillance id    | altitude, squawk, alert, emergency, ident, on ground |
//! | 7 air-to-air         | altitude, on ground |
//! | 8 all-call reply     | on ground |
//!
//! Outcomes: `Ok(Some(_))` is a message, `Ok(None)` is a skipped line (logged),
//! `Err(_)` is a structurally broken line.

use tracing::{error, warn};

use crate::classify::{check_token_count, classify_kind, classify_status, AllowList, MessageFilter};
use crate::coerce::{as_boolean, as_float, as_position, as_short};
use crate::entity::*;
use crate::timestamp::assemble_timestamp;
use crate::types::{MessageKind, Result, TransmissionSubtype};

const SUBTYPE: usize = 1;
const ICAO: usize = 4;
const CREATED_DATE: usize = 6;
const CREATED_TIME: usize = 7;
const RECEIVED_DATE: usize = 8;
const RECEIVED_TIME: usize = 9;
const CALL_SIGN: usize = 10;
const STATUS: usize = 10;
const ALTITUDE: usize = 11;
const GROUND_SPEED: usize = 12;
const TRACK: usize = 13;
const LATITUDE: usize = 14;
const LONGITUDE: usize = 15;
const VERTICAL_RATE: usize = 16;
const SQUAWK: usize = 17;
const ALERT: usize = 18;
const EMERGENCY: usize = 19;
const IDENT_ACTIVE: usize = 20;
const ON_GROUND: usize = 21;

/// Decode one feed line against the default allow-list.
pub fn decode(line: &str) -> Result<Option<BaseStationMessage>> {
    decode_with(line, &AllowList::default())
}

/// Decode one feed line, consulting `filter` for accepted kinds and status
/// subtypes.
pub fn decode_with(line: &str, filter: &dyn MessageFilter) -> Result<Option<BaseStationMessage>> {
    let line = line.trim();
    if line.is_empty() {
        warn!("message token array has zero length");
        return Ok(None);
    }

    let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
    decode_tokens(&tokens, filter)
}

/// Decode an already tokenized line.
pub fn decode_tokens(tokens: &[&str], filter: &dyn MessageFilter) -> Result<Option<BaseStationMessage>> {
    let Some(kind_token) = tokens.first() else {
        warn!("message token array has zero length");
        return Ok(None);
    };

    let Some(kind) = classify_kind(kind_token, filter) else {
        return Ok(None);
    };

    check_token_count(kind, tokens)?;

    let icao = tokens[ICAO];
    let created = assemble_timestamp(tokens[CREATED_DATE], tokens[CREATED_TIME])?;
    let received = assemble_timestamp(tokens[RECEIVED_DATE], tokens[RECEIVED_TIME])?;

    let msg = match kind {
        MessageKind::NewAircraft => BaseStationMessage::NewAircraft(
            NewAircraftMessageBuilder::new(icao, created, received).build(),
        ),
        MessageKind::Identification => BaseStationMessage::Identification(
            IdentificationMessageBuilder::new(icao, created, received)
                .call_sign(call_sign(tokens[CALL_SIGN]))
                .build(),
        ),
        MessageKind::Transmission => {
            let Some(subtype) = transmission_subtype(tokens[SUBTYPE]) else {
                return Ok(None);
            };
            let builder = TransmissionMessageBuilder::new(icao, created, received, subtype);
            BaseStationMessage::Transmission(fill_transmission(builder, subtype, tokens).build())
        }
        MessageKind::StatusChange => {
            let Some(status) = classify_status(tokens[STATUS], filter) else {
                return Ok(None);
            };
            BaseStationMessage::Status(
                StatusMessageBuilder::new(icao, created, received, status).build(),
            )
        }
        MessageKind::SelectionChange | MessageKind::Click => {
            error!(kind = %kind, "unexpected message type received");
            return Ok(None);
        }
    };

    Ok(Some(msg))
}

/// Parse token 1 of a `MSG` line. `None` (logged) skips the line.
fn transmission_subtype(token: &str) -> Option<TransmissionSubtype> {
    let Some(code) = as_short(token) else {
        error!(token, "unable to parse transmission type");
        return None;
    };
    match TransmissionSubtype::try_from(code) {
        Ok(subtype) => Some(subtype),
        Err(code) => {
            error!(code, "unexpected transmission message type received");
            None
        }
    }
}

/// Populate exactly the payload fields defined for `subtype`.
fn fill_transmission(
    builder: TransmissionMessageBuilder,
    subtype: TransmissionSubtype,
    tokens: &[&str],
) -> TransmissionMessageBuilder {
    let t = |i: usize| tokens[i];

    match subtype {
        TransmissionSubtype::Identification => builder.call_sign(call_sign(t(CALL_SIGN))),
        TransmissionSubtype::SurfacePosition => builder
            .altitude(as_float(t(ALTITUDE)))
            .ground_speed(as_float(t(GROUND_SPEED)))
            .track(as_float(t(TRACK)))
            .position(as_position(t(LONGITUDE), t(LATITUDE)))
            .on_ground(as_boolean(t(ON_GROUND))),
        TransmissionSubtype::AirbornePosition => builder
            .altitude(as_float(t(ALTITUDE)))
            .position(as_position(t(LONGITUDE), t(LATITUDE)))
            .alert(as_boolean(t(ALERT)))
            .emergency(as_boolean(t(EMERGENCY)))
            .ident_active(as_boolean(t(IDENT_ACTIVE)))
            .on_ground(as_boolean(t(ON_GROUND))),
        TransmissionSubtype::AirborneVelocity => builder
            .ground_speed(as_float(t(GROUND_SPEED)))
            .track(as_float(t(TRACK)))
            .vertical_rate(as_short(t(VERTICAL_RATE))),
        TransmissionSubtype::SurveillanceAltitude => builder
            .altitude(as_float(t(ALTITUDE)))
            .alert(as_boolean(t(ALERT)))
            .ident_active(as_boolean(t(IDENT_ACTIVE)))
            .on_ground(as_boolean(t(ON_GROUND))),
        TransmissionSubtype::SurveillanceIdentification => builder
            .altitude(as_float(t(ALTITUDE)))
            .squawk(as_short(t(SQUAWK)))
            .alert(as_boolean(t(ALERT)))
            .emergency(as_boolean(t(EMERGENCY)))
            .ident_active(as_boolean(t(IDENT_ACTIVE)))
            .on_ground(as_boolean(t(ON_GROUND))),
        TransmissionSubtype::AirToAir => builder
            .altitude(as_float(t(ALTITUDE)))
            .on_ground(as_boolean(t(ON_GROUND))),
        TransmissionSubtype::AllCallReply => builder.on_ground(as_boolean(t(ON_GROUND))),
    }
}

fn call_sign(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
