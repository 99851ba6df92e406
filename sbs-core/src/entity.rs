//! Decoded BaseStation message entities and their builders.
//!
//! Every entity carries the same three header fields (ICAO address, creation
//! and reception instants). Builders take the required fields up front and
//! optional fields through chained setters; `build()` hands back a value
//! whose fields can only be read.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{GeoPosition, MessageKind, StatusSubtype, TransmissionSubtype};

/// Fields shared by every message kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageHeader {
    icao_address: String,
    created: DateTime<Utc>,
    received: DateTime<Utc>,
}

impl MessageHeader {
    fn new(icao_address: impl Into<String>, created: DateTime<Utc>, received: DateTime<Utc>) -> Self {
        MessageHeader {
            icao_address: icao_address.into(),
            created,
            received,
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// `AIR`: a new aircraft entered the receiver's view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAircraftMessage {
    #[serde(flatten)]
    header: MessageHeader,
}

/// `ID`: the aircraft changed its call sign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdentificationMessage {
    #[serde(flatten)]
    header: MessageHeader,
    call_sign: Option<String>,
}

impl IdentificationMessage {
    pub fn call_sign(&self) -> Option<&str> {
        self.call_sign.as_deref()
    }
}

/// `MSG`: a transmission from the aircraft. Which optional fields may be
/// present depends on the subtype.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransmissionMessage {
    #[serde(flatten)]
    header: MessageHeader,
    subtype: TransmissionSubtype,
    call_sign: Option<String>,
    altitude: Option<f32>,
    ground_speed: Option<f32>,
    track: Option<f32>,
    position: Option<GeoPosition>,
    vertical_rate: Option<i16>,
    squawk: Option<i16>,
    alert: Option<bool>,
    emergency: Option<bool>,
    ident_active: Option<bool>,
    on_ground: Option<bool>,
}

impl TransmissionMessage {
    pub fn subtype(&self) -> TransmissionSubtype {
        self.subtype
    }

    pub fn call_sign(&self) -> Option<&str> {
        self.call_sign.as_deref()
    }

    /// Mode C altitude in feet (flight level reference, not AMSL).
    pub fn altitude(&self) -> Option<f32> {
        self.altitude
    }

    /// Ground speed in knots.
    pub fn ground_speed(&self) -> Option<f32> {
        self.ground_speed
    }

    /// Track over ground in degrees, derived from the velocity vector.
    pub fn track(&self) -> Option<f32> {
        self.track
    }

    pub fn position(&self) -> Option<GeoPosition> {
        self.position
    }

    /// Vertical rate in ft/min.
    pub fn vertical_rate(&self) -> Option<i16> {
        self.vertical_rate
    }

    pub fn squawk(&self) -> Option<i16> {
        self.squawk
    }

    /// Squawk has changed.
    pub fn alert(&self) -> Option<bool> {
        self.alert
    }

    pub fn emergency(&self) -> Option<bool> {
        self.emergency
    }

    /// Transponder ident (SPI) is active.
    pub fn ident_active(&self) -> Option<bool> {
        self.ident_active
    }

    pub fn on_ground(&self) -> Option<bool> {
        self.on_ground
    }
}

/// `STA`: the aircraft's status changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusMessage {
    #[serde(flatten)]
    header: MessageHeader,
    status: StatusSubtype,
}

impl StatusMessage {
    pub fn status(&self) -> StatusSubtype {
        self.status
    }
}

/// Union of all decoded message entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum BaseStationMessage {
    NewAircraft(NewAircraftMessage),
    Identification(IdentificationMessage),
    Transmission(TransmissionMessage),
    Status(StatusMessage),
}

impl BaseStationMessage {
    fn header(&self) -> &MessageHeader {
        match self {
            BaseStationMessage::NewAircraft(m) => &m.header,
            BaseStationMessage::Identification(m) => &m.header,
            BaseStationMessage::Transmission(m) => &m.header,
            BaseStationMessage::Status(m) => &m.header,
        }
    }

    /// Hex ICAO address from token 4, as received.
    pub fn icao_address(&self) -> &str {
        &self.header().icao_address
    }

    /// When the message was generated.
    pub fn created(&self) -> DateTime<Utc> {
        self.header().created
    }

    /// When the message was logged by the receiver.
    pub fn received(&self) -> DateTime<Utc> {
        self.header().received
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            BaseStationMessage::NewAircraft(_) => MessageKind::NewAircraft,
            BaseStationMessage::Identification(_) => MessageKind::Identification,
            BaseStationMessage::Transmission(_) => MessageKind::Transmission,
            BaseStationMessage::Status(_) => MessageKind::StatusChange,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub struct NewAircraftMessageBuilder {
    header: MessageHeader,
}

impl NewAircraftMessageBuilder {
    pub fn new(icao_address: impl Into<String>, created: DateTime<Utc>, received: DateTime<Utc>) -> Self {
        NewAircraftMessageBuilder {
            header: MessageHeader::new(icao_address, created, received),
        }
    }

    pub fn build(self) -> NewAircraftMessage {
        NewAircraftMessage {
            header: self.header,
        }
    }
}

pub struct IdentificationMessageBuilder {
    header: MessageHeader,
    call_sign: Option<String>,
}

impl IdentificationMessageBuilder {
    pub fn new(icao_address: impl Into<String>, created: DateTime<Utc>, received: DateTime<Utc>) -> Self {
        IdentificationMessageBuilder {
            header: MessageHeader::new(icao_address, created, received),
            call_sign: None,
        }
    }

    pub fn call_sign(mut self, call_sign: Option<String>) -> Self {
        self.call_sign = call_sign;
        self
    }

    pub fn build(self) -> IdentificationMessage {
        IdentificationMessage {
            header: self.header,
            call_sign: self.call_sign,
        }
    }
}

pub struct TransmissionMessageBuilder {
    message: TransmissionMessage,
}

impl TransmissionMessageBuilder {
    pub fn new(
        icao_address: impl Into<String>,
        created: DateTime<Utc>,
        received: DateTime<Utc>,
        subtype: TransmissionSubtype,
    ) -> Self {
        TransmissionMessageBuilder {
            message: TransmissionMessage {
                header: MessageHeader::new(icao_address, created, received),
                subtype,
                call_sign: None,
                altitude: None,
                ground_speed: None,
                track: None,
                position: None,
                vertical_rate: None,
                squawk: None,
                alert: None,
                emergency: None,
                ident_active: None,
                on_ground: None,
            },
        }
    }

    pub fn call_sign(mut self, call_sign: Option<String>) -> Self {
        self.message.call_sign = call_sign;
        self
    }

    pub fn altitude(mut self, altitude: Option<f32>) -> Self {
        self.message.altitude = altitude;
        self
    }

    pub fn ground_speed(mut self, ground_speed: Option<f32>) -> Self {
        self.message.ground_speed = ground_speed;
        self
    }

    pub fn track(mut self, track: Option<f32>) -> Self {
        self.message.track = track;
        self
    }

    pub fn position(mut self, position: Option<GeoPosition>) -> Self {
        self.message.position = position;
        self
    }

    pub fn vertical_rate(mut self, vertical_rate: Option<i16>) -> Self {
        self.message.vertical_rate = vertical_rate;
        self
    }

    pub fn squawk(mut self, squawk: Option<i16>) -> Self {
        self.message.squawk = squawk;
        self
    }

    pub fn alert(mut self, alert: Option<bool>) -> Self {
        self.message.alert = alert;
        self
    }

    pub fn emergency(mut self, emergency: Option<bool>) -> Self {
        self.message.emergency = emergency;
        self
    }

    pub fn ident_active(mut self, ident_active: Option<bool>) -> Self {
        self.message.ident_active = ident_active;
        self
    }

    pub fn on_ground(mut self, on_ground: Option<bool>) -> Self {
        self.message.on_ground = on_ground;
        self
    }

    pub fn build(self) -> TransmissionMessage {
        self.message
    }
}

pub struct StatusMessageBuilder {
    header: MessageHeader,
    status: StatusSubtype,
}

impl StatusMessageBuilder {
    pub fn new(
        icao_address: impl Into<String>,
        created: DateTime<Utc>,
        received: DateTime<Utc>,
        status: StatusSubtype,
    ) -> Self {
        StatusMessageBuilder {
            header: MessageHeader::new(icao_address, created, received),
            status,
        }
    }

    pub fn build(self) -> StatusMessage {
        StatusMessage {
            header: self.header,
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
