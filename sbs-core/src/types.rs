//! Shared types, error enum, and closed BaseStation enumerations for sbs-core.

use std::fmt;
use std::str::FromStr;

use geo_types::Point;
use serde::Serialize;
use thiserror::Error;

/// All errors produced by sbs-core.
#[derive(Debug, Error)]
pub enum SbsError {
    #[error("date ({date:?}) and time ({time:?}) must be provided")]
    MissingTimestamp { date: String, time: String },
    #[error("malformed timestamp {value:?}: {source}")]
    MalformedTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("{kind} message: expected {expected} tokens but found {actual}")]
    TooFewTokens {
        kind: MessageKind,
        expected: usize,
        actual: usize,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SbsError {
    /// True for structural corruption of the line: bad timestamps or a short
    /// token sequence. The caller is expected to drop the line.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SbsError::MissingTimestamp { .. }
                | SbsError::MalformedTimestamp { .. }
                | SbsError::TooFewTokens { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SbsError>;

// ---------------------------------------------------------------------------
// Message kinds
// ---------------------------------------------------------------------------

/// Message kind carried in token 0 of every BaseStation line.
///
/// See http://woodair.net/sbs/Article/Barebones42_Socket_Data.htm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    /// `SEL`: selection change event.
    SelectionChange,
    /// `ID`: new id event, the aircraft changed its call sign.
    Identification,
    /// `AIR`: new aircraft event.
    NewAircraft,
    /// `STA`: status change event.
    StatusChange,
    /// `CLK`: click event, the user clicked the data grid.
    Click,
    /// `MSG`: transmission message generated by the aircraft.
    Transmission,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        MessageKind::SelectionChange,
        MessageKind::Identification,
        MessageKind::NewAircraft,
        MessageKind::StatusChange,
        MessageKind::Click,
        MessageKind::Transmission,
    ];

    /// Tag as it appears on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            MessageKind::SelectionChange => "SEL",
            MessageKind::Identification => "ID",
            MessageKind::NewAircraft => "AIR",
            MessageKind::StatusChange => "STA",
            MessageKind::Click => "CLK",
            MessageKind::Transmission => "MSG",
        }
    }

    /// Minimum number of tokens a line of this kind must carry.
    pub fn min_tokens(&self) -> usize {
        match self {
            MessageKind::SelectionChange => 11,
            MessageKind::Identification => 11,
            MessageKind::NewAircraft => 10,
            MessageKind::StatusChange => 11,
            MessageKind::Click => 10,
            MessageKind::Transmission => 22,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a wire tag does not name a known enum member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown code: {0:?}")]
pub struct UnknownCode(pub String);

impl FromStr for MessageKind {
    type Err = UnknownCode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MessageKind::ALL
            .into_iter()
            .find(|k| k.code() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Status subtypes
// ---------------------------------------------------------------------------

/// Subtype of a `STA` (status change) message, token 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusSubtype {
    /// `PL`
    PositionLost,
    /// `SL`
    SignalLost,
    /// `RM`
    Remove,
    /// `AD`
    Delete,
    /// `OK`
    OkReset,
}

impl StatusSubtype {
    pub const ALL: [StatusSubtype; 5] = [
        StatusSubtype::PositionLost,
        StatusSubtype::SignalLost,
        StatusSubtype::Remove,
        StatusSubtype::Delete,
        StatusSubtype::OkReset,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            StatusSubtype::PositionLost => "PL",
            StatusSubtype::SignalLost => "SL",
            StatusSubtype::Remove => "RM",
            StatusSubtype::Delete => "AD",
            StatusSubtype::OkReset => "OK",
        }
    }
}

impl fmt::Display for StatusSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StatusSubtype {
    type Err = UnknownCode;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        StatusSubtype::ALL
            .into_iter()
            .find(|st| st.code() == s)
            .ok_or_else(|| UnknownCode(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Transmission subtypes
// ---------------------------------------------------------------------------

/// Transmission subtype of a `MSG` line (token 1). Decides which payload
/// tokens are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransmissionSubtype {
    /// 1: ES identification and category
    Identification,
    /// 2: ES surface position
    SurfacePosition,
    /// 3: ES airborne position
    AirbornePosition,
    /// 4: ES airborne velocity
    AirborneVelocity,
    /// 5: surveillance altitude
    SurveillanceAltitude,
    /// 6: surveillance identification (squawk)
    SurveillanceIdentification,
    /// 7: air-to-air
    AirToAir,
    /// 8: all-call reply
    AllCallReply,
}

impl TransmissionSubtype {
    pub fn code(&self) -> i16 {
        match self {
            TransmissionSubtype::Identification => 1,
            TransmissionSubtype::SurfacePosition => 2,
            TransmissionSubtype::AirbornePosition => 3,
            TransmissionSubtype::AirborneVelocity => 4,
            TransmissionSubtype::SurveillanceAltitude => 5,
            TransmissionSubtype::SurveillanceIdentification => 6,
            TransmissionSubtype::AirToAir => 7,
            TransmissionSubtype::AllCallReply => 8,
        }
    }
}

impl TryFrom<i16> for TransmissionSubtype {
    type Error = i16;

    fn try_from(value: i16) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(TransmissionSubtype::Identification),
            2 => Ok(TransmissionSubtype::SurfacePosition),
            3 => Ok(TransmissionSubtype::AirbornePosition),
            4 => Ok(TransmissionSubtype::AirborneVelocity),
            5 => Ok(TransmissionSubtype::SurveillanceAltitude),
            6 => Ok(TransmissionSubtype::SurveillanceIdentification),
            7 => Ok(TransmissionSubtype::AirToAir),
            8 => Ok(TransmissionSubtype::AllCallReply),
            other => Err(other),
        }
    }
}

impl fmt::Display for TransmissionSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Geographic positions
// ---------------------------------------------------------------------------

/// A geographic coordinate reference system, identified by its EPSG code.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CoordinateReferenceSystem {
    pub epsg: u32,
    pub name: &'static str,
}

/// WGS84 longitude/latitude (EPSG:4326). Every decoded position refers to it.
pub static WGS84: CoordinateReferenceSystem = CoordinateReferenceSystem {
    epsg: 4326,
    name: "WGS 84",
};

/// Longitude/latitude pair tagged with its coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPosition {
    point: Point<f64>,
    crs: &'static CoordinateReferenceSystem,
}

impl GeoPosition {
    /// Position in WGS84.
    pub fn wgs84(lon: f64, lat: f64) -> Self {
        GeoPosition {
            point: Point::new(lon, lat),
            crs: &WGS84,
        }
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn point(&self) -> Point<f64> {
        self.point
    }

    pub fn crs(&self) -> &'static CoordinateReferenceSystem {
        self.crs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_kind_codes() {
        for kind in MessageKind::ALL {
            assert_eq!(kind.code().parse::<MessageKind>(), Ok(kind));
        }
        assert_eq!(
            "XYZ".parse::<MessageKind>(),
            Err(UnknownCode("XYZ".into()))
        );
        // Tags are case sensitive on the wire
        assert!("msg".parse::<MessageKind>().is_err());
    }

    #[test]
    fn test_min_tokens() {
        assert_eq!(MessageKind::Transmission.min_tokens(), 22);
        assert_eq!(MessageKind::NewAircraft.min_tokens(), 10);
        assert_eq!(MessageKind::StatusChange.min_tokens(), 11);
    }

    #[test]
    fn test_status_subtype_codes() {
        assert_eq!("AD".parse::<StatusSubtype>(), Ok(StatusSubtype::Delete));
        assert_eq!("OK".parse::<StatusSubtype>(), Ok(StatusSubtype::OkReset));
        assert!("ZZ".parse::<StatusSubtype>().is_err());
        assert_eq!(StatusSubtype::PositionLost.to_string(), "PL");
    }

    #[test]
    fn test_transmission_subtype_range() {
        for code in 1..=8i16 {
            let subtype = TransmissionSubtype::try_from(code).unwrap();
            assert_eq!(subtype.code(), code);
        }
        assert_eq!(TransmissionSubtype::try_from(0), Err(0));
        assert_eq!(TransmissionSubtype::try_from(9), Err(9));
    }

    #[test]
    fn test_geo_position_wgs84() {
        let pos = GeoPosition::wgs84(-0.4614, 51.4775);
        assert_eq!(pos.lon(), -0.4614);
        assert_eq!(pos.lat(), 51.4775);
        assert_eq!(pos.crs().epsg, 4326);
        assert!(std::ptr::eq(pos.crs(), &WGS84));
    }

    #[test]
    fn test_invalid_input_classification() {
        let err = SbsError::TooFewTokens {
            kind: MessageKind::Transmission,
            expected: 22,
            actual: 10,
        };
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "MSG message: expected 22 tokens but found 10"
        );
        let io = SbsError::from(std::io::Error::other("disk full"));
        assert!(!io.is_invalid_input());
    }
}
