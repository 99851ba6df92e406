//! sbs-core: Pure decode library for BaseStation (SBS-1) feed lines.
//!
//! No async, no I/O — one line in, one typed message (or a skip) out. This
//! crate is the shared core used by `sbs-feeder` and by any feed-ingestion
//! loop that reads lines off a receiver socket.

pub mod classify;
pub mod coerce;
pub mod config;
pub mod decode;
pub mod entity;
pub mod timestamp;
pub mod types;

// Re-export commonly used types at crate root
pub use classify::{AllowList, MessageFilter};
pub use decode::{decode, decode_tokens, decode_with};
pub use entity::{
    BaseStationMessage, IdentificationMessage, NewAircraftMessage, StatusMessage,
    TransmissionMessage,
};
pub use timestamp::assemble_timestamp;
pub use types::*;
