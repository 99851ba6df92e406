//! Per-aircraft summary folded from decoded messages.

use std::collections::HashMap;

use comfy_table::{Cell, Table};
use sbs_core::{BaseStationMessage, StatusSubtype};

/// Latest known state for one ICAO address.
#[derive(Debug, Default)]
pub struct AircraftSummary {
    pub icao: String,
    pub call_sign: Option<String>,
    pub squawk: Option<i16>,
    pub altitude: Option<f32>,
    pub ground_speed: Option<f32>,
    pub track: Option<f32>,
    pub vertical_rate: Option<i16>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub on_ground: Option<bool>,
    pub status: Option<StatusSubtype>,
    pub messages: u32,
}

impl AircraftSummary {
    fn new(icao: &str) -> Self {
        AircraftSummary {
            icao: icao.to_string(),
            ..Default::default()
        }
    }

    fn update(&mut self, msg: &BaseStationMessage) {
        self.messages += 1;
        match msg {
            BaseStationMessage::NewAircraft(_) => {}
            BaseStationMessage::Identification(m) => {
                if let Some(cs) = m.call_sign() {
                    self.call_sign = Some(cs.to_string());
                }
            }
            BaseStationMessage::Transmission(m) => {
                if let Some(cs) = m.call_sign() {
                    self.call_sign = Some(cs.to_string());
                }
                if let Some(pos) = m.position() {
                    self.lat = Some(pos.lat());
                    self.lon = Some(pos.lon());
                }
                // Absent fields keep the previous value
                self.squawk = m.squawk().or(self.squawk);
                self.altitude = m.altitude().or(self.altitude);
                self.ground_speed = m.ground_speed().or(self.ground_speed);
                self.track = m.track().or(self.track);
                self.vertical_rate = m.vertical_rate().or(self.vertical_rate);
                self.on_ground = m.on_ground().or(self.on_ground);
            }
            BaseStationMessage::Status(m) => {
                self.status = Some(m.status());
            }
        }
    }
}

/// Aircraft keyed by ICAO address.
#[derive(Debug, Default)]
pub struct Summary {
    pub aircraft: HashMap<String, AircraftSummary>,
}

impl Summary {
    pub fn update(&mut self, msg: &BaseStationMessage) {
        self.aircraft
            .entry(msg.icao_address().to_string())
            .or_insert_with(|| AircraftSummary::new(msg.icao_address()))
            .update(msg);
    }

    /// Render as a table, busiest aircraft first.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            "ICAO", "Callsign", "Squawk", "Alt (ft)", "Speed (kts)", "Track", "VRate", "Lat",
            "Lon", "Ground", "Status", "Msgs",
        ]);

        let mut sorted: Vec<_> = self.aircraft.values().collect();
        sorted.sort_by(|a, b| b.messages.cmp(&a.messages).then(a.icao.cmp(&b.icao)));

        for ac in sorted {
            table.add_row(vec![
                Cell::new(&ac.icao),
                Cell::new(ac.call_sign.as_deref().unwrap_or("-")),
                Cell::new(dash(ac.squawk.map(|s| format!("{s:04}")))),
                Cell::new(dash(ac.altitude.map(|a| format!("{a:.0}")))),
                Cell::new(dash(ac.ground_speed.map(|s| format!("{s:.0}")))),
                Cell::new(dash(ac.track.map(|t| format!("{t:.1}")))),
                Cell::new(dash(ac.vertical_rate.map(|v| format!("{v:+}")))),
                Cell::new(dash(ac.lat.map(|l| format!("{l:.4}")))),
                Cell::new(dash(ac.lon.map(|l| format!("{l:.4}")))),
                Cell::new(dash(ac.on_ground.map(|g| if g { "yes" } else { "no" }.to_string()))),
                Cell::new(dash(ac.status.map(|s| s.to_string()))),
                Cell::new(ac.messages),
            ]);
        }

        table
    }
}

fn dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const LINES: &[&str] = &[
        "MSG,1,111,11111,AA2BC2,111111,2016/03/11,13:07:16.663,2016/03/11,13:07:16.626,UAL814,,,,,,,,,,,0",
        "MSG,3,111,11111,AA2BC2,111111,2016/03/11,13:07:17.343,2016/03/11,13:07:17.288,,11025,,,37.17274,-122.03935,,,0,0,0,0",
        "MSG,4,111,11111,AA2BC2,111111,2016/03/11,13:07:18.777,2016/03/11,13:07:18.713,,,316,106,,,1536,,,,,0",
        "STA,,111,11111,AA2BC2,111111,2016/03/11,13:07:19.000,2016/03/11,13:07:19.000,SL",
        "AIR,,111,11111,4CA2D6,111111,2016/03/11,13:07:05.343,2016/03/11,13:07:05.288",
    ];

    fn summarize() -> Summary {
        let mut summary = Summary::default();
        for line in LINES {
            let msg = sbs_core::decode(line).unwrap().unwrap();
            summary.update(&msg);
        }
        summary
    }

    #[test]
    fn test_fold_keeps_latest_known_values() {
        let summary = summarize();
        assert_eq!(summary.aircraft.len(), 2);

        let ac = &summary.aircraft["AA2BC2"];
        assert_eq!(ac.messages, 4);
        assert_eq!(ac.call_sign.as_deref(), Some("UAL814"));
        // Velocity message carries no altitude; the position report's stays
        assert_eq!(ac.altitude, Some(11025.0));
        assert_eq!(ac.ground_speed, Some(316.0));
        assert_eq!(ac.vertical_rate, Some(1536));
        assert_eq!(ac.lat, Some(37.17274));
        assert_eq!(ac.status, Some(StatusSubtype::SignalLost));

        assert_eq!(summary.aircraft["4CA2D6"].messages, 1);
    }

    #[test]
    fn test_table_rows() {
        let rendered = summarize().table().to_string();
        assert!(rendered.contains("AA2BC2"));
        assert!(rendered.contains("UAL814"));
        assert!(rendered.contains("4CA2D6"));
    }
}
