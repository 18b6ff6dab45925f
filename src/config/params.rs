//! Custom parameters the user edits on the hub, and the notices raised for them.
use crate::nodes::uom::UnitSystem;
use serde::Serialize;
use std::collections::BTreeMap;

pub const API_KEY: &str = "APIKey";
pub const LOCATION: &str = "Location";
pub const UNITS: &str = "Units";
pub const FORECAST_DAYS: &str = "Forecast Days";
pub const ELEVATION: &str = "Elevation";
pub const PLANT_TYPE: &str = "Plant Type";

pub const MAX_FORECAST_DAYS: u8 = 7;
pub const FORECAST_NOTICE: &str = "forecast";

struct ParamDef {
    name: &'static str,
    default: &'static str,
    required: bool,
    notice: &'static str,
}

const PARAM_DEFS: [ParamDef; 6] = [
    ParamDef { name: API_KEY, default: "set me", required: true, notice: "DarkSky API key must be set" },
    ParamDef { name: LOCATION, default: "", required: true, notice: "DarkSky location must be set" },
    ParamDef { name: UNITS, default: "us", required: false, notice: "Units must be one of us, si, ca, uk2" },
    ParamDef { name: FORECAST_DAYS, default: "0", required: false, notice: "Forecast Days must be a number from 0 to 7" },
    ParamDef { name: ELEVATION, default: "0", required: false, notice: "Elevation must be a number (meters)" },
    ParamDef { name: PLANT_TYPE, default: "0.23", required: false, notice: "Plant Type must be a number" },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub key: String,
    pub text: String,
}

impl Notice {
    fn new(key: &str, text: &str) -> Self {
        Self { key: key.to_owned(), text: text.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub api_key: String,
    pub location: String,
    pub units: UnitSystem,
    pub forecast_days: u8,
    /// meters
    pub elevation: f64,
    pub plant_type: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            api_key: "set me".to_owned(),
            location: String::new(),
            units: UnitSystem::Us,
            forecast_days: 0,
            elevation: 0.,
            plant_type: 0.23,
        }
    }
}

/// Outcome of applying a parameter map.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParamUpdate {
    pub valid: bool,
    pub changed: bool,
    pub units_changed: bool,
    pub days_changed: bool,
    pub notices: Vec<Notice>,
}

impl Params {
    /// Applies `map` over the current values. Absent keys take their default.
    /// A map with any missing or unparsable value is not applied at all: the
    /// notices are returned and every `*_changed` flag stays false.
    pub fn update_from_map(&mut self, map: &BTreeMap<String, String>) -> ParamUpdate {
        let mut notices = Vec::new();
        let mut valid = true;
        let mut next = self.clone();

        for def in PARAM_DEFS.iter() {
            let raw = map.get(def.name).map(|v| v.trim()).unwrap_or(def.default);
            if def.required && (raw.is_empty() || raw == def.default) {
                notices.push(Notice::new(def.name, def.notice));
                valid = false;
                continue;
            }
            let parsed = match def.name {
                API_KEY => {
                    next.api_key = raw.to_owned();
                    true
                }
                LOCATION => {
                    next.location = raw.to_owned();
                    true
                }
                UNITS => raw.parse().map(|units| next.units = units).is_ok(),
                FORECAST_DAYS => match raw.parse::<u8>() {
                    Ok(days) if days > MAX_FORECAST_DAYS => {
                        notices.push(Notice::new(
                            FORECAST_NOTICE,
                            "Number of days of forecast data is limited to 7 days",
                        ));
                        next.forecast_days = MAX_FORECAST_DAYS;
                        true
                    }
                    Ok(days) => {
                        next.forecast_days = days;
                        true
                    }
                    Err(_) => false,
                },
                ELEVATION => raw.parse().map(|elevation| next.elevation = elevation).is_ok(),
                PLANT_TYPE => raw.parse().map(|plant| next.plant_type = plant).is_ok(),
                _ => true,
            };
            if !parsed {
                notices.push(Notice::new(def.name, def.notice));
                valid = false;
            }
        }

        if !valid {
            return ParamUpdate { valid, notices, ..Default::default() };
        }
        let update = ParamUpdate {
            valid,
            changed: next != *self,
            units_changed: next.units != self.units,
            days_changed: next.forecast_days != self.forecast_days,
            notices,
        };
        *self = next;
        update
    }

    /// Map form of the applied values, as persisted.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            (API_KEY.to_owned(), self.api_key.clone()),
            (LOCATION.to_owned(), self.location.clone()),
            (UNITS.to_owned(), self.units.to_string()),
            (FORECAST_DAYS.to_owned(), self.forecast_days.to_string()),
            (ELEVATION.to_owned(), self.elevation.to_string()),
            (PLANT_TYPE.to_owned(), self.plant_type.to_string()),
        ])
    }
}
