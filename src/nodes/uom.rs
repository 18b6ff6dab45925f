//! Unit systems and the ISY unit-of-measure codes each driver reports with.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Us,
    Si,
    Ca,
    Uk2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeedUnit {
    MilesPerHour,
    KilometersPerHour,
    MetersPerSecond,
}

impl UnitSystem {
    /// Value sent to the provider in the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Us => "us",
            UnitSystem::Si => "si",
            UnitSystem::Ca => "ca",
            UnitSystem::Uk2 => "uk2",
        }
    }

    pub fn temperature(&self) -> TemperatureUnit {
        match self {
            UnitSystem::Us => TemperatureUnit::Fahrenheit,
            _ => TemperatureUnit::Celsius,
        }
    }

    pub fn wind_speed(&self) -> SpeedUnit {
        match self {
            UnitSystem::Us | UnitSystem::Uk2 => SpeedUnit::MilesPerHour,
            UnitSystem::Ca => SpeedUnit::KilometersPerHour,
            UnitSystem::Si => SpeedUnit::MetersPerSecond,
        }
    }

    /// Precipitation and evapotranspiration are shown in millimeters.
    pub fn is_metric_display(&self) -> bool {
        !matches!(self, UnitSystem::Us)
    }
}

impl Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = &'static str;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(UnitSystem::Us),
            "si" | "metric" => Ok(UnitSystem::Si),
            "ca" => Ok(UnitSystem::Ca),
            "uk2" => Ok(UnitSystem::Uk2),
            _ => Err("Invalid unit system"),
        }
    }
}

/// What a driver measures; decides its UOM under each unit system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverKind {
    Status,
    Temperature,
    Percent,
    Pressure,
    Speed,
    Direction,
    Conditions,
    DayOfWeek,
    Distance,
    RainRate,
    Precipitation,
    Evapotranspiration,
    UvIndex,
    Index,
}

impl DriverKind {
    pub fn uom(&self, units: UnitSystem) -> u16 {
        use UnitSystem::*;
        match (self, units) {
            (DriverKind::Status, _) => 2,
            (DriverKind::Percent, _) => 22,
            (DriverKind::Conditions | DriverKind::DayOfWeek, _) => 25,
            (DriverKind::Direction, _) => 76,
            (DriverKind::UvIndex, _) => 71,
            (DriverKind::Index, _) => 56,

            (DriverKind::Temperature, Us) => 17,
            (DriverKind::Temperature, _) => 4,

            (DriverKind::Pressure, Us) => 117,
            (DriverKind::Pressure, _) => 118,

            (DriverKind::Speed, Us | Uk2) => 48,
            (DriverKind::Speed, Ca) => 32,
            (DriverKind::Speed, Si) => 49,

            (DriverKind::Distance, Us | Uk2) => 116,
            (DriverKind::Distance, _) => 83,

            (DriverKind::RainRate, Us) => 24,
            (DriverKind::RainRate, _) => 46,

            (DriverKind::Precipitation, Us) => 105,
            (DriverKind::Precipitation, _) => 82,

            (DriverKind::Evapotranspiration, Us) => 120,
            (DriverKind::Evapotranspiration, _) => 106,
        }
    }
}
