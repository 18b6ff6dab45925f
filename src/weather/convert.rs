use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum WeatherIcon {
    #[default]
    ClearDay = 0,
    ClearNight = 1,
    Rain = 2,
    Snow = 3,
    Sleet = 4,
    Wind = 5,
    Fog = 6,
    Cloudy = 7,
    PartlyCloudyDay = 8,
    PartlyCloudyNight = 9,
}

impl WeatherIcon {
    /// Unknown icon names fall back to `ClearDay`.
    pub fn classify(icon: &str) -> Self {
        match icon {
            "clear-day" => WeatherIcon::ClearDay,
            "clear-night" => WeatherIcon::ClearNight,
            "rain" => WeatherIcon::Rain,
            "snow" => WeatherIcon::Snow,
            "sleet" => WeatherIcon::Sleet,
            "wind" => WeatherIcon::Wind,
            "fog" => WeatherIcon::Fog,
            "cloudy" => WeatherIcon::Cloudy,
            "partly-cloudy-day" => WeatherIcon::PartlyCloudyDay,
            "partly-cloudy-night" => WeatherIcon::PartlyCloudyNight,
            _ => WeatherIcon::ClearDay,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        FromPrimitive::from_u8(code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            WeatherIcon::ClearDay => "clear-day",
            WeatherIcon::ClearNight => "clear-night",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Sleet => "sleet",
            WeatherIcon::Wind => "wind",
            WeatherIcon::Fog => "fog",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::PartlyCloudyDay => "partly-cloudy-day",
            WeatherIcon::PartlyCloudyNight => "partly-cloudy-night",
        }
    }
}

impl Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn icon_code(icon: &str) -> u8 {
    WeatherIcon::classify(icon).code()
}

pub fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.) * 5. / 9.
}

pub fn mph_to_meters_per_second(mph: f64) -> f64 {
    mph * 0.44704
}

pub fn kph_to_meters_per_second(kph: f64) -> f64 {
    kph / 3.6
}

pub fn millimeters_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

/// Rounds half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Provider percentages come as fractions in [0, 1].
pub fn fraction_to_percent(fraction: f64) -> f64 {
    round_to(fraction * 100., 0)
}
