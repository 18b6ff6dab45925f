use super::{
    convert::{
        fahrenheit_to_celsius, fraction_to_percent, icon_code, kph_to_meters_per_second, millimeters_to_inches,
        mph_to_meters_per_second, round_to,
    },
    et0::reference_et,
    model::{Conditions, DailySample},
};
use crate::{
    nodes::{
        drv,
        uom::{SpeedUnit, TemperatureUnit, UnitSystem},
    },
    utils::{day_of_year_from_ts, get_week_day_from_ts},
};

/// Location and configuration a forecast sample is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    pub latitude: f64,
    /// meters
    pub elevation: f64,
    pub plant_coefficient: f64,
    pub units: UnitSystem,
}

/// Display ready values for one forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastValues {
    /// 0 = Sunday
    pub day_of_week: u32,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity_pct: f64,
    pub pressure: f64,
    pub icon_code: u8,
    pub cloud_cover_pct: f64,
    pub wind_speed: f64,
    pub precip_chance_pct: f64,
    pub uv_index: f64,
    /// mm/day for metric display, inches/day for `us`
    pub et0: f64,
    pub precip_accumulation: f64,
    pub dew_point: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub ozone: Option<f64>,
    pub visibility: Option<f64>,
    pub moon_phase: Option<f64>,
}

pub fn to_celsius(value: f64, units: UnitSystem) -> f64 {
    match units.temperature() {
        TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
        TemperatureUnit::Celsius => value,
    }
}

pub fn to_meters_per_second(value: f64, units: UnitSystem) -> f64 {
    match units.wind_speed() {
        SpeedUnit::MilesPerHour => mph_to_meters_per_second(value),
        SpeedUnit::KilometersPerHour => kph_to_meters_per_second(value),
        SpeedUnit::MetersPerSecond => value,
    }
}

/// Reference evapotranspiration for the sample, always computed in mm/day.
pub fn sample_et0(sample: &DailySample, site: &Site) -> f64 {
    let t_max = to_celsius(sample.temperature_max, site.units);
    let t_min = to_celsius(sample.temperature_min, site.units);
    let wind = to_meters_per_second(sample.wind_speed, site.units);
    let humidity = sample.humidity * 100.;

    reference_et(
        t_max,
        t_min,
        None,
        wind,
        site.elevation,
        humidity,
        humidity,
        site.latitude,
        site.plant_coefficient,
        day_of_year_from_ts(sample.time),
    )
}

/// Rounds a metric et0 for the unit system it is displayed in.
pub fn display_et0(et0_mm: f64, units: UnitSystem) -> f64 {
    if units.is_metric_display() {
        round_to(et0_mm, 2)
    } else {
        round_to(millimeters_to_inches(et0_mm), 3)
    }
}

pub fn assemble_forecast(sample: &DailySample, site: &Site) -> ForecastValues {
    ForecastValues {
        day_of_week: get_week_day_from_ts(sample.time).num_days_from_sunday(),
        temperature_max: sample.temperature_max,
        temperature_min: sample.temperature_min,
        humidity_pct: fraction_to_percent(sample.humidity),
        pressure: sample.pressure,
        icon_code: icon_code(&sample.icon),
        cloud_cover_pct: fraction_to_percent(sample.cloud_cover),
        wind_speed: sample.wind_speed,
        precip_chance_pct: fraction_to_percent(sample.precip_probability),
        uv_index: sample.uv_index,
        et0: display_et0(sample_et0(sample, site), site.units),
        precip_accumulation: sample.precip_accumulation.unwrap_or(0.),
        dew_point: sample.dew_point,
        wind_gust: sample.wind_gust,
        wind_bearing: sample.wind_bearing,
        ozone: sample.ozone,
        visibility: sample.visibility,
        moon_phase: sample.moon_phase,
    }
}

impl ForecastValues {
    /// Values keyed by daily node driver; optional fields only when present.
    pub fn drivers(&self) -> Vec<(&'static str, f64)> {
        let mut drivers = vec![
            (drv::GV19, self.day_of_week as f64),
            (drv::GV0, self.temperature_max),
            (drv::GV1, self.temperature_min),
            (drv::CLIHUM, self.humidity_pct),
            (drv::BARPRES, self.pressure),
            (drv::GV13, self.icon_code as f64),
            (drv::GV14, self.cloud_cover_pct),
            (drv::GV4, self.wind_speed),
            (drv::GV7, self.precip_accumulation),
            (drv::GV18, self.precip_chance_pct),
            (drv::UV, self.uv_index),
            (drv::GV20, self.et0),
        ];
        let optional = [
            (drv::DEWPT, self.dew_point),
            (drv::GV5, self.wind_gust),
            (drv::WINDDIR, self.wind_bearing),
            (drv::GV10, self.ozone),
            (drv::DISTANC, self.visibility),
            (drv::GV9, self.moon_phase),
        ];
        drivers.extend(optional.into_iter().filter_map(|(id, value)| value.map(|v| (id, v))));
        drivers
    }
}

/// Display ready values for the current observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionsValues {
    pub icon_code: u8,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity_pct: f64,
    pub dew_point: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_cover_pct: f64,
    pub uv_index: f64,
    pub rain_rate: f64,
    pub precip_chance_pct: f64,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub visibility: Option<f64>,
    pub ozone: Option<f64>,
}

pub fn assemble_conditions(cond: &Conditions) -> ConditionsValues {
    ConditionsValues {
        icon_code: icon_code(&cond.icon),
        temperature: cond.temperature,
        apparent_temperature: cond.apparent_temperature,
        humidity_pct: fraction_to_percent(cond.humidity),
        dew_point: cond.dew_point,
        pressure: cond.pressure,
        wind_speed: cond.wind_speed,
        cloud_cover_pct: fraction_to_percent(cond.cloud_cover),
        uv_index: cond.uv_index,
        rain_rate: cond.precip_intensity,
        precip_chance_pct: fraction_to_percent(cond.precip_probability),
        wind_gust: cond.wind_gust,
        wind_bearing: cond.wind_bearing,
        visibility: cond.visibility,
        ozone: cond.ozone,
    }
}

impl ConditionsValues {
    pub fn drivers(&self) -> Vec<(&'static str, f64)> {
        let mut drivers = vec![
            (drv::GV13, self.icon_code as f64),
            (drv::CLITEMP, self.temperature),
            (drv::GV0, self.apparent_temperature),
            (drv::CLIHUM, self.humidity_pct),
            (drv::DEWPT, self.dew_point),
            (drv::BARPRES, self.pressure),
            (drv::GV4, self.wind_speed),
            (drv::GV14, self.cloud_cover_pct),
            (drv::UV, self.uv_index),
            (drv::RAINRT, self.rain_rate),
            (drv::GV18, self.precip_chance_pct),
        ];
        let optional = [
            (drv::GV5, self.wind_gust),
            (drv::WINDDIR, self.wind_bearing),
            (drv::DISTANC, self.visibility),
            (drv::GV10, self.ozone),
        ];
        drivers.extend(optional.into_iter().filter_map(|(id, value)| value.map(|v| (id, v))));
        drivers
    }
}
