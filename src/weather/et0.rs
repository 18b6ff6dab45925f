//! FAO-56 Penman-Monteith reference evapotranspiration.
//!
//! All inputs are metric (°C, m/s, meters, degrees). Solar radiation is not
//! measured, so it is estimated from the temperature range and the
//! extraterrestrial radiation (Hargreaves).
use std::f64::consts::PI;

/// Solar constant, MJ m-2 min-1
const GSC: f64 = 0.0820;
/// Stefan-Boltzmann constant, MJ K-4 m-2 day-1
const SIGMA: f64 = 4.903e-9;
/// Hargreaves radiation adjustment coefficient for interior locations
const KRS: f64 = 0.16;

/// Saturation vapour pressure (kPa) at temperature `t` (°C).
pub fn saturation_vapor_pressure(t: f64) -> f64 {
    0.6108 * ((17.27 * t) / (t + 237.3)).exp()
}

/// Atmospheric pressure (kPa) at elevation `z` (m).
pub fn atmospheric_pressure(z: f64) -> f64 {
    101.3 * ((293. - 0.0065 * z) / 293.).powf(5.26)
}

pub fn psychrometric_constant(z: f64) -> f64 {
    0.000665 * atmospheric_pressure(z)
}

/// Extraterrestrial radiation (MJ m-2 day-1) for a latitude and day of year.
pub fn extraterrestrial_radiation(latitude_deg: f64, day_of_year: u32) -> f64 {
    let j = day_of_year as f64;
    let phi = latitude_deg.to_radians();
    let dr = 1. + 0.033 * (2. * PI * j / 365.).cos();
    let declination = 0.409 * (2. * PI * j / 365. - 1.39).sin();
    // clamped so polar day/night stay finite
    let ws = (-phi.tan() * declination.tan()).clamp(-1., 1.).acos();

    24. * 60. / PI
        * GSC
        * dr
        * (ws * phi.sin() * declination.sin() + phi.cos() * declination.cos() * ws.sin())
}

/// Reference evapotranspiration in mm/day.
///
/// `crop_coefficient` is the surface albedo of the reference crop (0.23 for
/// grass). `_t_mean` is accepted for signature compatibility; the mean is
/// always derived from `t_max` and `t_min`.
#[allow(clippy::too_many_arguments)]
pub fn reference_et(
    t_max: f64, t_min: f64, _t_mean: Option<f64>, wind_speed_ms: f64, elevation_m: f64, humidity_max_pct: f64,
    humidity_min_pct: f64, latitude_deg: f64, crop_coefficient: f64, day_of_year: u32,
) -> f64 {
    let t_mean = (t_max + t_min) / 2.;
    let gamma = psychrometric_constant(elevation_m);

    let es = (saturation_vapor_pressure(t_max) + saturation_vapor_pressure(t_min)) / 2.;
    let ea = (saturation_vapor_pressure(t_min) * humidity_max_pct / 100.
        + saturation_vapor_pressure(t_max) * humidity_min_pct / 100.)
        / 2.;
    let delta = 4098. * saturation_vapor_pressure(t_mean) / (t_mean + 237.3).powi(2);

    let ra = extraterrestrial_radiation(latitude_deg, day_of_year);
    let rso = (0.75 + 2e-5 * elevation_m) * ra;
    let rs = KRS * (t_max - t_min).max(0.).sqrt() * ra;
    let rns = (1. - crop_coefficient) * rs;

    let t_max_k4 = (t_max + 273.16).powi(4);
    let t_min_k4 = (t_min + 273.16).powi(4);
    let relative_rs = if rso > 0. { (rs / rso).min(1.) } else { 0. };
    let rnl = SIGMA * ((t_max_k4 + t_min_k4) / 2.) * (0.34 - 0.14 * ea.sqrt()) * (1.35 * relative_rs - 0.35);
    let rn = rns - rnl;

    let numerator = 0.408 * delta * rn + gamma * (900. / (t_mean + 273.)) * wind_speed_ms * (es - ea);
    let denominator = delta + gamma * (1. + 0.34 * wind_speed_ms);
    numerator / denominator
}
