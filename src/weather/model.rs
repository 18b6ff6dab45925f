use crate::error::AppError;
use serde::Deserialize;

/// Top level provider response. Sections stay loosely typed so a single bad
/// sample does not discard the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    pub error: Option<String>,
    pub currently: Option<RawConditions>,
    pub daily: Option<RawDaily>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDaily {
    #[serde(default)]
    pub data: Vec<RawDailySample>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDailySample {
    pub time: Option<i64>,
    pub icon: Option<String>,
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
    pub precip_probability: Option<f64>,
    pub dew_point: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub precip_accumulation: Option<f64>,
    pub ozone: Option<f64>,
    pub visibility: Option<f64>,
    pub moon_phase: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConditions {
    pub icon: Option<String>,
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub dew_point: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub uv_index: Option<f64>,
    pub precip_intensity: Option<f64>,
    pub precip_probability: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub visibility: Option<f64>,
    pub ozone: Option<f64>,
}

/// One day of forecast data.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySample {
    pub time: i64,
    pub icon: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    /// fraction, 0..1
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    /// fraction, 0..1
    pub cloud_cover: f64,
    pub uv_index: f64,
    /// fraction, 0..1
    pub precip_probability: f64,
    pub dew_point: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub precip_accumulation: Option<f64>,
    pub ozone: Option<f64>,
    pub visibility: Option<f64>,
    pub moon_phase: Option<f64>,
}

/// Current observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub icon: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub humidity: f64,
    pub dew_point: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub cloud_cover: f64,
    pub uv_index: f64,
    pub precip_intensity: f64,
    pub precip_probability: f64,
    pub wind_gust: Option<f64>,
    pub wind_bearing: Option<f64>,
    pub visibility: Option<f64>,
    pub ozone: Option<f64>,
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, AppError> {
    value.ok_or(AppError::MissingField(field))
}

impl TryFrom<RawDailySample> for DailySample {
    type Error = AppError;

    fn try_from(raw: RawDailySample) -> Result<Self, Self::Error> {
        Ok(Self {
            time: require(raw.time, "time")?,
            icon: require(raw.icon, "icon")?,
            temperature_max: require(raw.temperature_max, "temperatureMax")?,
            temperature_min: require(raw.temperature_min, "temperatureMin")?,
            humidity: require(raw.humidity, "humidity")?,
            pressure: require(raw.pressure, "pressure")?,
            wind_speed: require(raw.wind_speed, "windSpeed")?,
            cloud_cover: require(raw.cloud_cover, "cloudCover")?,
            uv_index: require(raw.uv_index, "uvIndex")?,
            precip_probability: require(raw.precip_probability, "precipProbability")?,
            dew_point: raw.dew_point,
            wind_gust: raw.wind_gust,
            wind_bearing: raw.wind_bearing,
            precip_accumulation: raw.precip_accumulation,
            ozone: raw.ozone,
            visibility: raw.visibility,
            moon_phase: raw.moon_phase,
        })
    }
}

impl TryFrom<RawConditions> for Conditions {
    type Error = AppError;

    fn try_from(raw: RawConditions) -> Result<Self, Self::Error> {
        Ok(Self {
            icon: require(raw.icon, "icon")?,
            temperature: require(raw.temperature, "temperature")?,
            apparent_temperature: require(raw.apparent_temperature, "apparentTemperature")?,
            humidity: require(raw.humidity, "humidity")?,
            dew_point: require(raw.dew_point, "dewPoint")?,
            pressure: require(raw.pressure, "pressure")?,
            wind_speed: require(raw.wind_speed, "windSpeed")?,
            cloud_cover: require(raw.cloud_cover, "cloudCover")?,
            uv_index: require(raw.uv_index, "uvIndex")?,
            precip_intensity: require(raw.precip_intensity, "precipIntensity")?,
            precip_probability: require(raw.precip_probability, "precipProbability")?,
            wind_gust: raw.wind_gust,
            wind_bearing: raw.wind_bearing,
            visibility: raw.visibility,
            ozone: raw.ozone,
        })
    }
}

impl ForecastResponse {
    pub fn from_json(body: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decoded sample for `day`, `None` when the provider sent fewer days.
    pub fn day(&self, day: usize) -> Option<Result<DailySample, AppError>> {
        self.daily.as_ref()?.data.get(day).cloned().map(DailySample::try_from)
    }

    pub fn days(&self) -> usize {
        self.daily.as_ref().map_or(0, |daily| daily.data.len())
    }

    pub fn conditions(&self) -> Option<Result<Conditions, AppError>> {
        self.currently.clone().map(Conditions::try_from)
    }
}
