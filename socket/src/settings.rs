use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;

use tr_hmi_bus::SpeedLimits;

/// The settings the UI can read and change. They are kept in memory only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The map file the UI shows.
    pub map: String,
    pub max_vx: f64,
    pub max_vt: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map: "2105.yaml".into(),
            max_vx: 2.0,
            max_vt: 2.0,
        }
    }
}

impl Settings {
    pub fn speed_limits(&self) -> SpeedLimits {
        SpeedLimits {
            max_vx: self.max_vx,
            max_vt: self.max_vt,
        }
    }
}

/// A `get` / `set` request on a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingRequest<T> {
    Get,
    Set(T),
}

/// The request could not be interpreted.
#[derive(Debug)]
pub enum SettingError {
    /// Not an object, missing method, or invalid data.
    BadRequest(anyhow::Error),
    /// The method is neither `get` nor `set`.
    BadMethod(String),
}

#[derive(Debug, Deserialize)]
struct RawSettingRequest {
    #[serde(default)]
    method: Value,
    #[serde(default)]
    data: Option<Value>,
}

impl<T: for<'de> Deserialize<'de>> SettingRequest<T> {
    pub fn parse(request: Value) -> Result<Self, SettingError> {
        let raw: RawSettingRequest = serde_json::from_value(request)
            .context("Not a setting request")
            .map_err(SettingError::BadRequest)?;

        match raw.method {
            Value::String(method) if method == "get" => Ok(Self::Get),
            Value::String(method) if method == "set" => parse_data(raw.data)
                .map(Self::Set)
                .map_err(SettingError::BadRequest),
            Value::String(method) if method.is_empty() => Err(missing_method()),
            Value::String(method) => Err(SettingError::BadMethod(method)),
            // Values the UI treats as "no method".
            Value::Null | Value::Bool(false) => Err(missing_method()),
            Value::Number(n) if n.as_f64() == Some(0.0) => Err(missing_method()),
            other => Err(SettingError::BadMethod(other.to_string())),
        }
    }
}

fn missing_method() -> SettingError {
    SettingError::BadRequest(anyhow::anyhow!("Missing method"))
}

fn parse_data<T: for<'de> Deserialize<'de>>(data: Option<Value>) -> Result<T> {
    let Some(data) = data else {
        bail!("Missing data");
    };
    serde_json::from_value(data).context("Invalid data")
}

/// `data` of a map `set` request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MapUpdate {
    pub map: String,
}

/// `data` of a speed `set` request. Limits that are not specified stay as they are.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedUpdate {
    pub max_vx: Option<f64>,
    pub max_vt: Option<f64>,
}
