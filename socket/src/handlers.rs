use anyhow::{Context, Result};
use log::{error, info};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{MapUpdate, Response, SettingError, SettingRequest, SpeedUpdate};
use tr_hmi_bus::{GoalPublisher, GoalRequest, LaunchControl, SpeedLimits, VelocityPublisher};

pub fn map_setting(map: &Mutex<String>, request: Value) -> Response {
    match SettingRequest::<MapUpdate>::parse(request) {
        Ok(SettingRequest::Get) => {
            let map = map.lock().clone();
            Response::success_with(json!({ "map": map }))
        }
        Ok(SettingRequest::Set(update)) => {
            info!("Map: {}", update.map);
            *map.lock() = update.map;
            Response::success()
        }
        Err(e) => setting_error("/settings/map", e),
    }
}

pub fn speed_setting(velocity: &VelocityPublisher, request: Value) -> Response {
    match SettingRequest::<SpeedUpdate>::parse(request) {
        Ok(SettingRequest::Get) => Response::success_with(speed_limits_data(velocity.limits())),
        Ok(SettingRequest::Set(update)) => {
            let current = velocity.limits();
            let limits = SpeedLimits {
                max_vx: update.max_vx.unwrap_or(current.max_vx),
                max_vt: update.max_vt.unwrap_or(current.max_vt),
            };
            match velocity.set_limits(limits) {
                Ok(()) => Response::success(),
                Err(e) => {
                    error!("/settings/speed: Invalid request data: {e:#}");
                    Response::bad_request()
                }
            }
        }
        Err(e) => setting_error("/settings/speed", e),
    }
}

fn speed_limits_data(limits: SpeedLimits) -> Value {
    json!({ "maxVx": limits.max_vx, "maxVt": limits.max_vt })
}

fn setting_error(route: &str, error: SettingError) -> Response {
    match error {
        SettingError::BadRequest(e) => {
            error!("{route}: Invalid request data: {e:#}");
            Response::bad_request()
        }
        SettingError::BadMethod(method) => {
            error!("{route}: Unsupported method {method}");
            Response::bad_request_method()
        }
    }
}

#[derive(Debug, Deserialize)]
struct LaunchModeRequest {
    mode: String,
}

pub fn launch_mode(launch: &LaunchControl, request: Value) -> Response {
    let result = parse::<LaunchModeRequest>(request).and_then(|r| launch.toggle(&r.mode));
    respond("/launch_mode", result)
}

#[derive(Debug, Deserialize)]
struct VelocityRequest {
    vx: f64,
    vt: f64,
}

/// Velocity commands are fire and forget, the UI does not expect an answer.
pub fn cmd_vel(velocity: &VelocityPublisher, request: Value) {
    let result = parse::<VelocityRequest>(request).and_then(|r| velocity.publish(r.vx, r.vt));
    if let Err(e) = result {
        error!("/cmd_vel: Invalid request data: {e:#}");
    }
}

pub fn goal(goal: &GoalPublisher, request: Value) -> Response {
    let result = parse::<GoalRequest>(request).and_then(|r| goal.publish_angle(r));
    respond("/goal", result)
}

fn parse<T: for<'de> Deserialize<'de>>(request: Value) -> Result<T> {
    serde_json::from_value(request).context("Malformed request")
}

fn respond<T>(route: &str, result: Result<T>) -> Response {
    match result {
        Ok(_) => Response::success(),
        Err(e) => {
            error!("{route}: Invalid request data: {e:#}");
            Response::bad_request()
        }
    }
}
