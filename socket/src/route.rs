use std::{fmt, str::FromStr};

use anyhow::{Result, bail};

/// The socket events the UI sends requests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    MapSetting,
    SpeedSetting,
    LaunchMode,
    CmdVel,
    Goal,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Self::MapSetting,
        Self::SpeedSetting,
        Self::LaunchMode,
        Self::CmdVel,
        Self::Goal,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::MapSetting => "/settings/map",
            Self::SpeedSetting => "/settings/speed",
            Self::LaunchMode => "/launch_mode",
            Self::CmdVel => "/cmd_vel",
            Self::Goal => "/goal",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(path: &str) -> Result<Self> {
        match Self::ALL.into_iter().find(|route| route.path() == path) {
            Some(route) => Ok(route),
            None => bail!("Unknown route {path}"),
        }
    }
}
