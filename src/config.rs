use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::osc::{AddressMap, REQUIRED_JOINTS};
use crate::sanitize::DEFAULT_Z_FLOOR;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub osc: OscConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OscConfig {
    /// Destination host name or IP
    #[serde(default = "default_host")]
    pub host: String,
    /// Destination UDP port (1-65535)
    #[serde(default = "default_port")]
    pub port: u32,
    /// Joints to transmit. HandRight, HandLeft, AnkleRight and AnkleLeft are always sent.
    #[serde(default = "default_joints")]
    pub joints: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SanitizeConfig {
    /// Depth written in place of negative z values
    #[serde(default = "default_z_floor")]
    pub z_floor: f32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogConfig {
    /// Log every tracked body's joints as one alphabetical text record
    #[serde(default)]
    pub joint_records: bool,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u32 { 9875 }
fn default_joints() -> Vec<String> { REQUIRED_JOINTS.iter().map(|j| j.name().to_string()).collect() }
fn default_z_floor() -> f32 { DEFAULT_Z_FLOOR }

impl Default for OscConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            joints: default_joints(),
        }
    }
}

impl Default for SanitizeConfig {
    fn default() -> Self {
        Self {
            z_floor: default_z_floor(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Defaults when the file does not exist. A present but broken file is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.osc.host.trim().is_empty() {
            return Err(ConfigError::InvalidHost(self.osc.host.clone()));
        }
        self.port()?;
        self.address_map()?;
        if !self.sanitize.z_floor.is_finite() || self.sanitize.z_floor <= 0.0 {
            return Err(ConfigError::InvalidZFloor(self.sanitize.z_floor));
        }
        Ok(())
    }

    pub fn port(&self) -> Result<u16, ConfigError> {
        match u16::try_from(self.osc.port) {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(ConfigError::InvalidPort(self.osc.port)),
        }
    }

    pub fn address_map(&self) -> Result<AddressMap, ConfigError> {
        AddressMap::from_names(&self.osc.joints)
    }
}
