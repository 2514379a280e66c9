//! Target configuration file
//!
//! The configuration lives at `$XDG_CONFIG_HOME/blktests/nvme_target_control.toml`
//! (or `$HOME/.config/...` when `XDG_CONFIG_HOME` is unset) and looks like:
//!
//! ```toml
//! [main]
//! skip_setup_cleanup = false
//! nvmetcli = "/usr/bin/nvmetcli"
//! remote = "http://nvmet.local:5000"
//!
//! [host]
//! blkdev_type = "device"
//! trtype = "tcp"
//! hostnqn = "nqn.2014-08.org.nvmexpress:uuid:0f01fb42-9f7f-4856-b0b3-51e60b8de349"
//! hostid = "0f01fb42-9f7f-4856-b0b3-51e60b8de349"
//! host_traddr = "192.168.154.187"
//!
//! [subsys_0]
//! traddr = "192.168.19.189"
//! trsvid = "4420"
//! subsysnqn = "blktests-subsystem-1"
//! subsys_uuid = "91fdba0d-f87b-4c25-b80f-db7be1418b9e"
//! blkdev = "/dev/nullb0"
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Directory under the config dir holding our file
pub const CONFIG_SUBDIR: &str = "blktests";

/// Configuration file name
pub const CONFIG_FILE: &str = "nvme_target_control.toml";

/// The parsed configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    pub main: MainSection,
    pub host: HostSection,
    pub subsys_0: SubsysSection,
}

/// `[main]`: how to reach the target
#[derive(Debug, Clone, Deserialize)]
pub struct MainSection {
    /// Run against a previously configured target
    pub skip_setup_cleanup: bool,
    /// Path to the nvmetcli executable
    pub nvmetcli: PathBuf,
    /// URL of the nvmetcli REST endpoint on the target
    pub remote: String,
    /// Report success even when nvmetcli exits non-zero
    #[serde(default)]
    pub ignore_tool_status: bool,
}

/// `[host]`: initiator identity and transport
#[derive(Debug, Clone, Deserialize)]
pub struct HostSection {
    pub blkdev_type: String,
    pub trtype: String,
    pub hostnqn: String,
    pub hostid: String,
    pub host_traddr: String,
}

/// `[subsys_0]`: the exported subsystem
#[derive(Debug, Clone, Deserialize)]
pub struct SubsysSection {
    pub traddr: String,
    pub trsvid: String,
    pub subsysnqn: String,
    pub subsys_uuid: String,
    pub blkdev: Option<String>,
}

/// A single value the harness can query with `config --show-*`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    BlkdevType,
    Trtype,
    Hostnqn,
    Hostid,
    HostTraddr,
    Traddr,
    Trsvid,
    Subsysnqn,
    SubsysUuid,
}

impl TargetConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(&config_path()?)
    }

    /// Block device backing the subsystem namespace
    ///
    /// Only `setup` needs it, so a missing entry is reported lazily.
    pub fn blkdev(&self) -> Result<&str, ConfigError> {
        self.subsys_0
            .blkdev
            .as_deref()
            .ok_or(ConfigError::MissingField("subsys_0.blkdev"))
    }

    /// Look up a single value
    pub fn value(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::BlkdevType => &self.host.blkdev_type,
            ConfigField::Trtype => &self.host.trtype,
            ConfigField::Hostnqn => &self.host.hostnqn,
            ConfigField::Hostid => &self.host.hostid,
            ConfigField::HostTraddr => &self.host.host_traddr,
            ConfigField::Traddr => &self.subsys_0.traddr,
            ConfigField::Trsvid => &self.subsys_0.trsvid,
            ConfigField::Subsysnqn => &self.subsys_0.subsysnqn,
            ConfigField::SubsysUuid => &self.subsys_0.subsys_uuid,
        }
    }
}

/// Resolve the user configuration directory
///
/// `XDG_CONFIG_HOME` wins when set and non-empty, otherwise `$HOME/.config`.
pub fn config_dir(
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    match xdg_config_home.filter(|dir| !dir.is_empty()) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => home
            .filter(|dir| !dir.is_empty())
            .map(|home| PathBuf::from(home).join(".config"))
            .ok_or(ConfigError::NoConfigDir),
    }
}

/// Default configuration file path, resolved from the process environment
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = config_dir(
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )?;
    Ok(dir.join(CONFIG_SUBDIR).join(CONFIG_FILE))
}
