//! Test cluster configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::control::{CommandControl, DEFAULT_CONTROL_PROGRAM};
use crate::{Error, Result};

/// Name of the project level configuration file.
pub const CONFIG_FILE: &str = "testcluster.toml";

/// Name of the gitignored local override file.
pub const LOCAL_CONFIG_FILE: &str = "testcluster.local.toml";

/// Parameters of the shared test cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Server version the control program installs.
    pub version: String,

    /// Number of core members.
    pub core_count: u32,

    /// Number of read replicas.
    pub read_replica_count: u32,

    /// Initial administrative password.
    pub password: String,

    /// Installation directory of the cluster.
    pub path: PathBuf,

    /// Control program executable.
    pub control_program: PathBuf,

    /// Arguments passed to the control program before the operation name.
    pub control_args: Vec<String>,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            version: "3.1.0".to_string(),
            core_count: 3,
            read_replica_count: 2,
            password: "test".to_string(),
            path: PathBuf::from("target").join("test-cluster"),
            control_program: PathBuf::from(DEFAULT_CONTROL_PROGRAM),
            control_args: Vec::new(),
        }
    }
}

impl ClusterConfig {
    /// Rejects configurations the control program cannot install.
    pub fn validate(&self) -> Result<()> {
        if self.version.trim().is_empty() {
            return Err(Error::InvalidConfig("version must not be empty".to_string()));
        }
        if self.core_count == 0 {
            return Err(Error::InvalidConfig(
                "core_count must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the control program described by this configuration.
    pub fn control(&self) -> CommandControl {
        CommandControl::new(&self.control_program).with_leading_args(&self.control_args)
    }

    /// Makes a relative install path relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        if self.path.is_relative() {
            self.path = base.join(&self.path);
        }
    }

    /// Writes this configuration to `dir/testcluster.toml`.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(config_path)
    }
}
