//! Configuration loader with multi-source merging.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{CONFIG_FILE, LOCAL_CONFIG_FILE};
use crate::{ClusterConfig, Result};

/// Loads a [`ClusterConfig`] from, lowest precedence first:
///
/// 1. Built-in defaults
/// 2. `testcluster.toml` in the project directory
/// 3. `testcluster.local.toml` in the project directory
/// 4. Environment variables (`TESTCLUSTER_CORE_COUNT`, `TESTCLUSTER_PATH`, ...)
///
/// Environment values are parsed as numbers or booleans where they look like
/// one. `TESTCLUSTER_CONTROL_ARGS` is split on spaces into `control_args`.
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a loader rooted at the current directory.
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "TESTCLUSTER".to_string(),
        }
    }

    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the environment variable prefix (default: "TESTCLUSTER").
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads and validates the configuration.
    pub fn load(self) -> Result<ClusterConfig> {
        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&ClusterConfig::default())?);

        for file in [CONFIG_FILE, LOCAL_CONFIG_FILE] {
            let path = self.project_dir.join(file);
            if path.exists() {
                debug!(path = %path.display(), "loading cluster configuration file");
                builder = builder.add_source(
                    config::File::from(path)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        // Field names contain underscores, so nesting uses a double one.
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("control_args"),
        );

        let mut cluster_config: ClusterConfig = builder.build()?.try_deserialize()?;
        cluster_config.resolve_paths(&self.project_dir);
        cluster_config.validate()?;

        Ok(cluster_config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
