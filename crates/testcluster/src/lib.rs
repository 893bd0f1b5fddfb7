//! Lifecycle management for the shared multi-node test cluster.
//!
//! Integration tests run against one cluster per test run. This crate:
//! - Installs the cluster through an external control program
//! - Starts it and parses the reported member topology
//! - Stops or kills it at teardown
//!
//! The control program is reached through the [`ClusterControl`] trait, so
//! the state machine and the topology parser work against canned output in
//! tests. [`CommandControl`] is the process-backed implementation.
//!
//! ```no_run
//! use testcluster::{ClusterLifecycleManager, ConfigLoader};
//!
//! # async fn run() -> testcluster::Result<()> {
//! let config = ConfigLoader::new().load()?;
//! let mut manager = ClusterLifecycleManager::new(config.control());
//!
//! manager.install_from(&config).await?;
//! let cluster = manager.start().await?;
//! for member in cluster.members() {
//!     println!("{} at {}", member.endpoint(), member.path().display());
//! }
//! manager.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod control;
pub mod error;
pub mod handle;
pub mod loader;
pub mod manager;
pub mod member;
pub mod topology;

pub use config::ClusterConfig;
pub use control::{ClusterControl, CommandControl, Operation};
pub use error::{CommandError, Error, Result};
pub use handle::ClusterHandle;
pub use loader::ConfigLoader;
pub use manager::ClusterLifecycleManager;
pub use member::ClusterMember;
pub use topology::parse_start_report;
