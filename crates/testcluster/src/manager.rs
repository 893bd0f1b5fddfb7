//! Lifecycle management of the shared test cluster.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::control::{ClusterControl, Operation};
use crate::{ClusterConfig, ClusterHandle, Error, Result, parse_start_report};

/// Owns the single test cluster of a test run.
///
/// The manager holds at most one [`ClusterHandle`]. It moves through
/// ABSENT → INSTALLED → STARTED → (STOPPED | KILLED) and refuses operations
/// that do not fit the current state: installing twice, or touching a
/// cluster that was never installed. Nothing is idempotent and nothing is
/// retried; ordering mistakes in the harness surface as errors.
///
/// All mutating operations take `&mut self`. A harness that needs to share
/// the manager between tasks wraps it in a mutex; the manager itself does
/// no locking.
pub struct ClusterLifecycleManager<C> {
    control: C,
    current: Option<ClusterHandle>,
}

impl<C: ClusterControl> ClusterLifecycleManager<C> {
    /// Creates a manager with no cluster installed.
    pub fn new(control: C) -> Self {
        Self {
            control,
            current: None,
        }
    }

    /// Returns true iff a cluster has been installed.
    pub fn exists(&self) -> bool {
        self.current.is_some()
    }

    /// Returns the current cluster.
    pub fn get(&self) -> Result<&ClusterHandle> {
        self.current.as_ref().ok_or(Error::NotFound)
    }

    /// Returns the control program this manager drives.
    pub fn control(&self) -> &C {
        &self.control
    }

    /// Installs the cluster.
    ///
    /// Fails with [`Error::AlreadyExists`] when a cluster is already held,
    /// leaving it untouched. A control program failure leaves the manager
    /// without a cluster.
    pub async fn install(
        &mut self,
        version: &str,
        core_count: u32,
        read_replica_count: u32,
        password: &str,
        path: &Path,
    ) -> Result<&ClusterHandle> {
        if let Some(existing) = &self.current {
            return Err(Error::AlreadyExists {
                path: existing.path().to_path_buf(),
            });
        }

        info!(
            version,
            core_count,
            read_replica_count,
            path = %path.display(),
            "installing cluster"
        );

        self.control
            .install_cluster(version, core_count, read_replica_count, password, path)
            .await
            .map_err(|source| {
                warn!(path = %path.display(), error = %source, "cluster installation failed");
                Error::Installation {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        Ok(self.current.insert(ClusterHandle::new(path, password)))
    }

    /// Installs the cluster described by `config`.
    pub async fn install_from(&mut self, config: &ClusterConfig) -> Result<&ClusterHandle> {
        self.install(
            &config.version,
            config.core_count,
            config.read_replica_count,
            &config.password,
            &config.path,
        )
        .await
    }

    /// Starts the cluster and records the members it reports.
    ///
    /// If the control program fails or its report does not parse, the
    /// previous handle stays in place so it can be inspected.
    pub async fn start(&mut self) -> Result<&ClusterHandle> {
        let current = self.current.as_ref().ok_or(Error::NotFound)?;
        let path = current.path().to_path_buf();

        info!(path = %path.display(), "starting cluster");

        let output = self
            .control
            .start_cluster(&path)
            .await
            .map_err(|source| control_error(Operation::Start, path.clone(), source))?;

        let members = parse_start_report(&output).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "unable to parse start report");
        })?;

        info!(path = %path.display(), members = members.len(), "cluster started");

        let started = current.with_members(members);
        Ok(self.current.insert(started))
    }

    /// Gracefully stops the cluster. Known members are kept.
    pub async fn stop(&mut self) -> Result<()> {
        let path = self.get()?.path().to_path_buf();

        info!(path = %path.display(), "stopping cluster");

        self.control
            .stop_cluster(&path)
            .await
            .map_err(|source| control_error(Operation::Stop, path, source))
    }

    /// Forcefully terminates the cluster. Known members are kept.
    pub async fn kill(&mut self) -> Result<()> {
        let path = self.get()?.path().to_path_buf();

        info!(path = %path.display(), "killing cluster");

        self.control
            .kill_cluster(&path)
            .await
            .map_err(|source| control_error(Operation::Kill, path, source))
    }
}

fn control_error(operation: Operation, path: PathBuf, source: crate::CommandError) -> Error {
    warn!(%operation, path = %path.display(), error = %source, "cluster control failed");
    Error::Control {
        operation,
        path,
        source,
    }
}
