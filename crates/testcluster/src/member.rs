//! A single running cluster node.

use std::path::{Path, PathBuf};
use url::Url;

/// One member of a started cluster.
///
/// Identity is the pair (endpoint, path): two members reported with the same
/// protocol endpoint and install directory are the same member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterMember {
    /// Primary protocol address of the node, e.g. `bolt://localhost:7687`.
    endpoint: Url,

    /// Installation directory of the node.
    path: PathBuf,
}

impl ClusterMember {
    /// Creates a member from an already validated endpoint.
    pub fn new(endpoint: Url, path: impl Into<PathBuf>) -> Self {
        Self {
            endpoint,
            path: path.into(),
        }
    }

    /// Returns the protocol endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the installation directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `host:port` of the endpoint, if the endpoint names both.
    pub fn address(&self) -> Option<String> {
        let host = self.endpoint.host_str()?;
        let port = self.endpoint.port_or_known_default()?;
        Some(format!("{host}:{port}"))
    }
}
