//! The installed cluster as a whole.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ClusterMember;

/// An installed cluster: where it lives, how to log in, and who its members
/// are once started.
///
/// The install path never changes. Starting a cluster produces a new handle
/// via [`ClusterHandle::with_members`] rather than mutating this one.
#[derive(Clone, PartialEq, Eq)]
pub struct ClusterHandle {
    path: PathBuf,
    password: String,
    members: HashSet<ClusterMember>,
}

impl ClusterHandle {
    /// Creates a handle for a freshly installed cluster with no members.
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            members: HashSet::new(),
        }
    }

    /// Returns a copy of this handle carrying `members`.
    pub fn with_members(&self, members: HashSet<ClusterMember>) -> Self {
        Self {
            path: self.path.clone(),
            password: self.password.clone(),
            members,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn members(&self) -> &HashSet<ClusterMember> {
        &self.members
    }

    /// Whether a start has reported members for this cluster.
    pub fn is_started(&self) -> bool {
        !self.members.is_empty()
    }
}

impl fmt::Debug for ClusterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterHandle")
            .field("path", &self.path)
            .field("password", &"<redacted>")
            .field("members", &self.members)
            .finish()
    }
}
