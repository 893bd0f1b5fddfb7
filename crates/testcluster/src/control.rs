//! The external cluster control program.
//!
//! [`ClusterControl`] is the narrow capability the lifecycle manager drives.
//! [`CommandControl`] implements it by shelling out to `neoctrl-cluster` (or
//! any program with the same command line contract).

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::CommandError;

/// Default control program, looked up on `PATH`.
pub const DEFAULT_CONTROL_PROGRAM: &str = "neoctrl-cluster";

/// A lifecycle operation performed by the control program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Start,
    Stop,
    Kill,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Install => "install",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Kill => "kill",
        };
        f.write_str(name)
    }
}

/// Install, start, stop and kill a cluster living at a filesystem path.
///
/// Every call runs to completion before returning. Implementations must not
/// retry.
pub trait ClusterControl {
    /// Installs a cluster of `core_count` cores and `read_replica_count` read
    /// replicas of the given version into `path`.
    fn install_cluster(
        &self,
        version: &str,
        core_count: u32,
        read_replica_count: u32,
        password: &str,
        path: &Path,
    ) -> impl Future<Output = Result<(), CommandError>> + Send;

    /// Starts the cluster at `path` and returns the start report.
    fn start_cluster(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<String, CommandError>> + Send;

    /// Gracefully stops the cluster at `path`.
    fn stop_cluster(&self, path: &Path) -> impl Future<Output = Result<(), CommandError>> + Send;

    /// Forcefully terminates the cluster at `path`.
    fn kill_cluster(&self, path: &Path) -> impl Future<Output = Result<(), CommandError>> + Send;
}

/// [`ClusterControl`] backed by an external program.
///
/// The program is invoked as:
///
/// ```text
/// <program> [leading args] install --cores N --read-replicas M --password P <version> <path>
/// <program> [leading args] start <path>
/// <program> [leading args] stop <path>
/// <program> [leading args] stop --kill <path>
/// ```
#[derive(Debug, Clone)]
pub struct CommandControl {
    program: PathBuf,
    leading_args: Vec<OsString>,
}

impl CommandControl {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments placed before the operation name, e.g. a script path when
    /// the program is an interpreter.
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    async fn run(&self, args: Vec<OsString>) -> Result<String, CommandError> {
        let mut all_args = self.leading_args.clone();
        all_args.extend(args);

        let command = render_command(&self.program, &all_args);
        debug!(%command, "invoking cluster control program");

        let output = Command::new(&self.program)
            .args(&all_args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| CommandError::InvalidOutput { command })
    }
}

impl Default for CommandControl {
    fn default() -> Self {
        Self::new(DEFAULT_CONTROL_PROGRAM)
    }
}

impl ClusterControl for CommandControl {
    async fn install_cluster(
        &self,
        version: &str,
        core_count: u32,
        read_replica_count: u32,
        password: &str,
        path: &Path,
    ) -> Result<(), CommandError> {
        let args = vec![
            OsString::from("install"),
            OsString::from("--cores"),
            OsString::from(core_count.to_string()),
            OsString::from("--read-replicas"),
            OsString::from(read_replica_count.to_string()),
            OsString::from("--password"),
            OsString::from(password),
            OsString::from(version),
            path.as_os_str().to_owned(),
        ];
        self.run(args).await.map(drop)
    }

    async fn start_cluster(&self, path: &Path) -> Result<String, CommandError> {
        self.run(vec![OsString::from("start"), path.as_os_str().to_owned()])
            .await
    }

    async fn stop_cluster(&self, path: &Path) -> Result<(), CommandError> {
        self.run(vec![OsString::from("stop"), path.as_os_str().to_owned()])
            .await
            .map(drop)
    }

    async fn kill_cluster(&self, path: &Path) -> Result<(), CommandError> {
        self.run(vec![
            OsString::from("stop"),
            OsString::from("--kill"),
            path.as_os_str().to_owned(),
        ])
        .await
        .map(drop)
    }
}

/// Renders a command line for diagnostics with the password masked.
fn render_command(program: &Path, args: &[OsString]) -> String {
    let mut rendered = program.display().to_string();
    let mut mask_next = false;

    for arg in args {
        rendered.push(' ');
        if mask_next {
            rendered.push_str("***");
        } else {
            rendered.push_str(&arg.to_string_lossy());
        }
        mask_next = arg.as_os_str() == OsStr::new("--password");
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Install.to_string(), "install");
        assert_eq!(Operation::Start.to_string(), "start");
        assert_eq!(Operation::Stop.to_string(), "stop");
        assert_eq!(Operation::Kill.to_string(), "kill");
    }

    #[test]
    fn test_render_command_masks_password() {
        let args: Vec<OsString> = ["install", "--password", "hunter2", "4.0.0", "/tmp/c"]
            .into_iter()
            .map(OsString::from)
            .collect();

        let rendered = render_command(Path::new("neoctrl-cluster"), &args);

        assert_eq!(
            rendered,
            "neoctrl-cluster install --password *** 4.0.0 /tmp/c"
        );
    }

    #[test]
    fn test_default_program() {
        let control = CommandControl::default();
        assert_eq!(control.program(), Path::new(DEFAULT_CONTROL_PROGRAM));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let control = CommandControl::new("/nonexistent/neoctrl-cluster");

        let result = control.stop_cluster(Path::new("/tmp/cluster")).await;

        assert!(matches!(result, Err(CommandError::Spawn { .. })));
    }

    #[cfg(unix)]
    mod stub_program {
        use super::*;
        use std::fs;
        use tempfile::TempDir;

        /// Shell script standing in for the control program. It records its
        /// arguments and answers `start` with a two member report.
        const STUB: &str = r#"
log="$(dirname "$0")/calls.log"
echo "$@" >> "$log"
case "$1" in
    start)
        echo "http://localhost:7474 bolt://localhost:7687 $2/core-0"
        echo "http://localhost:7475 bolt://localhost:7688 $2/core-1"
        ;;
    fail)
        echo "  cluster exploded  " >&2
        exit 3
        ;;
esac
"#;

        fn stub_control(dir: &TempDir) -> CommandControl {
            let script = dir.path().join("neoctrl-cluster.sh");
            fs::write(&script, STUB).unwrap();
            CommandControl::new("sh").with_leading_args([script])
        }

        fn calls(dir: &TempDir) -> Vec<String> {
            fs::read_to_string(dir.path().join("calls.log"))
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }

        #[tokio::test]
        async fn test_install_arguments() {
            let dir = TempDir::new().unwrap();
            let control = stub_control(&dir);

            control
                .install_cluster("3.1.0", 3, 2, "secret", Path::new("/tmp/cluster"))
                .await
                .unwrap();

            assert_eq!(
                calls(&dir),
                vec!["install --cores 3 --read-replicas 2 --password secret 3.1.0 /tmp/cluster"]
            );
        }

        #[tokio::test]
        async fn test_start_returns_report() {
            let dir = TempDir::new().unwrap();
            let control = stub_control(&dir);

            let report = control
                .start_cluster(Path::new("/tmp/cluster"))
                .await
                .unwrap();

            let members = crate::parse_start_report(&report).unwrap();
            assert_eq!(members.len(), 2);
            assert_eq!(calls(&dir), vec!["start /tmp/cluster"]);
        }

        #[tokio::test]
        async fn test_stop_and_kill_arguments() {
            let dir = TempDir::new().unwrap();
            let control = stub_control(&dir);

            control.stop_cluster(Path::new("/tmp/cluster")).await.unwrap();
            control.kill_cluster(Path::new("/tmp/cluster")).await.unwrap();

            assert_eq!(
                calls(&dir),
                vec!["stop /tmp/cluster", "stop --kill /tmp/cluster"]
            );
        }

        #[tokio::test]
        async fn test_nonzero_exit_is_failure() {
            let dir = TempDir::new().unwrap();
            let script = dir.path().join("neoctrl-cluster.sh");
            fs::write(&script, STUB).unwrap();
            let control = CommandControl::new("sh")
                .with_leading_args([script.as_os_str(), OsStr::new("fail")]);

            let err = control
                .stop_cluster(Path::new("/tmp/cluster"))
                .await
                .unwrap_err();

            match err {
                CommandError::Failed { status, stderr, .. } => {
                    assert_eq!(status.code(), Some(3));
                    assert_eq!(stderr, "cluster exploded");
                }
                other => panic!("expected Failed, got {other:?}"),
            }
        }
    }
}
