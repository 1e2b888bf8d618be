//! Workspace-scoped code execution
//!
//! Runs model-authored code (or an existing workspace file) as a child
//! process pinned to the workspace directory. Every outcome, including
//! timeouts, rejected paths, and spawn failures, comes back as a
//! [`RunResult`]; nothing here returns an error to the caller.
//!
//! The containment check compares canonicalized paths, so `..` segments and
//! symlinks pointing outside the workspace are both rejected. It is a path
//! guard, not a sandbox: executed code can still do anything the current
//! user can.

use crate::config::constants::runner;
use crate::config::core::RunnerConfig;
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Symlink hops followed before a dangling chain is treated as an escape
const MAX_LINK_HOPS: usize = 40;

/// Why an execution produced no real process status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunFailure {
    /// Absolute path, `..` escape, or symlink leaving the workspace
    PathEscape,
    /// Target does not exist (or is not a regular file)
    NotFound,
    /// The child did not finish within the timeout
    Timeout,
    /// The interpreter could not be started, or the script could not be staged
    Spawn,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunFailure::PathEscape => "path escape",
            RunFailure::NotFound => "not found",
            RunFailure::Timeout => "timeout",
            RunFailure::Spawn => "spawn failure",
        };
        f.write_str(label)
    }
}

/// Outcome of a single code execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Set when the runner itself failed rather than the executed code
    pub failure: Option<RunFailure>,
}

impl RunResult {
    fn completed(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self {
            stdout,
            stderr,
            exit_code,
            failure: None,
        }
    }

    fn failed(kind: RunFailure, message: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: message.into(),
            exit_code: runner::FAILURE_EXIT_CODE,
            failure: Some(kind),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Removes the staged script when dropped, whichever way `run` exits
struct StagedScript {
    path: PathBuf,
}

impl Drop for StagedScript {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.path.display(), error = %e, "failed to remove staged script");
            }
        }
    }
}

/// Executes scripts inside one workspace directory
///
/// `run` reuses a single reserved script name, so calls against one runner
/// must be sequential.
#[derive(Debug, Clone)]
pub struct CodeRunner {
    workspace: PathBuf,
    interpreter: String,
    timeout: Duration,
}

impl CodeRunner {
    /// Create a runner with the default interpreter and timeout
    pub fn new(workspace: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(workspace, &RunnerConfig::default())
    }

    /// Create a runner, creating the workspace directory if it is absent
    pub fn with_config(workspace: impl AsRef<Path>, config: &RunnerConfig) -> Result<Self> {
        let workspace = workspace.as_ref();
        std::fs::create_dir_all(workspace)
            .with_context(|| format!("Failed to create workspace: {}", workspace.display()))?;
        let workspace = workspace
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace: {}", workspace.display()))?;

        Ok(Self {
            workspace,
            interpreter: config.interpreter.clone(),
            timeout: config.timeout(),
        })
    }

    /// Absolute, canonical workspace path
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Execute a code string via the reserved temp script
    pub async fn run(&self, code: &str, timeout: Option<Duration>) -> RunResult {
        let script = StagedScript {
            path: self.workspace.join(runner::EXEC_SCRIPT),
        };
        if let Err(e) = tokio::fs::write(&script.path, code).await {
            return RunResult::failed(
                RunFailure::Spawn,
                format!("Failed to stage script: {e}"),
            );
        }

        self.invoke(&script.path, timeout.unwrap_or(self.timeout))
            .await
    }

    /// Execute a file that already exists inside the workspace
    pub async fn run_file(&self, filename: &str, timeout: Option<Duration>) -> RunResult {
        let target = match self.resolve_in_workspace(filename) {
            Ok(target) => target,
            Err(result) => return result,
        };

        self.invoke(&target, timeout.unwrap_or(self.timeout)).await
    }

    /// Resolve `filename` against the workspace, rejecting anything outside it
    fn resolve_in_workspace(&self, filename: &str) -> Result<PathBuf, RunResult> {
        if Path::new(filename).is_absolute() {
            return Err(RunResult::failed(
                RunFailure::PathEscape,
                "Only relative filenames are allowed.",
            ));
        }

        let joined = self.workspace.join(filename);
        let escape = || {
            RunResult::failed(
                RunFailure::PathEscape,
                format!("Path escapes workspace: {filename}"),
            )
        };
        let not_found = || {
            RunResult::failed(
                RunFailure::NotFound,
                format!("File not found in workspace: {filename}"),
            )
        };

        match joined.canonicalize() {
            Ok(resolved) => {
                if !resolved.starts_with(&self.workspace) {
                    return Err(escape());
                }
                if !resolved.is_file() {
                    return Err(not_found());
                }
                Ok(resolved)
            }
            // Nothing to canonicalize; a lexical check still catches `..` escapes.
            Err(_) if self.missing_target_is_contained(&joined) => Err(not_found()),
            Err(_) => Err(escape()),
        }
    }

    /// Lexical containment for a target that does not resolve, following dangling symlinks
    fn missing_target_is_contained(&self, path: &Path) -> bool {
        let Some(mut current) = normalize_lexically(path) else {
            return false;
        };
        for _ in 0..MAX_LINK_HOPS {
            if !current.starts_with(&self.workspace) {
                return false;
            }
            let Ok(link) = std::fs::read_link(&current) else {
                return true;
            };
            let base = current.parent().map(Path::to_path_buf).unwrap_or_default();
            match normalize_lexically(&base.join(link)) {
                Some(next) => current = next,
                None => return false,
            }
        }
        false
    }

    async fn invoke(&self, script: &Path, timeout: Duration) -> RunResult {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(script)
            .current_dir(&self.workspace)
            .env(runner::WORKSPACE_ENV, &self.workspace)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!(
            interpreter = %self.interpreter,
            script = %script.display(),
            timeout = %humantime::format_duration(timeout),
            "executing script"
        );

        match tokio::time::timeout(timeout, cmd.output()).await {
            Err(_) => {
                warn!(script = %script.display(), "execution timed out");
                RunResult::failed(
                    RunFailure::Timeout,
                    format!("Timed out after {}.", humantime::format_duration(timeout)),
                )
            }
            Ok(Err(e)) => RunResult::failed(RunFailure::Spawn, e.to_string()),
            Ok(Ok(output)) => RunResult::completed(
                String::from_utf8_lossy(&output.stdout).to_string(),
                String::from_utf8_lossy(&output.stderr).to_string(),
                output.status.code().unwrap_or(runner::FAILURE_EXIT_CODE),
            ),
        }
    }
}

/// Resolve `.` and `..` without touching the filesystem; `None` if `..` climbs past the root
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sh_runner(temp: &TempDir) -> CodeRunner {
        let config = RunnerConfig {
            interpreter: "sh".to_string(),
            timeout_secs: 10,
        };
        CodeRunner::with_config(temp.path().join("ws"), &config).unwrap()
    }

    #[tokio::test]
    async fn run_captures_stdout_and_removes_script() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let result = runner.run("echo 4", None).await;
        assert!(result.success());
        assert_eq!(result.stdout.trim(), "4");
        assert!(result.failure.is_none());
        assert!(!runner.workspace().join(runner::EXEC_SCRIPT).exists());
    }

    #[tokio::test]
    async fn run_reports_nonzero_exit_and_stderr() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let result = runner.run("echo oops >&2\nexit 3", None).await;
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stderr.trim(), "oops");
        assert!(!result.success());
        assert!(result.failure.is_none());
    }

    #[tokio::test]
    async fn run_pins_cwd_and_exposes_workspace_env() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let result = runner
            .run("pwd\necho \"$AGENT_WORKSPACE\"", None)
            .await;
        let lines: Vec<&str> = result.stdout.lines().collect();
        let expected = runner.workspace().to_string_lossy().to_string();
        assert_eq!(lines, vec![expected.as_str(), expected.as_str()]);
    }

    #[tokio::test]
    async fn timeout_returns_failure_and_cleans_up() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let result = runner
            .run("sleep 5", Some(Duration::from_millis(200)))
            .await;
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.failure, Some(RunFailure::Timeout));
        assert_eq!(result.stderr, "Timed out after 200ms.");
        assert!(!runner.workspace().join(runner::EXEC_SCRIPT).exists());
    }

    #[tokio::test]
    async fn missing_interpreter_is_a_spawn_failure() {
        let temp = TempDir::new().unwrap();
        let config = RunnerConfig {
            interpreter: "definitely-not-an-interpreter-xyz".to_string(),
            timeout_secs: 5,
        };
        let runner = CodeRunner::with_config(temp.path(), &config).unwrap();

        let result = runner.run("print(1)", None).await;
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.failure, Some(RunFailure::Spawn));
        assert!(!result.stderr.is_empty());
    }

    #[tokio::test]
    async fn run_file_rejects_parent_and_absolute_paths() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);
        std::fs::write(temp.path().join("x"), "echo escaped").unwrap();

        let parent = runner.run_file("../x", None).await;
        assert_eq!(parent.failure, Some(RunFailure::PathEscape));
        assert_eq!(parent.exit_code, -1);
        assert!(parent.stdout.is_empty());

        let absolute = runner.run_file("/etc/x", None).await;
        assert_eq!(absolute.failure, Some(RunFailure::PathEscape));
        assert_eq!(absolute.stderr, "Only relative filenames are allowed.");
    }

    #[tokio::test]
    async fn run_file_rejects_escape_even_when_target_is_missing() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let result = runner.run_file("../../nope.py", None).await;
        assert_eq!(result.failure, Some(RunFailure::PathEscape));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn run_file_rejects_symlink_escape() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);
        let outside = temp.path().join("outside.sh");
        std::fs::write(&outside, "echo escaped").unwrap();
        std::os::unix::fs::symlink(&outside, runner.workspace().join("link.sh")).unwrap();

        let result = runner.run_file("link.sh", None).await;
        assert_eq!(result.failure, Some(RunFailure::PathEscape));
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn dangling_symlink_out_of_workspace_is_an_escape() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);
        let workspace = runner.workspace();
        std::os::unix::fs::symlink(temp.path().join("missing.sh"), workspace.join("out.sh"))
            .unwrap();
        std::os::unix::fs::symlink("../../gone.sh", workspace.join("rel.sh")).unwrap();
        std::os::unix::fs::symlink("inner.sh", workspace.join("in.sh")).unwrap();

        let absolute = runner.run_file("out.sh", None).await;
        assert_eq!(absolute.failure, Some(RunFailure::PathEscape));
        assert_eq!(absolute.stderr, "Path escapes workspace: out.sh");

        let relative = runner.run_file("rel.sh", None).await;
        assert_eq!(relative.failure, Some(RunFailure::PathEscape));

        let inside = runner.run_file("in.sh", None).await;
        assert_eq!(inside.failure, Some(RunFailure::NotFound));
    }

    #[tokio::test]
    async fn run_file_missing_and_existing() {
        let temp = TempDir::new().unwrap();
        let runner = sh_runner(&temp);

        let missing = runner.run_file("absent.sh", None).await;
        assert_eq!(missing.failure, Some(RunFailure::NotFound));
        assert_eq!(missing.stderr, "File not found in workspace: absent.sh");

        std::fs::create_dir_all(runner.workspace().join("scripts")).unwrap();
        std::fs::write(
            runner.workspace().join("scripts/hello.sh"),
            "echo hello from file",
        )
        .unwrap();
        let found = runner.run_file("scripts/./hello.sh", None).await;
        assert!(found.success());
        assert_eq!(found.stdout.trim(), "hello from file");
    }

    #[test]
    fn lexical_normalization_detects_climb_past_root() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c")),
            Some(PathBuf::from("/a/c"))
        );
        assert_eq!(normalize_lexically(Path::new("/..")), None);
    }
}
