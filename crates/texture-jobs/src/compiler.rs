//! The external compiler boundary.
//!
//! The orchestrator only needs a narrow contract from the toolchain:
//! compile one document path, report success or failure, and point at the
//! log artifact when there is one. Any non-zero exit status is a failure.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use texture_core::{Error, Preferences, Result};

/// Result of one compiler invocation.
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Whether the compiler exited with status zero.
    pub success: bool,
    /// The log artifact next to the document, when the toolchain produced
    /// one. Present for failures too; that is where the reason lives.
    pub log: Option<PathBuf>,
}

/// Narrow contract over the external document-compilation toolchain.
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Compile the document at `path`.
    ///
    /// Returns `Err` only when the invocation itself could not run
    /// (missing executable, timeout); a compiler that ran and failed is a
    /// successful invocation with an unsuccessful [`CompileOutcome`].
    async fn compile(&self, path: &Path) -> Result<CompileOutcome>;
}

/// Drives a latexmk-style compiler as a subprocess.
///
/// Runs in the document's directory so the toolchain picks up the
/// subject-local latexmkrc, and is bounded by a per-invocation timeout so
/// a wedged TeX run cannot hang the whole batch.
pub struct LatexmkCompiler {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl LatexmkCompiler {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    /// Build the compiler from user preferences.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self::new(
            prefs.compiler_command.clone(),
            prefs.compiler_args.clone(),
            Duration::from_secs(prefs.compile_timeout_secs),
        )
    }
}

#[async_trait]
impl Compiler for LatexmkCompiler {
    async fn compile(&self, path: &Path) -> Result<CompileOutcome> {
        let workdir = path.parent().unwrap_or_else(|| Path::new("."));
        let target: &Path = path.file_name().map(Path::new).unwrap_or(path);

        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .arg(target)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        debug!(
            subsystem = "jobs",
            component = "compiler",
            op = "compile",
            path = %path.display(),
            command = %self.command,
            "Invoking compiler"
        );

        let status = timeout(self.timeout, command.status())
            .await
            .map_err(|_| {
                Error::Compile(format!(
                    "{} timed out after {}s on {}",
                    self.command,
                    self.timeout.as_secs(),
                    path.display()
                ))
            })?
            .map_err(|e| Error::Compile(format!("failed to run {}: {}", self.command, e)))?;

        let log_path = path.with_extension("log");
        let log = tokio::fs::metadata(&log_path)
            .await
            .is_ok()
            .then_some(log_path);

        Ok(CompileOutcome {
            success: status.success(),
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str, timeout_secs: u64) -> LatexmkCompiler {
        // the note path is appended as $0 after the script
        LatexmkCompiler::new(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            Duration::from_secs(timeout_secs),
        )
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("note.tex");
        std::fs::write(&doc, "x").unwrap();

        let outcome = shell("exit 0", 5).compile(&doc).await.unwrap();
        assert!(outcome.success);
        assert!(outcome.log.is_none());
    }

    #[tokio::test]
    async fn test_any_nonzero_exit_is_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("note.tex");
        std::fs::write(&doc, "x").unwrap();

        for script in ["exit 1", "exit 3", "exit 117"] {
            let outcome = shell(script, 5).compile(&doc).await.unwrap();
            assert!(!outcome.success);
        }
    }

    #[tokio::test]
    async fn test_log_artifact_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("note.tex");
        std::fs::write(&doc, "x").unwrap();

        // the "compiler" writes a log next to the document, like latexmk
        let outcome = shell("echo boom > note.log; exit 2", 5)
            .compile(&doc)
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.log, Some(tmp.path().join("note.log")));
    }

    #[tokio::test]
    async fn test_timeout_is_an_invocation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("note.tex");
        std::fs::write(&doc, "x").unwrap();

        let compiler = LatexmkCompiler::new(
            "sh",
            vec!["-c".to_string(), "sleep 5".to_string()],
            Duration::from_millis(50),
        );
        match compiler.compile(&doc).await {
            Err(Error::Compile(msg)) => assert!(msg.contains("timed out")),
            other => panic!("expected Compile timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_an_invocation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let doc = tmp.path().join("note.tex");
        std::fs::write(&doc, "x").unwrap();

        let compiler =
            LatexmkCompiler::new("definitely-not-a-compiler", vec![], Duration::from_secs(1));
        assert!(matches!(
            compiler.compile(&doc).await,
            Err(Error::Compile(_))
        ));
    }
}
