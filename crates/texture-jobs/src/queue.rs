//! Concurrent compile queue with a join barrier.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

use texture_core::{Error, Note, Preferences, Result};

use crate::compiler::Compiler;

/// Configuration for the compile queue.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Maximum concurrent compiler invocations; 0 means one per available
    /// core.
    pub max_jobs: usize,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self { max_jobs: 0 }
    }
}

impl CompileConfig {
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            max_jobs: prefs.max_jobs,
        }
    }

    /// Effective concurrency bound.
    pub fn effective_jobs(&self) -> usize {
        if self.max_jobs > 0 {
            return self.max_jobs;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// One unit of work: a reconciled note record and the file it maps to.
///
/// The queue never goes back to the catalog; the caller hands it the
/// already-reconciled records and their paths.
#[derive(Debug, Clone)]
pub struct CompileTask {
    pub note_id: i64,
    pub title: String,
    pub path: PathBuf,
}

impl CompileTask {
    /// Build a task from a reconciled note record and its resolved path.
    pub fn for_note(note: &Note, path: PathBuf) -> Self {
        Self {
            note_id: note.id,
            title: note.title.clone(),
            path,
        }
    }
}

/// One failed task, with whatever the compiler left behind.
#[derive(Debug, Clone)]
pub struct CompileFailure {
    pub note_id: i64,
    pub title: String,
    pub reason: String,
    pub log: Option<PathBuf>,
}

/// Aggregate result of a compile batch.
#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    pub succeeded: Vec<i64>,
    pub failed: Vec<CompileFailure>,
}

impl CompileReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Compile every task, at most `config.effective_jobs()` at a time, and
/// wait for the whole batch before reporting.
///
/// Tasks are independent (disjoint files), so a failure never aborts the
/// rest of the batch; it lands in the report's failed partition instead.
pub async fn compile_notes(
    compiler: Arc<dyn Compiler>,
    tasks: Vec<CompileTask>,
    config: &CompileConfig,
) -> CompileReport {
    let start = Instant::now();
    let job_count = tasks.len();
    let semaphore = Arc::new(Semaphore::new(config.effective_jobs()));

    let mut running: JoinSet<(CompileTask, Result<crate::CompileOutcome>)> = JoinSet::new();
    for task in tasks {
        let compiler = Arc::clone(&compiler);
        let semaphore = Arc::clone(&semaphore);
        running.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return (task, Err(Error::Internal("compile queue closed".into()))),
            };
            let outcome = compiler.compile(&task.path).await;
            (task, outcome)
        });
    }

    let mut report = CompileReport::default();
    while let Some(joined) = running.join_next().await {
        match joined {
            Ok((task, Ok(outcome))) if outcome.success => report.succeeded.push(task.note_id),
            Ok((task, Ok(outcome))) => report.failed.push(CompileFailure {
                note_id: task.note_id,
                title: task.title,
                reason: "compiler exited with a non-zero status".to_string(),
                log: outcome.log,
            }),
            Ok((task, Err(e))) => report.failed.push(CompileFailure {
                note_id: task.note_id,
                title: task.title,
                reason: e.to_string(),
                log: None,
            }),
            Err(e) => error!(
                subsystem = "jobs",
                component = "compile_queue",
                error = ?e,
                "Compile task panicked"
            ),
        }
    }

    info!(
        subsystem = "jobs",
        component = "compile_queue",
        op = "compile_notes",
        job_count,
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Compile batch finished"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::compiler::CompileOutcome;

    /// Compiler double that fails for paths containing "bad" and records
    /// the peak number of concurrent invocations.
    struct FakeCompiler {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl FakeCompiler {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Compiler for FakeCompiler {
        async fn compile(&self, path: &Path) -> Result<CompileOutcome> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);

            let name = path.to_string_lossy();
            if name.contains("error") {
                Err(Error::Compile("toolchain missing".to_string()))
            } else {
                Ok(CompileOutcome {
                    success: !name.contains("bad"),
                    log: None,
                })
            }
        }
    }

    fn task(id: i64, name: &str) -> CompileTask {
        CompileTask {
            note_id: id,
            title: name.to_string(),
            path: PathBuf::from(format!("/notes/{}.tex", name)),
        }
    }

    #[tokio::test]
    async fn test_report_partitions_success_failure_and_errors() {
        let compiler = Arc::new(FakeCompiler::new());
        let tasks = vec![task(1, "good"), task(2, "bad"), task(3, "error"), task(4, "fine")];

        let report = compile_notes(compiler, tasks, &CompileConfig { max_jobs: 2 }).await;

        let mut succeeded = report.succeeded.clone();
        succeeded.sort_unstable();
        assert_eq!(succeeded, [1, 4]);

        assert_eq!(report.failed.len(), 2);
        let error_failure = report.failed.iter().find(|f| f.note_id == 3).unwrap();
        assert!(error_failure.reason.contains("toolchain missing"));
        let exit_failure = report.failed.iter().find(|f| f.note_id == 2).unwrap();
        assert!(exit_failure.reason.contains("non-zero"));
        assert!(!report.all_succeeded());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let compiler = Arc::new(FakeCompiler::new());
        let tasks = (0..16).map(|i| task(i, &format!("n{}", i))).collect();

        let report = compile_notes(
            Arc::clone(&compiler) as Arc<dyn Compiler>,
            tasks,
            &CompileConfig { max_jobs: 3 },
        )
        .await;

        assert_eq!(report.succeeded.len(), 16);
        assert!(compiler.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn test_empty_batch_reports_cleanly() {
        let compiler = Arc::new(FakeCompiler::new());
        let report = compile_notes(compiler, Vec::new(), &CompileConfig::default()).await;
        assert!(report.all_succeeded());
        assert!(report.succeeded.is_empty());
    }

    #[test]
    fn test_effective_jobs_fallback() {
        assert_eq!(CompileConfig { max_jobs: 4 }.effective_jobs(), 4);
        assert!(CompileConfig::default().effective_jobs() >= 1);
    }
}
