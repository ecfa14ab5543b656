//! Async `git log` / `git show` loading with cancellation support.
//!
//! Requests are sent from the event loop and run on the blocking pool so the
//! UI keeps accepting keys while git works. Every request carries an id; the
//! app drops results whose id is no longer the latest it issued.

use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::git_ops;

/// Request sent to the loader task.
pub enum GitRequest {
    Log {
        request_id: u64,
        args: Vec<String>,
        cancel: CancellationToken,
    },
    Show {
        request_id: u64,
        hash: String,
        cancel: CancellationToken,
    },
}

/// Result delivered back to the event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum GitResult {
    Log {
        request_id: u64,
        result: Result<String, String>,
    },
    Show {
        request_id: u64,
        hash: String,
        result: Result<String, String>,
    },
    /// Superseded before it finished.
    Cancelled,
}

/// Handle for requesting git output.
pub struct GitLoader {
    tx: mpsc::Sender<GitRequest>,
}

impl GitLoader {
    /// Create a loader rooted at `workdir` and its result receiver.
    ///
    /// Spawns the background task; must be called inside a tokio runtime.
    pub fn new(workdir: PathBuf) -> (Self, mpsc::Receiver<GitResult>) {
        let (request_tx, request_rx) = mpsc::channel::<GitRequest>(16);
        let (result_tx, result_rx) = mpsc::channel::<GitResult>(16);

        tokio::spawn(git_loader_task(workdir, request_rx, result_tx));

        (Self { tx: request_tx }, result_rx)
    }

    /// Request `git log <args>` (non-blocking send).
    pub fn request_log(&self, request_id: u64, args: Vec<String>) {
        let sent = self.tx.try_send(GitRequest::Log {
            request_id,
            args,
            cancel: CancellationToken::new(),
        });
        if let Err(e) = sent {
            warn!(request_id, error = %e, "log request not queued");
        }
    }

    /// Request `git show <hash> --no-patch` (non-blocking send).
    pub fn request_show(&self, request_id: u64, hash: String) {
        let sent = self.tx.try_send(GitRequest::Show {
            request_id,
            hash,
            cancel: CancellationToken::new(),
        });
        if let Err(e) = sent {
            warn!(request_id, error = %e, "show request not queued");
        }
    }
}

/// Background task that fans requests out to the blocking pool.
///
/// A new log request cancels the previous one; show requests likewise
/// supersede each other. Log and show loads run concurrently.
async fn git_loader_task(
    workdir: PathBuf,
    mut rx: mpsc::Receiver<GitRequest>,
    tx: mpsc::Sender<GitResult>,
) {
    let mut current_log: Option<CancellationToken> = None;
    let mut current_show: Option<CancellationToken> = None;

    while let Some(request) = rx.recv().await {
        let workdir = workdir.clone();
        let tx = tx.clone();
        match request {
            GitRequest::Log {
                request_id,
                args,
                cancel,
            } => {
                if let Some(token) = current_log.replace(cancel.clone()) {
                    token.cancel();
                }
                tokio::spawn(async move {
                    let result = run_cancellable(&cancel, move || {
                        git_ops::run_log(&workdir, &args)
                    })
                    .await;
                    let msg = match result {
                        Some(result) => GitResult::Log { request_id, result },
                        None => {
                            debug!(request_id, "log load cancelled");
                            GitResult::Cancelled
                        }
                    };
                    let _ = tx.send(msg).await;
                });
            }
            GitRequest::Show {
                request_id,
                hash,
                cancel,
            } => {
                if let Some(token) = current_show.replace(cancel.clone()) {
                    token.cancel();
                }
                tokio::spawn(async move {
                    let target = hash.clone();
                    let result = run_cancellable(&cancel, move || {
                        git_ops::run_show(&workdir, &target)
                    })
                    .await;
                    let msg = match result {
                        Some(result) => GitResult::Show {
                            request_id,
                            hash,
                            result,
                        },
                        None => GitResult::Cancelled,
                    };
                    let _ = tx.send(msg).await;
                });
            }
        }
    }
}

/// Runs a blocking git call, or returns `None` when cancelled before or
/// after the call.
async fn run_cancellable<F>(cancel: &CancellationToken, f: F) -> Option<Result<String, String>>
where
    F: FnOnce() -> Result<String, git_ops::GitError> + Send + 'static,
{
    if cancel.is_cancelled() {
        return None;
    }

    let result = tokio::task::spawn_blocking(f).await;

    if cancel.is_cancelled() {
        return None;
    }

    Some(match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("Task join error: {}", e)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_log_outside_repository_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let (loader, mut rx) = GitLoader::new(temp_dir.path().to_path_buf());

        loader.request_log(7, vec!["--oneline".to_string()]);

        match rx.recv().await {
            Some(GitResult::Log { request_id, result }) => {
                assert_eq!(request_id, 7);
                assert!(result.is_err());
            }
            other => panic!("Expected log result, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancelled_request_yields_cancelled() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = run_cancellable(&cancel, || Ok("unused".to_string())).await;
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_errors_become_messages() {
        let cancel = CancellationToken::new();
        let result = run_cancellable(&cancel, || {
            Err(git_ops::GitError::Command("bad revision 'nope'".to_string()))
        })
        .await;
        assert_eq!(result, Some(Err("bad revision 'nope'".to_string())));
    }
}
