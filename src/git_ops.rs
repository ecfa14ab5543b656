use std::{io, path::Path, process::Command};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

fn run_git<S: AsRef<std::ffi::OsStr>>(
    cwd: &Path,
    args: &[S],
) -> io::Result<std::process::Output> {
    Command::new("git")
        .arg("-C")
        .arg(cwd)
        .args(args)
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GCM_INTERACTIVE", "never")
        .env("GIT_PAGER", "cat")
        .env("PAGER", "cat")
        .output()
}

fn stdout_or_error(out: std::process::Output) -> Result<String, GitError> {
    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
        let msg = if stderr.is_empty() {
            format!("git exited with {}", out.status)
        } else {
            stderr
        };
        return Err(GitError::Command(msg));
    }
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
}

/// True when `cwd` is inside a work tree or git directory.
pub fn is_repository(cwd: &Path) -> bool {
    run_git(cwd, &["rev-parse", "--git-dir"])
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Runs `git log` with `args` appended verbatim, one process argument each.
pub fn run_log(cwd: &Path, args: &[String]) -> Result<String, GitError> {
    let mut full: Vec<&str> = Vec::with_capacity(args.len() + 1);
    full.push("log");
    full.extend(args.iter().map(String::as_str));
    let out = run_git(cwd, &full)?;
    stdout_or_error(out)
}

pub fn run_show(cwd: &Path, hash: &str) -> Result<String, GitError> {
    let out = run_git(cwd, &["show", hash, "--no-patch"])?;
    stdout_or_error(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_plain_directory_is_not_a_repository() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!is_repository(temp_dir.path()));
    }

    #[test]
    fn test_log_outside_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = run_log(temp_dir.path(), &["--oneline".to_string()]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_outside_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = run_show(temp_dir.path(), "a1b2c3d").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
