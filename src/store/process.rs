//! Store adapter that shells out to the command-memory executable.
//!
//! Contract: `<executable> --save <content> <description>`, exit code 0
//! means the entry was stored.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{Ack, Store, StoreError};
use crate::error::{DatasetError, Result};

/// Program name looked up on PATH when no explicit path is configured
pub const DEFAULT_PROGRAM: &str = "scmd";

/// Flag selecting the store's save command
pub const DEFAULT_SAVE_FLAG: &str = "--save";

/// Resolve the store executable against the process PATH.
///
/// An explicit path wins if it points at a file; otherwise `program` is
/// searched on PATH. Neither resolving is a fatal setup error.
pub fn resolve_executable(explicit: Option<&Path>, program: &str) -> Result<PathBuf> {
    resolve_executable_in(explicit, program, env::var_os("PATH").as_deref())
}

/// [`resolve_executable`] with the PATH value supplied by the caller
pub fn resolve_executable_in(explicit: Option<&Path>, program: &str, paths: Option<&OsStr>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        log::warn!("Executable not found at {}, searching PATH for '{}'", path.display(), program);
    }

    paths
        .and_then(|paths| search_path(program, paths))
        .ok_or_else(|| DatasetError::ExecutableNotFound {
            program: program.to_string(),
            explicit: explicit.map_or_else(|| "none".to_string(), |p| p.display().to_string()),
        })
}

/// Find `program` in a PATH-style list of directories
pub fn search_path(program: &str, paths: &OsStr) -> Option<PathBuf> {
    env::split_paths(paths)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// [`Store`] backed by one process invocation per save
#[derive(Debug, Clone)]
pub struct CommandStore {
    executable: PathBuf,
    save_flag: String,
}

impl CommandStore {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            save_flag: DEFAULT_SAVE_FLAG.to_string(),
        }
    }

    pub fn with_save_flag(mut self, flag: impl Into<String>) -> Self {
        self.save_flag = flag.into();
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Store for CommandStore {
    fn save(&mut self, content: &str, description: &str) -> std::result::Result<Ack, StoreError> {
        let output = Command::new(&self.executable)
            .arg(&self.save_flag)
            .arg(content)
            .arg(description)
            .stdin(Stdio::null())
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if output.status.success() {
            Ok(Ack { message: stdout })
        } else {
            Err(StoreError::Rejected {
                code: output.status.code(),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
