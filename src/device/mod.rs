//! Device handle abstraction: shell execution, properties, file checks.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

pub mod adb;

pub use adb::AdbDevice;

/// Captured result of one shell command on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success() { "SUCCESS" } else { "FAILED" };
        write!(
            f,
            "CommandResult: exit_code={}, status={}, stdout={:?}, stderr={:?}",
            self.exit_code, status, self.stdout, self.stderr
        )
    }
}

/// A connected test target.
#[async_trait]
pub trait Device: Send + Sync {
    async fn execute_shell(&self, command: &str) -> Result<CommandResult>;

    /// Read a system property. Empty output is reported as `None`.
    async fn get_property(&self, name: &str) -> Result<Option<String>>;

    async fn does_file_exist(&self, path: &str) -> Result<bool>;

    /// Handles that can answer the virtualization probe return themselves here.
    fn as_vm_capable(&self) -> Option<&dyn VmCapable> {
        None
    }
}

/// Extended probe only some device handles support.
#[async_trait]
pub trait VmCapable: Send + Sync {
    async fn supports_microdroid(&self) -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_exit_code_and_streams() {
        let mut r = CommandResult::new(1, "boom\n");
        r.stderr = "bad".into();
        let text = r.to_string();
        assert!(text.contains("exit_code=1"), "{}", text);
        assert!(text.contains("FAILED"));
        assert!(text.contains("\"boom\\n\""));
        assert!(text.contains("\"bad\""));
    }

    #[test]
    fn zero_exit_is_success() {
        assert!(CommandResult::new(0, "").success());
        assert!(!CommandResult::new(255, "").success());
    }
}
