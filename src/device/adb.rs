//! `adb`-backed device handle.

use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::{process::Command, time::timeout};
use tracing::debug;

use super::{CommandResult, Device, VmCapable};
use crate::{
    config::Config,
    error::{Error, Result},
};

const VM_SUPPORTED_PROPS: &[&str] = &[
    "ro.boot.hypervisor.vm.supported",
    "ro.boot.hypervisor.protected_vm.supported",
];

#[derive(Debug, Clone)]
pub struct AdbDevice {
    adb: String,
    serial: Option<String>,
    command_timeout: Duration,
}

impl AdbDevice {
    pub fn new(adb: impl Into<String>, serial: Option<String>) -> Self {
        Self {
            adb: adb.into(),
            serial,
            command_timeout: Duration::from_secs(60),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let mut dev = Self::new(cfg.adb_path(), cfg.get("ANDROID_SERIAL"));
        dev.command_timeout = cfg.command_timeout();
        dev
    }

    fn shell_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(serial) = &self.serial {
            args.push("-s".to_string());
            args.push(serial.clone());
        }
        args.push("shell".to_string());
        args.push(command.to_string());
        args
    }
}

#[async_trait]
impl Device for AdbDevice {
    async fn execute_shell(&self, command: &str) -> Result<CommandResult> {
        debug!(command, serial = ?self.serial, "adb shell");
        let mut cmd = Command::new(&self.adb);
        cmd.args(self.shell_args(command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| Error::Transport(format!("failed to spawn {}: {}", self.adb, e)))?;
        let out = timeout(self.command_timeout, child.wait_with_output())
            .await
            .map_err(|_| Error::Transport(format!("command timed out: {}", command)))??;

        let result = CommandResult {
            exit_code: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        debug!(exit_code = result.exit_code, "adb shell finished");
        Ok(result)
    }

    async fn get_property(&self, name: &str) -> Result<Option<String>> {
        let result = self.execute_shell(&format!("getprop {}", name)).await?;
        let value = result.stdout.trim();
        if !result.success() || value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }

    async fn does_file_exist(&self, path: &str) -> Result<bool> {
        let result = self.execute_shell(&format!("ls \"{}\"", path)).await?;
        Ok(result.success())
    }

    fn as_vm_capable(&self) -> Option<&dyn VmCapable> {
        Some(self)
    }
}

#[async_trait]
impl VmCapable for AdbDevice {
    async fn supports_microdroid(&self) -> Result<bool> {
        for prop in VM_SUPPORTED_PROPS {
            if let Some(v) = self.get_property(prop).await? {
                if v == "1" || v.eq_ignore_ascii_case("true") {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
