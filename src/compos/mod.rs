//! CompOS compilation job control on a connected device.
//!
//! Once a test APEX is staged the system schedules a compilation job that
//! would normally wait for the device to be idle and charging. The helpers
//! here start that job right away and poll the job scheduler until it exits.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::{
    clock::Sleeper,
    device::{CommandResult, Device},
    error::{Error, Result},
};

mod job_state;

pub use job_state::JobState;

pub const APEXDATA_DIR: &str = "/data/misc/apexdata/com.android.compos";

pub const PENDING_ARTIFACTS_DIR: &str = "/data/misc/apexdata/com.android.art/compos-pending";

pub const COMPOS_APEX_DIR: &str = "/apex/com.android.compos/";

/// Job ID of the pending compilation with staged APEXes.
pub const DEFAULT_JOB_ID: &str = "5132251";

const CUTTLEFISH_PRODUCT_PREFIX: &str = "vsoc_";

/// Polling bounds. Iteration counts are multiplied by `poll_interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimings {
    /// Polls allowed for the job to appear after staging.
    pub job_creation_max: u32,
    /// Delay after `run` before the first progress check.
    pub seconds_before_progress_check: u32,
    /// Whole budget for a slow VM to boot and finish odrefresh (480s + VM padding).
    pub vm_odrefresh_max: u32,
    pub poll_interval: Duration,
}

impl Default for PollTimings {
    fn default() -> Self {
        Self {
            job_creation_max: 5,
            seconds_before_progress_check: 30,
            vm_odrefresh_max: 480 + 60,
            poll_interval: Duration::from_secs(1),
        }
    }
}

impl PollTimings {
    pub fn exit_polls(&self) -> u32 {
        self.vm_odrefresh_max
            .saturating_sub(self.seconds_before_progress_check)
    }
}

pub struct CompOs<D, S> {
    device: D,
    sleeper: S,
    job_id: String,
    timings: PollTimings,
}

impl<D: Device, S: Sleeper> CompOs<D, S> {
    pub fn new(device: D, sleeper: S) -> Self {
        Self {
            device,
            sleeper,
            job_id: DEFAULT_JOB_ID.to_string(),
            timings: PollTimings::default(),
        }
    }

    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = job_id.into();
        self
    }

    pub fn with_timings(mut self, timings: PollTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Start the compilation job right away and return once it completes.
    pub async fn run_compilation_job_early_and_wait(&self) -> Result<()> {
        self.wait_for_job_to_be_scheduled().await?;

        info!(job_id = %self.job_id, "starting compilation job");
        self.assert_command_succeeds(&format!("cmd jobscheduler run android {}", self.job_id))
            .await?;

        // It takes a while; don't spam the scheduler.
        self.sleeper
            .sleep(Duration::from_secs(
                self.timings.seconds_before_progress_check as u64,
            ))
            .await;

        self.wait_for_job_exit(self.timings.exit_polls()).await
    }

    /// sha256 of every file under `path`, sorted by file name.
    ///
    /// `cache-info.xml` and `compos.info*` are filtered out: the former is
    /// regenerated at boot and the latter is only produced by CompOS.
    pub async fn checksum_directory_content_partial(&self, path: &str) -> Result<String> {
        self.assert_command_succeeds(&format!(
            "cd {}; find -type f -exec sha256sum {{}} \\;\
             | grep -v cache-info.xml | grep -v compos.info\
             | sort -k2",
            path
        ))
        .await
    }

    pub async fn assume_comp_os_present(&self) -> Result<()> {
        let vm = self
            .device
            .as_vm_capable()
            .ok_or_else(|| skip("Need an actual TestDevice"))?;
        if !vm.supports_microdroid().await? {
            return Err(skip("Requires VM support"));
        }
        if !self.device.does_file_exist(COMPOS_APEX_DIR).await? {
            return Err(skip("CompOS APEX is not present"));
        }
        Ok(())
    }

    pub async fn assume_not_on_cuttlefish(&self) -> Result<()> {
        match self.device.get_property("ro.build.product").await? {
            Some(product) if !product.starts_with(CUTTLEFISH_PRODUCT_PREFIX) => Ok(()),
            Some(product) => Err(skip(&format!("running on cuttlefish ({})", product))),
            None => Err(skip("ro.build.product is not set")),
        }
    }

    pub async fn query_job_state(&self) -> Result<(CommandResult, JobState)> {
        let result = self
            .device
            .execute_shell(&format!(
                "cmd jobscheduler get-job-state android {}",
                self.job_id
            ))
            .await?;
        let state = JobState::parse(&result.stdout);
        debug!(exit_code = result.exit_code, %state, "job state");
        Ok((result, state))
    }

    async fn wait_for_job_to_be_scheduled(&self) -> Result<()> {
        for _ in 0..self.timings.job_creation_max {
            let (result, state) = self.query_job_state().await?;
            if !result.success() {
                return Err(unexpected_state(&result));
            }
            if state == JobState::Unknown {
                // Not scheduled yet.
                self.sleeper.sleep(self.timings.poll_interval).await;
                continue;
            }
            info!(%state, "job is scheduled");
            return Ok(());
        }
        Err(Error::Failure(
            "Timed out waiting for the job to be scheduled".into(),
        ))
    }

    async fn wait_for_job_exit(&self, polls: u32) -> Result<()> {
        for _ in 0..polls {
            let (result, state) = self.query_job_state().await?;
            if !result.success() {
                return Err(unexpected_state(&result));
            }
            match state {
                s if s.is_running() => self.sleeper.sleep(self.timings.poll_interval).await,
                JobState::Unknown => {
                    info!(job_id = %self.job_id, "compilation job completed");
                    return Ok(());
                }
                _ => return Err(unexpected_state(&result)),
            }
        }
        Err(Error::Failure(
            "Timed out waiting for the job to complete".into(),
        ))
    }

    async fn assert_command_succeeds(&self, command: &str) -> Result<String> {
        let result = self.device.execute_shell(command).await?;
        if !result.success() {
            return Err(Error::Failure(format!("command failed: {}", result)));
        }
        Ok(result.stdout.trim().to_string())
    }
}

fn unexpected_state(result: &CommandResult) -> Error {
    Error::Failure(format!("Failing due to unexpected job state: {}", result))
}

fn skip(reason: &str) -> Error {
    warn!(reason, "skipping");
    Error::Skipped(reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_exit_budget_leaves_room_for_progress_delay() {
        let t = PollTimings::default();
        assert_eq!(t.vm_odrefresh_max, 540);
        assert_eq!(t.exit_polls(), 510);
    }

    #[test]
    fn exit_budget_never_underflows() {
        let t = PollTimings {
            vm_odrefresh_max: 10,
            seconds_before_progress_check: 30,
            ..PollTimings::default()
        };
        assert_eq!(t.exit_polls(), 0);
    }
}
