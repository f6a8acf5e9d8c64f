#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use compos_harness::{
    clock::Sleeper,
    device::{CommandResult, Device, VmCapable},
    Result,
};

/// Device double that answers from a script and records every command.
#[derive(Default)]
pub struct ScriptedDevice {
    /// Replies to `get-job-state`, consumed in order; the last one repeats.
    job_states: Mutex<VecDeque<CommandResult>>,
    replies: HashMap<String, CommandResult>,
    properties: HashMap<String, String>,
    files: HashSet<String>,
    vm_support: Option<bool>,
    commands: Mutex<Vec<String>>,
}

impl ScriptedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn job_states(self, states: &[&str]) -> Self {
        let replies = states.iter().map(|s| CommandResult::new(0, *s)).collect();
        self.job_state_results(replies)
    }

    pub fn job_state_results(self, results: Vec<CommandResult>) -> Self {
        *self.job_states.lock().unwrap() = results.into_iter().collect();
        self
    }

    pub fn reply(mut self, command: &str, result: CommandResult) -> Self {
        self.replies.insert(command.to_string(), result);
        self
    }

    pub fn property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_string(), value.to_string());
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.files.insert(path.to_string());
        self
    }

    pub fn vm_support(mut self, supported: bool) -> Self {
        self.vm_support = Some(supported);
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.commands()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Device for ScriptedDevice {
    async fn execute_shell(&self, command: &str) -> Result<CommandResult> {
        self.commands.lock().unwrap().push(command.to_string());
        if command.starts_with("cmd jobscheduler get-job-state") {
            let mut states = self.job_states.lock().unwrap();
            let next = if states.len() > 1 {
                states.pop_front()
            } else {
                states.front().cloned()
            };
            return Ok(next.unwrap_or_else(|| CommandResult::new(0, "unknown\n")));
        }
        Ok(self
            .replies
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandResult::new(0, "")))
    }

    async fn get_property(&self, name: &str) -> Result<Option<String>> {
        Ok(self.properties.get(name).cloned())
    }

    async fn does_file_exist(&self, path: &str) -> Result<bool> {
        Ok(self.files.contains(path))
    }

    fn as_vm_capable(&self) -> Option<&dyn VmCapable> {
        if self.vm_support.is_some() {
            Some(self)
        } else {
            None
        }
    }
}

#[async_trait]
impl VmCapable for ScriptedDevice {
    async fn supports_microdroid(&self) -> Result<bool> {
        Ok(self.vm_support.unwrap_or(false))
    }
}

/// Sleeper that only adds up the requested time.
#[derive(Default)]
pub struct CountingSleeper {
    calls: AtomicU64,
    total_ms: AtomicU64,
}

impl CountingSleeper {
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> Duration {
        Duration::from_millis(self.total_ms.load(Ordering::SeqCst))
    }
}

#[async_trait]
impl Sleeper for CountingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}
