use std::fmt;

/// State string reported by `cmd jobscheduler get-job-state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    /// Not scheduled yet, or already finished and cleared.
    Unknown,
    Ready,
    Active,
    Other(String),
}

impl JobState {
    pub fn parse(stdout: &str) -> Self {
        if stdout.starts_with("unknown") {
            JobState::Unknown
        } else if stdout.contains("active") {
            JobState::Active
        } else if stdout.contains("ready") {
            JobState::Ready
        } else {
            JobState::Other(stdout.trim().to_string())
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Ready | JobState::Active)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Unknown => f.write_str("unknown"),
            JobState::Ready => f.write_str("ready"),
            JobState::Active => f.write_str("active"),
            JobState::Other(s) => write!(f, "other({})", s),
        }
    }
}
