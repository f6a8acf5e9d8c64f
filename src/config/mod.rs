use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

use crate::compos::{PollTimings, DEFAULT_JOB_ID};

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = Self::from_file(&default_config_path());

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                cfg.inner.insert(k, v);
            }
        }

        cfg
    }

    /// Defaults plus whatever `path` contains; no environment overlay.
    pub fn from_file(path: &Path) -> Self {
        let mut map = default_map();

        if let Ok(file) = fs::File::open(path) {
            let reader = BufReader::new(file);
            for line in reader.lines().map_while(Result::ok) {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((k, v)) = line.split_once('=') {
                    map.insert(k.trim().to_string(), v.trim().to_string());
                }
            }
        }

        Self {
            inner: map,
            config_path: path.to_path_buf(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).filter(|v| !v.is_empty()).cloned()
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.parse::<u32>().ok())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn adb_path(&self) -> String {
        self.get("ADB_PATH").unwrap_or_else(|| "adb".into())
    }

    pub fn job_id(&self) -> String {
        self.get("HARNESS_JOB_ID")
            .unwrap_or_else(|| DEFAULT_JOB_ID.to_string())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("HARNESS_COMMAND_TIMEOUT").unwrap_or(60))
    }

    pub fn poll_timings(&self) -> PollTimings {
        let mut t = PollTimings::default();
        if let Some(v) = self.get_u32("HARNESS_JOB_CREATION_MAX_SECONDS") {
            t.job_creation_max = v;
        }
        if let Some(v) = self.get_u32("HARNESS_VM_ODREFRESH_MAX_SECONDS") {
            t.vm_odrefresh_max = v;
        }
        if let Some(v) = self.get_u32("HARNESS_SECONDS_BEFORE_PROGRESS_CHECK") {
            t.seconds_before_progress_check = v;
        }
        t
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &["ADB_PATH", "ANDROID_SERIAL"];

    KEYS.contains(&k) || k.starts_with("HARNESS_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("compos_harness").join(".harnessrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    m.insert("ADB_PATH".into(), "adb".into());
    m.insert("HARNESS_JOB_ID".into(), DEFAULT_JOB_ID.into());
    m.insert("HARNESS_COMMAND_TIMEOUT".into(), "60".into());
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::from_file(&dir.path().join("missing"));
        assert_eq!(cfg.adb_path(), "adb");
        assert_eq!(cfg.job_id(), "5132251");
        assert_eq!(cfg.command_timeout(), Duration::from_secs(60));
        assert_eq!(cfg.poll_timings(), PollTimings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".harnessrc");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "# local device").unwrap();
        writeln!(f, "ADB_PATH = /opt/platform-tools/adb").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "HARNESS_JOB_CREATION_MAX_SECONDS=12").unwrap();
        writeln!(f, "HARNESS_VM_ODREFRESH_MAX_SECONDS=900").unwrap();
        writeln!(f, "HARNESS_SECONDS_BEFORE_PROGRESS_CHECK=not-a-number").unwrap();
        drop(f);

        let cfg = Config::from_file(&path);
        assert_eq!(cfg.adb_path(), "/opt/platform-tools/adb");
        let t = cfg.poll_timings();
        assert_eq!(t.job_creation_max, 12);
        assert_eq!(t.vm_odrefresh_max, 900);
        assert_eq!(t.seconds_before_progress_check, 30);
    }

    #[test]
    fn empty_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::from_file(&dir.path().join("missing"));
        cfg.set("ANDROID_SERIAL", "");
        assert_eq!(cfg.get("ANDROID_SERIAL"), None);
        cfg.set("ANDROID_SERIAL", "R58M1234");
        assert_eq!(cfg.get("ANDROID_SERIAL").as_deref(), Some("R58M1234"));
    }

    #[test]
    fn only_harness_keys_are_overlaid() {
        assert!(is_config_key("ADB_PATH"));
        assert!(is_config_key("HARNESS_JOB_ID"));
        assert!(!is_config_key("PATH"));
    }
}
