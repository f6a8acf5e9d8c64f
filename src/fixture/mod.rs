//! Class redefinition fixture: embedded payloads and the scenario driver.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;

mod payload;

/// Class the payloads redefine.
pub const TARGET_CLASS: &str = "Transform";

/// Argument passed to `sayHi` before and after the swap.
pub const SCENARIO_NAME: &str = "DifferentAccess";

const CLASS_MAGIC: [u8; 4] = [0xca, 0xfe, 0xba, 0xbe];
const DEX_MAGIC: &[u8; 8] = b"dex\n035\0";

static CLASS_BYTES: Lazy<Vec<u8>> = Lazy::new(|| {
    STANDARD
        .decode(payload::CLASS_BASE64)
        .expect("embedded class payload is valid base64")
});

static DEX_BYTES: Lazy<Vec<u8>> = Lazy::new(|| {
    STANDARD
        .decode(payload::DEX_BASE64)
        .expect("embedded dex payload is valid base64")
});

pub fn class_bytes() -> &'static [u8] {
    &CLASS_BYTES
}

pub fn dex_bytes() -> &'static [u8] {
    &DEX_BYTES
}

pub fn class_magic_ok() -> bool {
    class_bytes().starts_with(&CLASS_MAGIC)
}

pub fn dex_magic_ok() -> bool {
    dex_bytes().starts_with(DEX_MAGIC)
}

/// The live object whose class gets redefined.
pub trait Transform {
    /// Returns the line the method printed.
    fn say_hi(&mut self, name: &str) -> String;
}

/// Runtime service that swaps a loaded class's implementation.
pub trait Redefiner {
    fn redefine_class(
        &mut self,
        class_name: &str,
        class_bytes: &[u8],
        dex_bytes: &[u8],
    ) -> std::result::Result<(), RedefinitionError>;
}

/// Failure raised by the runtime; `category` is the exception class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedefinitionError {
    pub category: String,
    pub message: String,
}

impl RedefinitionError {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RedefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.category, self.message)
    }
}

impl std::error::Error for RedefinitionError {}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    /// Lines in the order the harness would have printed them.
    pub output: Vec<String>,
    pub error: Option<RedefinitionError>,
}

/// Call `sayHi`, attempt the swap, call `sayHi` again.
///
/// A rejected redefinition is the expected outcome; it is recorded in the
/// report rather than returned as an error.
pub fn run_scenario<T, R>(target: &mut T, redefiner: &mut R) -> ScenarioReport
where
    T: Transform + ?Sized,
    R: Redefiner + ?Sized,
{
    let mut report = ScenarioReport::default();
    report.output.push(target.say_hi(SCENARIO_NAME));

    match redefiner.redefine_class(TARGET_CLASS, class_bytes(), dex_bytes()) {
        Ok(()) => debug!(class = TARGET_CLASS, "redefinition accepted"),
        Err(e) => {
            info!(class = TARGET_CLASS, error = %e, "redefinition rejected");
            report.output.push(format!("Transformation error : {}", e));
            report.error = Some(e);
        }
    }

    report.output.push(target.say_hi(SCENARIO_NAME));
    report
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureSummary {
    pub name: &'static str,
    pub len: usize,
    pub md5: String,
    pub magic_ok: bool,
}

pub fn summaries() -> Vec<FixtureSummary> {
    vec![
        FixtureSummary {
            name: "Transform.class",
            len: class_bytes().len(),
            md5: format!("{:x}", md5::compute(class_bytes())),
            magic_ok: class_magic_ok(),
        },
        FixtureSummary {
            name: "classes.dex",
            len: dex_bytes().len(),
            md5: format!("{:x}", md5::compute(dex_bytes())),
            magic_ok: dex_magic_ok(),
        },
    ]
}

/// Write both payloads into `dir`, creating it if needed.
pub fn export(dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let class_path = dir.join("Transform.class");
    let dex_path = dir.join("classes.dex");
    fs::write(&class_path, class_bytes())?;
    fs::write(&dex_path, dex_bytes())?;
    Ok(vec![class_path, dex_path])
}
