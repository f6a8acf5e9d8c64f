mod cli;
mod printer;

use anyhow::{Context, Result};
use compos_harness::{
    clock::TokioSleeper,
    compos::{CompOs, APEXDATA_DIR, PENDING_ARTIFACTS_DIR},
    config::Config,
    device::AdbDevice,
    fixture, Error,
};
use printer::TextPrinter;
use serde_json::json;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    init_tracing(args.verbose);

    // CLI flags override config file and environment
    let mut cfg = Config::load();
    if let Some(serial) = &args.serial {
        cfg.set("ANDROID_SERIAL", serial.clone());
    }
    if let Some(adb) = &args.adb {
        cfg.set("ADB_PATH", adb.clone());
    }
    if let Some(job_id) = &args.job_id {
        cfg.set("HARNESS_JOB_ID", job_id.clone());
    }

    let compos = CompOs::new(AdbDevice::from_config(&cfg), TokioSleeper)
        .with_job_id(cfg.job_id())
        .with_timings(cfg.poll_timings());

    match args.command {
        cli::Command::Compile { skip_checks } => {
            if !skip_checks {
                let checks = match compos.assume_comp_os_present().await {
                    Ok(()) => compos.assume_not_on_cuttlefish().await,
                    Err(e) => Err(e),
                };
                match checks {
                    Err(Error::Skipped(reason)) => {
                        TextPrinter::new("yellow").print(&format!("skipped: {}", reason));
                        return Ok(());
                    }
                    other => other.context("checking device preconditions")?,
                }
            }
            compos
                .run_compilation_job_early_and_wait()
                .await
                .context("running compilation job")?;
            if args.json {
                println!("{}", json!({ "job_id": cfg.job_id(), "status": "completed" }));
            } else {
                TextPrinter::new("green").print("compilation job completed");
            }
        }
        cli::Command::Checksum { path } => {
            let listing = compos
                .checksum_directory_content_partial(&path)
                .await
                .with_context(|| format!("checksumming {}", path))?;
            if args.json {
                let entries: Vec<_> = listing
                    .lines()
                    .filter_map(|l| l.split_once(char::is_whitespace))
                    .map(|(sum, file)| json!({ "sha256": sum, "file": file.trim() }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", listing);
            }
        }
        cli::Command::Check => {
            let mut report = Vec::new();
            for (name, outcome) in [
                ("compos_present", compos.assume_comp_os_present().await),
                ("not_on_cuttlefish", compos.assume_not_on_cuttlefish().await),
            ] {
                let status = match outcome {
                    Ok(()) => ("pass", None),
                    Err(Error::Skipped(reason)) => ("skip", Some(reason)),
                    Err(e) => return Err(e).with_context(|| format!("checking {}", name)),
                };
                report.push((name, status));
            }
            if args.json {
                let value: Vec<_> = report
                    .iter()
                    .map(|(name, (status, reason))| json!({ "check": name, "status": status, "reason": reason }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for (name, (status, reason)) in &report {
                    let line = match reason {
                        Some(r) => format!("{}: {} ({})", name, status, r),
                        None => format!("{}: {}", name, status),
                    };
                    let color = if *status == "pass" { "green" } else { "yellow" };
                    TextPrinter::new(color).print(&line);
                }
                println!("artifacts: {} (pending: {})", APEXDATA_DIR, PENDING_ARTIFACTS_DIR);
            }
        }
        cli::Command::Fixture { export } => {
            let summaries = fixture::summaries();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for s in &summaries {
                    println!("{:<16} {:>5} bytes  md5 {}  header {}", s.name, s.len, s.md5, if s.magic_ok { "ok" } else { "BAD" });
                }
            }
            if let Some(dir) = export {
                let paths = fixture::export(&dir)
                    .with_context(|| format!("exporting fixture to {}", dir.display()))?;
                for p in paths {
                    TextPrinter::new("cyan").print(&format!("wrote {}", p.display()));
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
