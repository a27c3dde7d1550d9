//! Helpers to run the `sapling` binary in integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use wait_timeout::ChildExt;

const TEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The exit status and the standard output of one run of the planner.
#[derive(Debug)]
pub(crate) struct PlannerOutput {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

impl PlannerOutput {
    /// The lines which are not log messages.
    pub(crate) fn result_lines(&self) -> Vec<&str> {
        self.stdout
            .lines()
            .filter(|line| !line.starts_with('%'))
            .collect()
    }
}

pub(crate) fn instance(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("instances")
        .join(format!("{name}.json"))
}

pub(crate) fn run_planner<'a>(
    instance_path: impl AsRef<Path>,
    args: impl IntoIterator<Item = &'a str>,
) -> PlannerOutput {
    let planner = PathBuf::from(env!("CARGO_BIN_EXE_sapling"));

    let mut command = Command::new(planner);
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path.as_ref())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run planner.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("planner took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting planner: {e}"),
    };

    let mut stdout = String::new();
    let _ = child
        .stdout
        .take()
        .expect("stdout is piped")
        .read_to_string(&mut stdout)
        .expect("Failed to read planner output.");

    PlannerOutput {
        success: status.success(),
        stdout,
    }
}
