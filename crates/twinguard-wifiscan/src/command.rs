//! Bounded execution of external scan tools.
//!
//! Every scan tool this crate shells out to goes through [`run_command`], so
//! a hung `netsh`/`iw`/`nmcli` can never stall a request: the child is killed
//! once the timeout elapses.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;

use crate::error::{ScanError, ScanResult};

/// Run `program args...`, wait at most `timeout`, and return its stdout.
///
/// Non-UTF-8 bytes are replaced rather than rejected; scan tools print
/// whatever bytes the access point broadcast as its SSID.
pub async fn run_command(program: &str, args: &[&str], timeout: Duration) -> ScanResult<String> {
    debug!(program, ?args, timeout_ms = timeout.as_millis() as u64, "running scan tool");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ScanError::Spawn {
            program: program.to_owned(),
            source,
        })?;

    // Dropping the wait future on timeout drops the child, which kills it.
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| ScanError::Spawn {
            program: program.to_owned(),
            source,
        })?,
        Err(_) => {
            return Err(ScanError::Timeout {
                program: program.to_owned(),
                timeout,
            })
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ScanError::NonZeroExit {
            program: program.to_owned(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_owned(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
