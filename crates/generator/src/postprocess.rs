//! Post-generation formatting and lint fixing
//!
//! Opaque external collaborators observed only through exit status: the
//! formatter and the lint-autofix step run concurrently, then a second
//! formatter pass runs after both complete. Any failure is fatal; files
//! already written are not rolled back.

use rest_client_generator_common::{GeneratorError, Result};
use std::path::Path;
use std::process::Command;
use std::thread;

/// Run the full post-processing sequence on a generated crate directory.
pub fn run(output_dir: &Path) -> Result<()> {
    let fmt_dir = output_dir.to_path_buf();
    let fix_dir = output_dir.to_path_buf();

    let fmt = thread::spawn(move || run_formatter(&fmt_dir));
    let fix = thread::spawn(move || run_lint_fix(&fix_dir));

    join_tools(fmt, fix)?;

    // Second formatter pass cleans up after the lint fixes.
    run_formatter(output_dir)
}

/// Wait for both concurrent tool threads to finish before propagating the
/// first failure; the run is not over while a tool is still in flight.
fn join_tools(
    fmt: thread::JoinHandle<Result<()>>,
    fix: thread::JoinHandle<Result<()>>,
) -> Result<()> {
    let fmt_result = join_tool(fmt, "formatter");
    let fix_result = join_tool(fix, "lint fixer");
    fmt_result?;
    fix_result
}

fn join_tool(handle: thread::JoinHandle<Result<()>>, name: &str) -> Result<()> {
    handle
        .join()
        .map_err(|_| GeneratorError::PostProcess(format!("{} thread panicked", name)))?
}

fn run_formatter(dir: &Path) -> Result<()> {
    run_tool("cargo", &["fmt"], dir)
}

fn run_lint_fix(dir: &Path) -> Result<()> {
    run_tool(
        "cargo",
        &["clippy", "--fix", "--allow-dirty", "--allow-no-vcs"],
        dir,
    )
}

fn run_tool(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .current_dir(dir)
        .status()
        .map_err(|e| {
            GeneratorError::PostProcess(format!("Failed to launch `{} {}`: {}", program, args.join(" "), e))
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(GeneratorError::PostProcess(format!(
            "`{} {}` exited with {}",
            program,
            args.join(" "),
            status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_failed_tool_still_waits_for_the_other() {
        let slow_finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&slow_finished);

        let failing = thread::spawn(|| {
            Err(GeneratorError::PostProcess(
                "`cargo fmt` exited with exit status: 1".to_string(),
            ))
        });
        let slow = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        let result = join_tools(failing, slow);
        assert!(result.is_err());
        // The slow tool was joined before the failure propagated.
        assert!(slow_finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_first_failure_wins_when_both_fail() {
        let fmt = thread::spawn(|| {
            Err(GeneratorError::PostProcess("formatter failed".to_string()))
        });
        let fix = thread::spawn(|| {
            Err(GeneratorError::PostProcess("lint fixer failed".to_string()))
        });

        let err = join_tools(fmt, fix).unwrap_err();
        assert!(err.to_string().contains("formatter failed"));
    }
}
