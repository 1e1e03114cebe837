//! Step runner
//!
//! Launches the toolchain process for a [`BeamStep`] and forwards its output
//! to a [`LogSink`] line by line as it is produced:
//!
//! 1. Echo the received configuration.
//! 2. Build the argument vector with [`build_command`].
//! 3. Spawn it in the workspace, inheriting the environment.
//! 4. Forward stdout (and stderr, on a helper thread) line by line.
//! 5. Wait for exit and log the exit code.
//!
//! A nonzero exit is reported through the returned code, not as an error.
//! Nothing is retried and there is no timeout.

use super::sink::LogSink;
use super::traits::{HealthStatus, StepExecutor};
use crate::step::{BeamStep, StepError, build_command, render_command};
use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;
use uuid::Uuid;

/// Exit code reported when the toolchain was terminated by a signal
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Runs a step with a default [`StepRunner`]
///
/// # Errors
///
/// Returns an error if the workspace is missing or the toolchain cannot be
/// started.
pub fn run(step: &BeamStep, working_dir: &Path, sink: &dyn LogSink) -> Result<i32, StepError> {
    StepRunner::new().execute(step, working_dir, sink)
}

/// Local runner that launches toolchains on the host system
#[derive(Debug, Clone, Default)]
pub struct StepRunner {
    /// Extra environment variables for the child process
    env: HashMap<String, String>,
}

impl StepRunner {
    /// Creates a new runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an environment variable for the child process
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    fn log_configuration(step: &BeamStep, sink: &dyn LogSink) {
        sink.println(&format!("path to main class : {}", step.path_to_main_class()));
        sink.println(&format!("pipeline options : {}", step.pipeline_options()));
        sink.println(&format!(
            "build release options : {}",
            step.build_release_options()
        ));
        sink.println(&format!("use java: {}", step.use_java()));
        sink.println(&format!("use gradle: {}", step.use_gradle()));
    }

    /// `PATH` the child will search, honouring an override
    fn search_path(&self) -> Option<OsString> {
        self.env
            .get("PATH")
            .map(OsString::from)
            .or_else(|| env::var_os("PATH"))
    }
}

impl StepExecutor for StepRunner {
    fn execute(
        &self,
        step: &BeamStep,
        working_dir: &Path,
        sink: &dyn LogSink,
    ) -> Result<i32, StepError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "beam_step",
            run_id = %run_id,
            toolchain = %step.toolchain()
        );
        let _guard = span.enter();

        Self::log_configuration(step, sink);

        if !working_dir.is_dir() {
            return Err(StepError::WorkspaceNotFound(working_dir.to_path_buf()));
        }

        let argv = build_command(step);
        let program = step.toolchain().program();

        tracing::info!(
            command = %render_command(&argv),
            cwd = %working_dir.display(),
            "Launching pipeline"
        );

        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(&argv[1..]);
        cmd.current_dir(working_dir);
        cmd.envs(&self.env);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| StepError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let streamed = std::thread::scope(|scope| {
            let stderr_thread = stderr.map(|stream| scope.spawn(move || forward_lines(stream, sink)));

            let result = match stdout {
                Some(stream) => forward_lines(stream, sink),
                None => Ok(0),
            };
            if result.is_err() {
                let _ = child.kill();
            }

            if let Some(handle) = stderr_thread {
                match handle.join() {
                    Ok(Ok(lines)) => tracing::debug!(lines, "stderr drained"),
                    Ok(Err(e)) => tracing::warn!(error = %e, "Failed reading stderr"),
                    Err(_) => tracing::warn!("stderr reader panicked"),
                }
            }
            result
        });

        let status = child.wait()?;
        let lines = streamed?;

        let exit_code = status.code().unwrap_or(SIGNAL_EXIT_CODE);
        sink.println("");
        sink.println(&format!(" Exited with error code : {exit_code}"));

        tracing::info!(
            exit_code,
            stdout_lines = lines,
            duration_ms = start.elapsed().as_millis(),
            "Pipeline process finished"
        );

        Ok(exit_code)
    }

    fn dry_run(&self, step: &BeamStep, sink: &dyn LogSink) -> Result<i32, StepError> {
        tracing::info!(toolchain = %step.toolchain(), "Starting dry run");

        Self::log_configuration(step, sink);
        let argv = build_command(step);
        sink.println(&format!("would run : {}", render_command(&argv)));

        Ok(0)
    }

    fn health_check(&self, step: &BeamStep) -> HealthStatus {
        let program = step.toolchain().program();
        let found = self
            .search_path()
            .is_some_and(|paths| env::split_paths(&paths).any(|dir| is_executable(&dir.join(program))));

        if found {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy {
                reason: format!("'{program}' not found on PATH"),
            }
        }
    }
}

/// Forwards a stream to the sink one line at a time, returning the line count
fn forward_lines(stream: impl Read, sink: &dyn LogSink) -> io::Result<usize> {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        sink.println(line.trim_end_matches(['\n', '\r']));
        count += 1;
    }

    Ok(count)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file() || path.with_extension("exe").is_file() || path.with_extension("cmd").is_file()
}
