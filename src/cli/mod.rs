//! CLI for beamstep
//!
//! Stands in for the CI server: it assembles a step from flags or a YAML step
//! file and then validates, prints, dry-runs or runs it.
//! - `run`: Launch the pipeline and stream its output
//! - `command`: Print the command a step would run
//! - `validate`: Check the step's fields
//! - `completions`: Generate shell completions

pub mod completions;

use anyhow::{Context, Result};
use beamstep::{
    BeamStep, Config, ConsoleSink, FormValidation, LogSink, StepExecutor, StepRunner, Toolchain,
    Validate, WorkspaceResolver, WriterSink, build_command, check_path_to_main_class,
    init_logging, render_command,
};
use clap::{Args as ClapArgs, CommandFactory, Parser, Subcommand, ValueEnum};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// CLI arguments for beamstep
#[derive(Parser, Debug)]
#[command(name = "beamstep")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Application config file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level for diagnostics (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the pipeline and stream its output
    Run {
        #[command(flatten)]
        step: StepArgs,
        /// Working directory (defaults to $WORKSPACE, then $JENKINS_HOME/workspace/$JOB_NAME)
        #[arg(short, long)]
        workspace: Option<PathBuf>,
        /// Log the configuration and command without launching anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the command a step would run
    Command {
        #[command(flatten)]
        step: StepArgs,
        /// Print the argument vector as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Check the step's fields
    Validate {
        #[command(flatten)]
        step: StepArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Step definition, from a step file or from individual fields
#[derive(ClapArgs, Debug, Default)]
struct StepArgs {
    /// YAML step file
    #[arg(short, long, conflicts_with_all = ["main_class", "pipeline_options", "build_release_options", "toolchain", "use_java", "use_gradle"])]
    step: Option<PathBuf>,

    /// Fully-qualified main class or Python module
    #[arg(short, long)]
    main_class: Option<String>,

    /// Pipeline options, passed as a single argument
    #[arg(long, allow_hyphen_values = true)]
    pipeline_options: Option<String>,

    /// Build/release options, passed as a single argument
    #[arg(long, allow_hyphen_values = true)]
    build_release_options: Option<String>,

    /// Toolchain to launch
    #[arg(short, long, value_enum, conflicts_with_all = ["use_java", "use_gradle"])]
    toolchain: Option<ToolchainArg>,

    /// Use a Java toolchain instead of Python
    #[arg(long)]
    use_java: bool,

    /// With --use-java, use Gradle instead of Maven
    #[arg(long, requires = "use_java")]
    use_gradle: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ToolchainArg {
    GradleJava,
    MavenJava,
    Python,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl StepArgs {
    fn into_step(self, config: &Config) -> Result<BeamStep> {
        if let Some(path) = self.step {
            return BeamStep::from_file(&path)
                .with_context(|| format!("Failed to load step file: {}", path.display()));
        }

        let toolchain = match self.toolchain {
            Some(ToolchainArg::GradleJava) => Toolchain::GradleJava,
            Some(ToolchainArg::MavenJava) => Toolchain::MavenJava,
            Some(ToolchainArg::Python) => Toolchain::Python,
            None if self.use_java => Toolchain::from_flags(true, self.use_gradle),
            None => config.default_toolchain,
        };

        Ok(BeamStep::new(
            self.main_class.unwrap_or_default(),
            self.pipeline_options.unwrap_or_default(),
            self.build_release_options.unwrap_or_default(),
            toolchain,
        ))
    }
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<ExitCode> {
    let args = Args::parse();

    let config = Config::resolve(args.config.as_deref()).context("Failed to load config")?;
    let level = args.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level);
    tracing::debug!(?config, "Configuration loaded");

    match args.command {
        Command::Run {
            step,
            workspace,
            dry_run,
        } => {
            let step = step.into_step(&config)?;
            step.validate().context("Invalid step configuration")?;

            let runner = StepRunner::new();
            let code = match &config.log_file {
                Some(path) => {
                    let sink = (ConsoleSink, open_log_file(path)?);
                    launch(&runner, &step, workspace.as_deref(), dry_run, &sink)?
                }
                None => launch(&runner, &step, workspace.as_deref(), dry_run, &ConsoleSink)?,
            };
            Ok(ExitCode::from(exit_status(code)))
        }
        Command::Command { step, json } => {
            let step = step.into_step(&config)?;
            let argv = build_command(&step);
            if json {
                println!("{}", serde_json::to_string(&argv)?);
            } else {
                println!("{}", render_command(&argv));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { step } => {
            let step = step.into_step(&config)?;
            let result = check_path_to_main_class(step.path_to_main_class());
            println!("{}: {result}", step.display_name());
            Ok(match result {
                FormValidation::Ok => ExitCode::SUCCESS,
                FormValidation::Error(_) => ExitCode::FAILURE,
            })
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;

            if let Some(output_path) = output {
                completions::save_completions(&completions, &output_path)?;
            } else {
                println!("{completions}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn launch(
    runner: &StepRunner,
    step: &BeamStep,
    workspace: Option<&Path>,
    dry_run: bool,
    sink: &dyn LogSink,
) -> Result<i32> {
    if dry_run {
        return Ok(runner.dry_run(step, sink)?);
    }

    let health = runner.health_check(step);
    if !health.is_operational() {
        tracing::warn!(?health, "Toolchain check failed, launching anyway");
    }

    let working_dir = WorkspaceResolver::from_env().resolve(workspace);
    runner
        .execute(step, &working_dir, sink)
        .with_context(|| format!("Failed to run {}", step.display_name()))
}

fn open_log_file(path: &Path) -> Result<WriterSink<std::fs::File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    Ok(WriterSink::new(file))
}

/// Maps a toolchain exit code onto a process exit status
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_step_args_from_toolchain_flag() {
        let args = StepArgs {
            main_class: Some("com.acme.Main".to_string()),
            toolchain: Some(ToolchainArg::GradleJava),
            ..StepArgs::default()
        };
        let step = args.into_step(&Config::default()).unwrap();
        assert_eq!(step.toolchain(), Toolchain::GradleJava);
        assert_eq!(step.pipeline_options(), "");
    }

    #[test]
    fn test_step_args_from_legacy_flags() {
        let args = StepArgs {
            main_class: Some("com.acme.Main".to_string()),
            use_java: true,
            ..StepArgs::default()
        };
        let step = args.into_step(&Config::default()).unwrap();
        assert_eq!(step.toolchain(), Toolchain::MavenJava);
    }

    #[test]
    fn test_step_args_fall_back_to_config_toolchain() {
        let config = Config {
            default_toolchain: Toolchain::GradleJava,
            ..Config::default()
        };
        let step = StepArgs::default().into_step(&config).unwrap();
        assert_eq!(step.toolchain(), Toolchain::GradleJava);
        assert_eq!(step.path_to_main_class(), "");
    }

    #[test]
    fn test_exit_status_mapping() {
        assert_eq!(exit_status(0), 0);
        assert_eq!(exit_status(3), 3);
        assert_eq!(exit_status(-1), 1);
        assert_eq!(exit_status(300), 1);
    }
}
