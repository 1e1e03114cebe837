//! Command builder
//!
//! Maps a [`BeamStep`] onto the argument vector of the process that launches
//! the pipeline. The first element is the program, the rest are its arguments.

use super::types::{BeamStep, Toolchain};

/// Builds the argument vector for a step
///
/// Option strings are appended as single arguments when non-empty. They are
/// never split or quoted, so `"--a=1 --b=2"` reaches the toolchain as one
/// argument.
///
/// # Example
///
/// ```rust
/// use beamstep::{build_command, BeamStep, Toolchain};
///
/// let step = BeamStep::new("pkg.module", "--x=1", "", Toolchain::Python);
/// assert_eq!(build_command(&step), ["python", "-m", "pkg.module", "--x=1"]);
/// ```
#[must_use]
pub fn build_command(step: &BeamStep) -> Vec<String> {
    let main_class = step.path_to_main_class();
    let mut command: Vec<String> = match step.toolchain() {
        Toolchain::GradleJava => vec![
            "gradle".into(),
            "clean".into(),
            "execute".into(),
            format!("-DmainClass={main_class}"),
        ],
        Toolchain::MavenJava => vec![
            "mvn".into(),
            "compile".into(),
            "exec:java".into(),
            format!("-Dexec.mainClass={main_class}"),
        ],
        Toolchain::Python => vec!["python".into(), "-m".into(), main_class.to_string()],
    };

    for extra in [step.pipeline_options(), step.build_release_options()] {
        if !extra.is_empty() {
            command.push(extra.to_string());
        }
    }

    command
}

/// Renders an argument vector as one shell-quoted line, for display only
#[must_use]
pub fn render_command(argv: &[String]) -> String {
    shell_words::join(argv)
}
