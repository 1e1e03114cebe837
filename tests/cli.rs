use assert_cmd::Command;
use tempfile::tempdir;

fn beamstep() -> Command {
    let mut cmd = Command::cargo_bin("beamstep").expect("binary present");
    cmd.env_remove("RUST_LOG").env_remove("BEAMSTEP_LOG_LEVEL");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn command_prints_argv_as_json() {
    let stdout = stdout_of(beamstep().args([
        "command",
        "--main-class",
        "com.acme.Main",
        "--toolchain",
        "maven-java",
        "--pipeline-options=--runner=Dataflow",
        "--json",
    ]));

    let argv: Vec<String> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(
        argv,
        [
            "mvn",
            "compile",
            "exec:java",
            "-Dexec.mainClass=com.acme.Main",
            "--runner=Dataflow"
        ]
    );
}

#[test]
fn command_accepts_legacy_flags() {
    let stdout = stdout_of(beamstep().args([
        "command",
        "--main-class",
        "com.acme.Main",
        "--use-java",
        "--use-gradle",
        "--json",
    ]));

    let argv: Vec<String> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(argv, ["gradle", "clean", "execute", "-DmainClass=com.acme.Main"]);
}

#[test]
fn command_reads_step_file() {
    let temp = tempdir().unwrap();
    let step_file = temp.path().join("beam-step.yaml");
    std::fs::write(
        &step_file,
        "pathToMainClass: pkg.module\npipelineOptions: --x=1\nbuildReleaseOptions: --y=2\nuseJava: false\nuseGradle: true\n",
    )
    .unwrap();

    let stdout = stdout_of(beamstep().args(["command", "--json", "--step"]).arg(&step_file));

    let argv: Vec<String> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(argv, ["python", "-m", "pkg.module", "--x=1", "--y=2"]);
}

#[test]
fn validate_rejects_missing_main_class() {
    let output = beamstep()
        .args(["validate", "--toolchain", "python"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("Missing path to main class."));
}

#[test]
fn validate_accepts_main_class() {
    let stdout = stdout_of(beamstep().args(["validate", "--main-class", "com.acme.Main"]));
    assert!(stdout.contains("Execute Beam Pipeline on Dataflow: OK"));
}

#[test]
fn run_refuses_invalid_step() {
    let temp = tempdir().unwrap();
    beamstep()
        .args(["run", "--toolchain", "python", "--workspace"])
        .arg(temp.path())
        .assert()
        .failure();
}

#[test]
fn dry_run_logs_configuration() {
    let stdout = stdout_of(beamstep().args([
        "run",
        "--dry-run",
        "--main-class",
        "pkg.module",
        "--toolchain",
        "python",
    ]));

    assert!(stdout.contains("path to main class : pkg.module"));
    assert!(stdout.contains("use java: false"));
    assert!(stdout.contains("would run : python -m pkg.module"));
}

#[cfg(unix)]
#[test]
fn run_streams_output_and_propagates_exit_code() {
    use std::os::unix::fs::PermissionsExt;

    let bin = tempdir().unwrap();
    let workspace = tempdir().unwrap();
    let fake = bin.path().join("python");
    std::fs::write(&fake, "#!/bin/sh\necho \"submitting $2\"\nexit 4\n").unwrap();
    std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!(
        "{}:{}",
        bin.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );

    let output = beamstep()
        .env("PATH", path)
        .args(["run", "--main-class", "pkg.wordcount", "--toolchain", "python", "--workspace"])
        .arg(workspace.path())
        .assert()
        .code(4)
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert!(stdout.contains("submitting pkg.wordcount"));
    assert!(stdout.contains("\n\n Exited with error code : 4"));
}

#[test]
fn completions_for_bash() {
    let stdout = stdout_of(beamstep().args(["completions", "bash"]));
    assert!(stdout.contains("beamstep"));
}
