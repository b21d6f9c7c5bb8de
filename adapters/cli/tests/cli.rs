use std::{io::Write, process::Command};

fn mars_rover() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mars-rover"));
    let _ = command.env_remove("RUST_LOG");
    command
}

#[test]
fn prints_final_pose_after_commands() {
    let output = mars_rover()
        .args(["--rows", "4", "--columns", "4", "FFRFF"])
        .output()
        .expect("failed to run mars-rover");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2 2 E\n");
}

#[test]
fn reports_obstacle_and_exits_with_failure() {
    let output = mars_rover()
        .args(["--obstacle", "1,0", "F"])
        .output()
        .expect("failed to run mars-rover");

    assert!(!output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0 0 N\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("obstacle encountered at (1, 0)"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn rejects_start_outside_grid() {
    let output = mars_rover()
        .args(["--rows", "1", "--columns", "1", "--start", "0,4,N", "F"])
        .output()
        .expect("failed to run mars-rover");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not deploy rover"));
}

#[test]
fn runs_mission_file_with_render() {
    let mut file = tempfile::NamedTempFile::new().expect("temporary mission file");
    write!(
        file,
        r#"
commands = "FFR"

[grid]
rows = 3
columns = 3
obstacles = [[0, 1]]

[rover]
row = 0
column = 0
direction = "N"
"#
    )
    .expect("mission written");

    let output = mars_rover()
        .arg("--mission")
        .arg(file.path())
        .arg("--render")
        .output()
        .expect("failed to run mars-rover");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        ">..\n...\n.#.\n2 0 E\n"
    );
}

#[test]
fn exported_survey_can_be_replayed() {
    let export = mars_rover()
        .args(["--rows", "5", "--columns", "3", "--obstacle", "2,1", "--export-survey"])
        .output()
        .expect("failed to run mars-rover");
    assert!(export.status.success());
    let stdout = String::from_utf8_lossy(&export.stdout);
    let survey = stdout.lines().next().expect("survey line");
    assert!(survey.starts_with("rover:v1:5x3:"));

    let replay = mars_rover()
        .args(["--survey", survey, "--start", "0,1,N", "FF"])
        .output()
        .expect("failed to run mars-rover");

    assert!(!replay.status.success());
    assert_eq!(String::from_utf8_lossy(&replay.stdout), "1 1 N\n");
}

#[test]
fn trace_lists_each_committed_transition() {
    let output = mars_rover()
        .args(["--rows", "4", "--columns", "4", "--trace", "FR"])
        .output()
        .expect("failed to run mars-rover");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "move (0, 0) -> (1, 0) facing N\nturn N -> E at (1, 0)\n1 0 E\n"
    );
}

#[test]
fn scattering_with_a_seed_is_reproducible() {
    let survey_for = |seed: &str| {
        let output = mars_rover()
            .args(["--rows", "6", "--columns", "6", "--scatter", "5", "--seed", seed])
            .arg("--export-survey")
            .output()
            .expect("failed to run mars-rover");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    let open_grid = mars_rover()
        .args(["--rows", "6", "--columns", "6", "--export-survey"])
        .output()
        .expect("failed to run mars-rover");

    let first = survey_for("42");
    assert_eq!(first, survey_for("42"));
    assert_ne!(first, String::from_utf8_lossy(&open_grid.stdout));
}

#[test]
fn warns_when_scatter_request_does_not_fit() {
    let output = mars_rover()
        .args(["--rows", "2", "--columns", "2", "--scatter", "10"])
        .output()
        .expect("failed to run mars-rover");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0 0 N\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("only 3 of 10 requested obstacles fit on the grid"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn drives_on_the_largest_grid() {
    let output = mars_rover()
        .args(["--rows", "2147483647", "--columns", "2147483647", "F"])
        .output()
        .expect("failed to run mars-rover");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1 0 N\n");
}
