use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn witcher(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("witcher").unwrap();
    cmd.current_dir(dir.path())
        .arg("--save")
        .arg(dir.path().join("save.txt"))
        .arg("--seed")
        .arg("11");
    cmd
}

#[test]
fn new_game_then_quit() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir)
        .write_stdin("2\nCiri\n4\n1\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Ciri of the Cat School!"))
        .stdout(predicate::str::contains("Damage: 15 | Defense: 0"))
        .stdout(predicate::str::contains("Farewell, Witcher!"));
    assert!(!dir.path().join("save.txt").exists());
}

#[test]
fn saved_game_can_be_inspected_as_json() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir)
        .write_stdin("2\n\n\n\n4\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game saved successfully!"));

    witcher(&dir)
        .args(["inspect", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Geralt\""))
        .stdout(predicate::str::contains("\"max_hp\": 110"));
}

#[test]
fn continue_without_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved game found!"))
        .stdout(predicate::str::contains("Enter your Witcher's name: "));
}

#[test]
fn continue_loads_the_save() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir).write_stdin("2\nEskel\n1\n3\n4\n5\n").assert().success();
    witcher(&dir)
        .write_stdin("1\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome back, Eskel!"));
}

#[test]
fn new_game_plus_from_existing_save() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir).write_stdin("2\n\n\n\n4\n5\n").assert().success();
    witcher(&dir)
        .write_stdin("2\n2\n4\n5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found previous save data"))
        .stdout(predicate::str::contains("Starting New Game+ Round 1!"))
        .stdout(predicate::str::contains("HP: 130/130"));

    witcher(&dir)
        .args(["inspect"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NG+: 1"));
}

#[test]
fn corrupt_save_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("save.txt"), "name=Geralt\nlevel=lots\n").unwrap();
    witcher(&dir)
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Save data could not be read"))
        .stdout(predicate::str::contains("No saved game found!"));
}

#[test]
fn hunting_until_input_runs_out() {
    let dir = tempfile::tempdir().unwrap();
    witcher(&dir)
        .write_stdin("2\n\n\n\n1\n1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Witcher encounters:"))
        .stdout(predicate::str::contains("You deal"));
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("witcher.yaml"), "conjunction_chance: 300\n").unwrap();
    witcher(&dir)
        .write_stdin("5\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn simulator_reports_win_rate() {
    Command::cargo_bin("simulate-hunts")
        .unwrap()
        .args(["--monster", "drowner", "--trials", "20", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trials\": 20"))
        .stdout(predicate::str::contains("\"win_rate\""));
}

#[test]
fn simulator_rejects_unknown_monster() {
    Command::cargo_bin("simulate-hunts")
        .unwrap()
        .args(["--monster", "griffin"])
        .assert()
        .failure();
}
