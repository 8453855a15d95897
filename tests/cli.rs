//! Command line tests, driving the built binary against temporary files.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const TODO: &str = "pick 111 m1\npick 222 m2\npick 333 fixup! m1\n# Commands:\n";

/// Run the binary with `stdin` as standard input.
fn run(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_remaster"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn remaster");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for remaster")
}

fn todo_file(dir: &TempDir) -> String {
    let path = dir.path().join("git-rebase-todo");
    fs::write(&path, TODO).expect("Failed to write todo");
    path.display().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_prints_rewritten_todo() {
    let dir = TempDir::new().unwrap();
    let todo = todo_file(&dir);

    let output = run(&[&todo], "fixup 333\nexec default make\n");

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        "pick 111 m1\nexec make\nfixup 333 fixup! m1\nexec make\npick 222 m2\nexec make\n# Commands:\n"
    );
    // The todo itself is left alone.
    assert_eq!(fs::read_to_string(&todo).unwrap(), TODO);
}

#[test]
fn test_in_place_with_settings_file() {
    let dir = TempDir::new().unwrap();
    let todo = todo_file(&dir);
    let settings = dir.path().join("plan.txt");
    fs::write(&settings, "drop default\npick 111\n").unwrap();

    let output = run(
        &["--in-place", "--settings", &settings.display().to_string(), &todo],
        "",
    );

    assert!(output.status.success(), "{output:?}");
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(&todo).unwrap(),
        "pick 111 m1\ndrop 222 m2\ndrop 333 fixup! m1\n# Commands:\n"
    );
}

#[test]
fn test_toml_settings_file() {
    let dir = TempDir::new().unwrap();
    let todo = todo_file(&dir);
    let settings = dir.path().join("plan.toml");
    fs::write(&settings, "[222]\nmode = \"bubble\"\ntrailers = [\"break\"]\n").unwrap();

    let output = run(&["-s", &settings.display().to_string(), &todo], "");

    assert!(output.status.success(), "{output:?}");
    assert_eq!(
        stdout(&output),
        "pick 222 m2\nbreak\npick 111 m1\npick 333 fixup! m1\n# Commands:\n"
    );
}

#[test]
fn test_dump_settings() {
    let output = run(&["--dump-settings"], "fixup abc123 def456\nexec abc123 make\n");

    assert!(output.status.success(), "{output:?}");
    let dumped = stdout(&output);
    let settings = remaster::Settings::from_toml(&dumped).expect("dump should be valid TOML");
    assert_eq!(
        settings.get("abc123").and_then(|r| r.target.as_deref()),
        Some("def456")
    );
}

#[test]
fn test_bad_settings_fail_without_touching_todo() {
    let dir = TempDir::new().unwrap();
    let todo = todo_file(&dir);

    let output = run(&["--in-place", &todo], "widgetize 111\n");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("widgetize"));
    assert_eq!(fs::read_to_string(&todo).unwrap(), TODO);
}

#[test]
fn test_unresolved_relocation_fails() {
    let dir = TempDir::new().unwrap();
    let todo = todo_file(&dir);

    let output = run(&[&todo], "fixup 222 ghost\n");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("fixup 222 m2"));
}

#[test]
fn test_missing_todo_file() {
    let output = run(&["/nonexistent/git-rebase-todo"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("git-rebase-todo"));
}

#[test]
fn test_help_describes_settings() {
    let output = run(&["--help"], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("COMMIT-ID"));
}

#[test]
fn test_short_help_describes_settings() {
    let output = run(&["-h"], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("COMMIT-ID"));
}
