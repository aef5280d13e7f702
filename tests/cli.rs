//! End-to-end tests for the `capture` binary

use std::io::Cursor;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{ImageBuffer, ImageFormat, Rgb};
use predicates::prelude::*;
use tempfile::TempDir;

struct Env {
    _dir: TempDir,
    config: PathBuf,
    vault: PathBuf,
}

impl Env {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config");
        let vault = dir.path().join("vault");
        Self {
            _dir: dir,
            config,
            vault,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("capture").unwrap();
        cmd.env("CASUAL_CAPTURE_CONFIG_DIR", &self.config)
            .env_remove("CASUAL_CAPTURE_VAULT")
            .arg("--vault")
            .arg(&self.vault);
        cmd
    }

    fn today_file(&self) -> PathBuf {
        let name = format!("{}.txt", chrono::Local::now().format("%Y-%m-%d"));
        self.vault.join(name)
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn today_creates_vault_and_file() {
    let env = Env::new();

    env.cmd()
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains(".txt"));

    assert!(env.today_file().is_file());
    assert_eq!(read(&env.today_file()), "");
}

#[test]
fn note_is_appended_with_timestamp() {
    let env = Env::new();

    env.cmd().args(["note", "first", "idea"]).assert().success();
    env.cmd()
        .arg("note")
        .write_stdin("second idea\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Captured 2 line(s)."));

    let content = read(&env.today_file());
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0].len(), 8);
    assert_eq!(lines[1], "first idea");
    assert_eq!(lines[3], "second idea");
    assert!(content.ends_with("second idea\n"));
}

#[test]
fn timestamps_can_be_disabled() {
    let env = Env::new();

    env.cmd()
        .args(["config", "set", "insert_timestamps", "false"])
        .assert()
        .success();
    env.cmd().args(["note", "plain"]).assert().success();

    assert_eq!(read(&env.today_file()), "plain\n");
    assert!(env.config.join("settings.json").is_file());
}

#[test]
fn invalid_setting_is_rejected_and_not_saved() {
    let env = Env::new();

    env.cmd()
        .args(["config", "set", "hr_width", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and"));

    assert!(!env.config.join("settings.json").exists());
}

#[test]
fn invalid_settings_file_can_be_repaired() {
    let env = Env::new();
    std::fs::create_dir_all(&env.config).unwrap();
    std::fs::write(
        env.config.join("settings.json"),
        r#"{"hr_char": "", "hr_width": 0, "insert_timestamps": false}"#,
    )
    .unwrap();

    env.cmd().args(["note", "hi"]).assert().success();
    assert_eq!(read(&env.today_file()), "hi\n");

    env.cmd()
        .args(["config", "set", "hr_char", "=-"])
        .assert()
        .success();

    let saved = read(&env.config.join("settings.json"));
    assert!(saved.contains("\"hr_char\": \"=-\""));
    assert!(saved.contains("\"hr_width\": 80"));
    assert!(saved.contains("\"insert_timestamps\": false"));
}

#[test]
fn feed_replace_overwrites() {
    let env = Env::new();
    env.cmd().args(["note", "draft"]).assert().success();

    env.cmd()
        .args(["feed", "replace"])
        .write_stdin("clean copy\n")
        .assert()
        .success();

    assert_eq!(read(&env.today_file()), "clean copy\n");

    env.cmd()
        .args(["feed", "show"])
        .assert()
        .success()
        .stdout("clean copy\n");
}

#[test]
fn attach_stores_png_and_reference() {
    let env = Env::new();
    let image_path = env.vault.with_file_name("shot.bmp");
    let img = ImageBuffer::from_pixel(3, 2, Rgb([1u8, 2, 3]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Bmp).unwrap();
    std::fs::write(&image_path, bytes.get_ref()).unwrap();

    env.cmd()
        .args(["attach", "--note", "whiteboard"])
        .arg(&image_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored asset"));

    let content = read(&env.today_file());
    assert!(content.contains("whiteboard\n![") && content.contains(".png]("));

    let assets: Vec<_> = std::fs::read_dir(env.vault.join("assets"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(assets.len(), 1);
    assert_eq!(image::open(&assets[0]).unwrap().to_rgb8(), img);
    assert!(content.contains(&assets[0].display().to_string()));

    env.cmd()
        .arg("refs")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 reference(s), 0 missing"));
}

#[test]
fn attach_rejects_non_image() {
    let env = Env::new();
    let bogus = env.vault.with_file_name("notes.txt");
    std::fs::write(&bogus, "not an image").unwrap();

    env.cmd()
        .arg("attach")
        .arg(&bogus)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image error"));
}

#[test]
fn note_into_blocked_vault_fails_and_echoes_text() {
    let env = Env::new();
    std::fs::write(&env.vault, "a file, not a directory").unwrap();

    env.cmd()
        .args(["note", "do not lose me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("do not lose me"));
}

#[test]
fn refs_for_missing_day_fails() {
    let env = Env::new();

    env.cmd()
        .args(["refs", "--date", "1999-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No journal file for 1999-01-01"));

    assert!(!env.vault.exists());
}

#[test]
fn days_lists_journal_files() {
    let env = Env::new();
    std::fs::create_dir_all(&env.vault).unwrap();
    std::fs::write(env.vault.join("2024-03-07.txt"), "x").unwrap();

    env.cmd()
        .arg("days")
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-07.txt"));
}

#[test]
fn hotkey_reset_restores_default() {
    let env = Env::new();
    env.cmd()
        .args(["config", "set", "hotkey", "ctrl+shift+j"])
        .assert()
        .success();

    env.cmd()
        .args(["hotkey", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ctrl+alt+n"));

    let saved = read(&env.config.join("settings.json"));
    assert!(saved.contains("\"hotkey\": \"ctrl+alt+n\""));
}
