use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn seaf_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_seaf"))
}

fn run_in(dir: &Path, args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(seaf_command().current_dir(dir).args(args).output()?)
}

#[test]
fn cli_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    let inputs = work.path().join("inputs");
    let extracted = work.path().join("extracted");
    fs::create_dir(&inputs)?;
    fs::create_dir(&extracted)?;

    fs::write(inputs.join("a.txt"), b"hello")?;
    fs::write(inputs.join("b.txt"), b"")?;
    let archive = work.path().join("vault.seaf");

    let create = run_in(
        work.path(),
        &[
            "create",
            "--password",
            "pw",
            "--salt",
            "aabbcc",
            "--output",
            archive.to_str().unwrap(),
            inputs.join("a.txt").to_str().unwrap(),
            inputs.join("b.txt").to_str().unwrap(),
        ],
    )?;
    assert!(
        create.status.success(),
        "create command failed: {}",
        String::from_utf8_lossy(&create.stderr)
    );
    assert!(
        String::from_utf8(create.stdout)?.contains("Archived 2 files"),
        "create output missing confirmation"
    );

    // Info needs no password
    let info = run_in(work.path(), &["info", archive.to_str().unwrap()])?;
    let info_stdout = String::from_utf8(info.stdout)?;
    assert!(info_stdout.contains("Files: 2"));
    assert!(info_stdout.contains("a.txt"));

    // Extraction lands in the working directory
    let extract = run_in(
        &extracted,
        &[
            "extract",
            "--password",
            "pw",
            "--salt",
            "aabbcc",
            archive.to_str().unwrap(),
        ],
    )?;
    assert!(
        extract.status.success(),
        "extract command failed: {}",
        String::from_utf8_lossy(&extract.stderr)
    );
    assert_eq!(fs::read(extracted.join("a.txt"))?, b"hello");
    assert_eq!(fs::read(extracted.join("b.txt"))?, b"");

    Ok(())
}

#[test]
fn wrong_password_exits_with_failure() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    fs::write(work.path().join("secret.txt"), b"data")?;

    let create = run_in(
        work.path(),
        &["create", "--password", "right", "--salt", "00", "secret.txt"],
    )?;
    assert!(create.status.success());
    assert!(work.path().join("archive.seaf").exists());

    let out = work.path().join("out");
    fs::create_dir(&out)?;
    let extract = run_in(
        work.path(),
        &[
            "extract",
            "--password",
            "wrong",
            "--salt",
            "00",
            "--output-dir",
            out.to_str().unwrap(),
        ],
    )?;
    assert!(!extract.status.success());
    let stderr = String::from_utf8(extract.stderr)?;
    assert!(stderr.contains("Error: Authentication failed"), "{}", stderr);
    assert_eq!(fs::read_dir(&out)?.count(), 0);
    Ok(())
}

#[test]
fn generated_salt_is_printed_and_usable() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    fs::write(work.path().join("data.bin"), b"generated salt payload")?;

    let create = run_in(
        work.path(),
        &[
            "create",
            "--password",
            "pw",
            "--generate-salt",
            "--salt-length",
            "8",
            "--level",
            "9",
            "--stats",
            "data.bin",
        ],
    )?;
    assert!(
        create.status.success(),
        "create failed: {}",
        String::from_utf8_lossy(&create.stderr)
    );
    let stdout = String::from_utf8(create.stdout)?;
    let salt = stdout
        .lines()
        .find_map(|l| l.strip_prefix("Generated salt (hex): "))
        .expect("salt line")
        .to_string();
    assert_eq!(salt.len(), 16);
    assert!(stdout.contains("Entropy:"));

    fs::remove_file(work.path().join("data.bin"))?;
    let extract = run_in(
        work.path(),
        &["extract", "--password", "pw", "--salt", &salt],
    )?;
    assert!(extract.status.success());
    assert_eq!(
        fs::read(work.path().join("data.bin"))?,
        b"generated salt payload"
    );
    Ok(())
}

#[test]
fn invalid_arguments_are_reported() -> Result<(), Box<dyn Error>> {
    let work = tempdir()?;
    fs::write(work.path().join("f.txt"), b"x")?;

    let bad_level = run_in(
        work.path(),
        &["create", "--password", "pw", "--salt", "aa", "--level", "-1", "f.txt"],
    )?;
    assert!(!bad_level.status.success());
    assert!(String::from_utf8(bad_level.stderr)?.contains("invalid compression level"));

    let directory = run_in(
        work.path(),
        &["create", "--password", "pw", "--salt", "aa", "."],
    )?;
    assert!(!directory.status.success());
    assert!(String::from_utf8(directory.stderr)?.contains("directories are not supported"));

    let bad_salt = run_in(
        work.path(),
        &["create", "--password", "pw", "--salt", "qq", "f.txt"],
    )?;
    assert!(!bad_salt.status.success());
    assert!(String::from_utf8(bad_salt.stderr)?.contains("Invalid salt"));

    assert!(!work.path().join("archive.seaf").exists());
    Ok(())
}

#[test]
fn version_and_help() -> Result<(), Box<dyn Error>> {
    let version = seaf_command().arg("--version").output()?;
    assert!(version.status.success());
    assert!(String::from_utf8(version.stdout)?.starts_with("seaf "));

    let help = seaf_command().output()?;
    assert!(help.status.success());
    let stdout = String::from_utf8(help.stdout)?;
    assert!(stdout.contains("Usage: seaf"), "{}", stdout);
    assert!(stdout.contains("Commands:"), "{}", stdout);
    Ok(())
}

#[test]
fn salt_command_prints_hex() -> Result<(), Box<dyn Error>> {
    let output = seaf_command().args(["salt", "--length", "4"]).output()?;
    assert!(output.status.success());
    let salt = String::from_utf8(output.stdout)?;
    let salt = salt.trim();
    assert_eq!(salt.len(), 8);
    assert!(salt.chars().all(|c| c.is_ascii_hexdigit()));

    let zero = seaf_command().args(["salt", "--length", "0"]).output()?;
    assert!(!zero.status.success());
    Ok(())
}
