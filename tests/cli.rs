use std::error::Error;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn coltrans_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_coltrans"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(coltrans_command().args(args).output()?)
}

#[test]
fn cli_encrypt_decrypt_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("cipher.txt");
    let recovered = dir.path().join("recovered.txt");

    fs::write(&input, "thequickbrownfoxjumpedoverthelazydogs")?;

    let encrypt = run(&[
        "encrypt",
        "--key",
        "2123",
        input.to_str().unwrap(),
        sealed.to_str().unwrap(),
    ])?;
    assert!(
        encrypt.status.success(),
        "encrypt command failed: {}",
        String::from_utf8_lossy(&encrypt.stderr)
    );
    assert!(String::from_utf8(encrypt.stdout)?.contains("Encrypted 37 symbols"));

    let decrypt = run(&[
        "d",
        "--key",
        "2123",
        sealed.to_str().unwrap(),
        recovered.to_str().unwrap(),
    ])?;
    assert!(
        decrypt.status.success(),
        "decrypt command failed: {}",
        String::from_utf8_lossy(&decrypt.stderr)
    );

    assert_eq!(fs::read(&recovered)?, fs::read(&input)?);
    Ok(())
}

#[test]
fn cli_profile_and_info() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let profile = dir.path().join("profile.json");
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("cipher.txt");
    fs::write(&input, "attackatdawn")?;

    let write = run(&[
        "profile",
        "--key",
        "Zebra",
        "--strict",
        "--pad",
        "random",
        "--seed",
        "4",
        "--alphabet",
        "lower,numbers",
        profile.to_str().unwrap(),
    ])?;
    assert!(
        write.status.success(),
        "profile command failed: {}",
        String::from_utf8_lossy(&write.stderr)
    );

    let info = run(&["info", profile.to_str().unwrap()])?;
    let info_stdout = String::from_utf8(info.stdout)?;
    assert!(info_stdout.contains("Key columns: zebra"));
    assert!(info_stdout.contains("Alphabet: lower,numbers (36 symbols)"));
    assert!(info_stdout.contains("Padding: Random"));

    let encrypt = run(&[
        "e",
        "--profile",
        profile.to_str().unwrap(),
        input.to_str().unwrap(),
        sealed.to_str().unwrap(),
    ])?;
    assert!(encrypt.status.success());
    assert_eq!(fs::read_to_string(&sealed)?.chars().count(), 15);
    Ok(())
}

#[test]
fn cli_reports_errors() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("plain.txt");
    let sealed = dir.path().join("cipher.txt");
    fs::write(&input, "Hello")?;

    let missing_key = run(&["encrypt", input.to_str().unwrap(), sealed.to_str().unwrap()])?;
    assert!(!missing_key.status.success());
    assert!(String::from_utf8(missing_key.stderr)?.contains("key is empty"));

    let caesar = run(&[
        "encrypt",
        "--cipher",
        "caesar",
        "--key",
        "3",
        input.to_str().unwrap(),
        sealed.to_str().unwrap(),
    ])?;
    assert!(!caesar.status.success());

    let version = run(&["--version"])?;
    assert!(String::from_utf8(version.stdout)?.starts_with("coltrans "));
    Ok(())
}

#[test]
fn cli_without_command_prints_help() -> Result<(), Box<dyn Error>> {
    let output = run(&[])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("encrypt"));
    Ok(())
}
