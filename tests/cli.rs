use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use stegseal::header::OutputFormat;
use stegseal::{write_carrier, Carrier};
use tempfile::tempdir;

fn stegseal_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_stegseal"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(stegseal_command().args(args).output()?)
}

fn write_cover(path: &Path, width: u32, height: u32) -> Result<(), Box<dyn Error>> {
    let len = (width * height * 3) as usize;
    let bytes: Vec<u8> = (0..len).map(|i| (i * 7 % 256) as u8).collect();
    let carrier = Carrier::new(width, height, 3, bytes)?;
    write_carrier(path, &carrier, OutputFormat::Png)?;
    Ok(())
}

#[test]
fn cli_end_to_end_flow() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.png");
    write_cover(&cover, 64, 64)?;

    let hide = run(&[
        "hide",
        "--password",
        "hunter2",
        "--message",
        "meet at dawn",
        cover.to_str().unwrap(),
        stego.to_str().unwrap(),
    ])?;
    assert!(
        hide.status.success(),
        "hide command failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );
    assert!(
        String::from_utf8(hide.stdout.clone())?.contains("Hidden 12 bytes"),
        "hide output missing confirmation"
    );
    assert!(stego.exists(), "stego image should exist after hide");

    let reveal = run(&["reveal", "--password", "hunter2", stego.to_str().unwrap()])?;
    assert!(
        reveal.status.success(),
        "reveal command failed: {}",
        String::from_utf8_lossy(&reveal.stderr)
    );
    assert_eq!(String::from_utf8(reveal.stdout)?.trim_end(), "meet at dawn");

    let wrong = run(&["reveal", "--password", "wrong", stego.to_str().unwrap()])?;
    assert!(!wrong.status.success(), "wrong password must fail");
    assert!(
        String::from_utf8_lossy(&wrong.stderr).contains("Authentication failed"),
        "unexpected error: {}",
        String::from_utf8_lossy(&wrong.stderr)
    );

    Ok(())
}

#[test]
fn hide_defaults_output_path() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    write_cover(&cover, 32, 32)?;

    let hide = run(&[
        "hide",
        "--password",
        "pw",
        "-m",
        "hello",
        cover.to_str().unwrap(),
    ])?;
    assert!(
        hide.status.success(),
        "hide command failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );

    let expected = dir.path().join("cover.stego.png");
    assert!(
        expected.exists(),
        "expected stego image {} to be created automatically",
        expected.display()
    );

    Ok(())
}

#[test]
fn hide_reads_message_file_and_reveal_writes_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let message = dir.path().join("message.txt");
    let stego = dir.path().join("stego.bmp");
    let recovered = dir.path().join("recovered.txt");
    write_cover(&cover, 64, 64)?;
    fs::write(&message, "multi\nline\nmessage ✉️")?;

    let hide = run(&[
        "hide",
        "--password",
        "pw",
        "--message-file",
        message.to_str().unwrap(),
        cover.to_str().unwrap(),
        stego.to_str().unwrap(),
    ])?;
    assert!(
        hide.status.success(),
        "hide command failed: {}",
        String::from_utf8_lossy(&hide.stderr)
    );

    let reveal = run(&[
        "reveal",
        "--password",
        "pw",
        stego.to_str().unwrap(),
        "--output",
        recovered.to_str().unwrap(),
    ])?;
    assert!(
        reveal.status.success(),
        "reveal command failed: {}",
        String::from_utf8_lossy(&reveal.stderr)
    );
    assert_eq!(fs::read_to_string(&recovered)?, fs::read_to_string(&message)?);

    Ok(())
}

#[test]
fn hide_rejects_lossy_output() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    let stego = dir.path().join("stego.jpg");
    write_cover(&cover, 32, 32)?;

    let hide = run(&[
        "hide",
        "--password",
        "pw",
        "-m",
        "hello",
        cover.to_str().unwrap(),
        stego.to_str().unwrap(),
    ])?;
    assert!(!hide.status.success(), "lossy output must be refused");
    assert!(!stego.exists());

    Ok(())
}

#[test]
fn reveal_clean_image_reports_not_found() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("clean.png");
    let carrier = Carrier::new(32, 32, 3, vec![64u8; 32 * 32 * 3])?;
    write_carrier(&cover, &carrier, OutputFormat::Png)?;

    let reveal = run(&["reveal", "--password", "pw", cover.to_str().unwrap()])?;
    assert!(!reveal.status.success());
    assert!(
        String::from_utf8_lossy(&reveal.stderr).contains("No hidden message found"),
        "unexpected error: {}",
        String::from_utf8_lossy(&reveal.stderr)
    );

    Ok(())
}

#[test]
fn info_reports_capacity() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cover = dir.path().join("cover.png");
    write_cover(&cover, 40, 30)?;

    let info = run(&["info", cover.to_str().unwrap()])?;
    let stdout = String::from_utf8(info.stdout)?;
    assert!(stdout.contains("Dimensions: 40x30"));
    assert!(stdout.contains("Carrier bits: 3600"));

    let json = run(&["info", "--json", cover.to_str().unwrap()])?;
    let value: serde_json::Value = serde_json::from_slice(&json.stdout)?;
    assert_eq!(value["max_message_bytes"], 319);

    Ok(())
}

#[test]
fn version_flag_prints_build_information() -> Result<(), Box<dyn Error>> {
    let output = run(&["--version"])?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("stegseal "),
        "unexpected version line: {}",
        stdout
    );
    assert!(stdout.contains("build"));

    Ok(())
}

#[test]
fn running_without_subcommand_displays_help() -> Result<(), Box<dyn Error>> {
    let output = stegseal_command().output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: stegseal"), "help missing usage: {}", stdout);
    assert!(stdout.contains("Commands:"));

    Ok(())
}
