use anyhow::Result;
use std::{
    fs,
    process::{Command, Output},
};
use tempfile::TempDir;

/// Exit status as the signed value the binary passed to `exit`.
fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("exited normally") as u8 as i8 as i32
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn hwsim(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_hwsim"))
        .args(args)
        .arg("--quiet")
        .output()?)
}

fn hwsim_with_config(json: &str, args: &[&str]) -> Result<Output> {
    let dir = TempDir::new()?;
    let path = dir.path().join("sim.json");
    fs::write(&path, json)?;
    let path = path.to_string_lossy().into_owned();
    let mut all = vec![path.as_str()];
    all.extend_from_slice(args);
    hwsim(&all)
}

#[test]
fn test_hwsim_without_config_prints_usage() -> Result<()> {
    let output = hwsim(&[])?;
    assert_eq!(exit_code(&output), -1);
    let out = stdout(&output);
    assert!(out.contains("Hardware Simulation Starting..."));
    assert!(out.contains("Usage:"));
    Ok(())
}

#[test]
fn test_hwsim_bad_config() -> Result<()> {
    let output = hwsim(&["/nonexistent/sim.json"])?;
    assert_eq!(exit_code(&output), -1);

    let output = hwsim_with_config("{ not json", &[])?;
    assert_eq!(exit_code(&output), -1);

    let output = hwsim_with_config(r#"{ "unknown_field": 1 }"#, &[])?;
    assert_eq!(exit_code(&output), -1);
    assert!(!stdout(&output).contains("Simulation completed successfully"));
    Ok(())
}

#[test]
fn test_hwsim_init_failure_exit_codes() -> Result<()> {
    let output = hwsim_with_config(r#"{ "platform": { "mmio_base": 3 } }"#, &[])?;
    assert_eq!(exit_code(&output), -2);
    assert!(stdout(&output).contains("Hardware initialization failed"));

    let output = hwsim_with_config(
        r#"{ "platform": { "main_memory_size": 18446744073709551615 } }"#,
        &[],
    )?;
    assert_eq!(exit_code(&output), -1);
    assert!(stdout(&output).contains("Hardware initialization failed"));
    Ok(())
}

#[test]
fn test_hwsim_success() -> Result<()> {
    let output = hwsim_with_config(r#"{ "cycles": 50 }"#, &["--json"])?;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("\"cycles_run\": 50"));
    assert!(out.ends_with("Simulation completed successfully\n"));
    Ok(())
}

#[test]
fn test_callchain_program_output() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_callchain"))
        .arg("--quiet")
        .output()?;
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Starting callgrind test program\n\
         After main_func1: counter = 5\n\
         After asm_func2: counter = 18\n\
         After chain_func1: counter = 16\n\
         After asm_func4: counter = 19\n"
    );
    Ok(())
}

#[test]
fn test_callchain_single_entry() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_callchain"))
        .args(["--quiet", "--entry", "asm_func2", "--counter", "14"])
        .output()?;
    assert!(output.status.success());
    assert_eq!(stdout(&output), "After asm_func2: counter = 18\n");
    Ok(())
}
