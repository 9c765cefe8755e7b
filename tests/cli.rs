//! `catalog` binary behavior that does not need an API server.

use std::path::PathBuf;
use std::process::Command;

fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("catalog-cli-{}-{}", std::process::id(), name));
  std::fs::create_dir_all(&dir).unwrap();
  dir
}

// XDG_DATA_HOME only steers dirs::data_dir on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_help_does_not_create_log_directory() {
  let data_home = scratch_dir("help");

  let output = Command::new(env!("CARGO_BIN_EXE_catalog"))
    .arg("--help")
    .env("XDG_DATA_HOME", &data_home)
    .output()
    .unwrap();

  assert!(output.status.success());
  assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
  assert!(!data_home.join("catalog-cache").exists());
  std::fs::remove_dir_all(data_home).ok();
}

#[test]
fn test_usage_error_exits_before_logging() {
  let data_home = scratch_dir("usage");

  let output = Command::new(env!("CARGO_BIN_EXE_catalog"))
    .arg("no-such-command")
    .env("XDG_DATA_HOME", &data_home)
    .output()
    .unwrap();

  assert!(!output.status.success());
  assert!(!data_home.join("catalog-cache").exists());
  std::fs::remove_dir_all(data_home).ok();
}
