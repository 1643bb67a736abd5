//! Tests for the command-line front end
//!
//! Tests are organized by topic:
//! - `model_files` - Loading models from YAML and JSON files
//! - `commands` - Evaluate and chart over loaded models


use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// One year of a salary, rent and a growing ISA
pub const HOUSEHOLD_YAML: &str = r#"
settings:
  - name: Start of view range
    value: "2018-01-01"
  - name: End of view range
    value: "2019-01-01"
  - name: cpi
    value: "0"
assets:
  - name: Cash
    start: "2018-01-01"
    value: 1000
  - name: ISA
    start: "2018-01-01"
    value: 5000
    growth: "5"
    category: Investments
incomes:
  - name: Salary
    start: "2018-01-01"
    end: "2019-01-01"
    value: 2000
    category: Work
expenses:
  - name: Rent
    start: "2018-01-01"
    end: "2019-01-01"
    value: 800
    category: Housing
"#;

/// Write `content` to `name` inside a fresh temporary directory
pub fn model_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}
