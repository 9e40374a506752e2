use anyhow::{Context, Result};
use std::fs;

pub fn read_to_string(path: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

pub fn write_string(path: &str, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path))
}
