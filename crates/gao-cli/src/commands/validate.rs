use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(input: &Path) -> Result<()> {
    gao_io::validate_file(input).with_context(|| format!("validating {}", input.display()))?;
    println!("{} is valid", input.display());
    Ok(())
}
