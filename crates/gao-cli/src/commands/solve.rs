use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

pub fn handle(input: &Path, output: &Path) -> Result<()> {
    info!(input = %input.display(), output = %output.display(), "solving GPU allocation problem");
    gao_io::solve_to_file(input, output)
        .with_context(|| format!("solving {} -> {}", input.display(), output.display()))?;
    println!("Results written to {}", output.display());
    Ok(())
}
