use crate::configuration::Configuration;
use crate::error::Result;
use crate::ui as output;
use std::path::Path;

pub fn run(config: &Configuration, path: &Path) -> Result<()> {
    config.dump(path)?;
    output::success(&format!("Parameters written to '{}'", path.display()));
    Ok(())
}
