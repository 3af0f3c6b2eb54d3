use crate::commands::session::Session;
use crate::error::Result;
use crate::ui as output;

/// Remove `key` from the parameter file. Keys that only exist in the
/// defaults cannot be removed.
pub fn run(session: &mut Session, key: &str) -> Result<()> {
    session.config.remove(key)?;

    let target = session.write_back()?;
    output::success(&format!("Removed {} from '{}'", key, target.display()));

    if let Some(origin) = session.config.origin(key)? {
        output::info(&format!("{} now resolves from {}", key, origin.as_str()));
    }
    Ok(())
}
