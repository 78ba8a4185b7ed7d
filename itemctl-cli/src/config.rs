//! Environment loading

use std::path::PathBuf;

/// Load `.env` from the current directory (or a parent).
///
/// Runs before argument parsing so `env`-backed flags see the values;
/// variables already present in the environment take precedence.
/// Returns the file that was loaded, `None` when there is no `.env`.
pub fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}
