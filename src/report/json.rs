use crate::error::Result;
use serde::Serialize;
use std::path::Path;

pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, to_json(value)?)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn write_text<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, text)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
