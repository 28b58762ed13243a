use std::path::Path;

use crate::error::Result;
use crate::model::Roadmap;

/// Save a roadmap to a JSON file.
pub fn save_roadmap(roadmap: &Roadmap, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(roadmap)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a roadmap from a JSON file.
pub fn load_roadmap(path: &Path) -> Result<Roadmap> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
