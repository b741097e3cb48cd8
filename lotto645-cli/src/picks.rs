use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Grilles en attente pour un tirage à venir. Un seul jeu à la fois :
/// chaque génération écrase le précédent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickSet {
    pub target_draw_no: u32,
    pub generated_at: String,
    pub picks: Vec<[u8; 6]>,
}

pub fn picks_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("picks.json");
    path
}

pub fn save_picks(pick_set: &PickSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(pick_set)?;
    std::fs::write(path, json)
        .with_context(|| format!("Impossible d'écrire {:?}", path))?;
    Ok(())
}

pub fn load_picks(path: &Path) -> Result<PickSet> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let pick_set: PickSet = serde_json::from_str(&json)
        .with_context(|| format!("Contenu invalide dans {:?}", path))?;
    Ok(pick_set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickset_json_roundtrip() {
        let pick_set = PickSet {
            target_draw_no: 1101,
            generated_at: "2026-08-04 10:30".to_string(),
            picks: vec![[3, 11, 18, 24, 35, 42], [5, 6, 14, 22, 33, 44]],
        };
        let json = serde_json::to_string(&pick_set).unwrap();
        let loaded: PickSet = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.target_draw_no, 1101);
        assert_eq!(loaded.picks.len(), 2);
        assert_eq!(loaded.picks[1], [5, 6, 14, 22, 33, 44]);
    }

    #[test]
    fn test_load_picks_missing_file() {
        assert!(load_picks(Path::new("nulle-part/picks.json")).is_err());
    }
}
