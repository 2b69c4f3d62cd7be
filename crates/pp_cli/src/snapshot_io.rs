use anyhow::{Context, Result};
use pp_core::LeagueSnapshot;
use std::fs;
use std::path::Path;

/// Read a league snapshot and check its result rows are unique per (player, week).
pub fn load_snapshot(path: &Path) -> Result<LeagueSnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot: LeagueSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))?;
    snapshot
        .history()
        .with_context(|| format!("Corrupt results in snapshot: {}", path.display()))?;
    tracing::debug!(
        league = %snapshot.league.id,
        players = snapshot.players.len(),
        results = snapshot.results.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &LeagueSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("Failed to encode snapshot")?;
    fs::write(path, json).with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pp_core::{League, RecordedResult, Week, WeekResultRow};
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("league.json");

        let mut snapshot = LeagueSnapshot::new(League::new("lg-1", "tuesday"));
        snapshot.add_player("Robin Park", None, None);
        save_snapshot(&path, &snapshot)?;

        assert_eq!(load_snapshot(&path)?, snapshot);
        Ok(())
    }

    #[test]
    fn test_duplicate_rows_rejected_on_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("league.json");

        let mut snapshot = LeagueSnapshot::new(League::new("lg-1", "tuesday"));
        let id = snapshot.add_player("Robin Park", None, None).expect("new player");
        let row = WeekResultRow::new(id, Week::FIRST, RecordedResult::new(20));
        snapshot.results = vec![row.clone(), row];
        save_snapshot(&path, &snapshot)?;

        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate result"));
        Ok(())
    }

    #[test]
    fn test_points_over_max_rejected_on_load() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("league.json");

        let mut snapshot = LeagueSnapshot::new(League::new("lg-1", "tuesday"));
        let id = snapshot.add_player("Robin Park", None, None).expect("new player");
        snapshot.results = vec![WeekResultRow::new(id, Week::FIRST, RecordedResult::new(90))];
        save_snapshot(&path, &snapshot)?;

        let err = load_snapshot(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid points: 90"));
        Ok(())
    }
}
