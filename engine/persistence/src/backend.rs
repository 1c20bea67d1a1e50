//! Team store trait and implementations

use crate::config::PersistenceConfig;
use crate::error::{PersistenceError, Result};
use lineup_validator::SavedLineup;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Storage for the single saved team
///
/// Every save overwrites the previous snapshot; `load` returns exactly what
/// was last saved.
#[async_trait::async_trait]
pub trait TeamStore: Send + Sync {
    /// Replace the stored snapshot
    async fn save(&self, lineup: &SavedLineup) -> Result<()>;

    /// Load the stored snapshot, `None` when nothing has been saved
    async fn load(&self) -> Result<Option<SavedLineup>>;

    /// Remove the stored snapshot
    async fn clear(&self) -> Result<()>;
}

/// JSON file backed team store
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a reader never sees a half-written snapshot.
pub struct FileTeamStore {
    config: PersistenceConfig,
    path: PathBuf,
    write_lock: tokio::sync::Mutex<()>,
}

impl FileTeamStore {
    pub fn new(config: PersistenceConfig) -> Result<Self> {
        config.validate().map_err(PersistenceError::config)?;
        let path = config.team_file();
        Ok(Self { config, path, write_lock: tokio::sync::Mutex::new(()) })
    }

    /// Create a store with the default file name inside `data_dir`
    pub fn with_default_config(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::new(PersistenceConfig::new(data_dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &PersistenceConfig {
        &self.config
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.config.file_name.clone();
        name.push_str(".tmp");
        self.config.data_dir.join(name)
    }
}

#[async_trait::async_trait]
impl TeamStore for FileTeamStore {
    async fn save(&self, lineup: &SavedLineup) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        tokio::fs::create_dir_all(&self.config.data_dir).await?;

        let bytes = serde_json::to_vec_pretty(lineup)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, &bytes).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        tracing::info!(
            "Saved team with {} players to {:?} ({} remaining)",
            lineup.players.len(),
            self.path,
            lineup.remaining_budget
        );

        Ok(())
    }

    async fn load(&self) -> Result<Option<SavedLineup>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No saved team at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let lineup = serde_json::from_str(&contents)?;
        Ok(Some(lineup))
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Cleared saved team at {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory team store (for testing)
#[derive(Default)]
pub struct InMemoryTeamStore {
    slot: RwLock<Option<SavedLineup>>,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TeamStore for InMemoryTeamStore {
    async fn save(&self, lineup: &SavedLineup) -> Result<()> {
        *self.slot.write().await = Some(lineup.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<SavedLineup>> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fantasy_scoring::{PlayerStats, PositionCode};
    use lineup_validator::Player;
    use tempfile::TempDir;

    fn lineup(remaining: u32) -> SavedLineup {
        SavedLineup {
            players: vec![Player {
                id: 8478402,
                name: "Connor McDavid".to_string(),
                position: PositionCode::Center,
                team: "EDM".to_string(),
                price: 200 - remaining,
                headshot: None,
                stats: PlayerStats::zeroed(PositionCode::Center),
            }],
            total_budget: 200,
            remaining_budget: remaining,
            last_updated: Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_file_store_empty_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTeamStore::with_default_config(temp_dir.path()).unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTeamStore::with_default_config(temp_dir.path().join("nested")).unwrap();

        store.save(&lineup(150)).await.unwrap();
        assert!(store.path().exists());

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, Some(lineup(150)));
    }

    #[tokio::test]
    async fn test_file_store_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTeamStore::with_default_config(temp_dir.path()).unwrap();

        store.save(&lineup(150)).await.unwrap();
        store.save(&lineup(20)).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.remaining_budget, 20);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_file_store_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTeamStore::with_default_config(temp_dir.path()).unwrap();

        store.clear().await.unwrap();
        store.save(&lineup(150)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTeamStore::with_default_config(temp_dir.path()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(PersistenceError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryTeamStore::new();
        assert!(store.load().await.unwrap().is_none());

        store.save(&lineup(100)).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(lineup(100)));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PersistenceConfig { file_name: String::new(), ..Default::default() };
        assert!(FileTeamStore::new(config).is_err());
    }
}
