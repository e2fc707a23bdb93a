// Persisted user state: display preferences and unlocked achievements.
// Each lives in its own JSON file under the app data directory.
// Last write wins; there is no schema versioning.

pub mod achievements;
pub mod preferences;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub use achievements::{Achievement, AchievementBook, UnlockRecord};
pub use preferences::{PreferenceChange, Preferences, Theme};

pub const PREFERENCES_FILE: &str = "settings.json";
pub const ACHIEVEMENTS_FILE: &str = "achievements.json";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// File-backed store rooted at one directory.
///
/// Commands run concurrently, so every load-modify-write cycle holds
/// `io` for its whole duration; two unlocks never overwrite each other.
pub struct PrefsStore {
    dir: PathBuf,
    io: Mutex<()>,
}

impl PrefsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            io: Mutex::new(()),
        }
    }

    // ===== Preferences =====

    pub async fn load_preferences(&self) -> Result<Preferences, PrefsError> {
        let _io = self.io.lock().await;
        self.read_preferences().await
    }

    /// Load, apply one change, write back, return the result
    pub async fn update_preferences(
        &self,
        change: &PreferenceChange,
    ) -> Result<Preferences, PrefsError> {
        let _io = self.io.lock().await;
        let mut prefs = self.read_preferences().await?;
        prefs.apply(change);
        self.write_json(PREFERENCES_FILE, &prefs).await?;
        info!(?change, "preferences updated");
        Ok(prefs)
    }

    // ===== Achievements =====

    /// Load the book. With no file at all this is a first visit, so
    /// `first_boot` is unlocked and saved straight away.
    pub async fn load_achievements(&self) -> Result<AchievementBook, PrefsError> {
        let _io = self.io.lock().await;
        self.read_achievements().await
    }

    /// Unlock and persist. `None` when already unlocked or unknown.
    pub async fn unlock(&self, id: &str) -> Result<Option<Achievement>, PrefsError> {
        let _io = self.io.lock().await;
        let mut book = self.read_achievements().await?;
        let unlocked = book.unlock(id, now_millis());
        if unlocked.is_some() {
            self.write_json(ACHIEVEMENTS_FILE, book.records()).await?;
            info!(id, "achievement unlocked");
        }
        Ok(unlocked)
    }

    async fn read_preferences(&self) -> Result<Preferences, PrefsError> {
        Ok(self
            .read_json(PREFERENCES_FILE)
            .await?
            .unwrap_or_default())
    }

    async fn read_achievements(&self) -> Result<AchievementBook, PrefsError> {
        match self.read_json::<Vec<UnlockRecord>>(ACHIEVEMENTS_FILE).await? {
            Some(records) => Ok(AchievementBook::from_records(records)),
            None => {
                let mut book = AchievementBook::default();
                book.unlock("first_boot", now_millis());
                self.write_json(ACHIEVEMENTS_FILE, book.records()).await?;
                Ok(book)
            }
        }
    }

    // ===== Plumbing =====

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        file: &str,
    ) -> Result<Option<T>, PrefsError> {
        let path = self.dir.join(file);
        let read = tokio::fs::read(&path).await;
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(PrefsError::Io { path, source }),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| {
                warn!(path = %path.display(), "stored json is corrupt");
                PrefsError::Corrupt { path, source }
            })
    }

    async fn write_json<T: serde::Serialize + ?Sized>(
        &self,
        file: &str,
        value: &T,
    ) -> Result<(), PrefsError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| PrefsError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(file);
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| PrefsError::Corrupt {
            path: path.clone(),
            source,
        })?;
        let written = tokio::fs::write(&path, bytes).await;
        written.map_err(|source| PrefsError::Io { path, source })
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_preferences_default_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path());

        assert_eq!(store.load_preferences().await.unwrap(), Preferences::default());
        // Reading alone does not create the file
        assert!(!dir.path().join(PREFERENCES_FILE).exists());
    }

    #[tokio::test]
    async fn test_preferences_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("nested"));

        store
            .update_preferences(&PreferenceChange::SetTheme(Theme::Matrix))
            .await
            .unwrap();
        let prefs = store
            .update_preferences(&PreferenceChange::ToggleSound)
            .await
            .unwrap();
        assert_eq!(prefs.theme, Theme::Matrix);
        assert!(!prefs.sound_enabled);

        let reloaded = PrefsStore::new(dir.path().join("nested"))
            .load_preferences()
            .await
            .unwrap();
        assert_eq!(reloaded, prefs);
    }

    #[tokio::test]
    async fn test_stored_preferences_merge_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE), r#"{"wallpaperIndex": 2}"#).unwrap();

        let prefs = PrefsStore::new(dir.path()).load_preferences().await.unwrap();
        assert_eq!(prefs.wallpaper_index, 2);
        assert!(prefs.sound_enabled);
    }

    #[tokio::test]
    async fn test_corrupt_preferences_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PREFERENCES_FILE), "{not json").unwrap();

        let err = PrefsStore::new(dir.path()).load_preferences().await.unwrap_err();
        assert!(matches!(err, PrefsError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_first_visit_unlocks_first_boot() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path());

        let book = store.load_achievements().await.unwrap();
        assert!(book.is_unlocked("first_boot"));
        assert!(dir.path().join(ACHIEVEMENTS_FILE).exists());

        // Second load reads the file back rather than unlocking again
        let again = store.load_achievements().await.unwrap();
        assert_eq!(again, book);
    }

    #[tokio::test]
    async fn test_existing_file_does_not_unlock_first_boot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ACHIEVEMENTS_FILE), "[]").unwrap();

        let book = PrefsStore::new(dir.path()).load_achievements().await.unwrap();
        assert_eq!(book.unlocked_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_unlocks_all_persist() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path());

        let (konami, gamer, book) = tokio::join!(
            store.unlock("konami"),
            store.unlock("gamer"),
            store.load_achievements()
        );
        assert!(konami.unwrap().is_some());
        assert!(gamer.unwrap().is_some());
        book.unwrap();

        let reloaded = PrefsStore::new(dir.path()).load_achievements().await.unwrap();
        assert!(reloaded.is_unlocked("konami"));
        assert!(reloaded.is_unlocked("gamer"));
        assert!(reloaded.is_unlocked("first_boot"));
        assert_eq!(reloaded.unlocked_count(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_both_apply() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path());

        let (first, second) = tokio::join!(
            store.update_preferences(&PreferenceChange::ToggleSound),
            store.update_preferences(&PreferenceChange::ToggleSound)
        );
        first.unwrap();
        second.unwrap();

        let prefs = store.load_preferences().await.unwrap();
        assert!(prefs.sound_enabled);
    }

    #[tokio::test]
    async fn test_unlock_persists_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefsStore::new(dir.path());

        let unlocked = store.unlock("konami").await.unwrap();
        assert_eq!(unlocked.map(|a| a.def.id), Some("konami"));
        assert!(store.unlock("konami").await.unwrap().is_none());
        assert!(store.unlock("nope").await.unwrap().is_none());

        let book = store.load_achievements().await.unwrap();
        assert!(book.is_unlocked("konami"));
        assert!(book.is_unlocked("first_boot"));
        assert_eq!(book.unlocked_count(), 2);
    }
}
