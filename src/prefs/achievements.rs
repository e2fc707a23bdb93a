use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_boot",
        title: "Hello World",
        description: "Boot up the system for the first time",
        icon: "👋",
    },
    AchievementDef {
        id: "hacker",
        title: "Script Kiddie",
        description: "Run a command in the Terminal",
        icon: "💻",
    },
    AchievementDef {
        id: "gamer",
        title: "Retro Gamer",
        description: "Play a game",
        icon: "🕹️",
    },
    AchievementDef {
        id: "audiophile",
        title: "Audiophile",
        description: "Listen to some tunes",
        icon: "🎧",
    },
    AchievementDef {
        id: "konami",
        title: "God Mode",
        description: "Enter the secret code",
        icon: "🔓",
    },
    AchievementDef {
        id: "explorer",
        title: "Digital Nomad",
        description: "Open every app",
        icon: "🧭",
    },
];

/// Stored form: only unlocked entries, with their unlock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRecord {
    pub id: String,
    pub unlocked_at: u64, // ms since epoch
}

/// An achievement as the frontend shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    #[serde(flatten)]
    pub def: AchievementDef,
    pub unlocked_at: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementBook {
    unlocked: Vec<UnlockRecord>,
}

impl AchievementBook {
    /// Rebuild from storage, dropping ids the catalog no longer knows
    pub fn from_records(records: Vec<UnlockRecord>) -> Self {
        let mut book = Self::default();
        for record in records {
            if lookup(&record.id).is_some() && !book.is_unlocked(&record.id) {
                book.unlocked.push(record);
            }
        }
        book
    }

    pub fn records(&self) -> &[UnlockRecord] {
        &self.unlocked
    }

    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|r| r.id == id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Unlock `id` at time `now`. Returns the achievement if this call
    /// unlocked it; already-unlocked and unknown ids give `None`.
    pub fn unlock(&mut self, id: &str, now: u64) -> Option<Achievement> {
        let def = lookup(id)?;
        if self.is_unlocked(id) {
            return None;
        }
        self.unlocked.push(UnlockRecord {
            id: id.to_string(),
            unlocked_at: now,
        });
        Some(Achievement {
            def: *def,
            unlocked_at: Some(now),
        })
    }

    /// Whole catalog, in catalog order
    pub fn list(&self) -> Vec<Achievement> {
        ACHIEVEMENTS
            .iter()
            .map(|def| Achievement {
                def: *def,
                unlocked_at: self
                    .unlocked
                    .iter()
                    .find(|r| r.id == def.id)
                    .map(|r| r.unlocked_at),
            })
            .collect()
    }
}

pub fn lookup(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|def| def.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unlock_is_idempotent() {
        let mut book = AchievementBook::default();

        let first = book.unlock("gamer", 1_000).unwrap();
        assert_eq!(first.def.title, "Retro Gamer");
        assert_eq!(first.unlocked_at, Some(1_000));

        assert!(book.unlock("gamer", 2_000).is_none());
        assert_eq!(book.unlocked_count(), 1);
        assert_eq!(book.records()[0].unlocked_at, 1_000);
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut book = AchievementBook::default();
        assert!(book.unlock("speedrunner", 1).is_none());
        assert_eq!(book.unlocked_count(), 0);
    }

    #[test]
    fn test_from_records_filters() {
        let book = AchievementBook::from_records(vec![
            UnlockRecord { id: "konami".into(), unlocked_at: 5 },
            UnlockRecord { id: "retired".into(), unlocked_at: 6 },
            UnlockRecord { id: "konami".into(), unlocked_at: 7 },
        ]);

        assert_eq!(book.unlocked_count(), 1);
        assert!(book.is_unlocked("konami"));
    }

    #[test]
    fn test_list_marks_unlocked() {
        let mut book = AchievementBook::default();
        book.unlock("explorer", 42);

        let list = book.list();
        assert_eq!(list.len(), ACHIEVEMENTS.len());
        assert_eq!(list[0].unlocked_at, None);
        assert_eq!(list[5].unlocked_at, Some(42));
    }

    #[test]
    fn test_stored_format() {
        let mut book = AchievementBook::default();
        book.unlock("first_boot", 1_700_000_000_000);

        assert_eq!(
            serde_json::to_value(book.records()).unwrap(),
            json!([{ "id": "first_boot", "unlockedAt": 1_700_000_000_000u64 }])
        );

        let shown = serde_json::to_value(&book.list()[0]).unwrap();
        assert_eq!(shown["title"], "Hello World");
        assert_eq!(shown["unlockedAt"], 1_700_000_000_000u64);
    }
}
