use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Modern,
    Cyberpunk,
    Matrix,
    Synthwave,
}

/// Display preferences. Keys missing from storage take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub theme: Theme,
    pub sound_enabled: bool,
    pub scanlines_enabled: bool,
    pub wallpaper_index: u32,
    pub boot_skipped: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Modern,
            sound_enabled: true,
            scanlines_enabled: true,
            wallpaper_index: 0,
            boot_skipped: false,
        }
    }
}

/// One edit from the settings panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PreferenceChange {
    SetTheme(Theme),
    ToggleSound,
    ToggleScanlines,
    SetWallpaperIndex(u32),
    SetBootSkipped(bool),
}

impl Preferences {
    pub fn apply(&mut self, change: &PreferenceChange) {
        match change {
            PreferenceChange::SetTheme(theme) => self.theme = *theme,
            PreferenceChange::ToggleSound => self.sound_enabled = !self.sound_enabled,
            PreferenceChange::ToggleScanlines => self.scanlines_enabled = !self.scanlines_enabled,
            PreferenceChange::SetWallpaperIndex(index) => self.wallpaper_index = *index,
            PreferenceChange::SetBootSkipped(skipped) => self.boot_skipped = *skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let prefs: Preferences =
            serde_json::from_value(json!({ "theme": "matrix", "soundEnabled": false })).unwrap();

        assert_eq!(
            prefs,
            Preferences {
                theme: Theme::Matrix,
                sound_enabled: false,
                ..Preferences::default()
            }
        );
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "theme": "modern",
                "soundEnabled": true,
                "scanlinesEnabled": true,
                "wallpaperIndex": 0,
                "bootSkipped": false
            })
        );
    }

    #[test]
    fn test_apply_changes() {
        let mut prefs = Preferences::default();

        prefs.apply(&PreferenceChange::SetTheme(Theme::Synthwave));
        prefs.apply(&PreferenceChange::ToggleSound);
        prefs.apply(&PreferenceChange::ToggleScanlines);
        prefs.apply(&PreferenceChange::ToggleScanlines);
        prefs.apply(&PreferenceChange::SetWallpaperIndex(3));
        prefs.apply(&PreferenceChange::SetBootSkipped(true));

        assert_eq!(
            prefs,
            Preferences {
                theme: Theme::Synthwave,
                sound_enabled: false,
                scanlines_enabled: true,
                wallpaper_index: 3,
                boot_skipped: true,
            }
        );
    }

    #[test]
    fn test_change_wire_format() {
        let change: PreferenceChange =
            serde_json::from_value(json!({ "type": "setTheme", "value": "cyberpunk" })).unwrap();
        assert_eq!(change, PreferenceChange::SetTheme(Theme::Cyberpunk));

        let change: PreferenceChange =
            serde_json::from_value(json!({ "type": "toggleSound" })).unwrap();
        assert_eq!(change, PreferenceChange::ToggleSound);
    }
}
