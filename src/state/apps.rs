// Declarative table of the apps the desktop can launch.
// Adding an app means adding one entry here; nothing else branches on ids.

use super::window::Size;
use serde::Serialize;

/// Everything needed to create a window for an app the first time it opens
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub id: &'static str,
    /// Title bar text
    pub title: &'static str,
    /// Label for the start menu and pinned taskbar tooltip
    pub label: &'static str,
    pub icon: &'static str,
    /// Key the frontend uses to pick the content component
    pub content_key: &'static str,
    pub default_size: Size,
    /// Shown as a pinned launcher on the taskbar
    pub pinned: bool,
    /// File-style label under the desktop icon, if the app has one
    pub desktop_icon: Option<&'static str>,
}

const DEFAULT_SIZE: Size = Size::new(800.0, 550.0);

pub const APP_CATALOG: &[AppDescriptor] = &[
    AppDescriptor {
        id: "about",
        title: "about_me.exe",
        label: "About Me",
        icon: "user",
        content_key: "APP_ABOUT",
        default_size: DEFAULT_SIZE,
        pinned: true,
        desktop_icon: Some("About_Me.exe"),
    },
    AppDescriptor {
        id: "projects",
        title: "projects/",
        label: "Projects",
        icon: "folder-open",
        content_key: "APP_PROJECTS",
        default_size: Size::new(900.0, 600.0),
        pinned: true,
        desktop_icon: Some("Projects.dir"),
    },
    AppDescriptor {
        id: "resume",
        title: "resume.pdf",
        label: "Resume",
        icon: "file-code",
        content_key: "APP_RESUME",
        default_size: DEFAULT_SIZE,
        pinned: true,
        desktop_icon: Some("Resume.pdf"),
    },
    AppDescriptor {
        id: "terminal",
        title: "terminal@hokei:~$",
        label: "Terminal",
        icon: "terminal",
        content_key: "APP_TERMINAL",
        default_size: Size::new(700.0, 450.0),
        pinned: true,
        desktop_icon: Some("Terminal.sh"),
    },
    AppDescriptor {
        id: "contact",
        title: "contact.msg",
        label: "Contact",
        icon: "mail",
        content_key: "APP_CONTACT",
        default_size: Size::new(500.0, 450.0),
        pinned: true,
        desktop_icon: Some("Contact.msg"),
    },
    AppDescriptor {
        id: "music",
        title: "music.player",
        label: "Music",
        icon: "music",
        content_key: "APP_MUSIC",
        default_size: Size::new(720.0, 520.0),
        pinned: false,
        desktop_icon: Some("Music.app"),
    },
    AppDescriptor {
        id: "games",
        title: "arcade.exe",
        label: "Games",
        icon: "gamepad",
        content_key: "APP_GAMES",
        default_size: Size::new(640.0, 560.0),
        pinned: false,
        desktop_icon: Some("Games.exe"),
    },
    AppDescriptor {
        id: "settings",
        title: "settings.cfg",
        label: "Settings",
        icon: "settings",
        content_key: "APP_SETTINGS",
        default_size: Size::new(600.0, 500.0),
        pinned: true,
        desktop_icon: None,
    },
    // Only reachable through the secret key sequence
    AppDescriptor {
        id: "travels",
        title: "travels.log",
        label: "Travels",
        icon: "globe",
        content_key: "APP_TRAVELS",
        default_size: Size::new(960.0, 640.0),
        pinned: false,
        desktop_icon: None,
    },
];

pub fn lookup(app_id: &str) -> Option<&'static AppDescriptor> {
    APP_CATALOG.iter().find(|app| app.id == app_id)
}

pub fn desktop_icons() -> impl Iterator<Item = &'static AppDescriptor> {
    APP_CATALOG.iter().filter(|app| app.desktop_icon.is_some())
}

pub fn pinned_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    APP_CATALOG.iter().filter(|app| app.pinned)
}

/// Apps a visitor can reach without knowing the secret
pub fn discoverable_apps() -> impl Iterator<Item = &'static AppDescriptor> {
    APP_CATALOG
        .iter()
        .filter(|app| app.pinned || app.desktop_icon.is_some())
}
