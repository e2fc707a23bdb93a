// Window manager and desktop state
pub mod state;

// Desktop layout tuning loaded from desktop.toml
pub mod config;

pub mod error;

// Secret key sequence detection
pub mod input;

// Deezer passthrough for the music player
pub mod proxy;

// Preferences and achievements on disk
pub mod prefs;

pub mod log;

// Tauri commands, only built with the webview shell
#[cfg(feature = "desktop")]
mod shell;

#[cfg(feature = "desktop")]
pub use shell::run;
