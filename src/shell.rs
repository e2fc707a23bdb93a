// Tauri commands and app wiring. Everything here is a thin adapter:
// lock the state, call into the library, emit what changed.

use std::sync::Mutex;

use serde::Serialize;
use tauri::{AppHandle, Emitter, Manager, State};
use tauri_plugin_opener::OpenerExt;
use tracing::{debug, info, warn};

use crate::config::DesktopConfig;
use crate::input::SecretSequence;
use crate::prefs::{Achievement, PreferenceChange, Preferences, PrefsStore};
use crate::proxy;
use crate::state::apps::{self, AppDescriptor};
use crate::state::chrome::ChromeEvent;
use crate::state::window::{DesktopSnapshot, Viewport};
use crate::state::{OpenOutcome, WindowManager};

/// App opened by the secret key sequence
const SECRET_APP: &str = "travels";

const QUICK_LINKS: &[(&str, &str)] = &[
    ("github", "https://github.com/hokeiiiching"),
    ("linkedin", "https://linkedin.com/in/ho-kei-ching"),
    ("portfolio", "https://hokeiiiching.vercel.app"),
];

// Event payload types for frontend communication
#[derive(Clone, Serialize)]
struct SecretUnlockedPayload {
    app_id: String,
}

/// Launcher surfaces, derived from the catalog
#[derive(Clone, Serialize)]
struct LauncherCatalog {
    desktop_icons: Vec<AppDescriptor>,
    pinned: Vec<AppDescriptor>,
}

type WmState<'a> = State<'a, Mutex<WindowManager>>;

fn emit_snapshot(app: &AppHandle, snapshot: DesktopSnapshot) -> Result<(), String> {
    app.emit("desktop-changed", snapshot)
        .map_err(|e| e.to_string())
}

fn emit_unlocked(app: &AppHandle, achievement: Option<Achievement>) -> Result<(), String> {
    if let Some(achievement) = achievement {
        info!(id = achievement.def.id, "achievement toast");
        app.emit("achievement-unlocked", achievement)
            .map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Run a mutation and, if it changed anything, push a fresh snapshot
fn mutate<T>(
    app: &AppHandle,
    state: &WmState<'_>,
    op: impl FnOnce(&mut WindowManager) -> Result<T, String>,
    changed: impl FnOnce(&T) -> bool,
) -> Result<T, String> {
    let mut manager = state.lock().map_err(|e| e.to_string())?;
    let result = op(&mut manager)?;
    if changed(&result) {
        emit_snapshot(app, manager.snapshot())?;
    }
    Ok(result)
}

// ===== Window Management Commands =====

/// Desktop icon, start menu or pinned taskbar button
#[tauri::command]
async fn open_app(
    app_id: String,
    app: AppHandle,
    state: WmState<'_>,
    prefs: State<'_, PrefsStore>,
) -> Result<OpenOutcome, String> {
    let (outcome, explored) = {
        let mut manager = state.lock().map_err(|e| e.to_string())?;
        let outcome = manager.open_app(&app_id).map_err(|e| e.to_string())?;
        emit_snapshot(&app, manager.snapshot())?;
        (outcome, manager.has_explored_all())
    };

    if explored {
        let unlocked = prefs.unlock("explorer").await.map_err(|e| e.to_string())?;
        emit_unlocked(&app, unlocked)?;
    }
    Ok(outcome)
}

#[tauri::command]
fn close_window(app_id: String, app: AppHandle, state: WmState<'_>) -> Result<bool, String> {
    mutate(
        &app,
        &state,
        |wm| {
            wm.close(&app_id)
                .map(|removed| removed.is_some())
                .map_err(|e| e.to_string())
        },
        |closed| *closed,
    )
}

#[tauri::command]
fn minimize_window(app_id: String, app: AppHandle, state: WmState<'_>) -> Result<bool, String> {
    mutate(
        &app,
        &state,
        |wm| wm.minimize(&app_id).map_err(|e| e.to_string()),
        |changed| *changed,
    )
}

#[tauri::command]
fn toggle_maximize_window(
    app_id: String,
    app: AppHandle,
    state: WmState<'_>,
) -> Result<bool, String> {
    mutate(
        &app,
        &state,
        |wm| wm.toggle_maximize(&app_id).map_err(|e| e.to_string()),
        |changed| *changed,
    )
}

#[tauri::command]
fn focus_window(app_id: String, app: AppHandle, state: WmState<'_>) -> Result<bool, String> {
    mutate(
        &app,
        &state,
        |wm| wm.focus(&app_id).map_err(|e| e.to_string()),
        |changed| *changed,
    )
}

/// Taskbar entry click: unminimize if needed, then raise
#[tauri::command]
fn restore_window(app_id: String, app: AppHandle, state: WmState<'_>) -> Result<bool, String> {
    mutate(
        &app,
        &state,
        |wm| wm.restore(&app_id).map_err(|e| e.to_string()),
        |changed| *changed,
    )
}

/// Gestures from window chrome (title bar, controls, drag)
#[tauri::command]
fn window_event(
    event: ChromeEvent,
    app: AppHandle,
    state: WmState<'_>,
) -> Result<Option<DesktopSnapshot>, String> {
    if !event.is_high_frequency() {
        debug!(?event, "chrome event");
    }

    let mut manager = state.lock().map_err(|e| e.to_string())?;
    let changed = manager.dispatch(&event).map_err(|e| e.to_string())?;
    if !changed {
        return Ok(None);
    }

    // Drag moves are answered directly to the caller instead of broadcast
    let snapshot = manager.snapshot();
    if event.is_high_frequency() {
        return Ok(Some(snapshot));
    }
    emit_snapshot(&app, snapshot.clone())?;
    Ok(Some(snapshot))
}

#[tauri::command]
fn set_viewport(
    width: f64,
    height: f64,
    app: AppHandle,
    state: WmState<'_>,
) -> Result<(), String> {
    if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
        return Err(format!("Invalid viewport: {}x{}", width, height));
    }
    mutate(
        &app,
        &state,
        |wm| {
            wm.set_viewport(Viewport::new(width, height));
            Ok(())
        },
        |_| true,
    )
}

#[tauri::command]
fn get_desktop_snapshot(state: WmState<'_>) -> Result<DesktopSnapshot, String> {
    let manager = state.lock().map_err(|e| e.to_string())?;
    Ok(manager.snapshot())
}

#[tauri::command]
fn get_launcher_catalog() -> LauncherCatalog {
    LauncherCatalog {
        desktop_icons: apps::desktop_icons().copied().collect(),
        pinned: apps::pinned_apps().copied().collect(),
    }
}

// ===== Secret Sequence =====

/// Every keydown on the desktop is forwarded here
#[tauri::command]
async fn feed_key(
    key: String,
    app: AppHandle,
    secret: State<'_, Mutex<SecretSequence>>,
    state: WmState<'_>,
    prefs: State<'_, PrefsStore>,
) -> Result<bool, String> {
    let matched = {
        let mut sequence = secret.lock().map_err(|e| e.to_string())?;
        sequence.push(&key)
    };
    if !matched {
        return Ok(false);
    }

    info!("secret sequence entered");
    {
        let mut manager = state.lock().map_err(|e| e.to_string())?;
        manager.open_app(SECRET_APP).map_err(|e| e.to_string())?;
        emit_snapshot(&app, manager.snapshot())?;
    }
    app.emit(
        "secret-unlocked",
        SecretUnlockedPayload {
            app_id: SECRET_APP.to_string(),
        },
    )
    .map_err(|e| e.to_string())?;

    let unlocked = prefs.unlock("konami").await.map_err(|e| e.to_string())?;
    emit_unlocked(&app, unlocked)?;
    Ok(true)
}

/// Window blur: a sequence must be typed in one sitting
#[tauri::command]
fn reset_key_sequence(secret: State<'_, Mutex<SecretSequence>>) -> Result<(), String> {
    secret.lock().map_err(|e| e.to_string())?.reset();
    Ok(())
}

// ===== Preferences & Achievements =====

#[tauri::command]
async fn get_preferences(prefs: State<'_, PrefsStore>) -> Result<Preferences, String> {
    prefs.load_preferences().await.map_err(|e| e.to_string())
}

#[tauri::command]
async fn update_preferences(
    change: PreferenceChange,
    app: AppHandle,
    prefs: State<'_, PrefsStore>,
) -> Result<Preferences, String> {
    let updated = prefs
        .update_preferences(&change)
        .await
        .map_err(|e| e.to_string())?;
    app.emit("preferences-changed", updated.clone())
        .map_err(|e| e.to_string())?;
    Ok(updated)
}

#[tauri::command]
async fn get_achievements(prefs: State<'_, PrefsStore>) -> Result<Vec<Achievement>, String> {
    let book = prefs.load_achievements().await.map_err(|e| e.to_string())?;
    Ok(book.list())
}

/// Apps report their own milestones (terminal command, game played, ...)
#[tauri::command]
async fn unlock_achievement(
    id: String,
    app: AppHandle,
    prefs: State<'_, PrefsStore>,
) -> Result<bool, String> {
    let unlocked = prefs.unlock(&id).await.map_err(|e| e.to_string())?;
    let fresh = unlocked.is_some();
    emit_unlocked(&app, unlocked)?;
    Ok(fresh)
}

// ===== Taskbar Quick Links =====

#[tauri::command]
fn open_quick_link(id: String, app: AppHandle) -> Result<(), String> {
    let (_, url) = QUICK_LINKS
        .iter()
        .find(|(link_id, _)| *link_id == id)
        .ok_or_else(|| format!("Unknown quick link: {}", id))?;

    info!(id = %id, url = %url, "opening quick link");
    app.opener()
        .open_url(*url, None::<&str>)
        .map_err(|e| format!("Failed to open {}: {}", url, e))
}

fn load_desktop_config(app: &AppHandle) -> DesktopConfig {
    let path = match app.path().app_config_dir() {
        Ok(dir) => dir.join("desktop.toml"),
        Err(e) => {
            warn!(error = %e, "no app config dir, using default desktop config");
            return DesktopConfig::default();
        }
    };

    DesktopConfig::load(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "ignoring desktop config");
        DesktopConfig::default()
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    crate::log::init();

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(Mutex::new(SecretSequence::default()))
        .setup(|app| {
            let handle = app.handle();

            let config = load_desktop_config(handle);
            info!(?config, "desktop config loaded");
            app.manage(Mutex::new(WindowManager::new(config)));

            let data_dir = app.path().app_data_dir()?;
            info!(dir = %data_dir.display(), "preferences directory");
            app.manage(PrefsStore::new(data_dir));

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Window management
            open_app,
            close_window,
            minimize_window,
            toggle_maximize_window,
            focus_window,
            restore_window,
            window_event,
            set_viewport,
            get_desktop_snapshot,
            get_launcher_catalog,
            // Secret sequence
            feed_key,
            reset_key_sequence,
            // Preferences & achievements
            get_preferences,
            update_preferences,
            get_achievements,
            unlock_achievement,
            // Music proxy
            proxy::music_search,
            proxy::music_trending,
            proxy::music_track,
            // Quick links
            open_quick_link,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
