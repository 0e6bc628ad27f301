// Tauri plugin exposing the window manager to the webview.
// Every mutating command emits `windows-changed` with the fresh snapshot.

use crate::config::ManagerConfig;
use crate::input::{key_action, Modifiers};
use crate::manager::WindowManager;
use crate::persistence::{FileSlot, PersistWriter, PersistenceAdapter};
use crate::reducer::WindowAction;
use crate::state::window::{Position, Size, SnapSide, Viewport};
use crate::state::{DesktopSnapshot, OpenOptions};
use std::sync::{Arc, Mutex};
use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Emitter, Manager, Runtime, State};
use tracing::info;

/// Managed state holding the desktop's window manager
pub struct WindowManagerState(pub Mutex<WindowManager>);

/// Lock the manager, run `f`, and broadcast the resulting snapshot
fn mutate<R: Runtime, T>(
    app: &AppHandle<R>,
    state: &State<'_, WindowManagerState>,
    f: impl FnOnce(&mut WindowManager) -> T,
) -> Result<T, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    let out = f(&mut manager);
    app.emit("windows-changed", manager.snapshot())
        .map_err(|e| e.to_string())?;
    Ok(out)
}

// ===== Queries =====

#[tauri::command]
fn list_windows(state: State<'_, WindowManagerState>) -> Result<DesktopSnapshot, String> {
    let manager = state.0.lock().map_err(|e| e.to_string())?;
    Ok(manager.snapshot())
}

// ===== Window Management Commands =====

#[tauri::command]
fn open_window<R: Runtime>(
    kind: String,
    options: Option<OpenOptions>,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<String, String> {
    mutate(&app, &state, |wm| wm.open(&kind, options.unwrap_or_default()))
}

#[tauri::command]
fn close_window<R: Runtime>(
    id: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.close(&id))
}

#[tauri::command]
fn focus_window<R: Runtime>(
    id: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.bring_to_front(&id))
}

#[tauri::command]
fn toggle_maximize<R: Runtime>(
    id: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.toggle_maximize(&id))
}

#[tauri::command]
fn toggle_minimize<R: Runtime>(
    id: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.toggle_minimize(&id))
}

/// Called by the window chrome when a drag or resize gesture ends
#[tauri::command]
fn update_geometry<R: Runtime>(
    id: String,
    position: Option<Position>,
    size: Option<Size>,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.update_geometry(&id, position, size))
}

#[tauri::command]
fn set_title<R: Runtime>(
    id: String,
    title: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.set_title(&id, &title))
}

#[tauri::command]
fn snap_window<R: Runtime>(
    id: String,
    side: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    let side = SnapSide::from_str(&side).ok_or_else(|| format!("Invalid snap side: {}", side))?;
    mutate(&app, &state, |wm| wm.snap_to_side(&id, side))
}

#[tauri::command]
fn set_viewport<R: Runtime>(
    width: f64,
    height: f64,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.set_viewport(Viewport { width, height }))
}

#[tauri::command]
fn focus_next<R: Runtime>(app: AppHandle<R>, state: State<'_, WindowManagerState>) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.focus_next())
}

#[tauri::command]
fn focus_previous<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.focus_previous())
}

#[tauri::command]
fn dispatch_action<R: Runtime>(
    action: WindowAction,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<(), String> {
    mutate(&app, &state, |wm| wm.dispatch(&action))
}

// ===== Navigation & Keyboard =====

/// Keep the desktop in step with the webview's current path
#[tauri::command]
fn sync_route<R: Runtime>(
    path: String,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<Option<String>, String> {
    mutate(&app, &state, |wm| wm.sync_route(&path))
}

/// Returns whether the key was bound to a window action
#[tauri::command]
fn handle_key<R: Runtime>(
    key: String,
    modifiers: Option<Modifiers>,
    app: AppHandle<R>,
    state: State<'_, WindowManagerState>,
) -> Result<bool, String> {
    let mut manager = state.0.lock().map_err(|e| e.to_string())?;
    let Some(action) = key_action(&key, modifiers.unwrap_or_default(), manager.focused()) else {
        return Ok(false);
    };

    manager.dispatch(&action);
    app.emit("windows-changed", manager.snapshot())
        .map_err(|e| e.to_string())?;
    Ok(true)
}

/// Build the plugin. The previous session is restored from the app data directory, and
/// later changes are written there in the background.
pub fn plugin<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("wim-os")
        .invoke_handler(tauri::generate_handler![
            list_windows,
            open_window::<R>,
            close_window::<R>,
            focus_window::<R>,
            toggle_maximize::<R>,
            toggle_minimize::<R>,
            update_geometry::<R>,
            set_title::<R>,
            snap_window::<R>,
            set_viewport::<R>,
            focus_next::<R>,
            focus_previous::<R>,
            dispatch_action::<R>,
            sync_route::<R>,
            handle_key::<R>,
        ])
        .setup(|app, _api| {
            let config = ManagerConfig::load(&app.path().app_config_dir()?.join("windows.toml"));
            let data_dir = app.path().app_data_dir()?;
            info!(dir = %data_dir.display(), "Window state directory");

            let adapter = PersistenceAdapter::new(
                Arc::new(FileSlot::new(data_dir)),
                config.storage_key.clone(),
            );
            let entries = adapter.load();
            let (writer, worker) = PersistWriter::new(Arc::new(adapter), config.save_debounce());
            tauri::async_runtime::spawn(worker);

            let manager = WindowManager::with_entries(config, entries, writer);
            app.manage(WindowManagerState(Mutex::new(manager)));
            Ok(())
        })
        .build()
}
