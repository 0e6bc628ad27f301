#[cfg(feature = "desktop")]
const COMMANDS: &[&str] = &[
    "list_windows",
    "open_window",
    "close_window",
    "focus_window",
    "toggle_maximize",
    "toggle_minimize",
    "update_geometry",
    "set_title",
    "snap_window",
    "set_viewport",
    "focus_next",
    "focus_previous",
    "dispatch_action",
    "sync_route",
    "handle_key",
];

fn main() {
    // Generates the allow-/deny- permission sets the webview needs to call the plugin commands
    #[cfg(feature = "desktop")]
    tauri_plugin::Builder::new(COMMANDS).build();
}
