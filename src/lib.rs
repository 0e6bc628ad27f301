// Window state: records, the record store, and desktop-level operations
pub mod state;

// Durable storage of the persisted window projection
pub mod persistence;

// Reducer-style action API
pub mod reducer;

// Window Manager API
pub mod manager;

// Layout tuning
pub mod config;

pub mod error;

// URL path and keyboard mappings
pub mod input;
pub mod routes;

// Tauri plugin (webview bridge)
#[cfg(feature = "desktop")]
pub mod commands;

pub use config::{CascadeConfig, ManagerConfig};
pub use error::{ConfigError, PersistError, StoreError};
pub use manager::WindowManager;
pub use persistence::{
    FileSlot, MemorySlot, PersistWriter, PersistedWindow, PersistenceAdapter, Persister,
    StorageSlot,
};
pub use reducer::{reduce, WindowAction};
pub use state::window::{Geometry, Position, Size, SnapSide, Viewport, WindowPatch, WindowRecord};
pub use state::{DesktopSnapshot, DesktopState, OpenOptions, WindowStore};

#[cfg(feature = "desktop")]
pub use commands::plugin;

use tracing_subscriber::EnvFilter;

/// Install a `RUST_LOG`-driven fmt subscriber (default `wim_os_lib=info`).
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wim_os_lib=info,wim_state=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
