//! Platform constructors for storage, transport and endpoints.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorage`],
//!   and the page's own hostname picks the backend.
//! - **Desktop / native tests**: files under `<data_dir>/sem-tracker/` via
//!   [`store::FileStore`], always talking to the local backend.

use api::{Endpoints, Environment, ReqwestTransport, SessionService, TrackerConfig};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::FileStore;

pub fn make_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorage::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("sem-tracker");
        store::FileStore::new(base)
    }
}

pub fn make_session_service() -> SessionService<PlatformStore> {
    SessionService::new(make_store())
}

pub fn make_transport() -> ReqwestTransport {
    ReqwestTransport::new()
}

pub fn make_config() -> TrackerConfig {
    TrackerConfig::load(&make_store())
}

/// Hostname the app is served from.
pub fn hostname() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_else(|| "localhost".to_string())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "localhost".to_string()
    }
}

pub fn make_endpoints() -> Endpoints {
    let environment = Environment::from_hostname(&hostname());
    tracing::debug!(?environment, "resolving backend endpoints");
    Endpoints::from_config(&make_config(), environment)
}

/// Ask the user to confirm `message`. Native builds have no dialog and approve.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!(%message, "auto-confirming");
        true
    }
}

/// Wait before continuing; returns immediately on native.
pub async fn pause(millis: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(millis).await;
    #[cfg(not(target_arch = "wasm32"))]
    let _ = millis;
}
