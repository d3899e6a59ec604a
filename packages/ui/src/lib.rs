//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod platform;
pub use platform::{confirm, make_endpoints, make_session_service, make_store, make_transport, pause};

pub mod views;
pub use views::ModalOverlay;

mod auth;
pub use auth::{use_session, LogoutButton, SessionHandle, SessionProvider};

mod profile;
pub use profile::{use_profile, ProfileProvider};

mod navbar;
pub use navbar::{Footer, Navbar};

mod banner;
pub use banner::{Loading, StatusBanner};

mod form;
pub use form::{FormActions, FormField};

pub mod resource;
pub use resource::{page_controller, use_resource_state, PageController, SignalState};
