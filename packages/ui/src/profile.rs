//! In-memory profile context. Lost on reload.

use api::models::ProfileStore;
use dioxus::prelude::*;

pub fn use_profile() -> Signal<ProfileStore> {
    use_context::<Signal<ProfileStore>>()
}

#[component]
pub fn ProfileProvider(children: Element) -> Element {
    let profile = use_signal(ProfileStore::new);
    use_context_provider(|| profile);

    rsx! {
        {children}
    }
}
