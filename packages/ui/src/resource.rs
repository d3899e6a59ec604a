//! `Signal`-backed page state for the generic resource controller.
//!
//! [`SignalState`] is a `Copy` handle, so event handlers can move it into
//! `spawn`ed tasks freely. Each controller step takes one short `write()` and
//! drops it before the next `.await`.

use api::resource::{ResourceController, ResourceEndpoints, ResourceState, StateHandle};
use api::{Resource, ReqwestTransport};
use dioxus::prelude::*;

use crate::platform::make_transport;

pub struct SignalState<R: 'static>(Signal<ResourceState<R>>);

impl<R: 'static> Clone for SignalState<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: 'static> Copy for SignalState<R> {}

impl<R: 'static> PartialEq for SignalState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Resource> SignalState<R> {
    /// Clone of the current state; subscribes the calling component.
    pub fn snapshot(&self) -> ResourceState<R> {
        self.0.read().clone()
    }
}

impl<R: 'static> StateHandle<R> for SignalState<R> {
    fn with<O>(&self, f: impl FnOnce(&mut ResourceState<R>) -> O) -> O {
        let mut signal = self.0;
        let mut state = signal.write();
        f(&mut state)
    }
}

pub fn use_resource_state<R: Resource>() -> SignalState<R> {
    SignalState(use_signal(ResourceState::<R>::new))
}

pub type PageController<R, E> = ResourceController<R, ReqwestTransport, E, SignalState<R>>;

/// Controller for one page, sending with the platform transport.
pub fn page_controller<R, E>(state: SignalState<R>, endpoints: E, owner: impl Into<String>) -> PageController<R, E>
where
    R: Resource,
    E: ResourceEndpoints<R>,
{
    ResourceController::new(make_transport(), endpoints, state, owner)
}
