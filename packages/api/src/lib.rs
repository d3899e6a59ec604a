//! # API crate: everything the SEM-Tracker front end does that is not rendering
//!
//! The UI crates only draw state and forward events. The request/response
//! plumbing, the page lifecycle and all derived values live here, where they
//! compile and test natively.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Login and signup calls against the backend, form validation, login error copy |
//! | [`endpoints`] | Local/deployed base URL selection and every backend URL |
//! | [`error`] | [`ApiError`], the one error type every call returns |
//! | [`grades`] | Letter grades and percentages for marks |
//! | [`models`] | Timetable, attendance, marks and auth bodies; the in-memory profile |
//! | [`resource`] | Generic list/create/update/delete controller with stale-response protection |
//! | [`session`] | Session state machine over a [`store::KeyValueStore`], and the route guard |
//! | [`transport`] | [`HttpTransport`] trait and its `reqwest` implementation |
//!
//! ## Typical page flow
//!
//! 1. [`session::SessionService::restore`] decides whether the user is logged in.
//! 2. [`session::guard::guard`] turns that into render / redirect / loading.
//! 3. A page builds a [`ResourceController`] from a transport, an endpoint set and
//!    its own state handle, then calls `list`, `submit` and `delete`.

pub mod auth;
pub mod endpoints;
pub mod error;
pub mod grades;
pub mod models;
pub mod resource;
pub mod session;
pub mod transport;

pub use endpoints::{
    AttendanceEndpoints, Endpoints, Environment, MarksEndpoints, SubjectSettingsEndpoints, TimetableEndpoints,
    TimetableView,
};
pub use error::ApiError;
pub use grades::Grade;
pub use models::UserInfo;
pub use resource::{FetchState, Resource, ResourceController, ResourceEndpoints, ResourceState, StateHandle};
pub use session::guard::{guard, GuardDecision};
pub use session::{Session, SessionService, SessionState};
pub use transport::{fetch_json, HttpTransport, ReqwestTransport};

pub use store::TrackerConfig;
