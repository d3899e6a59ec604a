//! # Resource controller
//!
//! Every data page (timetable, attendance, subject settings, marks) follows the
//! same lifecycle, so it is written once here and parameterised by:
//!
//! | Parameter | Trait | Supplies |
//! |-----------|-------|----------|
//! | `R` | [`Resource`] | the record type, its payload shaping and validation |
//! | `T` | [`HttpTransport`] | how requests are sent |
//! | `E` | [`ResourceEndpoints`] | where list / create / item requests go |
//! | `H` | [`StateHandle`] | where the page state lives (`RefCell` here, a `Signal` in the UI) |
//!
//! State is never borrowed across an `.await`: each operation takes one short
//! borrow to begin and another to apply the outcome. List requests carry a
//! [`ListTicket`]; a response whose ticket is not the newest is dropped, so a
//! slow early fetch can never overwrite a later one.
//!
//! Mutations never insert optimistically. A successful create, update or
//! delete is followed by a full re-list.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::transport::{fetch_json, ApiRequest, HttpTransport, Method};

/// A record the backend stores and the UI edits.
pub trait Resource: Serialize + DeserializeOwned + Clone + Default + 'static {
    /// Singular, lower-case, used in messages: "attendance record".
    const NOUN: &'static str;
    const NOUN_PLURAL: &'static str;

    /// Server id; `None` until created.
    fn id(&self) -> Option<i64>;

    /// Client-side rules checked before any request is made.
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    /// Shape the record into the payload the backend expects, stamping `owner`.
    fn prepare_submit(&mut self, owner: &str);

    /// Copy of a stored record suitable for the edit form.
    fn for_edit(&self) -> Self {
        self.clone()
    }
}

/// Routes for one resource.
pub trait ResourceEndpoints<R> {
    fn list_url(&self, owner: &str) -> String;

    fn create_url(&self, owner: &str) -> String;

    /// PUT / DELETE target; `None` when the backend has no item route.
    fn item_url(&self, id: i64) -> Option<String>;

    /// Post-process a fetched list before it is shown.
    fn refine(&self, records: Vec<R>) -> Vec<R> {
        records
    }
}

/// Identifies one list request; only the newest is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTicket(u64);

/// Everything a data page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<R> {
    pub records: Vec<R>,
    pub form: R,
    pub form_open: bool,
    /// Id of the record being edited; `None` while creating.
    pub editing: Option<i64>,
    pub loading: bool,
    pub error: Option<String>,
    pub message: Option<String>,
    issued: u64,
}

impl<R: Default> Default for ResourceState<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            form: R::default(),
            form_open: false,
            editing: None,
            loading: false,
            error: None,
            message: None,
            issued: 0,
        }
    }
}

impl<R: Resource> ResourceState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_create(&mut self) {
        self.open_create_with(R::default());
    }

    /// Open the create form on a prepared draft instead of the default.
    pub fn open_create_with(&mut self, draft: R) {
        self.form = draft;
        self.editing = None;
        self.form_open = true;
        self.error = None;
    }

    pub fn open_edit(&mut self, record: &R) {
        self.form = record.for_edit();
        self.editing = record.id();
        self.form_open = true;
        self.error = None;
    }

    pub fn close_form(&mut self) {
        self.form = R::default();
        self.editing = None;
        self.form_open = false;
    }

    pub fn begin_list(&mut self) -> ListTicket {
        self.issued += 1;
        self.loading = true;
        ListTicket(self.issued)
    }

    /// Apply a list outcome. Returns `false` when the ticket is stale and the
    /// outcome was dropped. A failure keeps the records already shown.
    pub fn apply_list(&mut self, ticket: ListTicket, result: Result<Vec<R>, ApiError>) -> bool {
        if ticket.0 != self.issued {
            tracing::warn!(
                resource = R::NOUN_PLURAL,
                ticket = ticket.0,
                latest = self.issued,
                "dropping stale list response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(records) => {
                self.records = records;
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Error loading {}: {e}", R::NOUN_PLURAL));
            }
        }
        true
    }

    pub fn begin_mutation(&mut self) {
        self.loading = true;
        self.error = None;
        self.message = None;
    }

    /// Record a mutation outcome. The form stays open on failure.
    pub fn apply_mutation(&mut self, result: Result<String, String>) {
        self.loading = false;
        match result {
            Ok(message) => self.message = Some(message),
            Err(error) => self.error = Some(error),
        }
    }
}

/// One fetched value that is not a list, such as a summary. Follows the same
/// newest-ticket-wins rule as [`ResourceState::apply_list`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    noun: &'static str,
    issued: u64,
}

impl<T> FetchState<T> {
    pub fn new(noun: &'static str) -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
            noun,
            issued: 0,
        }
    }

    pub fn begin(&mut self) -> ListTicket {
        self.issued += 1;
        self.loading = true;
        ListTicket(self.issued)
    }

    /// Apply a fetch outcome; `false` when the ticket is stale. A failure keeps
    /// the value already shown.
    pub fn apply(&mut self, ticket: ListTicket, result: Result<T, ApiError>) -> bool {
        if ticket.0 != self.issued {
            tracing::warn!(
                value = self.noun,
                ticket = ticket.0,
                latest = self.issued,
                "dropping stale response"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(value = self.noun, error = %e, "fetch failed");
                self.error = Some(format!("Error loading {}: {e}", self.noun));
            }
        }
        true
    }
}

/// Shared access to a [`ResourceState`].
pub trait StateHandle<R> {
    fn with<O>(&self, f: impl FnOnce(&mut ResourceState<R>) -> O) -> O;
}

impl<R> StateHandle<R> for Rc<RefCell<ResourceState<R>>> {
    fn with<O>(&self, f: impl FnOnce(&mut ResourceState<R>) -> O) -> O {
        f(&mut self.borrow_mut())
    }
}

/// Stateless request half of the controller.
#[derive(Debug, Clone)]
pub struct ResourceClient<R, T, E> {
    transport: T,
    endpoints: E,
    _record: PhantomData<fn() -> R>,
}

impl<R, T, E> ResourceClient<R, T, E>
where
    R: Resource,
    T: HttpTransport,
    E: ResourceEndpoints<R>,
{
    pub fn new(transport: T, endpoints: E) -> Self {
        Self {
            transport,
            endpoints,
            _record: PhantomData,
        }
    }

    pub fn endpoints(&self) -> &E {
        &self.endpoints
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<R>, ApiError> {
        let records = fetch_json(&self.transport, &self.endpoints.list_url(owner)).await?;
        Ok(self.endpoints.refine(records))
    }

    pub async fn create(&self, owner: &str, record: &R) -> Result<(), ApiError> {
        let request = ApiRequest::with_json(Method::Post, self.endpoints.create_url(owner), record)?;
        self.transport.send(request).await?.into_result()?;
        Ok(())
    }

    pub async fn update(&self, id: i64, record: &R) -> Result<(), ApiError> {
        let url = self.endpoints.item_url(id).ok_or(ApiError::Unsupported("Update"))?;
        let request = ApiRequest::with_json(Method::Put, url, record)?;
        self.transport.send(request).await?.into_result()?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let url = self.endpoints.item_url(id).ok_or(ApiError::Unsupported("Delete"))?;
        self.transport.send(ApiRequest::delete(url)).await?.into_result()?;
        Ok(())
    }
}

fn capitalize(noun: &str) -> String {
    let mut chars = noun.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Client plus page state for one owner.
#[derive(Debug, Clone)]
pub struct ResourceController<R, T, E, H> {
    client: ResourceClient<R, T, E>,
    state: H,
    owner: String,
}

impl<R, T, E, H> ResourceController<R, T, E, H>
where
    R: Resource,
    T: HttpTransport,
    E: ResourceEndpoints<R>,
    H: StateHandle<R>,
{
    pub fn new(transport: T, endpoints: E, state: H, owner: impl Into<String>) -> Self {
        Self {
            client: ResourceClient::new(transport, endpoints),
            state,
            owner: owner.into(),
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Fetch and show the owner's records.
    pub async fn list(&self) -> Result<(), ApiError> {
        let ticket = self.state.with(|s| s.begin_list());
        let result = self.client.list(&self.owner).await;
        if let Err(e) = &result {
            tracing::warn!(resource = R::NOUN_PLURAL, error = %e, "list failed");
        }
        let outcome = result.as_ref().map(|_| ()).map_err(ApiError::clone);
        self.state.with(|s| s.apply_list(ticket, result));
        outcome
    }

    /// Create or update whatever is in the form.
    pub async fn submit(&self) -> Result<(), ApiError> {
        let (form, editing) = self.state.with(|s| (s.form.clone(), s.editing));
        if let Err(e) = form.validate() {
            self.state.with(|s| s.error = Some(e.to_string()));
            return Err(e);
        }
        match editing {
            Some(id) => self.update(id, form).await,
            None => self.create(form).await,
        }
    }

    pub async fn create(&self, mut record: R) -> Result<(), ApiError> {
        record.prepare_submit(&self.owner);
        self.state.with(|s| s.begin_mutation());
        let result = self.client.create(&self.owner, &record).await;
        self.finish(result, "adding", "added", true).await
    }

    pub async fn update(&self, id: i64, mut record: R) -> Result<(), ApiError> {
        record.prepare_submit(&self.owner);
        self.state.with(|s| s.begin_mutation());
        let result = self.client.update(id, &record).await;
        self.finish(result, "updating", "updated", true).await
    }

    /// Delete after `confirm` approves the prompt; a declined prompt sends nothing.
    pub async fn delete(&self, id: i64, confirm: impl FnOnce(&str) -> bool) -> Result<(), ApiError> {
        if !confirm(&format!("Are you sure you want to delete this {}?", R::NOUN)) {
            return Ok(());
        }
        self.state.with(|s| s.begin_mutation());
        let result = self.client.delete(id).await;
        self.finish(result, "deleting", "deleted", false).await
    }

    async fn finish(
        &self,
        result: Result<(), ApiError>,
        doing: &str,
        done: &str,
        close_form: bool,
    ) -> Result<(), ApiError> {
        match result {
            Ok(()) => {
                tracing::debug!(resource = R::NOUN, action = done, "mutation succeeded");
                self.state.with(|s| {
                    s.apply_mutation(Ok(format!("{} {done} successfully!", capitalize(R::NOUN))));
                    if close_form {
                        s.close_form();
                    }
                });
                // The follow-up list records its own error.
                let _ = self.list().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = R::NOUN, action = doing, error = %e, "mutation failed");
                self.state
                    .with(|s| s.apply_mutation(Err(format!("Error {doing} {}: {e}", R::NOUN))));
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{AttendanceEndpoints, Endpoints, MarksEndpoints, SubjectSettingsEndpoints};
    use crate::models::{AttendanceRecord, AttendanceSummary, QuizRecord, SubjectAttendanceSettings};
    use crate::transport::mock::MockTransport;

    type Shared<R> = Rc<RefCell<ResourceState<R>>>;

    fn endpoints() -> Endpoints {
        Endpoints::new("http://api.test")
    }

    fn attendance(
        transport: &MockTransport,
    ) -> ResourceController<AttendanceRecord, MockTransport, AttendanceEndpoints, Shared<AttendanceRecord>> {
        ResourceController::new(
            transport.clone(),
            AttendanceEndpoints(endpoints()),
            Rc::new(RefCell::new(ResourceState::new())),
            "kop",
        )
    }

    const TWO_RECORDS: &str = r#"[
        {"id":1,"studentId":"kop","moduleName":"OS","attendanceDate":"2025-03-01","startTime":"09:00:00","endTime":"10:00:00","attendedHours":1.0},
        {"id":2,"studentId":"kop","moduleName":"DB","attendanceDate":"2025-03-02","startTime":"09:00:00","endTime":"11:00:00","attendedHours":2.0}
    ]"#;

    #[tokio::test]
    async fn test_list_replaces_records() {
        let transport = MockTransport::new();
        transport.respond(200, TWO_RECORDS);
        let controller = attendance(&transport);

        controller.list().await.unwrap();

        let state = controller.state().borrow();
        assert_eq!(state.records.len(), 2);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/attendance/student/kop"
        );
    }

    #[tokio::test]
    async fn test_list_failure_keeps_records() {
        let transport = MockTransport::new();
        transport.respond(200, TWO_RECORDS).respond(500, r#"{"error":"db down"}"#);
        let controller = attendance(&transport);

        controller.list().await.unwrap();
        assert!(controller.list().await.is_err());

        let state = controller.state().borrow();
        assert_eq!(state.records.len(), 2);
        assert!(!state.loading);
        let error = state.error.as_deref().unwrap();
        assert!(!error.is_empty());
        assert!(error.starts_with("Error loading attendance records"));
    }

    #[tokio::test]
    async fn test_create_closes_form_and_relists_once() {
        let transport = MockTransport::new();
        transport.respond(201, r#"{"id":3}"#).respond(200, TWO_RECORDS);
        let controller = attendance(&transport);

        controller.state().with(|s| {
            s.open_create();
            s.form.module_name = "Compilers".into();
        });
        controller.state().with(|s| s.begin_mutation());
        assert!(controller.state().borrow().loading);

        controller.submit().await.unwrap();

        let state = controller.state().borrow();
        assert!(!state.loading);
        assert!(!state.form_open);
        assert_eq!(state.form, AttendanceRecord::default());
        assert_eq!(state.message.as_deref(), Some("Attendance record added successfully!"));
        assert_eq!(state.records.len(), 2);
        assert_eq!(transport.methods(), vec![Method::Post, Method::Get]);

        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["studentId"], "kop");
        assert_eq!(body["moduleName"], "Compilers");
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form_open() {
        let transport = MockTransport::new();
        transport.respond(400, r#"{"message":"Invalid date"}"#);
        let controller = attendance(&transport);

        controller.state().with(|s| {
            s.open_create();
            s.form.module_name = "Compilers".into();
        });
        assert!(controller.submit().await.is_err());

        let state = controller.state().borrow();
        assert!(state.form_open);
        assert!(!state.loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Error adding attendance record: HTTP 400: Invalid date")
        );
        assert_eq!(transport.methods(), vec![Method::Post]);
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let transport = MockTransport::new();
        let controller = attendance(&transport);

        controller.state().with(|s| s.open_create());
        let err = controller.submit().await.unwrap_err();

        assert!(matches!(err, ApiError::Invalid(_)));
        assert_eq!(controller.state().borrow().error.as_deref(), Some("Module name is required"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_edit_submits_put_to_item_route() {
        let transport = MockTransport::new();
        transport.respond(200, "{}").respond(200, TWO_RECORDS);
        let controller = attendance(&transport);

        let stored: Vec<AttendanceRecord> = serde_json::from_str(TWO_RECORDS).unwrap();
        controller.state().with(|s| s.open_edit(&stored[1]));
        controller.submit().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, "http://api.test/attendance/2");
        assert_eq!(
            controller.state().borrow().message.as_deref(),
            Some("Attendance record updated successfully!")
        );
    }

    #[test]
    fn test_stale_list_is_dropped() {
        let state: Shared<AttendanceRecord> = Rc::new(RefCell::new(ResourceState::new()));
        let first = state.with(|s| s.begin_list());
        let second = state.with(|s| s.begin_list());

        let fresh = vec![AttendanceRecord {
            id: Some(2),
            ..Default::default()
        }];
        assert!(state.with(|s| s.apply_list(second, Ok(fresh))));
        assert!(!state.with(|s| s.apply_list(first, Ok(Vec::new()))));

        let state = state.borrow();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].id, Some(2));
        assert!(!state.loading);
    }

    #[test]
    fn test_create_form_seeded_from_config() {
        let config = store::TrackerConfig::from_toml("[attendance]\ndefault_pass_percentage = 80.0\n").unwrap();
        let state: Shared<SubjectAttendanceSettings> = Rc::new(RefCell::new(ResourceState::new()));

        state.with(|s| {
            s.open_create_with(SubjectAttendanceSettings::with_pass_percentage(
                config.attendance.default_pass_percentage,
            ))
        });
        {
            let state = state.borrow();
            assert!(state.form_open);
            assert!(state.editing.is_none());
            assert_eq!(state.form.pass_percentage, 80.0);
        }

        state.with(|s| s.close_form());
        assert_eq!(state.borrow().form, SubjectAttendanceSettings::default());
    }

    #[tokio::test]
    async fn test_overlapping_summary_fetches_keep_newest() {
        let transport = MockTransport::new();
        transport
            .respond(200, r#"{"studentId":"kop","overallAttendancePercentage":50.0}"#)
            .respond(200, r#"{"studentId":"kop","overallAttendancePercentage":80.0}"#);
        let url = endpoints().attendance_summary("kop");
        let mut state = FetchState::<AttendanceSummary>::new("attendance summary");

        // The second refresh starts before the first one answers.
        let older = state.begin();
        let newer = state.begin();
        let first = fetch_json(&transport, &url).await;
        let second = fetch_json(&transport, &url).await;

        assert!(state.apply(newer, second));
        assert!(!state.apply(older, first));
        assert_eq!(state.value.as_ref().unwrap().overall_attendance_percentage, 80.0);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_summary_failure_sets_error_and_keeps_value() {
        let transport = MockTransport::new();
        transport
            .respond(200, r#"{"studentId":"kop","overallAttendancePercentage":70.0}"#)
            .respond(500, r#"{"error":"db down"}"#);
        let url = endpoints().attendance_summary("kop");
        let mut state = FetchState::<AttendanceSummary>::new("attendance summary");

        let ticket = state.begin();
        assert!(state.apply(ticket, fetch_json(&transport, &url).await));
        let ticket = state.begin();
        assert!(state.apply(ticket, fetch_json(&transport, &url).await));

        assert_eq!(state.value.as_ref().unwrap().overall_attendance_percentage, 70.0);
        assert_eq!(
            state.error.as_deref(),
            Some("Error loading attendance summary: HTTP 500: db down")
        );
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let transport = MockTransport::new();
        let controller = attendance(&transport);

        let mut prompt = String::new();
        controller
            .delete(1, |text| {
                prompt = text.to_string();
                false
            })
            .await
            .unwrap();

        assert_eq!(prompt, "Are you sure you want to delete this attendance record?");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_delete_relists() {
        let transport = MockTransport::new();
        transport.respond(204, "").respond(200, "[]");
        let controller = attendance(&transport);

        controller.delete(1, |_| true).await.unwrap();

        assert_eq!(transport.methods(), vec![Method::Delete, Method::Get]);
        assert_eq!(transport.requests()[0].url, "http://api.test/attendance/1");
        assert_eq!(
            controller.state().borrow().message.as_deref(),
            Some("Attendance record deleted successfully!")
        );
    }

    #[tokio::test]
    async fn test_marks_delete_uses_item_route() {
        let transport = MockTransport::new();
        transport.respond(200, "").respond(200, "[]");
        let controller = ResourceController::new(
            transport.clone(),
            MarksEndpoints(endpoints()),
            Rc::new(RefCell::new(ResourceState::<QuizRecord>::new())),
            "kop",
        );

        controller.delete(7, |_| true).await.unwrap();

        let requests = transport.requests();
        assert_eq!(transport.methods(), vec![Method::Delete, Method::Get]);
        assert_eq!(requests[0].url, "http://api.test/marks/7");
        assert_eq!(requests[1].url, "http://api.test/marks/student/kop");
        assert_eq!(
            controller.state().borrow().message.as_deref(),
            Some("Quiz record deleted successfully!")
        );
    }

    #[tokio::test]
    async fn test_update_without_item_route_is_unsupported() {
        let transport = MockTransport::new();
        let controller = ResourceController::new(
            transport.clone(),
            SubjectSettingsEndpoints(endpoints()),
            Rc::new(RefCell::new(ResourceState::<SubjectAttendanceSettings>::new())),
            "kop",
        );

        let err = controller
            .update(5, SubjectAttendanceSettings::default())
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Unsupported("Update"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("quiz record"), "Quiz record");
        assert_eq!(capitalize(""), "");
    }
}
