//! # Endpoint resolver
//!
//! Maps logical operations to absolute backend URLs. The base host depends on
//! where the page is served from: `localhost` / `127.0.0.1` talk to the local
//! backend, anything else to the deployed one. Both bases come from
//! [`store::TrackerConfig`].
//!
//! Student ids are percent-encoded because usernames may be email addresses.
//!
//! The per-resource endpoint sets at the bottom implement
//! [`ResourceEndpoints`](crate::resource::ResourceEndpoints) and are what the
//! generic controller is parameterised with.

use chrono::NaiveDate;
use store::TrackerConfig;

use crate::models::{AttendanceRecord, QuizRecord, SubjectAttendanceSettings, TimetableEntry};
use crate::resource::ResourceEndpoints;

/// Where the front end is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Deployed,
}

impl Environment {
    pub fn from_hostname(hostname: &str) -> Self {
        match hostname {
            "localhost" | "127.0.0.1" => Environment::Local,
            _ => Environment::Deployed,
        }
    }
}

/// Absolute URLs for every backend operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the base URL for `environment` from the config.
    pub fn from_config(config: &TrackerConfig, environment: Environment) -> Self {
        match environment {
            Environment::Local => Self::new(&config.api.local_base_url),
            Environment::Deployed => Self::new(&config.api.deployed_base_url),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    // Authentication

    pub fn login(&self) -> String {
        self.url("/auth/login")
    }

    pub fn register(&self) -> String {
        self.url("/students/register")
    }

    // Timetable

    pub fn timetable(&self) -> String {
        self.url("/api/timetable")
    }

    pub fn timetable_today(&self) -> String {
        self.url("/api/timetable/today")
    }

    pub fn timetable_special(&self) -> String {
        self.url("/api/timetable/special")
    }

    pub fn timetable_by_day(&self, day: &str) -> String {
        self.url(&format!("/api/timetable/day/{}", urlencoding::encode(day)))
    }

    pub fn timetable_by_id(&self, id: i64) -> String {
        self.url(&format!("/api/timetable/{id}"))
    }

    // Marks

    pub fn marks(&self) -> String {
        self.url("/marks")
    }

    pub fn marks_by_student(&self, student_id: &str) -> String {
        self.url(&format!("/marks/student/{}", urlencoding::encode(student_id)))
    }

    pub fn marks_by_id(&self, id: i64) -> String {
        self.url(&format!("/marks/{id}"))
    }

    // Attendance

    pub fn attendance(&self) -> String {
        self.url("/attendance")
    }

    pub fn attendance_by_student(&self, student_id: &str) -> String {
        self.url(&format!("/attendance/student/{}", urlencoding::encode(student_id)))
    }

    pub fn attendance_summary(&self, student_id: &str) -> String {
        format!("{}/summary", self.attendance_by_student(student_id))
    }

    pub fn attendance_subjects(&self, student_id: &str) -> String {
        format!("{}/subjects", self.attendance_by_student(student_id))
    }

    pub fn attendance_by_id(&self, id: i64) -> String {
        self.url(&format!("/attendance/{id}"))
    }
}

/// Which slice of the timetable a list call fetches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimetableView {
    /// Everything, filtered client-side to what is on today.
    All,
    #[default]
    Today,
    Special,
    /// Regular entries for one upper-case weekday, e.g. `MONDAY`.
    Day(String),
}

impl TimetableView {
    pub fn label(&self) -> &'static str {
        match self {
            TimetableView::All => "all",
            TimetableView::Today => "today",
            TimetableView::Special => "special",
            TimetableView::Day(_) => "day",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimetableEndpoints {
    pub endpoints: Endpoints,
    pub view: TimetableView,
    /// Date used by the `All` view filter; `None` means the local date at refine time.
    pub today: Option<NaiveDate>,
}

impl TimetableEndpoints {
    pub fn new(endpoints: Endpoints, view: TimetableView) -> Self {
        Self {
            endpoints,
            view,
            today: None,
        }
    }
}

impl ResourceEndpoints<TimetableEntry> for TimetableEndpoints {
    fn list_url(&self, owner: &str) -> String {
        let base = match &self.view {
            TimetableView::All => self.endpoints.timetable(),
            TimetableView::Today => self.endpoints.timetable_today(),
            TimetableView::Special => self.endpoints.timetable_special(),
            TimetableView::Day(day) if !day.is_empty() => self.endpoints.timetable_by_day(day),
            TimetableView::Day(_) => self.endpoints.timetable(),
        };
        format!("{base}?username={}", urlencoding::encode(owner))
    }

    fn create_url(&self, _owner: &str) -> String {
        self.endpoints.timetable()
    }

    fn item_url(&self, id: i64) -> Option<String> {
        Some(self.endpoints.timetable_by_id(id))
    }

    fn refine(&self, records: Vec<TimetableEntry>) -> Vec<TimetableEntry> {
        if self.view != TimetableView::All {
            return records;
        }
        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        crate::models::timetable::active_on(records, today)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceEndpoints(pub Endpoints);

impl ResourceEndpoints<AttendanceRecord> for AttendanceEndpoints {
    fn list_url(&self, owner: &str) -> String {
        self.0.attendance_by_student(owner)
    }

    fn create_url(&self, _owner: &str) -> String {
        self.0.attendance()
    }

    fn item_url(&self, id: i64) -> Option<String> {
        Some(self.0.attendance_by_id(id))
    }
}

/// Subject settings are upserted by POST on the per-student collection and
/// have no item route.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectSettingsEndpoints(pub Endpoints);

impl ResourceEndpoints<SubjectAttendanceSettings> for SubjectSettingsEndpoints {
    fn list_url(&self, owner: &str) -> String {
        self.0.attendance_subjects(owner)
    }

    fn create_url(&self, owner: &str) -> String {
        self.0.attendance_subjects(owner)
    }

    fn item_url(&self, _id: i64) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarksEndpoints(pub Endpoints);

impl ResourceEndpoints<QuizRecord> for MarksEndpoints {
    fn list_url(&self, owner: &str) -> String {
        self.0.marks_by_student(owner)
    }

    fn create_url(&self, _owner: &str) -> String {
        self.0.marks()
    }

    fn item_url(&self, id: i64) -> Option<String> {
        Some(self.0.marks_by_id(id))
    }
}
