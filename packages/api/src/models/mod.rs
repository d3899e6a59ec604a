//! Data models exchanged with the backend, plus the in-memory profile.

pub mod attendance;
pub mod marks;
pub mod profile;
pub mod timetable;
mod user;

pub use attendance::{AttendanceRecord, AttendanceSummary, SubjectAttendanceSettings};
pub use marks::{AssessmentType, QuizRecord, SubjectRef};
pub use profile::{avatar_initials, Profile, ProfileSetup, ProfileStore, Role};
pub use timetable::{TimetableEntry, DAYS};
pub use user::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo};

/// `HH:MM:SS` (backend `LocalTime`) → `HH:MM` (form input).
pub fn short_time(time: &str) -> &str {
    time.get(..5).unwrap_or(time)
}

/// `HH:MM` → `HH:MM:SS`; already-qualified times are left alone.
pub fn with_seconds(time: &str) -> String {
    if time.len() == 5 {
        format!("{time}:00")
    } else {
        time.to_string()
    }
}

/// `YYYY-MM-DDTHH:MM:SS` → `YYYY-MM-DD`.
pub fn date_part(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Today's local date as `YYYY-MM-DD`, the form default for date inputs.
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_helpers() {
        assert_eq!(short_time("09:00:00"), "09:00");
        assert_eq!(short_time("9:00"), "9:00");
        assert_eq!(with_seconds("09:30"), "09:30:00");
        assert_eq!(with_seconds("09:30:15"), "09:30:15");
        assert_eq!(date_part("2025-03-01T00:00:00"), "2025-03-01");
        assert_eq!(date_part("2025-03-01"), "2025-03-01");
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
