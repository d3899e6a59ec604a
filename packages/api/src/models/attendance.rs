//! Attendance records, per-subject settings and the overall summary.

use serde::{Deserialize, Serialize};

use super::{date_part, short_time, today_iso, with_seconds};
use crate::error::ApiError;
use crate::resource::Resource;

/// One attended session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub module_name: String,
    #[serde(default)]
    pub attendance_date: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub attended_hours: f64,
}

impl Default for AttendanceRecord {
    fn default() -> Self {
        Self {
            id: None,
            student_id: String::new(),
            module_name: String::new(),
            attendance_date: today_iso(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            attended_hours: 1.0,
        }
    }
}

impl Resource for AttendanceRecord {
    const NOUN: &'static str = "attendance record";
    const NOUN_PLURAL: &'static str = "attendance records";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.module_name.trim().is_empty() {
            return Err(ApiError::Invalid("Module name is required".into()));
        }
        if self.attendance_date.is_empty() {
            return Err(ApiError::Invalid("Attendance date is required".into()));
        }
        if self.attended_hours < 0.0 {
            return Err(ApiError::Invalid("Attended hours cannot be negative".into()));
        }
        Ok(())
    }

    fn prepare_submit(&mut self, owner: &str) {
        self.student_id = owner.to_string();
        self.start_time = with_seconds(&self.start_time);
        self.end_time = with_seconds(&self.end_time);
    }

    fn for_edit(&self) -> Self {
        Self {
            attendance_date: date_part(&self.attendance_date).to_string(),
            start_time: short_time(&self.start_time).to_string(),
            end_time: short_time(&self.end_time).to_string(),
            ..self.clone()
        }
    }
}

/// Hours scheduled and required for one subject, plus the server's running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAttendanceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub subject_name: String,
    #[serde(default)]
    pub total_scheduled_hours: f64,
    #[serde(default)]
    pub pass_percentage: f64,
    #[serde(default)]
    pub total_attended_hours: f64,
    #[serde(default)]
    pub attendance_percentage: f64,
}

impl Default for SubjectAttendanceSettings {
    fn default() -> Self {
        Self::with_pass_percentage(75.0)
    }
}

impl SubjectAttendanceSettings {
    /// Empty draft whose pass percentage comes from configuration.
    pub fn with_pass_percentage(pass_percentage: f64) -> Self {
        Self {
            id: None,
            student_id: String::new(),
            subject_name: String::new(),
            total_scheduled_hours: 0.0,
            pass_percentage,
            total_attended_hours: 0.0,
            attendance_percentage: 0.0,
        }
    }

    /// Hours still required to reach the pass percentage; never negative.
    pub fn needed_hours(&self) -> f64 {
        let required = self.pass_percentage / 100.0 * self.total_scheduled_hours;
        (required - self.total_attended_hours).max(0.0)
    }

    pub fn is_eligible(&self) -> bool {
        self.attendance_percentage >= self.pass_percentage
    }
}

impl Resource for SubjectAttendanceSettings {
    const NOUN: &'static str = "subject settings";
    const NOUN_PLURAL: &'static str = "subject settings";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.subject_name.trim().is_empty() {
            return Err(ApiError::Invalid("Subject name is required".into()));
        }
        if self.total_scheduled_hours <= 0.0 {
            return Err(ApiError::Invalid("Total scheduled hours must be greater than zero".into()));
        }
        if !(0.0..=100.0).contains(&self.pass_percentage) {
            return Err(ApiError::Invalid("Pass percentage must be between 0 and 100".into()));
        }
        Ok(())
    }

    fn prepare_submit(&mut self, owner: &str) {
        self.student_id = owner.to_string();
    }
}

/// Totals across every subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceSummary {
    pub student_id: String,
    pub total_attended_hours: f64,
    pub total_scheduled_hours: f64,
    pub overall_attendance_percentage: f64,
    pub total_records: u64,
}

impl AttendanceSummary {
    pub fn below(&self, threshold: f64) -> bool {
        self.overall_attendance_percentage < threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(scheduled: f64, attended: f64, pass: f64) -> SubjectAttendanceSettings {
        SubjectAttendanceSettings {
            subject_name: "Databases".into(),
            total_scheduled_hours: scheduled,
            total_attended_hours: attended,
            pass_percentage: pass,
            attendance_percentage: if scheduled > 0.0 { attended / scheduled * 100.0 } else { 0.0 },
            ..Default::default()
        }
    }

    #[test]
    fn test_needed_hours() {
        assert_eq!(settings(40.0, 20.0, 75.0).needed_hours(), 10.0);
        assert_eq!(settings(40.0, 30.0, 75.0).needed_hours(), 0.0);
        // Over-attended never goes negative
        assert_eq!(settings(40.0, 39.0, 75.0).needed_hours(), 0.0);
    }

    #[test]
    fn test_eligibility_is_inclusive() {
        assert!(settings(40.0, 30.0, 75.0).is_eligible());
        assert!(!settings(40.0, 29.0, 75.0).is_eligible());
    }

    #[test]
    fn test_defaults() {
        let record = AttendanceRecord::default();
        assert_eq!(record.start_time, "09:00");
        assert_eq!(record.end_time, "10:00");
        assert_eq!(record.attended_hours, 1.0);
        assert_eq!(record.attendance_date, today_iso());
        assert_eq!(SubjectAttendanceSettings::default().pass_percentage, 75.0);
    }

    #[test]
    fn test_record_payload() {
        let mut record = AttendanceRecord {
            module_name: "Algorithms".into(),
            attendance_date: "2025-03-01".into(),
            ..Default::default()
        };
        assert!(record.validate().is_ok());
        record.prepare_submit("kop");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["studentId"], "kop");
        assert_eq!(json["moduleName"], "Algorithms");
        assert_eq!(json["startTime"], "09:00:00");
        assert!(json.get("id").is_none());
    }

    #[test]
    fn test_record_for_edit() {
        let stored: AttendanceRecord = serde_json::from_str(
            r#"{"id":9,"studentId":"kop","moduleName":"OS","attendanceDate":"2025-03-01T00:00:00",
                "startTime":"13:00:00","endTime":"15:00:00","attendedHours":2.0}"#,
        )
        .unwrap();
        let draft = stored.for_edit();
        assert_eq!(draft.attendance_date, "2025-03-01");
        assert_eq!(draft.start_time, "13:00");
        assert_eq!(draft.id, Some(9));
    }

    #[test]
    fn test_settings_validation() {
        assert!(settings(40.0, 0.0, 75.0).validate().is_ok());
        assert!(settings(0.0, 0.0, 75.0).validate().is_err());
        assert!(settings(40.0, 0.0, 120.0).validate().is_err());
    }

    #[test]
    fn test_summary_tolerates_missing_fields() {
        let summary: AttendanceSummary =
            serde_json::from_str(r#"{"studentId":"kop","overallAttendancePercentage":62.5}"#).unwrap();
        assert!(summary.below(75.0));
        assert!(!summary.below(60.0));
        assert_eq!(summary.total_records, 0);
    }
}
