//! Quiz and exam marks.

use serde::{Deserialize, Serialize};

use super::{date_part, today_iso};
use crate::error::ApiError;
use crate::grades::{percentage, Grade};
use crate::resource::Resource;

/// Kind of assessment. The backend stores this as free text, so labels outside
/// the four known kinds are kept verbatim and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssessmentType {
    #[default]
    Quiz,
    Exam,
    Assignment,
    Project,
    Other(String),
}

impl AssessmentType {
    pub const SELECTABLE: [AssessmentType; 4] = [
        AssessmentType::Quiz,
        AssessmentType::Exam,
        AssessmentType::Assignment,
        AssessmentType::Project,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            AssessmentType::Quiz => "QUIZ",
            AssessmentType::Exam => "EXAM",
            AssessmentType::Assignment => "ASSIGNMENT",
            AssessmentType::Project => "PROJECT",
            AssessmentType::Other(label) => label,
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::SELECTABLE
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .unwrap_or_else(|| AssessmentType::Other(value.to_string()))
    }

    pub fn is_selectable(&self) -> bool {
        !matches!(self, AssessmentType::Other(_))
    }
}

impl From<String> for AssessmentType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<AssessmentType> for String {
    fn from(kind: AssessmentType) -> Self {
        match kind {
            AssessmentType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Subject reference as nested in a marks record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: i64,
    #[serde(default, alias = "subjectName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SubjectRef {
    /// Display name, falling back to `Subject {id}`.
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Subject {}", self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub student_id: String,
    pub subject: SubjectRef,
    #[serde(default)]
    pub obtained_marks: f64,
    #[serde(default)]
    pub total_marks: f64,
    #[serde(default)]
    pub pass_marks: f64,
    #[serde(default)]
    pub assessment_type: AssessmentType,
    #[serde(default)]
    pub assessment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

impl Default for QuizRecord {
    fn default() -> Self {
        Self {
            id: None,
            student_id: String::new(),
            subject: SubjectRef { id: 1, name: None },
            obtained_marks: 0.0,
            total_marks: 100.0,
            pass_marks: 50.0,
            assessment_type: AssessmentType::Quiz,
            assessment_date: today_iso(),
            remarks: None,
        }
    }
}

impl QuizRecord {
    pub fn percentage(&self) -> f64 {
        percentage(self.obtained_marks, self.total_marks)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_percentage(self.percentage())
    }

    pub fn passed(&self) -> bool {
        self.obtained_marks >= self.pass_marks
    }
}

impl Resource for QuizRecord {
    const NOUN: &'static str = "quiz record";
    const NOUN_PLURAL: &'static str = "quiz records";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.total_marks <= 0.0 {
            return Err(ApiError::Invalid("Total marks must be greater than zero".into()));
        }
        if self.obtained_marks < 0.0 || self.obtained_marks > self.total_marks {
            return Err(ApiError::Invalid("Obtained marks must be between 0 and total marks".into()));
        }
        if self.pass_marks < 0.0 || self.pass_marks > self.total_marks {
            return Err(ApiError::Invalid("Pass marks must be between 0 and total marks".into()));
        }
        if self.assessment_date.is_empty() {
            return Err(ApiError::Invalid("Assessment date is required".into()));
        }
        Ok(())
    }

    fn prepare_submit(&mut self, owner: &str) {
        self.student_id = owner.to_string();
        if self.remarks.as_deref().is_some_and(|r| r.trim().is_empty()) {
            self.remarks = None;
        }
    }

    fn for_edit(&self) -> Self {
        Self {
            assessment_date: date_part(&self.assessment_date).to_string(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_shape() {
        let record: QuizRecord = serde_json::from_str(
            r#"{"id":1,"studentId":"kop","subject":{"id":3,"subjectName":"Physics"},
                "obtainedMarks":72,"totalMarks":80,"passMarks":40,
                "assessmentType":"EXAM","assessmentDate":"2025-02-10"}"#,
        )
        .unwrap();
        assert_eq!(record.subject.label(), "Physics");
        assert_eq!(record.assessment_type, AssessmentType::Exam);
        assert_eq!(record.percentage(), 90.0);
        assert_eq!(record.grade(), Grade::APlus);
        assert!(record.passed());
    }

    #[test]
    fn test_unknown_assessment_type_is_tolerated() {
        let record: QuizRecord =
            serde_json::from_str(r#"{"subject":{"id":2},"assessmentType":"LAB"}"#).unwrap();
        assert_eq!(record.assessment_type, AssessmentType::Other("LAB".into()));
        assert_eq!(record.subject.label(), "Subject 2");
        assert_eq!(AssessmentType::parse("project"), AssessmentType::Project);
    }

    #[test]
    fn test_unknown_assessment_type_survives_edit() {
        let stored: QuizRecord = serde_json::from_str(
            r#"{"id":9,"studentId":"kop","subject":{"id":4},"obtainedMarks":30,"totalMarks":50,
                "passMarks":25,"assessmentType":"MIDTERM","assessmentDate":"2025-04-01T00:00:00"}"#,
        )
        .unwrap();
        assert!(!stored.assessment_type.is_selectable());

        let mut draft = stored.for_edit();
        draft.obtained_marks = 35.0;
        draft.prepare_submit("kop");

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["assessmentType"], "MIDTERM");
        assert_eq!(json["assessmentDate"], "2025-04-01");
        assert_eq!(json["obtainedMarks"], 35.0);
    }

    #[test]
    fn test_pass_is_inclusive() {
        let mut record = QuizRecord {
            obtained_marks: 50.0,
            ..Default::default()
        };
        assert!(record.passed());
        record.obtained_marks = 49.5;
        assert!(!record.passed());
    }

    #[test]
    fn test_defaults_and_payload() {
        let mut record = QuizRecord::default();
        assert_eq!(record.subject.id, 1);
        assert_eq!(record.total_marks, 100.0);
        assert_eq!(record.pass_marks, 50.0);
        assert!(record.validate().is_ok());

        record.remarks = Some("  ".into());
        record.prepare_submit("kop");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["studentId"], "kop");
        assert_eq!(json["assessmentType"], "QUIZ");
        assert_eq!(json["subject"]["id"], 1);
        assert!(json.get("remarks").is_none());
    }

    #[test]
    fn test_validation() {
        let record = QuizRecord {
            obtained_marks: 120.0,
            ..Default::default()
        };
        assert_eq!(
            record.validate().unwrap_err().to_string(),
            "Obtained marks must be between 0 and total marks"
        );
    }
}
