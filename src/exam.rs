use serde::{Deserialize, Serialize};

/// Highest grade that still counts as passed (German scale, lower is better).
pub const PASSING_GRADE: f64 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamResult {
    pub kind: String,
    pub grade: Option<f64>,
    pub recognized: Option<bool>,
}

impl ExamResult {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            grade: None,
            recognized: None,
        }
    }

    pub fn with_grade(mut self, grade: f64) -> Self {
        self.grade = Some(grade);
        self
    }

    pub fn with_recognized(mut self, recognized: bool) -> Self {
        self.recognized = Some(recognized);
        self
    }

    pub fn set_grade(&mut self, grade: Option<f64>) {
        self.grade = grade;
    }

    pub fn set_recognized(&mut self, recognized: bool) {
        self.recognized = Some(recognized);
    }

    pub fn is_passed(&self) -> bool {
        self.grade.is_some_and(|grade| grade <= PASSING_GRADE)
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized.unwrap_or(false)
    }

    /// Credited either through a passing grade or through recognition.
    pub fn is_complete(&self) -> bool {
        self.is_passed() || self.is_recognized()
    }
}
