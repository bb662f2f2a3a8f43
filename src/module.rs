use serde::{Deserialize, Serialize};

use crate::exam::ExamResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub title: String,
    pub credits: u32,
    pub exam: ExamResult,
}

impl Module {
    pub fn new(title: impl Into<String>, credits: u32, exam: ExamResult) -> Self {
        Self {
            title: title.into(),
            credits,
            exam,
        }
    }

    pub fn grade(&self) -> Option<f64> {
        self.exam.grade
    }

    pub fn is_complete(&self) -> bool {
        self.exam.is_complete()
    }
}
