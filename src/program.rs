use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::goal::{Goal, GoalKey, Goals};
use crate::module::Module;
use crate::semester::Semester;

/// Title given to a program bootstrapped from a curriculum template.
pub const PLACEHOLDER_TITLE: &str = "Neuer Studiengang";

/// Current local wall-clock time, truncated to whole seconds.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Rounds the exact binary value to one decimal, ties to even, so a mean
/// stored as 1.1499.. stays 1.1.
fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub title: String,
    pub start_date: NaiveDateTime,
    pub semesters: Vec<Semester>,
    pub goals: Goals,
}

impl Program {
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDateTime,
        semesters: Vec<Semester>,
        goals: Goals,
    ) -> Self {
        Self {
            title: title.into(),
            start_date,
            semesters,
            goals,
        }
    }

    /// Program with no semesters, placeholder title and zeroed goals.
    pub fn empty(start_date: NaiveDateTime) -> Self {
        Self::new(PLACEHOLDER_TITLE, start_date, Vec::new(), Goals::zeroed())
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.semesters.iter().flat_map(|s| s.modules.iter())
    }

    /// Whole days since the start date. Negative when the start lies ahead.
    pub fn elapsed_days(&self, now: NaiveDateTime) -> i64 {
        (now - self.start_date).num_days()
    }

    /// Mean of all entered grades, rounded to one decimal. 0.0 without grades.
    pub fn grade_average(&self) -> f64 {
        let grades: Vec<f64> = self.semesters.iter().flat_map(Semester::grades).collect();
        if grades.is_empty() {
            return 0.0;
        }
        let mean = grades.iter().sum::<f64>() / grades.len() as f64;
        round_to_tenth(mean)
    }

    /// Passed modules plus recognized modules. A module that is both passed
    /// and recognized contributes twice.
    pub fn completed_module_count(&self) -> usize {
        self.semesters
            .iter()
            .map(|s| s.passed_count() + s.recognized_count())
            .sum()
    }

    pub fn earned_credits(&self) -> u32 {
        self.semesters.iter().map(Semester::earned_credits).sum()
    }

    pub fn total_credits(&self) -> u32 {
        self.semesters.iter().map(Semester::total_credits).sum()
    }

    pub fn total_modules(&self) -> usize {
        self.semesters.iter().map(|s| s.modules.len()).sum()
    }

    pub fn goal(&self, key: GoalKey) -> Goal {
        self.goals.get(key)
    }

    pub fn is_goal_achieved(&self, key: GoalKey, now: NaiveDateTime) -> bool {
        self.goal(key).is_achieved(self, now)
    }
}
