use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::program::Program;

pub const DEFAULT_TIME_TARGET_DAYS: i64 = 2190;
pub const DEFAULT_GRADE_TARGET: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGoal {
    pub target_days: i64,
}

impl TimeGoal {
    pub fn new(target_days: i64) -> Self {
        Self { target_days }
    }

    pub fn is_achieved(&self, program: &Program, now: NaiveDateTime) -> bool {
        program.elapsed_days(now) <= self.target_days
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeGoal {
    pub target_average: f64,
}

impl GradeGoal {
    pub fn new(target_average: f64) -> Self {
        Self { target_average }
    }

    /// Lower grades are better, so "at or below the target" counts.
    pub fn is_achieved(&self, program: &Program) -> bool {
        program.grade_average() <= self.target_average
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Goal {
    Time(TimeGoal),
    Grade(GradeGoal),
}

impl Goal {
    pub fn is_achieved(&self, program: &Program, now: NaiveDateTime) -> bool {
        match self {
            Goal::Time(goal) => goal.is_achieved(program, now),
            Goal::Grade(goal) => goal.is_achieved(program),
        }
    }

    pub fn key(&self) -> GoalKey {
        match self {
            Goal::Time(_) => GoalKey::Time,
            Goal::Grade(_) => GoalKey::Grade,
        }
    }
}

impl From<TimeGoal> for Goal {
    fn from(value: TimeGoal) -> Self {
        Goal::Time(value)
    }
}

impl From<GradeGoal> for Goal {
    fn from(value: GradeGoal) -> Self {
        Goal::Grade(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalKey {
    Time,
    Grade,
}

impl GoalKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalKey::Time => "time",
            GoalKey::Grade => "note",
        }
    }
}

impl fmt::Display for GoalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown goal '{0}' (expected time or note)")]
pub struct UnknownGoalKey(pub String);

impl FromStr for GoalKey {
    type Err = UnknownGoalKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "zeit" => Ok(GoalKey::Time),
            "note" | "grade" => Ok(GoalKey::Grade),
            other => Err(UnknownGoalKey(other.to_string())),
        }
    }
}

/// The two goal slots of a program. Both are always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub time: TimeGoal,
    pub grade: GradeGoal,
}

impl Goals {
    pub fn new(target_days: i64, target_average: f64) -> Self {
        Self {
            time: TimeGoal::new(target_days),
            grade: GradeGoal::new(target_average),
        }
    }

    /// Goals of a freshly imported program.
    pub fn zeroed() -> Self {
        Self::new(0, 0.0)
    }

    pub fn get(&self, key: GoalKey) -> Goal {
        match key {
            GoalKey::Time => Goal::Time(self.time),
            GoalKey::Grade => Goal::Grade(self.grade),
        }
    }
}

impl Default for Goals {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_TARGET_DAYS, DEFAULT_GRADE_TARGET)
    }
}
