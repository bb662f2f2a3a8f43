//! Percentages and colors for the dashboard progress bars.
//!
//! Every ratio returns 0 when its denominator is zero.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::goal::GoalKey;
use crate::program::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalColor {
    NotAchieved,
    Achieved,
}

impl GoalColor {
    pub fn as_hex(&self) -> &'static str {
        match self {
            GoalColor::NotAchieved => "#ff6666",
            GoalColor::Achieved => "#aaddaa",
        }
    }
}

impl fmt::Display for GoalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_hex())
    }
}

fn percentage(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

pub fn credit_progress_pct(program: &Program) -> f64 {
    percentage(
        f64::from(program.earned_credits()),
        f64::from(program.total_credits()),
    )
}

/// Can exceed 100 when modules are both passed and recognized.
pub fn module_progress_pct(program: &Program) -> f64 {
    percentage(
        program.completed_module_count() as f64,
        program.total_modules() as f64,
    )
}

pub fn time_progress_pct(program: &Program, now: NaiveDateTime) -> f64 {
    let pct = percentage(
        program.elapsed_days(now) as f64,
        program.goals.time.target_days as f64,
    );
    pct.min(100.0).max(0.0)
}

pub fn goal_color(key: GoalKey, program: &Program, now: NaiveDateTime) -> GoalColor {
    if program.is_goal_achieved(key, now) {
        GoalColor::Achieved
    } else {
        GoalColor::NotAchieved
    }
}
