use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::calculations::{
    GoalColor, credit_progress_pct, goal_color, module_progress_pct, time_progress_pct,
};
use crate::goal::GoalKey;
use crate::persistence::ProgramDocument;
use crate::program::Program;

/// Everything the dashboard page shows, computed once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub title: String,
    pub start_date: NaiveDateTime,
    pub elapsed_days: i64,
    pub time_goal_days: i64,
    pub time_progress: f64,
    pub time_color: GoalColor,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub earned_credits: u32,
    pub total_credits: u32,
    pub credit_progress: f64,
    pub module_progress: f64,
    pub grade_average: f64,
    pub grade_average_display: String,
    pub grade_target: f64,
    pub grade_target_display: String,
    pub grade_color: GoalColor,
}

impl DashboardView {
    pub fn build(program: &Program, now: NaiveDateTime) -> Self {
        let grade_average = program.grade_average();
        let grade_target = program.goals.grade.target_average;
        Self {
            title: program.title.clone(),
            start_date: program.start_date,
            elapsed_days: program.elapsed_days(now),
            time_goal_days: program.goals.time.target_days,
            time_progress: time_progress_pct(program, now),
            time_color: goal_color(GoalKey::Time, program, now),
            completed_modules: program.completed_module_count(),
            total_modules: program.total_modules(),
            earned_credits: program.earned_credits(),
            total_credits: program.total_credits(),
            credit_progress: credit_progress_pct(program),
            module_progress: module_progress_pct(program),
            grade_average,
            grade_average_display: format_grade(grade_average),
            grade_target,
            grade_target_display: format_grade(grade_target),
            grade_color: goal_color(GoalKey::Grade, program, now),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Program         : {}\n", self.title));
        out.push_str(&format!(
            "Start date      : {}\n",
            self.start_date.format("%Y-%m-%d")
        ));
        out.push_str(&format!(
            "Elapsed days    : {} / {} ({:.0}%, {})\n",
            self.elapsed_days,
            self.time_goal_days,
            self.time_progress,
            achieved_label(self.time_color)
        ));
        out.push_str(&format!(
            "Modules         : {} / {} ({:.0}%)\n",
            self.completed_modules, self.total_modules, self.module_progress
        ));
        out.push_str(&format!(
            "Credits         : {} / {} ({:.0}%)\n",
            self.earned_credits, self.total_credits, self.credit_progress
        ));
        out.push_str(&format!(
            "Grade average   : {} (target {}, {})\n",
            self.grade_average_display,
            self.grade_target_display,
            achieved_label(self.grade_color)
        ));
        out
    }
}

fn achieved_label(color: GoalColor) -> &'static str {
    match color {
        GoalColor::Achieved => "on track",
        GoalColor::NotAchieved => "missed",
    }
}

/// One decimal with a decimal comma, e.g. `2,3`.
pub fn format_grade(value: f64) -> String {
    format!("{value:.1}").replace('.', ",")
}

/// Data for the edit page: the stored document plus the current targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditView {
    pub program: ProgramDocument,
    pub time_goal_days: i64,
    pub grade_target: f64,
}

impl EditView {
    pub fn from_program(program: &Program) -> Self {
        Self {
            program: ProgramDocument::from_program(program),
            time_goal_days: program.goals.time.target_days,
            grade_target: program.goals.grade.target_average,
        }
    }
}
