//! Rebuilds a program from the edit form and hands it to the manager.
//!
//! The whole program is reconstructed in memory first; the store is written
//! once at the end, or not at all.

use std::num::{ParseFloatError, ParseIntError};

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use tracing::{error, warn};

use crate::exam::ExamResult;
use crate::form::FormSource;
use crate::goal::{DEFAULT_GRADE_TARGET, Goals};
use crate::manager::ProgramManager;
use crate::persistence::{PersistenceResult, ProgramImporter, ProgramStore};
use crate::semester::{Semester, SemesterGrouping};
use crate::{Module, Program};

/// Field names of the edit form.
pub mod fields {
    pub const TITLE: &str = "studien_titel";
    pub const START_DATE: &str = "start_datum";
    pub const TIME_GOAL: &str = "ziel_tage";
    pub const GRADE_GOAL: &str = "ziel_note";
    pub const MODULE_TITLE: &str = "mod_titel";
    pub const MODULE_SEMESTER: &str = "mod_semester";
    pub const MODULE_EXAM_KIND: &str = "mod_pruefung";
    pub const MODULE_CREDITS: &str = "mod_credits";
    pub const MODULE_GRADE: &str = "mod_note";
    pub const MODULE_CHECK: &str = "mod_check";
}

pub const START_DATE_FORMAT: &str = "%Y-%m-%d";

/// Time targets up to this value are read as years.
pub const MAX_YEAR_INPUT: i64 = 12;

/// Replaces a grade target outside the 1.0..=6.0 scale.
pub const GRADE_TARGET_FALLBACK: f64 = DEFAULT_GRADE_TARGET;

const DEFAULT_TIME_INPUT: &str = "2190";
const DEFAULT_GRADE_INPUT: &str = "2.5";
const CHECKED: &str = "on";

#[derive(Debug, Error)]
enum GoalInputError {
    #[error("time goal '{value}' is not an integer: {source}")]
    Days {
        value: String,
        source: ParseIntError,
    },
    #[error("grade goal '{value}' is not a number: {source}")]
    Grade {
        value: String,
        source: ParseFloatError,
    },
}

#[derive(Debug, Error)]
enum ModuleInputError {
    #[error("no value submitted for {0}")]
    Missing(&'static str),
    #[error("semester '{value}' is not an integer: {source}")]
    Semester {
        value: String,
        source: ParseIntError,
    },
    #[error("credits '{value}' is not an integer: {source}")]
    Credits {
        value: String,
        source: ParseIntError,
    },
}

pub fn normalize_time_target(value: i64) -> i64 {
    if value <= MAX_YEAR_INPUT {
        value.saturating_mul(365)
    } else {
        value
    }
}

pub fn normalize_grade_target(value: f64) -> f64 {
    if (1.0..=6.0).contains(&value) {
        value
    } else {
        warn!(value, fallback = GRADE_TARGET_FALLBACK, "grade goal outside 1.0..=6.0");
        GRADE_TARGET_FALLBACK
    }
}

/// Reads a grade typed with either decimal separator. Empty or unreadable
/// input means "no grade".
pub fn parse_grade_input(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|grade| grade.is_finite())
}

fn parse_goals<F: FormSource + ?Sized>(form: &F) -> Result<Goals, GoalInputError> {
    let days_raw = form.get_or(fields::TIME_GOAL, DEFAULT_TIME_INPUT);
    let days = days_raw
        .trim()
        .parse::<i64>()
        .map_err(|source| GoalInputError::Days {
            value: days_raw.to_string(),
            source,
        })?;
    let grade_raw = form.get_or(fields::GRADE_GOAL, DEFAULT_GRADE_INPUT);
    let grade = grade_raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|source| GoalInputError::Grade {
            value: grade_raw.to_string(),
            source,
        })?;
    Ok(Goals::new(
        normalize_time_target(days),
        normalize_grade_target(grade),
    ))
}

fn apply_start_date<F: FormSource + ?Sized>(program: &mut Program, form: &F) {
    let Some(raw) = form.get(fields::START_DATE).filter(|raw| !raw.is_empty()) else {
        return;
    };
    match NaiveDate::parse_from_str(raw, START_DATE_FORMAT) {
        Ok(date) => program.start_date = date.and_time(NaiveTime::MIN),
        Err(err) => error!(value = raw, "start date could not be read: {err}"),
    }
}

struct ModuleColumns<'a> {
    titles: Vec<&'a str>,
    semesters: Vec<&'a str>,
    exam_kinds: Vec<&'a str>,
    credits: Vec<&'a str>,
    grades: Vec<&'a str>,
    checks: Vec<&'a str>,
}

impl<'a> ModuleColumns<'a> {
    fn read<F: FormSource + ?Sized>(form: &'a F) -> Self {
        Self {
            titles: form.get_all(fields::MODULE_TITLE),
            semesters: form.get_all(fields::MODULE_SEMESTER),
            exam_kinds: form.get_all(fields::MODULE_EXAM_KIND),
            credits: form.get_all(fields::MODULE_CREDITS),
            grades: form.get_all(fields::MODULE_GRADE),
            checks: form.get_all(fields::MODULE_CHECK),
        }
    }

    fn value(column: &[&'a str], idx: usize, name: &'static str) -> Result<&'a str, ModuleInputError> {
        column.get(idx).copied().ok_or(ModuleInputError::Missing(name))
    }

    fn module_at(&self, idx: usize) -> Result<(u32, Module), ModuleInputError> {
        let title = Self::value(&self.titles, idx, fields::MODULE_TITLE)?;
        let semester_raw = Self::value(&self.semesters, idx, fields::MODULE_SEMESTER)?;
        let semester = semester_raw
            .trim()
            .parse::<u32>()
            .map_err(|source| ModuleInputError::Semester {
                value: semester_raw.to_string(),
                source,
            })?;
        let credits_raw = Self::value(&self.credits, idx, fields::MODULE_CREDITS)?;
        let credits = credits_raw
            .trim()
            .parse::<u32>()
            .map_err(|source| ModuleInputError::Credits {
                value: credits_raw.to_string(),
                source,
            })?;
        let exam_kind = Self::value(&self.exam_kinds, idx, fields::MODULE_EXAM_KIND)?;
        let grade = parse_grade_input(Self::value(&self.grades, idx, fields::MODULE_GRADE)?);
        let recognized = self.checks.get(idx).is_some_and(|mark| *mark == CHECKED);

        let mut exam = ExamResult::new(exam_kind).with_recognized(recognized);
        exam.set_grade(grade);
        Ok((semester, Module::new(title, credits, exam)))
    }

    fn into_semesters(self) -> Vec<Semester> {
        let mut grouping = SemesterGrouping::new();
        for idx in 0..self.titles.len() {
            match self.module_at(idx) {
                Ok((semester, module)) => grouping.push(semester, module),
                Err(err) => error!(index = idx, "skipping module: {err}"),
            }
        }
        grouping.into_semesters()
    }
}

/// Applies the submitted form to `program`: title, start date, goals and a
/// freshly built semester list. Malformed fields are logged; they never fail
/// the whole reconciliation.
pub fn reconcile_form<F: FormSource + ?Sized>(mut program: Program, form: &F) -> Program {
    if let Some(title) = form.get(fields::TITLE) {
        program.title = title.to_string();
    }
    apply_start_date(&mut program, form);
    match parse_goals(form) {
        Ok(goals) => program.goals = goals,
        Err(err) => error!("goals left unchanged: {err}"),
    }
    program.semesters = ModuleColumns::read(form).into_semesters();
    program
}

/// Reconciles the form into `program` and writes the result through the
/// manager before returning it.
pub fn update_program_from_form<S, I, F>(
    manager: &ProgramManager<S, I>,
    program: Program,
    form: &F,
) -> PersistenceResult<Program>
where
    S: ProgramStore,
    I: ProgramImporter,
    F: FormSource + ?Sized,
{
    let program = reconcile_form(program, form);
    manager.update_program(&program)?;
    Ok(program)
}
