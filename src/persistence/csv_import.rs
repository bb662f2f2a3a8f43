use super::{PersistenceResult, ProgramImporter};
use crate::exam::ExamResult;
use crate::goal::Goals;
use crate::program::{PLACEHOLDER_TITLE, local_now};
use crate::semester::SemesterGrouping;
use crate::{Module, Program};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// One row of the curriculum template. Grades and recognition are not part
/// of the template; they always start empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumRow {
    #[serde(rename = "Semester")]
    pub semester: u32,
    #[serde(rename = "Modul")]
    pub module: String,
    #[serde(rename = "ECTS")]
    pub credits: u32,
    #[serde(rename = "Pruefungsleistung")]
    pub exam_kind: String,
}

pub fn program_from_rows<I>(rows: I, now: NaiveDateTime) -> Program
where
    I: IntoIterator<Item = CurriculumRow>,
{
    let mut grouping = SemesterGrouping::new();
    for row in rows {
        let module = Module::new(row.module, row.credits, ExamResult::new(row.exam_kind));
        grouping.push(row.semester, module);
    }
    if grouping.is_empty() {
        info!("curriculum template has no modules, creating an empty program");
    }
    Program::new(PLACEHOLDER_TITLE, now, grouping.into_semesters(), Goals::zeroed())
}

/// Reads template rows from `reader`. Rows that fail to parse are logged and
/// skipped; reader failures abort the import.
pub fn import_program_from_csv<R: Read>(reader: R, now: NaiveDateTime) -> PersistenceResult<Program> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<CurriculumRow>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => error!(row = idx + 1, "skipping curriculum row: {err}"),
        }
    }
    Ok(program_from_rows(rows, now))
}

#[derive(Debug, Clone)]
pub struct CsvFileImporter {
    path: PathBuf,
}

impl CsvFileImporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgramImporter for CsvFileImporter {
    fn load(&self) -> PersistenceResult<Program> {
        let now = local_now();
        if !self.path.exists() {
            info!(path = %self.path.display(), "no curriculum template found");
            return Ok(program_from_rows(Vec::new(), now));
        }
        info!(path = %self.path.display(), "importing curriculum template");
        let file = File::open(&self.path)?;
        import_program_from_csv(file, now)
    }
}
