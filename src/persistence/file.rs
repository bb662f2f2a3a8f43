use super::{PersistenceError, PersistenceResult, ProgramStore};
use crate::exam::ExamResult;
use crate::goal::{DEFAULT_GRADE_TARGET, DEFAULT_TIME_TARGET_DAYS, Goals};
use crate::{Module, Program, Semester};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk shape of the state file. Field names are part of the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDocument {
    pub titel: String,
    #[serde(with = "start_date_format")]
    pub start_datum: chrono::NaiveDateTime,
    #[serde(default)]
    pub ziele: GoalsDocument,
    pub semester: Vec<SemesterDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsDocument {
    pub zeit_tage: i64,
    pub noten_schnitt: f64,
}

impl Default for GoalsDocument {
    fn default() -> Self {
        Self {
            zeit_tage: DEFAULT_TIME_TARGET_DAYS,
            noten_schnitt: DEFAULT_GRADE_TARGET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterDocument {
    pub nummer: u32,
    pub module: Vec<ModuleDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDocument {
    pub titel: String,
    pub ects: u32,
    #[serde(default)]
    pub note: Option<f64>,
    #[serde(default)]
    pub anerkannt: Option<bool>,
    pub pruefungsleistung: String,
}

impl ProgramDocument {
    pub fn from_program(program: &Program) -> Self {
        Self {
            titel: program.title.clone(),
            start_datum: program.start_date,
            ziele: GoalsDocument {
                zeit_tage: program.goals.time.target_days,
                noten_schnitt: program.goals.grade.target_average,
            },
            semester: program
                .semesters
                .iter()
                .map(|semester| SemesterDocument {
                    nummer: semester.number,
                    module: semester.modules.iter().map(ModuleDocument::from).collect(),
                })
                .collect(),
        }
    }

    pub fn into_program(self) -> Program {
        let semesters = self
            .semester
            .into_iter()
            .map(|semester| {
                let modules = semester.module.into_iter().map(Module::from).collect();
                Semester::new(semester.nummer, modules)
            })
            .collect();
        let goals = Goals::new(self.ziele.zeit_tage, self.ziele.noten_schnitt);
        Program::new(self.titel, self.start_datum, semesters, goals)
    }
}

impl From<&Module> for ModuleDocument {
    fn from(module: &Module) -> Self {
        Self {
            titel: module.title.clone(),
            ects: module.credits,
            note: module.exam.grade,
            anerkannt: module.exam.recognized,
            pruefungsleistung: module.exam.kind.clone(),
        }
    }
}

impl From<ModuleDocument> for Module {
    fn from(document: ModuleDocument) -> Self {
        // A missing or null flag is read back as "not recognized".
        let exam = ExamResult {
            kind: document.pruefungsleistung,
            grade: document.note,
            recognized: Some(document.anerkannt.unwrap_or(false)),
        };
        Module::new(document.titel, document.ects, exam)
    }
}

mod start_date_format {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const WRITE_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
    const READ_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    // The offset is dropped; the wall-clock time is kept.
    const READ_FORMATS_OFFSET: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f%:z",
        "%Y-%m-%d %H:%M:%S%.f%:z",
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
    ];

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(raw.trim()).ok_or_else(|| D::Error::custom(format!("invalid start date '{raw}'")))
    }

    /// Whole seconds have no fraction; anything else gets exactly six digits.
    pub(super) fn format(value: &NaiveDateTime) -> String {
        let fmt = if value.nanosecond() == 0 {
            WRITE_FORMAT
        } else {
            WRITE_FORMAT_MICROS
        };
        value.format(fmt).to_string()
    }

    pub(super) fn parse(input: &str) -> Option<NaiveDateTime> {
        let input = match input.strip_suffix('Z') {
            Some(rest) => format!("{rest}+00:00"),
            None => input.to_string(),
        };
        READ_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&input, fmt).ok())
            .or_else(|| {
                READ_FORMATS_OFFSET
                    .iter()
                    .find_map(|fmt| DateTime::parse_from_str(&input, fmt).ok())
                    .map(|dt| dt.naive_local())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(&input, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }
}

fn write_document<W: Write>(document: &ProgramDocument, writer: W) -> PersistenceResult<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    document.serialize(&mut serializer)?;
    Ok(())
}

pub fn program_to_json_string(program: &Program) -> PersistenceResult<String> {
    let mut buffer = Vec::new();
    write_document(&ProgramDocument::from_program(program), &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn program_from_json_str(input: &str) -> PersistenceResult<Program> {
    let document: ProgramDocument = serde_json::from_str(input)?;
    Ok(document.into_program())
}

pub fn save_program_to_json<P: AsRef<Path>>(program: &Program, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_document(&ProgramDocument::from_program(program), &mut writer)?;
    writer.flush()?;
    Ok(())
}

pub fn load_program_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Program> {
    let file = File::open(path)?;
    let document: ProgramDocument = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(document.into_program())
}

/// JSON state file. Writes go straight to the target path, so a crash
/// mid-write can leave a truncated file behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgramStore for JsonFileStore {
    fn load(&self) -> PersistenceResult<Option<Program>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let program = load_program_from_json(&self.path)?;
        info!(path = %self.path.display(), "program loaded from JSON file");
        Ok(Some(program))
    }

    fn save(&self, program: &Program) -> PersistenceResult<()> {
        save_program_to_json(program, &self.path)?;
        info!(path = %self.path.display(), "program saved to JSON file");
        Ok(())
    }
}
