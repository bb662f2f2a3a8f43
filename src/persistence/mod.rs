use std::io;

use thiserror::Error;

use crate::Program;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Authoritative program state. `load` yields `None` when nothing is stored yet.
pub trait ProgramStore {
    fn load(&self) -> PersistenceResult<Option<Program>>;
    fn save(&self, program: &Program) -> PersistenceResult<()>;
}

/// One-way bootstrap source. Yields an empty program when the source is absent.
pub trait ProgramImporter {
    fn load(&self) -> PersistenceResult<Program>;
}

impl<T: ProgramStore + ?Sized> ProgramStore for &T {
    fn load(&self) -> PersistenceResult<Option<Program>> {
        (**self).load()
    }

    fn save(&self, program: &Program) -> PersistenceResult<()> {
        (**self).save(program)
    }
}

impl<T: ProgramImporter + ?Sized> ProgramImporter for &T {
    fn load(&self) -> PersistenceResult<Program> {
        (**self).load()
    }
}

pub mod csv_import;
pub mod file;

pub use csv_import::{CsvFileImporter, CurriculumRow, import_program_from_csv, program_from_rows};
pub use file::{
    JsonFileStore, ProgramDocument, load_program_from_json, program_from_json_str,
    program_to_json_string, save_program_to_json,
};
