use tracing::info;

use crate::Program;
use crate::persistence::{
    CsvFileImporter, JsonFileStore, PersistenceResult, ProgramImporter, ProgramStore,
};

pub type FileProgramManager = ProgramManager<JsonFileStore, CsvFileImporter>;

/// Sole writer of the persisted program. Nothing is cached between calls:
/// every load goes back to the store.
#[derive(Debug, Clone)]
pub struct ProgramManager<S, I> {
    store: S,
    importer: I,
}

impl<S: ProgramStore, I: ProgramImporter> ProgramManager<S, I> {
    pub fn new(store: S, importer: I) -> Self {
        Self { store, importer }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    /// Loads the stored program. On first use the curriculum template is
    /// imported (or an empty program created) and persisted right away.
    pub fn load_program(&self) -> PersistenceResult<Program> {
        if let Some(program) = self.store.load()? {
            return Ok(program);
        }
        info!("no stored program, bootstrapping from curriculum template");
        let program = self.importer.load()?;
        self.store.save(&program)?;
        Ok(program)
    }

    pub fn update_program(&self, program: &Program) -> PersistenceResult<()> {
        self.store.save(program)
    }
}
