pub mod calculations;
pub mod config;
pub mod dashboard;
pub mod exam;
pub mod form;
pub mod goal;
pub mod handler;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod manager;
pub mod module;
pub mod persistence;
pub mod program;
pub mod semester;

pub use calculations::{
    GoalColor, credit_progress_pct, goal_color, module_progress_pct, time_progress_pct,
};
pub use config::{AppConfig, ConfigError};
pub use dashboard::{DashboardView, EditView};
pub use exam::ExamResult;
pub use form::{FormData, FormSource};
pub use goal::{Goal, GoalKey, Goals, GradeGoal, TimeGoal};
pub use handler::{reconcile_form, update_program_from_form};
pub use manager::{FileProgramManager, ProgramManager};
pub use module::Module;
pub use persistence::{
    CsvFileImporter, JsonFileStore, PersistenceError, PersistenceResult, ProgramImporter,
    ProgramStore, import_program_from_csv, load_program_from_json, program_from_json_str,
    program_from_rows, program_to_json_string, save_program_to_json,
};
pub use program::{PLACEHOLDER_TITLE, Program, local_now};
pub use semester::Semester;
