pub mod error;
pub mod export;
pub mod model;

pub use error::AppError;
pub use export::ExportDocument;
pub use model::{ImportPhase, ImportSession, ImportStep, IMPORT_SCRIPT, STEP_DELAY};
