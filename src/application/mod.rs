pub mod import_coordinator;

pub use import_coordinator::{ImportCoordinator, ImportEvent};
