use std::time::Duration;

use crate::domain::AppError;
use crate::utils::{is_blank, validate_site_url};

/// One scripted step of the simulated import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStep {
    pub progress: u8,
    pub label: &'static str,
}

impl ImportStep {
    pub const fn new(progress: u8, label: &'static str) -> Self {
        Self { progress, label }
    }
}

/// The fixed scenario played while importing, in order.
pub const IMPORT_SCRIPT: [ImportStep; 6] = [
    ImportStep::new(15, "Connecting to website..."),
    ImportStep::new(35, "Analyzing content structure..."),
    ImportStep::new(55, "Extracting posts and pages..."),
    ImportStep::new(75, "Processing media files..."),
    ImportStep::new(90, "Generating WordPress XML..."),
    ImportStep::new(100, "Import complete!"),
];

/// Pause before each scripted step.
pub const STEP_DELAY: Duration = Duration::from_millis(800);

/// The step that must follow `progress`, or `None` once the script is played.
fn next_step(progress: u8) -> Option<ImportStep> {
    if progress == 0 {
        return IMPORT_SCRIPT.first().copied();
    }
    let position = IMPORT_SCRIPT.iter().position(|s| s.progress == progress)?;
    IMPORT_SCRIPT.get(position + 1).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPhase {
    #[default]
    Idle,
    Running {
        progress: u8,
        label: &'static str,
    },
    Done {
        progress: u8,
        label: &'static str,
    },
}

/// All view state of the importer window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportSession {
    url: String,
    phase: ImportPhase,
    validation_error: Option<AppError>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn phase(&self) -> ImportPhase {
        self.phase
    }

    pub fn validation_error(&self) -> Option<&AppError> {
        self.validation_error.as_ref()
    }

    pub fn progress(&self) -> u8 {
        match self.phase {
            ImportPhase::Idle => 0,
            ImportPhase::Running { progress, .. } | ImportPhase::Done { progress, .. } => progress,
        }
    }

    pub fn progress_text(&self) -> &'static str {
        match self.phase {
            ImportPhase::Idle => "",
            ImportPhase::Running { label, .. } | ImportPhase::Done { label, .. } => label,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ImportPhase::Idle
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, ImportPhase::Running { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, ImportPhase::Done { .. })
    }

    /// Whether the start action should be offered.
    pub fn can_start(&self) -> bool {
        self.is_idle() && !is_blank(&self.url)
    }

    /// The URL field is only editable in the input panel.
    pub fn set_url(&mut self, url: String) {
        if self.is_idle() {
            self.url = url;
            self.validation_error = None;
        }
    }

    /// Enters `Running` with progress 0. Returns `false` when the start is
    /// a no-op: not idle, a blank URL, or (with `validate`) a malformed URL.
    pub fn start(&mut self, validate: bool) -> bool {
        if !self.can_start() {
            return false;
        }

        if validate {
            if let Err(e) = validate_site_url(&self.url) {
                tracing::info!(url = %self.url, "Rejected import start: {}", e);
                self.validation_error = Some(e);
                return false;
            }
        }

        self.validation_error = None;
        self.phase = ImportPhase::Running {
            progress: 0,
            label: "",
        };
        true
    }

    /// Applies the next scripted step. Anything other than the step right
    /// after the current one, or a step outside `Running`, is dropped.
    pub fn advance(&mut self, step: ImportStep) -> bool {
        match self.phase {
            ImportPhase::Running { progress, .. } if next_step(progress) == Some(step) => {
                self.phase = ImportPhase::Running {
                    progress: step.progress,
                    label: step.label,
                };
                true
            }
            phase => {
                tracing::warn!(?phase, ?step, "Ignoring out-of-order import step");
                false
            }
        }
    }

    /// Completes the import once the last scripted step has been applied.
    pub fn finish(&mut self) -> bool {
        match self.phase {
            ImportPhase::Running { progress, label }
                if progress > 0 && next_step(progress).is_none() =>
            {
                self.phase = ImportPhase::Done { progress, label };
                true
            }
            phase => {
                tracing::warn!(?phase, "Ignoring import completion before the script finished");
                false
            }
        }
    }

    pub fn reset(&mut self) -> bool {
        if !self.is_done() {
            return false;
        }
        *self = Self::default();
        true
    }
}
