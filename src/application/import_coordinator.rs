use std::path::PathBuf;
use std::time::Duration;

use futures::{stream::BoxStream, StreamExt};
use tokio::io::AsyncWriteExt;

use crate::domain::export::MIME_TYPE;
use crate::domain::{AppError, ExportDocument, ImportStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    Progress(ImportStep),
    Completed,
}

#[derive(Debug, Clone)]
pub struct ImportCoordinator {
    script: Vec<ImportStep>,
    step_delay: Duration,
}

impl ImportCoordinator {
    pub fn new(script: impl Into<Vec<ImportStep>>, step_delay: Duration) -> Self {
        Self {
            script: script.into(),
            step_delay,
        }
    }

    /// Plays the script: one `Progress` per step, each after `step_delay`,
    /// then a single `Completed`.
    pub fn run_script(&self) -> BoxStream<'static, ImportEvent> {
        let step_delay = self.step_delay;

        futures::stream::unfold(
            ScriptState::Pending {
                script: self.script.clone(),
                next: 0,
            },
            move |state| async move {
                match state {
                    ScriptState::Pending { script, next } => match script.get(next).copied() {
                        Some(step) => {
                            tokio::time::sleep(step_delay).await;
                            tracing::debug!(progress = step.progress, "{}", step.label);
                            Some((
                                ImportEvent::Progress(step),
                                ScriptState::Pending {
                                    script,
                                    next: next + 1,
                                },
                            ))
                        }
                        None => Some((ImportEvent::Completed, ScriptState::Finished)),
                    },
                    ScriptState::Finished => None,
                }
            },
        )
        .boxed()
    }

    pub async fn choose_save_path(&self, suggested_filename: String) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_file_name(&suggested_filename)
            .add_filter("WordPress XML", &["xml"])
            .save_file()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    pub async fn save_export(path: PathBuf, document: ExportDocument) -> Result<PathBuf, AppError> {
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| AppError::Io(format!("Failed to create file: {}", e)))?;

        file.write_all(document.as_bytes())
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

        tracing::debug!(
            path = %path.display(),
            mime = MIME_TYPE,
            bytes = document.contents().len(),
            "Wrote export"
        );
        Ok(path)
    }
}

enum ScriptState {
    Pending { script: Vec<ImportStep>, next: usize },
    Finished,
}
