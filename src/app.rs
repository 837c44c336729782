use crate::application::{ImportCoordinator, ImportEvent};
use crate::config::ImporterConfig;
use crate::domain::{AppError, ExportDocument, ImportSession, IMPORT_SCRIPT, STEP_DELAY};
use crate::ui::{ImportView, UiMessage};
use futures::StreamExt;
use iced::task;
use iced::Task;
use std::path::PathBuf;

pub struct ImportApp {
    session: ImportSession,
    coordinator: ImportCoordinator,
    config: ImporterConfig,
    // Status line shown under the download buttons
    download_status: Option<String>,
    // Aborts the scripted import if the window goes away mid-run
    import_handle: Option<task::Handle>,
    // Bumped on every start; save results from older imports are dropped
    generation: u64,
}

impl Default for ImportApp {
    fn default() -> Self {
        Self::new(ImporterConfig::default())
    }
}

impl ImportApp {
    pub fn new(config: ImporterConfig) -> Self {
        let coordinator = ImportCoordinator::new(IMPORT_SCRIPT, STEP_DELAY);

        Self {
            session: ImportSession::new(),
            coordinator,
            config,
            download_status: None,
            import_handle: None,
            generation: 0,
        }
    }

    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    fn start_import(&mut self) -> Task<Message> {
        if !self.session.start(self.config.validate_url) {
            return Task::none();
        }

        self.generation += 1;
        tracing::info!(
            url = %self.session.url(),
            generation = self.generation,
            "Starting import"
        );
        self.download_status = None;

        let (task, handle) =
            Task::stream(self.coordinator.run_script().map(Message::Import)).abortable();
        self.import_handle = Some(handle.abort_on_drop());
        task
    }

    fn begin_download(&mut self) -> Task<Message> {
        if !self.session.is_done() {
            return Task::none();
        }

        let document = ExportDocument::for_url(self.session.url(), self.config.escape_url);
        let coordinator = self.coordinator.clone();
        let file_name = self.config.file_name.clone();
        let generation = self.generation;
        self.download_status = Some("Please select save location...".to_string());

        Task::perform(
            async move {
                let path = coordinator.choose_save_path(file_name).await;
                (path, document)
            },
            move |(path, document)| Message::SaveLocationSelected(generation, path, document),
        )
    }

    /// A save belongs to the shown import only while that import is done.
    fn is_current(&self, generation: u64) -> bool {
        self.session.is_done() && self.generation == generation
    }

    fn reset(&mut self) {
        if self.session.reset() {
            tracing::info!("Import reset");
            self.download_status = None;
            self.import_handle = None;
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Ui(UiMessage),
    Import(ImportEvent),
    /// (Import generation, selected path, document to write)
    SaveLocationSelected(u64, Option<PathBuf>, ExportDocument),
    /// (Import generation, final result after writing the export)
    ExportSaved(u64, Result<PathBuf, AppError>),
}

pub fn update(app: &mut ImportApp, message: Message) -> Task<Message> {
    match message {
        Message::Ui(ui_msg) => match ui_msg {
            UiMessage::UrlChanged(url) => app.session.set_url(url),
            UiMessage::StartPressed => return app.start_import(),
            UiMessage::DownloadPressed => return app.begin_download(),
            UiMessage::ResetPressed => app.reset(),
        },
        Message::Import(ImportEvent::Progress(step)) => {
            if app.session.advance(step) {
                tracing::info!(progress = step.progress, "{}", step.label);
            }
        }
        Message::Import(ImportEvent::Completed) => {
            if app.session.finish() {
                tracing::info!(url = %app.session.url(), "Import complete");
            }
            app.import_handle = None;
        }
        Message::SaveLocationSelected(generation, _, _) if !app.is_current(generation) => {
            tracing::debug!(
                generation,
                "Save location chosen for a previous import; dropping export"
            );
        }
        Message::SaveLocationSelected(generation, path_opt, document) => match path_opt {
            Some(path) => {
                app.download_status = Some(format!("Saving to: {}", path.display()));
                return Task::perform(
                    ImportCoordinator::save_export(path, document),
                    move |result| Message::ExportSaved(generation, result),
                );
            }
            None => {
                // User cancelled dialog
                app.download_status = Some("Download cancelled".to_string());
            }
        },
        Message::ExportSaved(generation, result) => {
            let status = match result {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "Saved WordPress export");
                    format!("Saved: {}", path.display())
                }
                Err(e) => {
                    tracing::error!("Failed to save WordPress export: {}", e);
                    format!("Download failed: {}", e)
                }
            };
            if app.is_current(generation) {
                app.download_status = Some(status);
            }
        }
    }
    Task::none()
}

pub fn view(app: &ImportApp) -> iced::Element<'_, Message> {
    ImportView::new(app.session(), app.download_status.as_deref())
        .view()
        .map(Message::Ui)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImportPhase;
    use crate::logging;

    fn ui(app: &mut ImportApp, msg: UiMessage) {
        let _ = update(app, Message::Ui(msg));
    }

    fn play_script(app: &mut ImportApp) {
        for step in IMPORT_SCRIPT {
            let _ = update(app, Message::Import(ImportEvent::Progress(step)));
        }
        let _ = update(app, Message::Import(ImportEvent::Completed));
    }

    #[test]
    fn test_blank_url_start_is_noop() {
        logging::init_for_tests();
        let mut app = ImportApp::default();
        ui(&mut app, UiMessage::UrlChanged("   ".to_string()));
        ui(&mut app, UiMessage::StartPressed);

        assert_eq!(app.session().phase(), ImportPhase::Idle);
        assert_eq!(app.session().progress(), 0);
        assert!(app.import_handle.is_none());
    }

    #[test]
    fn test_full_import_flow() {
        logging::init_for_tests();
        let mut app = ImportApp::default();
        ui(&mut app, UiMessage::UrlChanged("https://example.com".to_string()));
        ui(&mut app, UiMessage::StartPressed);

        assert!(app.session().is_running());
        assert_eq!(app.session().progress(), 0);
        assert!(app.import_handle.is_some());

        play_script(&mut app);

        assert_eq!(
            app.session().phase(),
            ImportPhase::Done {
                progress: 100,
                label: "Import complete!"
            }
        );
        assert!(app.import_handle.is_none());

        ui(&mut app, UiMessage::ResetPressed);
        assert_eq!(app.session(), &ImportSession::default());
        assert!(app.download_status.is_none());
    }

    #[test]
    fn test_download_and_reset_ignored_while_running() {
        let mut app = ImportApp::default();
        ui(&mut app, UiMessage::UrlChanged("https://example.com".to_string()));
        ui(&mut app, UiMessage::StartPressed);

        ui(&mut app, UiMessage::DownloadPressed);
        ui(&mut app, UiMessage::ResetPressed);

        assert!(app.session().is_running());
        assert!(app.download_status.is_none());
    }

    #[test]
    fn test_validation_error_surfaces_in_session() {
        logging::init_for_tests();
        let mut app = ImportApp::new(ImporterConfig {
            validate_url: true,
            ..ImporterConfig::default()
        });
        ui(&mut app, UiMessage::UrlChanged("example".to_string()));
        ui(&mut app, UiMessage::StartPressed);

        assert!(app.session().is_idle());
        assert!(app.session().validation_error().is_some());
    }

    #[test]
    fn test_cancelled_save_dialog_sets_status() {
        let mut app = ImportApp::default();
        ui(&mut app, UiMessage::UrlChanged("https://example.com".to_string()));
        ui(&mut app, UiMessage::StartPressed);
        play_script(&mut app);

        let document = ExportDocument::placeholder("https://example.com");
        let generation = app.generation;
        let _ = update(
            &mut app,
            Message::SaveLocationSelected(generation, None, document),
        );
        assert_eq!(app.download_status.as_deref(), Some("Download cancelled"));
    }

    #[test]
    fn test_save_result_reported_only_while_done() {
        logging::init_for_tests();
        let mut app = ImportApp::default();
        ui(&mut app, UiMessage::UrlChanged("https://example.com".to_string()));
        ui(&mut app, UiMessage::StartPressed);
        play_script(&mut app);

        let generation = app.generation;
        let _ = update(
            &mut app,
            Message::ExportSaved(generation, Err(AppError::Io("disk full".to_string()))),
        );
        assert_eq!(
            app.download_status.as_deref(),
            Some("Download failed: I/O error: disk full")
        );

        ui(&mut app, UiMessage::ResetPressed);
        let _ = update(
            &mut app,
            Message::ExportSaved(generation, Ok(PathBuf::from("wordpress-import.xml"))),
        );
        assert!(app.download_status.is_none());
    }

    fn import_to_done(app: &mut ImportApp, url: &str) {
        ui(app, UiMessage::UrlChanged(url.to_string()));
        ui(app, UiMessage::StartPressed);
        play_script(app);
        assert!(app.session().is_done());
    }

    #[test]
    fn test_save_from_previous_import_is_dropped() {
        logging::init_for_tests();
        let mut app = ImportApp::default();
        import_to_done(&mut app, "https://old.example");
        let old_generation = app.generation;
        let old_document = ExportDocument::placeholder(app.session().url());

        ui(&mut app, UiMessage::ResetPressed);
        import_to_done(&mut app, "https://new.example");
        assert_ne!(app.generation, old_generation);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordpress-import.xml");
        let _ = update(
            &mut app,
            Message::SaveLocationSelected(old_generation, Some(path), old_document),
        );
        assert!(app.download_status.is_none());

        let _ = update(
            &mut app,
            Message::ExportSaved(old_generation, Ok(PathBuf::from("wordpress-import.xml"))),
        );
        assert!(app.download_status.is_none());
        assert_eq!(app.session().url(), "https://new.example");
    }

    #[test]
    fn test_save_for_current_import_proceeds() {
        let mut app = ImportApp::default();
        import_to_done(&mut app, "https://example.com");

        let document = ExportDocument::placeholder(app.session().url());
        let generation = app.generation;
        let _ = update(
            &mut app,
            Message::SaveLocationSelected(
                generation,
                Some(PathBuf::from("wordpress-import.xml")),
                document,
            ),
        );
        assert_eq!(
            app.download_status.as_deref(),
            Some("Saving to: wordpress-import.xml")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_config_cannot_shorten_step_delay() {
        let config = ImporterConfig::from_json(r#"{ "step_delay_ms": 0 }"#).unwrap();
        let app = ImportApp::new(config);

        let started = tokio::time::Instant::now();
        let events: Vec<_> = app.coordinator.run_script().collect().await;

        assert_eq!(events.len(), IMPORT_SCRIPT.len() + 1);
        assert!(started.elapsed() >= STEP_DELAY * IMPORT_SCRIPT.len() as u32);
    }
}
