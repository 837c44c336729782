use iced::{
    widget::{button, column, container, progress_bar, row, text, text_input, Space},
    Alignment, Element, Length,
};

use crate::domain::ImportSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiMessage {
    UrlChanged(String),
    StartPressed,
    DownloadPressed,
    ResetPressed,
}

/// Borrowed view over the importer state. Renders exactly one panel.
pub struct ImportView<'a> {
    pub session: &'a ImportSession,
    pub download_status: Option<&'a str>,
}

impl<'a> ImportView<'a> {
    pub fn new(session: &'a ImportSession, download_status: Option<&'a str>) -> Self {
        Self {
            session,
            download_status,
        }
    }

    pub fn view(&self) -> Element<'a, UiMessage> {
        let panel = if self.session.is_running() {
            progress_panel(self.session)
        } else if self.session.is_done() {
            self.complete_panel()
        } else {
            self.input_panel()
        };

        let content = column![
            header(),
            Space::new().height(Length::Fixed(20.0)),
            container(panel).padding(24).width(Length::Fill),
            Space::new().height(Length::Fixed(16.0)),
            text("Transform any website into WordPress content").size(12),
        ]
        .align_x(Alignment::Center)
        .max_width(512.0)
        .spacing(10);

        container(content)
            .padding(16)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn input_panel(&self) -> Element<'a, UiMessage> {
        let start = self
            .session
            .can_start()
            .then_some(UiMessage::StartPressed);

        let mut panel = column![
            text("Website URL").size(14),
            text_input("https://example.com", self.session.url())
                .on_input(UiMessage::UrlChanged)
                .padding(10),
        ]
        .spacing(10);

        if let Some(error) = self.session.validation_error() {
            panel = panel.push(text(error.to_string()).size(13));
        }

        panel
            .push(
                button("Start Import")
                    .on_press_maybe(start)
                    .width(Length::Fill)
                    .padding([10, 20]),
            )
            .into()
    }

    fn complete_panel(&self) -> Element<'a, UiMessage> {
        let mut panel = column![
            text("Import Complete").size(18),
            text("Your WordPress import file is ready").size(14),
            Space::new().height(Length::Fixed(10.0)),
            button("Download WordPress XML")
                .on_press(UiMessage::DownloadPressed)
                .width(Length::Fill)
                .padding([10, 20]),
            button("Import Another Website")
                .on_press(UiMessage::ResetPressed)
                .width(Length::Fill)
                .style(button::secondary)
                .padding([8, 20]),
        ]
        .align_x(Alignment::Center)
        .spacing(10);

        if let Some(status) = self.download_status {
            panel = panel.push(text(status).size(13));
        }

        panel.into()
    }
}

fn header<'a>() -> Element<'a, UiMessage> {
    column![
        text("WPCup").size(32),
        text("WordPress Content Importer").size(14),
    ]
    .align_x(Alignment::Center)
    .spacing(4)
    .into()
}

fn progress_panel<'a>(session: &ImportSession) -> Element<'a, UiMessage> {
    let progress = session.progress();
    column![
        text("Processing Content").size(18),
        text("Please wait while we import your content").size(14),
        Space::new().height(Length::Fixed(10.0)),
        progress_bar(0.0..=100.0, f32::from(progress)),
        row![
            text(session.progress_text()).size(14),
            Space::new().width(Length::Fill),
            text(format!("{}%", progress)).size(14),
        ],
    ]
    .align_x(Alignment::Center)
    .spacing(10)
    .into()
}
