/// Single-figure window
///
/// The blocking display surface behind `plot_image_with_distance_crosshair`:
/// one window showing the figure title, the annotated image, and the
/// colorbar, open until the user closes it. The window offers no
/// interactions, so its message type is uninhabited.

use iced::widget::image::{Handle, Image};
use iced::widget::{canvas, column, container, row, text};
use iced::{Element, Length, Task, Theme};

use crate::annotate::Figure;

use super::colorbar::Colorbar;

#[derive(Debug, Clone)]
pub enum Message {}

struct FigureWindow {
    title: String,
    handle: Handle,
    colorbar: Colorbar,
}

impl FigureWindow {
    fn new(figure: &Figure) -> Self {
        let (width, height) = figure.pixels.dimensions();
        let handle = Handle::from_rgba(width, height, figure.pixels.clone().into_raw());

        FigureWindow {
            title: figure.title.clone(),
            handle,
            colorbar: Colorbar::new(figure.bounds),
        }
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {}
    }

    fn view(&self) -> Element<Message> {
        container(figure_content(&self.title, &self.handle, &self.colorbar))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(16)
            .into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// The shared figure layout: title on top, annotated image beside the
/// colorbar. The explorer binary embeds the same layout in its figure view.
pub fn figure_content<'a, Message: Clone + 'a>(
    title: &'a str,
    handle: &Handle,
    colorbar: &Colorbar,
) -> Element<'a, Message> {
    column![
        text(title).size(18),
        row![
            container(
                Image::new(handle.clone())
                    .width(Length::Fill)
                    .height(Length::Fill)
            )
            .width(Length::Fill)
            .height(Length::Fill),
            canvas(colorbar.clone())
                .width(Length::Fixed(96.0))
                .height(Length::Fill),
        ]
        .spacing(16)
        .height(Length::Fill),
    ]
    .spacing(12)
    .into()
}

/// Display a rendered figure, blocking until the window closes.
pub fn show(figure: Figure) -> iced::Result {
    iced::application(FigureWindow::title, FigureWindow::update, FigureWindow::view)
        .theme(FigureWindow::theme)
        .centered()
        .run_with(move || (FigureWindow::new(&figure), Task::none()))
}
