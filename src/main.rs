use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;
use std::path::PathBuf;

use target_explorer::annotate::{render_figure_async, Figure};
use target_explorer::dataset::DatasetPaths;
use target_explorer::settings::Settings;
use target_explorer::table::TargetTable;
use target_explorer::ui::{figure_content, Colorbar};

/// Result of opening a dataset folder
#[derive(Debug, Clone)]
struct OpenedDataset {
    paths: DatasetPaths,
    table: TargetTable,
    /// Number of .jpg files found under the image directory
    disk_images: usize,
}

/// Widgets prepared for the figure currently on screen
struct FigureView {
    title: String,
    handle: Handle,
    colorbar: Colorbar,
}

/// Main application state
struct TargetExplorer {
    settings: Settings,
    dataset: Option<OpenedDataset>,
    figure: Option<FigureView>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Open Dataset Folder" button
    OpenDataset,
    /// Background dataset load completed
    DatasetOpened(Result<OpenedDataset, String>),
    /// User clicked an identifier in the grid
    ShowImage(String),
    /// Background figure render completed
    FigureReady(Result<Option<Figure>, String>),
    /// User left the figure view
    CloseFigure,
}

impl TargetExplorer {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load();

        println!("🎯 Target Explorer initialized");

        (
            TargetExplorer {
                settings,
                dataset: None,
                figure: None,
                status: "Open a dataset folder to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenDataset => {
                // Show the native folder picker dialog, starting at the
                // last-used dataset folder
                let mut dialog = FileDialog::new().set_title("Select Dataset Folder");
                if let Some(last) = &self.settings.last_dataset_dir {
                    dialog = dialog.set_directory(last);
                }

                if let Some(root) = dialog.pick_folder() {
                    self.status = format!("Opening {}...", root.display());

                    return Task::perform(open_dataset_async(root), Message::DatasetOpened);
                }

                Task::none()
            }
            Message::DatasetOpened(Ok(dataset)) => {
                if let Err(e) = self
                    .settings
                    .remember_dataset(dataset.paths.root().to_path_buf())
                {
                    eprintln!("⚠️  Could not save settings: {}", e);
                }

                self.status = format!(
                    "✅ Loaded {} target rows, {} images on disk.",
                    dataset.table.len(),
                    dataset.disk_images
                );
                println!(
                    "📊 Dataset opened: {} rows, {} images",
                    dataset.table.len(),
                    dataset.disk_images
                );

                self.dataset = Some(dataset);
                self.figure = None;

                Task::none()
            }
            Message::DatasetOpened(Err(e)) => {
                eprintln!("⚠️  Failed to open dataset: {}", e);
                self.status = format!("⚠️ {}", e);
                Task::none()
            }
            Message::ShowImage(image_id) => {
                let Some(dataset) = &self.dataset else {
                    return Task::none();
                };

                self.status = format!("Rendering {}...", image_id);

                Task::perform(
                    render_figure_async(dataset.table.clone(), dataset.paths.clone(), image_id),
                    Message::FigureReady,
                )
            }
            Message::FigureReady(Ok(Some(figure))) => {
                let (width, height) = figure.pixels.dimensions();

                self.status = figure.title.clone();
                self.figure = Some(FigureView {
                    title: figure.title,
                    handle: Handle::from_rgba(width, height, figure.pixels.into_raw()),
                    colorbar: Colorbar::new(figure.bounds),
                });

                Task::none()
            }
            Message::FigureReady(Ok(None)) => {
                // The identifier has an image but no table row
                self.status = "⚠️ No target row for that image; nothing to plot.".to_string();
                Task::none()
            }
            Message::FigureReady(Err(e)) => {
                eprintln!("⚠️  Failed to render figure: {}", e);
                self.status = format!("⚠️ {}", e);
                Task::none()
            }
            Message::CloseFigure => {
                self.figure = None;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if let Some(figure) = &self.figure {
            let content: Column<Message> = column![
                figure_content(&figure.title, &figure.handle, &figure.colorbar),
                row![
                    button("Back to dataset")
                        .on_press(Message::CloseFigure)
                        .padding(8),
                    text(&self.status).size(14),
                ]
                .spacing(16)
                .align_y(Alignment::Center),
            ]
            .spacing(12)
            .padding(16);

            return container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        let mut content: Column<Message> = column![
            text("Target Explorer").size(40),
            button("Open Dataset Folder")
                .on_press(Message::OpenDataset)
                .padding(10),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        if let Some(dataset) = &self.dataset {
            let ids: Vec<Element<Message>> = dataset
                .table
                .rows()
                .iter()
                .map(|row| {
                    button(text(&row.image_id).size(14))
                        .on_press(Message::ShowImage(row.image_id.clone()))
                        .padding(6)
                        .into()
                })
                .collect();

            let grid = Wrap::with_elements(ids).spacing(8.0).line_spacing(8.0);

            content = content.push(scrollable(grid).width(Length::Fill).height(Length::Fill));
        }

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application(
        "Target Explorer",
        TargetExplorer::update,
        TargetExplorer::view,
    )
    .theme(TargetExplorer::theme)
    .centered()
    .run_with(TargetExplorer::new)
}

/// Async function to open a dataset folder: parse the target table and count
/// the images on disk. Runs in a background thread to avoid blocking the UI.
async fn open_dataset_async(root: PathBuf) -> Result<OpenedDataset, String> {
    tokio::task::spawn_blocking(move || {
        let paths = DatasetPaths::new(root);

        let table = TargetTable::load(paths.target_csv()).map_err(|e| e.to_string())?;
        let disk_images = paths.count_disk_images();

        Ok(OpenedDataset {
            paths,
            table,
            disk_images,
        })
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
