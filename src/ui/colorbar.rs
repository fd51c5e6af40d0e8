/// Colorbar legend widget
///
/// Draws the continuous viridis scale between the table-wide distance
/// bounds: a vertical gradient bar, min/max tick labels, and the legend
/// label. Maximum distance sits at the top, like a plot colorbar.

use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Text};
use iced::{Color, Point, Rectangle, Size};

use crate::annotate::colormap::viridis;
use crate::table::DistanceBounds;

/// Vertical space reserved above and below the bar for labels
const LABEL_MARGIN: f32 = 24.0;
/// Width of the gradient bar itself
const BAR_WIDTH: f32 = 18.0;
/// Left inset of the gradient bar
const BAR_INSET: f32 = 6.0;

#[derive(Debug, Clone)]
pub struct Colorbar {
    bounds: DistanceBounds,
}

impl Colorbar {
    pub fn new(bounds: DistanceBounds) -> Self {
        Colorbar { bounds }
    }
}

impl<Message> canvas::Program<Message> for Colorbar {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let bar_height = (bounds.height - 2.0 * LABEL_MARGIN).max(1.0);
        let bar_top = LABEL_MARGIN;
        let text_color = theme.palette().text;

        // One gradient band per pixel row, max at the top
        let steps = bar_height.ceil() as usize;
        for step in 0..steps {
            let t = if steps > 1 {
                1.0 - step as f64 / (steps - 1) as f64
            } else {
                0.5
            };
            let [r, g, b] = viridis(t);
            frame.fill_rectangle(
                Point::new(BAR_INSET, bar_top + step as f32),
                Size::new(BAR_WIDTH, 1.0),
                Color::from_rgb8(r, g, b),
            );
        }

        let label_x = BAR_INSET + BAR_WIDTH + 6.0;

        frame.fill_text(Text {
            content: format!("{:.2}", self.bounds.max),
            position: Point::new(label_x, bar_top),
            color: text_color,
            size: 13.0.into(),
            horizontal_alignment: Horizontal::Left,
            vertical_alignment: Vertical::Center,
            ..Text::default()
        });

        frame.fill_text(Text {
            content: format!("{:.2}", self.bounds.min),
            position: Point::new(label_x, bar_top + bar_height),
            color: text_color,
            size: 13.0.into(),
            horizontal_alignment: Horizontal::Left,
            vertical_alignment: Vertical::Center,
            ..Text::default()
        });

        frame.fill_text(Text {
            content: "Distance".to_string(),
            position: Point::new(BAR_INSET, bar_top + bar_height + 8.0),
            color: text_color,
            size: 14.0.into(),
            horizontal_alignment: Horizontal::Left,
            vertical_alignment: Vertical::Top,
            ..Text::default()
        });

        vec![frame.into_geometry()]
    }
}
