pub mod overlay;
pub mod presenter;
pub mod skeleton;

use serde::Serialize;

/// Named colors understood by the overlay consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Lime,
    Aqua,
    Orange,
    Red,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear { width: u32, height: u32 },
    DrawFrame { index: u64, width: u32, height: u32 },
    Circle { x: f64, y: f64, radius: f64, fill: Color },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Color, width: f64 },
    Text { x: f64, y: f64, text: String, fill: Color, font: String },
}

/// A 2-D drawing surface accepting primitive draw calls.
pub trait Surface {
    fn clear(&mut self, width: u32, height: u32);
    fn draw_frame(&mut self, index: u64, width: u32, height: u32);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color);
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Color, width: f64);
    fn fill_text(&mut self, x: f64, y: f64, text: &str, fill: Color, font: &str);
}

/// Surface that records draw calls in order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for DrawList {
    fn clear(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn draw_frame(&mut self, index: u64, width: u32, height: u32) {
        self.commands.push(DrawCommand::DrawFrame {
            index,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Color) {
        self.commands.push(DrawCommand::Circle { x, y, radius, fill });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Color, width: f64) {
        self.commands.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            stroke,
            width,
        });
    }

    fn fill_text(&mut self, x: f64, y: f64, text: &str, fill: Color, font: &str) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.to_string(),
            fill,
            font: font.to_string(),
        });
    }
}
