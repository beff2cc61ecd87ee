// ============================================================================
// RETAINED MODE SCENE
// ============================================================================
//
// Generators produce `DrawCommand`s; the scene keeps them in the order they were
// added, which is also the paint order of the serialized SVG.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use svg::node::element::{Line, Polygon, Polyline, Text};
use svg::node::Node;
use svg::Document;

use crate::error::Result;
use crate::TickTier;

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_svg(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A point in the pivot-centered frame, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub opacity: f64,
    /// Round line joins and caps.
    pub rounded: bool,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            rounded: true,
        }
    }

    pub const fn square(self) -> Self {
        Self {
            rounded: false,
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Open, unfilled polyline.
    Polyline { points: Vec<Point>, stroke: Stroke },
    /// Closed, unfilled polygon.
    Polygon { points: Vec<Point>, stroke: Stroke },
    Line { from: Point, to: Point, stroke: Stroke },
    /// A radial graduation mark, tagged with the tier it was classified as.
    Tick {
        base: Point,
        tip: Point,
        tier: TickTier,
        stroke: Stroke,
    },
    Label {
        anchor: Point,
        rotation_degrees: f64,
        text: String,
        fill: Color,
    },
}

impl DrawCommand {
    /// Every point the command touches, in drawing order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            DrawCommand::Polyline { points, .. } | DrawCommand::Polygon { points, .. } => {
                points.clone()
            }
            DrawCommand::Line { from, to, .. } => vec![*from, *to],
            DrawCommand::Tick { base, tip, .. } => vec![*base, *tip],
            DrawCommand::Label { anchor, .. } => vec![*anchor],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    fn include(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}

/// Document sizing used when serializing a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSize {
    /// User units per millimetre of the printed face.
    pub units_per_mm: f64,
    /// Space kept around the drawing, in user units.
    pub margin: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn extend(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.commands.extend(commands);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `None` for an empty scene.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut points = self.commands.iter().flat_map(|c| c.points());
        let first = points.next()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        points.for_each(|p| bbox.include(p));
        Some(bbox)
    }

    pub fn to_document(&self, size: DocumentSize) -> Document {
        let mut document = Document::new();

        if let Some(bbox) = self.bounding_box() {
            let view = bbox.expand(size.margin);
            document = document
                .set("viewBox", (view.min.x, view.min.y, view.width(), view.height()))
                .set("width", format!("{}mm", view.width() / size.units_per_mm))
                .set("height", format!("{}mm", view.height() / size.units_per_mm));
        }

        for command in &self.commands {
            document = match command {
                DrawCommand::Polyline { points, stroke } => document.add(apply_stroke(
                    Polyline::new().set("points", points_attr(points)),
                    stroke,
                )),
                DrawCommand::Polygon { points, stroke } => document.add(apply_stroke(
                    Polygon::new().set("points", points_attr(points)),
                    stroke,
                )),
                DrawCommand::Line { from, to, stroke } => document.add(apply_stroke(
                    Line::new()
                        .set("x1", from.x)
                        .set("y1", from.y)
                        .set("x2", to.x)
                        .set("y2", to.y),
                    stroke,
                )),
                DrawCommand::Tick {
                    base, tip, stroke, ..
                } => document.add(apply_stroke(
                    Line::new()
                        .set("x1", base.x)
                        .set("y1", base.y)
                        .set("x2", tip.x)
                        .set("y2", tip.y),
                    stroke,
                )),
                DrawCommand::Label {
                    anchor,
                    rotation_degrees,
                    text,
                    fill,
                } => document.add(
                    Text::new()
                        .set("x", anchor.x)
                        .set("y", anchor.y)
                        .set(
                            "transform",
                            format!("rotate({} {} {})", rotation_degrees, anchor.x, anchor.y),
                        )
                        .set("fill", fill.to_svg())
                        .add(svg::node::Text::new(text.as_str())),
                ),
            };
        }

        document
    }

    pub fn save(&self, path: impl AsRef<Path>, size: DocumentSize) -> Result<()> {
        let path = path.as_ref();
        debug!("serializing {} commands", self.commands.len());
        svg::save(path, &self.to_document(size))?;
        info!("wrote {}", path.display());
        Ok(())
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_stroke<T: Node>(mut element: T, stroke: &Stroke) -> T {
    element.assign("stroke", stroke.color.to_svg());
    element.assign("stroke-width", stroke.width);
    element.assign("stroke-opacity", stroke.opacity);
    element.assign("fill", "none");
    if stroke.rounded {
        element.assign("stroke-linejoin", "round");
        element.assign("stroke-linecap", "round");
    }
    element
}
