use std::fmt;

use pcbclone_core::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

/// Numeric net identity. Code 0 is the unconnected net.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetCode(pub u32);

impl NetCode {
    pub const UNCONNECTED: NetCode = NetCode(0);

    #[must_use]
    pub fn is_connected(self) -> bool {
        self != Self::UNCONNECTED
    }
}

impl fmt::Display for NetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Board layer number as used by the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u32);

impl LayerId {
    /// The "Cmts.User" comment layer of the legacy KiCad layer table.
    pub const COMMENTS: LayerId = LayerId(41);
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Side::Front => Side::Back,
            Side::Back => Side::Front,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub code: NetCode,
    pub name: String,
}

/// Placement and appearance of a footprint text label, relative to its footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub offset: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_text_size")]
    pub height: f64,
    #[serde(default = "default_text_size")]
    pub width: f64,
    #[serde(default = "default_text_thickness")]
    pub thickness: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_text_size() -> f64 {
    1.0
}

fn default_text_thickness() -> f64 {
    0.15
}

fn default_visible() -> bool {
    true
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            offset: Point::ORIGIN,
            rotation: 0.0,
            height: default_text_size(),
            width: default_text_size(),
            thickness: default_text_thickness(),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

impl TextLabel {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pad {
    pub name: String,
    #[serde(default)]
    pub net: NetCode,
}

/// A placed component. Its designator is the text of the reference label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    /// Library identity, e.g. `LED_SMD:LED_0805`.
    pub fpid: String,
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub pads: Vec<Pad>,
    pub reference: TextLabel,
    pub value: TextLabel,
}

impl Footprint {
    #[must_use]
    pub fn new(designator: &str, fpid: &str, position: Point) -> Self {
        Self {
            fpid: fpid.to_string(),
            position,
            rotation: 0.0,
            side: Side::Front,
            pads: Vec::new(),
            reference: TextLabel::new(designator),
            value: TextLabel::new(""),
        }
    }

    #[must_use]
    pub fn with_pad(mut self, name: &str, net: u32) -> Self {
        self.pads.push(Pad {
            name: name.to_string(),
            net: NetCode(net),
        });
        self
    }

    #[must_use]
    pub fn designator(&self) -> &str {
        &self.reference.text
    }
}

/// A filled area. The marker zone bounding the template is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub layer: LayerId,
    #[serde(default)]
    pub net: NetCode,
    pub outline: Vec<Point>,
    #[serde(default)]
    pub priority: u32,
}

impl Zone {
    /// First outline corner, used as the zone position.
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        self.outline.first().copied()
    }

    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.outline.iter().copied())
    }

    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.outline {
            p.translate(delta);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TrackShape {
    Segment { start: Point, end: Point, width: f64 },
    Via { position: Point, diameter: f64, drill: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub layer: LayerId,
    #[serde(default)]
    pub net: NetCode,
    #[serde(flatten)]
    pub shape: TrackShape,
}

impl Track {
    #[must_use]
    pub fn segment(layer: LayerId, net: u32, start: Point, end: Point, width: f64) -> Self {
        Self {
            layer,
            net: NetCode(net),
            shape: TrackShape::Segment { start, end, width },
        }
    }

    #[must_use]
    pub fn via(net: u32, position: Point, diameter: f64, drill: f64) -> Self {
        Self {
            layer: LayerId(0),
            net: NetCode(net),
            shape: TrackShape::Via {
                position,
                diameter,
                drill,
            },
        }
    }

    /// Whether any copper of this track touches `area`.
    #[must_use]
    pub fn hit_test(&self, area: &BoundingBox) -> bool {
        match &self.shape {
            TrackShape::Segment { start, end, width } => {
                area.inflated(width / 2.0).intersects_segment(*start, *end)
            }
            TrackShape::Via {
                position, diameter, ..
            } => area.intersects_circle(*position, diameter / 2.0),
        }
    }

    pub fn translate(&mut self, delta: Point) {
        match &mut self.shape {
            TrackShape::Segment { start, end, .. } => {
                start.translate(delta);
                end.translate(delta);
            }
            TrackShape::Via { position, .. } => {
                position.translate(delta);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawingShape {
    Line {
        start: Point,
        end: Point,
        width: f64,
    },
    Rect {
        start: Point,
        end: Point,
        width: f64,
    },
    Circle {
        center: Point,
        radius: f64,
        width: f64,
    },
    /// Arc from `start` sweeping `angle` degrees around `center`.
    Arc {
        center: Point,
        start: Point,
        angle: f64,
        width: f64,
    },
    Polygon {
        points: Vec<Point>,
        width: f64,
    },
    Text {
        position: Point,
        text: String,
        #[serde(default)]
        rotation: f64,
        height: f64,
        width: f64,
    },
}

/// Graphic item on a non-copper layer. Drawings carry no net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub layer: LayerId,
    #[serde(flatten)]
    pub shape: DrawingShape,
}

impl Drawing {
    #[must_use]
    pub fn line(layer: LayerId, start: Point, end: Point, width: f64) -> Self {
        Self {
            layer,
            shape: DrawingShape::Line { start, end, width },
        }
    }

    /// Bounding box including half the stroke width.
    #[must_use]
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match &self.shape {
            DrawingShape::Line { start, end, width } | DrawingShape::Rect { start, end, width } => {
                Some(BoundingBox::new(*start, *end).inflated(width / 2.0))
            }
            DrawingShape::Circle {
                center,
                radius,
                width,
            } => {
                let r = radius + width / 2.0;
                Some(BoundingBox::new(
                    *center - Point::new(r, r),
                    *center + Point::new(r, r),
                ))
            }
            DrawingShape::Arc {
                center,
                start,
                angle,
                width,
            } => arc_box(*center, *start, *angle).map(|bb| bb.inflated(width / 2.0)),
            DrawingShape::Polygon { points, width } => {
                BoundingBox::from_points(points.iter().copied()).map(|bb| bb.inflated(width / 2.0))
            }
            DrawingShape::Text {
                position,
                text,
                rotation,
                height,
                width,
            } => {
                let half_w = width * text.chars().count() as f64 / 2.0;
                let half_h = height / 2.0;
                let corners = [
                    (-half_w, -half_h),
                    (half_w, -half_h),
                    (half_w, half_h),
                    (-half_w, half_h),
                ]
                .map(|(dx, dy)| {
                    let mut p = *position + Point::new(dx, dy);
                    p.rotate_about(*rotation, *position);
                    p
                });
                BoundingBox::from_points(corners)
            }
        }
    }

    /// Whether this drawing touches `area`.
    #[must_use]
    pub fn hit_test(&self, area: &BoundingBox) -> bool {
        match &self.shape {
            DrawingShape::Line { start, end, width } => {
                area.inflated(width / 2.0).intersects_segment(*start, *end)
            }
            _ => self
                .bounding_box()
                .is_some_and(|bb| bb.intersects(area)),
        }
    }

    pub fn translate(&mut self, delta: Point) {
        match &mut self.shape {
            DrawingShape::Line { start, end, .. } | DrawingShape::Rect { start, end, .. } => {
                start.translate(delta);
                end.translate(delta);
            }
            DrawingShape::Circle { center, .. } => {
                center.translate(delta);
            }
            DrawingShape::Arc { center, start, .. } => {
                center.translate(delta);
                start.translate(delta);
            }
            DrawingShape::Polygon { points, .. } => {
                for p in points {
                    p.translate(delta);
                }
            }
            DrawingShape::Text { position, .. } => {
                position.translate(delta);
            }
        }
    }
}

/// Box of the arc from `start` sweeping `sweep` degrees around `center`: its end
/// points plus every axis crossing inside the sweep. Sweeps beyond a full turn are
/// a full circle; a non-finite sweep has no extent.
fn arc_box(center: Point, start: Point, sweep: f64) -> Option<BoundingBox> {
    if !sweep.is_finite() {
        return None;
    }
    let sweep = sweep.clamp(-360.0, 360.0);
    let radius = center.distance_to(start);
    let from = (start.y - center.y).atan2(start.x - center.x).to_degrees();
    let (lo, hi) = if sweep >= 0.0 {
        (from, from + sweep)
    } else {
        (from + sweep, from)
    };
    let mut end = start;
    end.rotate_about(sweep, center);
    let crossings = ((lo / 90.0).ceil() as i32..=(hi / 90.0).floor() as i32).map(|k| {
        let (s, c) = (f64::from(k) * 90.0).to_radians().sin_cos();
        center + Point::new(radius * c, radius * s)
    });
    BoundingBox::from_points([start, end].into_iter().chain(crossings))
}
