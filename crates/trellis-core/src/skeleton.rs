//! The drawable skeleton handed to the rendering collaborator.
//!
//! A [`Skeleton`] is an ordered list of [`Element`]s: one [`Rectangle`] per
//! node followed by one [`Arrow`] per edge whose endpoints both exist. It
//! serializes to a JSON array of objects tagged by `"type"`:
//!
//! ```text
//! [
//!   { "type": "rectangle", "id": "a", "x": 100, "y": 100, "width": 460, "height": 110, "label": "A", ... },
//!   { "type": "arrow", "startX": 560, "startY": 155, "boundStartId": "a", "boundEndId": "b",
//!     "relativePoints": [[0, 0], [340, 0]], "label": "leads to", ... }
//! ]
//! ```
//!
//! Style hints (`strokeColor`, `fontSize`, ...) are flattened into each
//! object; they are passed through, never interpreted here.

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    geometry::{Point, Size},
    identifier::Id,
};

/// Presentation hints attached to every rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    rename_all(serialize = "camelCase", deserialize = "snake_case")
)]
pub struct RectangleStyle {
    pub stroke_color: Color,
    pub background_color: Color,
    pub stroke_width: f32,
    /// Corner rounding type understood by the renderer (3 = adaptive radius).
    pub roundness: u8,
    pub font_size: f32,
}

impl Default for RectangleStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::new("#4379FF").expect("valid default stroke color"),
            background_color: Color::new("#ffffff").expect("valid default background color"),
            stroke_width: 2.0,
            roundness: 3,
            font_size: 20.0,
        }
    }
}

/// Arrowhead drawn at the end of an arrow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrowhead {
    #[default]
    Arrow,
    Triangle,
    Bar,
    Dot,
}

/// Presentation hints attached to every arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    rename_all(serialize = "camelCase", deserialize = "snake_case")
)]
pub struct ArrowStyle {
    pub stroke_color: Color,
    pub stroke_width: f32,
    /// `None` draws a plain line.
    pub end_arrowhead: Option<Arrowhead>,
    pub font_size: f32,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            stroke_color: Color::new("#1CC6FF").expect("valid default arrow color"),
            stroke_width: 2.0,
            end_arrowhead: Some(Arrowhead::Arrow),
            font_size: 16.0,
        }
    }
}

/// Rectangle descriptor for one positioned node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    id: Id,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    label: String,
    #[serde(flatten)]
    style: RectangleStyle,
}

impl Rectangle {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(
        id: Id,
        top_left: Point,
        size: Size,
        label: impl Into<String>,
        style: RectangleStyle,
    ) -> Self {
        Self {
            id,
            x: top_left.x(),
            y: top_left.y(),
            width: size.width(),
            height: size.height(),
            label: label.into(),
            style,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> &RectangleStyle {
        &self.style
    }
}

/// Arrow descriptor for one edge.
///
/// The arrow starts at `(startX, startY)`; `relativePoints` holds the path
/// relative to that start, always `[[0, 0], [dx, dy]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    start_x: f32,
    start_y: f32,
    bound_start_id: Id,
    bound_end_id: Id,
    relative_points: [[f32; 2]; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(flatten)]
    style: ArrowStyle,
}

impl Arrow {
    /// Creates an arrow from its absolute start point and the end point
    /// relative to that start.
    pub fn new(
        bound_start_id: Id,
        bound_end_id: Id,
        start: Point,
        relative_end: Point,
        label: Option<String>,
        style: ArrowStyle,
    ) -> Self {
        Self {
            start_x: start.x(),
            start_y: start.y(),
            bound_start_id,
            bound_end_id,
            relative_points: [[0.0, 0.0], [relative_end.x(), relative_end.y()]],
            label,
            style,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    /// End point relative to [`Arrow::start`].
    pub fn relative_end(&self) -> Point {
        let [_, [dx, dy]] = self.relative_points;
        Point::new(dx, dy)
    }

    /// Absolute end point.
    pub fn end(&self) -> Point {
        self.start().add_point(self.relative_end())
    }

    pub fn relative_points(&self) -> [[f32; 2]; 2] {
        self.relative_points
    }

    pub fn bound_start_id(&self) -> Id {
        self.bound_start_id
    }

    pub fn bound_end_id(&self) -> Id {
        self.bound_end_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn style(&self) -> &ArrowStyle {
        &self.style
    }
}

/// A single drawable-element descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rectangle(Rectangle),
    Arrow(Arrow),
}

/// Ordered list of drawable elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Skeleton {
    elements: Vec<Element>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rectangle(&mut self, rectangle: Rectangle) {
        self.elements.push(Element::Rectangle(rectangle));
    }

    pub fn push_arrow(&mut self, arrow: Arrow) {
        self.elements.push(Element::Arrow(arrow));
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn rectangles(&self) -> impl Iterator<Item = &Rectangle> {
        self.elements.iter().filter_map(|element| match element {
            Element::Rectangle(rectangle) => Some(rectangle),
            Element::Arrow(_) => None,
        })
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.elements.iter().filter_map(|element| match element {
            Element::Arrow(arrow) => Some(arrow),
            Element::Rectangle(_) => None,
        })
    }

    /// Returns the rectangle descriptor arrows bound to `id` attach to.
    ///
    /// When several rectangles share the id, that is the last of them.
    pub fn rectangle(&self, id: Id) -> Option<&Rectangle> {
        self.rectangles().filter(|rectangle| rectangle.id == id).last()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Checks that every arrow is bound to rectangles present in this skeleton.
    pub fn is_consistent(&self) -> bool {
        self.arrows().all(|arrow| {
            self.rectangle(arrow.bound_start_id).is_some()
                && self.rectangle(arrow.bound_end_id).is_some()
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rectangle(id: &str) -> Rectangle {
        Rectangle::new(
            Id::new(id),
            Point::new(100.0, 100.0),
            Size::new(460.0, 110.0),
            id.to_uppercase(),
            RectangleStyle::default(),
        )
    }

    fn arrow(from: &str, to: &str) -> Arrow {
        Arrow::new(
            Id::new(from),
            Id::new(to),
            Point::new(560.0, 155.0),
            Point::new(340.0, 0.0),
            Some("leads to".to_string()),
            ArrowStyle::default(),
        )
    }

    #[test]
    fn test_arrow_points() {
        let arrow = arrow("a", "b");
        assert_eq!(arrow.start(), Point::new(560.0, 155.0));
        assert_eq!(arrow.relative_end(), Point::new(340.0, 0.0));
        assert_eq!(arrow.end(), Point::new(900.0, 155.0));
        assert_eq!(arrow.relative_points(), [[0.0, 0.0], [340.0, 0.0]]);
    }

    #[test]
    fn test_skeleton_queries() {
        let mut skeleton = Skeleton::new();
        assert!(skeleton.is_empty());

        skeleton.push_rectangle(rectangle("a"));
        skeleton.push_rectangle(rectangle("b"));
        skeleton.push_arrow(arrow("a", "b"));

        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.rectangles().count(), 2);
        assert_eq!(skeleton.arrows().count(), 1);
        assert_eq!(skeleton.rectangle(Id::new("b")).unwrap().label(), "B");
        assert!(skeleton.is_consistent());
    }

    #[test]
    fn test_skeleton_inconsistent_with_unbound_arrow() {
        let mut skeleton = Skeleton::new();
        skeleton.push_rectangle(rectangle("a"));
        skeleton.push_arrow(arrow("a", "missing"));

        assert!(!skeleton.is_consistent());
    }

    #[test]
    fn test_rectangle_serialization() {
        let value = serde_json::to_value(Element::Rectangle(rectangle("a"))).unwrap();

        assert_eq!(value["type"], json!("rectangle"));
        assert_eq!(value["id"], json!("a"));
        assert_eq!(value["x"], json!(100.0));
        assert_eq!(value["width"], json!(460.0));
        assert_eq!(value["height"], json!(110.0));
        assert_eq!(value["label"], json!("A"));
        assert_eq!(value["strokeWidth"], json!(2.0));
        assert_eq!(value["roundness"], json!(3));
        assert_eq!(value["fontSize"], json!(20.0));
        assert!(value["strokeColor"].is_string());
        assert!(value["backgroundColor"].is_string());
    }

    #[test]
    fn test_arrow_serialization() {
        let value = serde_json::to_value(Element::Arrow(arrow("a", "b"))).unwrap();

        assert_eq!(value["type"], json!("arrow"));
        assert_eq!(value["startX"], json!(560.0));
        assert_eq!(value["startY"], json!(155.0));
        assert_eq!(value["boundStartId"], json!("a"));
        assert_eq!(value["boundEndId"], json!("b"));
        assert_eq!(value["relativePoints"], json!([[0.0, 0.0], [340.0, 0.0]]));
        assert_eq!(value["label"], json!("leads to"));
        assert_eq!(value["endArrowhead"], json!("arrow"));
    }

    #[test]
    fn test_arrow_without_label_omits_key() {
        let arrow = Arrow::new(
            Id::new("a"),
            Id::new("b"),
            Point::default(),
            Point::default(),
            None,
            ArrowStyle::default(),
        );
        let value = serde_json::to_value(&arrow).unwrap();
        assert!(value.get("label").is_none());
    }

    #[test]
    fn test_skeleton_serializes_as_array() {
        let mut skeleton = Skeleton::new();
        skeleton.push_rectangle(rectangle("a"));

        let value = serde_json::to_value(&skeleton).unwrap();
        assert!(value.is_array());
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_style_deserializes_snake_case() {
        let style: ArrowStyle =
            serde_json::from_str(r#"{"stroke_width": 4, "end_arrowhead": "triangle"}"#).unwrap();
        assert_eq!(style.stroke_width, 4.0);
        assert_eq!(style.end_arrowhead, Some(Arrowhead::Triangle));
        assert_eq!(style.font_size, 16.0);
    }
}
