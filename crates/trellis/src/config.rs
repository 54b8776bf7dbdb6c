//! Configuration types for Trellis layout.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and which style hints end up in the skeleton. All types
//! implement [`serde::Deserialize`] with per-field defaults, so a partial
//! TOML file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node size, anchor policy and force simulation settings.
//! - [`ForceConfig`] - Every constant used by the force-directed engine.
//! - [`StyleConfig`] - Style hints attached to rectangles and arrows.
//!
//! # Example
//!
//! ```
//! # use trellis::config::{AppConfig, ForceConfig};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_width(), 460.0);
//! assert!(config.validate().is_ok());
//!
//! // Tests commonly shorten the simulation
//! let quick = ForceConfig::default().with_iterations(20);
//! assert_eq!(quick.iterations(), 20);
//! ```

use serde::Deserialize;

use trellis_core::{
    geometry::{Point, Size},
    skeleton::{ArrowStyle, RectangleStyle},
};

use crate::layout::AnchorPolicy;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks that every numeric setting is usable.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        self.layout.validate()
    }
}

/// Node geometry, anchoring and simulation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width shared by every node rectangle.
    node_width: f32,

    /// Height shared by every node rectangle.
    node_height: f32,

    /// How arrows attach to node rectangles.
    anchor: AnchorPolicy,

    /// Outward offset used by [`AnchorPolicy::Direct`].
    anchor_offset: f32,

    /// Force simulation section.
    force: ForceConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 460.0,
            node_height: 110.0,
            anchor: AnchorPolicy::default(),
            anchor_offset: 10.0,
            force: ForceConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn node_width(&self) -> f32 {
        self.node_width
    }

    pub fn node_height(&self) -> f32 {
        self.node_height
    }

    /// Returns the uniform node size.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn anchor(&self) -> AnchorPolicy {
        self.anchor
    }

    pub fn anchor_offset(&self) -> f32 {
        self.anchor_offset
    }

    pub fn force(&self) -> &ForceConfig {
        &self.force
    }

    /// Set the uniform node size
    pub fn with_node_size(mut self, width: f32, height: f32) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// Set the anchor policy and its offset
    pub fn with_anchor(mut self, anchor: AnchorPolicy, offset: f32) -> Self {
        self.anchor = anchor;
        self.anchor_offset = offset;
        self
    }

    /// Set the force simulation settings
    pub fn with_force(mut self, force: ForceConfig) -> Self {
        self.force = force;
        self
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.node_width > 0.0) {
            return Err(format!("layout.node_width must be positive, got {}", self.node_width));
        }
        if !(self.node_height > 0.0) {
            return Err(format!(
                "layout.node_height must be positive, got {}",
                self.node_height
            ));
        }
        if !(self.anchor_offset >= 0.0) {
            return Err(format!(
                "layout.anchor_offset must not be negative, got {}",
                self.anchor_offset
            ));
        }
        self.force.validate()
    }
}

/// Constants of the force-directed engine.
///
/// Defaults reproduce the reference behavior: 300 rounds, nodes seeded on a
/// circle of radius 400 around (800, 400), ideal edge length 600, and a
/// correction pass that keeps centers at least `node_width + 100` apart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Number of relaxation rounds.
    iterations: usize,
    /// Radius of the seeding circle.
    initial_radius: f32,
    /// Center of the seeding circle, `[x, y]`.
    initial_center: [f32; 2],
    /// Rest length of the spring between connected nodes.
    ideal_distance: f32,
    /// Numerator of the inverse-square repulsion.
    repulsion_strength: f32,
    /// Spring constant of the attraction.
    attraction_strength: f32,
    /// Velocity multiplier applied every round.
    damping: f32,
    /// Extra spacing beyond the node width required between node centers.
    separation_margin: f32,
    /// Additional push applied to each node of an overlapping pair.
    separation_buffer: f32,
    /// Maximum number of correction passes.
    separation_passes: usize,
    /// Re-place nodes on a grid when the correction passes run out.
    grid_fallback: bool,
    /// Minimum x and y of the final layout.
    normalize_margin: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            initial_radius: 400.0,
            initial_center: [800.0, 400.0],
            ideal_distance: 600.0,
            repulsion_strength: 100_000.0,
            attraction_strength: 0.01,
            damping: 0.85,
            separation_margin: 100.0,
            separation_buffer: 10.0,
            separation_passes: 50,
            grid_fallback: true,
            normalize_margin: 100.0,
        }
    }
}

impl ForceConfig {
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn initial_radius(&self) -> f32 {
        self.initial_radius
    }

    pub fn initial_center(&self) -> Point {
        let [x, y] = self.initial_center;
        Point::new(x, y)
    }

    pub fn ideal_distance(&self) -> f32 {
        self.ideal_distance
    }

    pub fn repulsion_strength(&self) -> f32 {
        self.repulsion_strength
    }

    pub fn attraction_strength(&self) -> f32 {
        self.attraction_strength
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn separation_margin(&self) -> f32 {
        self.separation_margin
    }

    pub fn separation_buffer(&self) -> f32 {
        self.separation_buffer
    }

    pub fn separation_passes(&self) -> usize {
        self.separation_passes
    }

    pub fn grid_fallback(&self) -> bool {
        self.grid_fallback
    }

    pub fn normalize_margin(&self) -> f32 {
        self.normalize_margin
    }

    /// Set the number of relaxation rounds
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the seeding circle
    pub fn with_initial_circle(mut self, center: Point, radius: f32) -> Self {
        self.initial_center = [center.x(), center.y()];
        self.initial_radius = radius;
        self
    }

    /// Set the ideal distance between connected nodes
    pub fn with_ideal_distance(mut self, distance: f32) -> Self {
        self.ideal_distance = distance;
        self
    }

    /// Set the repulsion and attraction strengths
    pub fn with_strengths(mut self, repulsion: f32, attraction: f32) -> Self {
        self.repulsion_strength = repulsion;
        self.attraction_strength = attraction;
        self
    }

    /// Set the damping factor for the simulation
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Set the separation margin and the number of correction passes
    pub fn with_separation(mut self, margin: f32, passes: usize) -> Self {
        self.separation_margin = margin;
        self.separation_passes = passes;
        self
    }

    /// Enable or disable the grid fallback
    pub fn with_grid_fallback(mut self, enabled: bool) -> Self {
        self.grid_fallback = enabled;
        self
    }

    /// Set the margin the layout is normalized to
    pub fn with_normalize_margin(mut self, margin: f32) -> Self {
        self.normalize_margin = margin;
        self
    }

    fn validate(&self) -> Result<(), String> {
        let finite = [
            ("initial_radius", self.initial_radius),
            ("initial_center[0]", self.initial_center[0]),
            ("initial_center[1]", self.initial_center[1]),
            ("ideal_distance", self.ideal_distance),
            ("repulsion_strength", self.repulsion_strength),
            ("attraction_strength", self.attraction_strength),
            ("damping", self.damping),
            ("separation_margin", self.separation_margin),
            ("separation_buffer", self.separation_buffer),
            ("normalize_margin", self.normalize_margin),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("layout.force.{name} must be finite, got {value}"));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(format!(
                "layout.force.damping must be within [0, 1], got {}",
                self.damping
            ));
        }
        if self.separation_margin < 0.0 || self.separation_buffer < 0.0 {
            return Err("layout.force separation values must not be negative".to_string());
        }
        Ok(())
    }
}

/// Style hints copied onto every skeleton element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    rectangle: RectangleStyle,
    arrow: ArrowStyle,
}

impl StyleConfig {
    pub fn new(rectangle: RectangleStyle, arrow: ArrowStyle) -> Self {
        Self { rectangle, arrow }
    }

    pub fn rectangle(&self) -> &RectangleStyle {
        &self.rectangle
    }

    pub fn arrow(&self) -> &ArrowStyle {
        &self.arrow
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::skeleton::Arrowhead;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let layout = config.layout();

        assert_eq!(layout.node_size(), Size::new(460.0, 110.0));
        assert_eq!(layout.anchor(), AnchorPolicy::Axis);
        assert_eq!(layout.force().iterations(), 300);
        assert_eq!(layout.force().initial_center(), Point::new(800.0, 400.0));
        assert_eq!(layout.force().separation_passes(), 50);
        assert!(layout.force().grid_fallback());
        assert_eq!(config.style().rectangle().font_size, 20.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let source = r##"
            [layout]
            node_width = 300
            anchor = "direct"

            [layout.force]
            iterations = 50
            initial_center = [0.0, 0.0]

            [style.arrow]
            stroke_color = "#000000"
            end_arrowhead = "triangle"
        "##;

        let config: AppConfig = toml::from_str(source).unwrap();
        let layout = config.layout();

        assert_eq!(layout.node_width(), 300.0);
        assert_eq!(layout.node_height(), 110.0);
        assert_eq!(layout.anchor(), AnchorPolicy::Direct);
        assert_eq!(layout.force().iterations(), 50);
        assert_eq!(layout.force().initial_center(), Point::new(0.0, 0.0));
        assert_eq!(layout.force().damping(), 0.85);
        assert_eq!(config.style().arrow().end_arrowhead, Some(Arrowhead::Triangle));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_color_rejected_at_parse() {
        let source = r#"
            [style.rectangle]
            stroke_color = "definitely-not-a-color"
        "#;

        assert!(toml::from_str::<AppConfig>(source).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_width = AppConfig::new(
            LayoutConfig::default().with_node_size(0.0, 110.0),
            StyleConfig::default(),
        );
        assert!(zero_width.validate().unwrap_err().contains("node_width"));

        let bad_damping = AppConfig::new(
            LayoutConfig::default().with_force(ForceConfig::default().with_damping(1.5)),
            StyleConfig::default(),
        );
        assert!(bad_damping.validate().unwrap_err().contains("damping"));

        let infinite = AppConfig::new(
            LayoutConfig::default()
                .with_force(ForceConfig::default().with_ideal_distance(f32::INFINITY)),
            StyleConfig::default(),
        );
        assert!(infinite.validate().unwrap_err().contains("ideal_distance"));
    }
}
