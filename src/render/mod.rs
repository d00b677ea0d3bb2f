//! Drawable primitives for the display surface
//!
//! The engine never draws. Each tick produces an ordered list of
//! `Drawable`s; the host paints them back to front.

pub mod shapes;
pub mod skeleton;

use std::fmt;

use glam::Vec2;
use serde::{Serialize, Serializer};

pub use shapes::{particle_drawable, target_drawables};
pub use skeleton::skeleton_drawables;

/// HSL color, serialized as a CSS color string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl::new(0.0, 0.0, 100.0);
    pub const CYAN: Hsl = Hsl::new(180.0, 100.0, 50.0);

    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha < 1.0 {
            write!(
                f,
                "hsla({}, {}%, {}%, {})",
                self.hue, self.saturation, self.lightness, self.alpha
            )
        } else {
            write!(
                f,
                "hsl({}, {}%, {}%)",
                self.hue, self.saturation, self.lightness
            )
        }
    }
}

impl Serialize for Hsl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outline of a filled shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Hsl,
    pub width: f32,
}

/// Soft halo around a shape (canvas shadowBlur)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    pub color: Hsl,
    pub blur: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawable {
    Circle {
        center: Vec2,
        radius: f32,
        fill: Hsl,
        stroke: Option<Stroke>,
        glow: Option<Glow>,
        /// Whole-shape opacity
        alpha: f32,
    },
    /// Five-pointed star inscribed in `radius`
    Star {
        center: Vec2,
        radius: f32,
        fill: Hsl,
        glow: Option<Glow>,
        alpha: f32,
    },
    /// Centered text or emoji
    Glyph {
        text: &'static str,
        position: Vec2,
        size: f32,
        color: Hsl,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Hsl,
        glow: Option<Glow>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_css_strings() {
        assert_eq!(Hsl::new(120.0, 100.0, 60.0).to_string(), "hsl(120, 100%, 60%)");
        assert_eq!(
            Hsl::new(7.0, 100.0, 50.0).with_alpha(0.6).to_string(),
            "hsla(7, 100%, 50%, 0.6)"
        );
    }

    #[test]
    fn test_drawable_serializes_tagged() {
        let glyph = Drawable::Glyph {
            text: "🔥",
            position: Vec2::new(1.0, 2.0),
            size: 14.0,
            color: Hsl::WHITE,
        };
        let json = serde_json::to_value(&glyph).unwrap();
        assert_eq!(json["kind"], "glyph");
        assert_eq!(json["color"], "hsl(0, 0%, 100%)");
        assert_eq!(json["position"], serde_json::json!([1.0, 2.0]));
    }
}
