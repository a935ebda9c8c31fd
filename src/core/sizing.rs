//! Variant sizing and the display names derived from it.
//!
//! Each shape has exactly one sizing representation. Names of round, heart and
//! rectangle variants are always derived from their sizing; custom variants keep
//! whatever name the user typed.

use crate::entities::{Shape, VariantRecord};
use serde::{Deserialize, Serialize};

/// Fixed cake height used in rectangle names, in inches.
pub const RECTANGLE_HEIGHT: &str = "2.5";

/// Size of one variant, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sizing {
    /// Tier descriptions, top tier first, base tier last
    Tiers(Vec<String>),
    /// Heart size in inches
    Heart(f64),
    /// Rectangle width and length in inches
    Rectangle {
        /// Width
        x: f64,
        /// Length
        y: f64,
    },
    /// Free-text size
    Custom(String),
}

impl Sizing {
    /// Empty sizing for a freshly added variant of the given shape.
    #[must_use]
    pub fn default_for(shape: Shape) -> Self {
        match shape {
            Shape::Round => Self::Tiers(Vec::new()),
            Shape::Heart => Self::Heart(0.0),
            Shape::Rectangle => Self::Rectangle { x: 0.0, y: 0.0 },
            Shape::Custom => Self::Custom(String::new()),
        }
    }

    /// Shape this sizing belongs to.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Tiers(_) => Shape::Round,
            Self::Heart(_) => Shape::Heart,
            Self::Rectangle { .. } => Shape::Rectangle,
            Self::Custom(_) => Shape::Custom,
        }
    }

    /// Display name derived from the sizing, or `None` for custom sizes.
    ///
    /// ```
    /// use pastry_materials::core::sizing::Sizing;
    ///
    /// let sizing = Sizing::Rectangle { x: 8.0, y: 12.0 };
    /// assert_eq!(sizing.derived_name().as_deref(), Some("8\"x12\"x2.5\""));
    /// ```
    #[must_use]
    pub fn derived_name(&self) -> Option<String> {
        match self {
            Self::Tiers(tiers) => Some(tiers.last().map_or_else(String::new, |base| {
                format!("{} tiers, {base} base", tiers.len())
            })),
            Self::Heart(size) => Some(format!("{size}\"")),
            Self::Rectangle { x, y } => Some(format!("{x}\"x{y}\"x{RECTANGLE_HEIGHT}\"")),
            Self::Custom(_) => None,
        }
    }

    /// Reads the sizing field that matches `shape` out of a flat backend record.
    /// Missing fields fall back to the shape's empty sizing.
    #[must_use]
    pub fn from_record(shape: Shape, record: &VariantRecord) -> Self {
        match shape {
            Shape::Round => Self::Tiers(record.tiers.clone().unwrap_or_default()),
            Shape::Heart => Self::Heart(record.size_heart.unwrap_or_default()),
            Shape::Rectangle => Self::Rectangle {
                x: record.size_rectangle_x.unwrap_or_default(),
                y: record.size_rectangle_y.unwrap_or_default(),
            },
            Shape::Custom => Self::Custom(record.size_custom.clone().unwrap_or_default()),
        }
    }

    /// Writes this sizing into the matching field of a flat backend record,
    /// clearing the others.
    pub fn write_to(&self, record: &mut VariantRecord) {
        record.tiers = None;
        record.size_heart = None;
        record.size_rectangle_x = None;
        record.size_rectangle_y = None;
        record.size_custom = None;
        match self {
            Self::Tiers(tiers) => record.tiers = Some(tiers.clone()),
            Self::Heart(size) => record.size_heart = Some(*size),
            Self::Rectangle { x, y } => {
                record.size_rectangle_x = Some(*x);
                record.size_rectangle_y = Some(*y);
            }
            Self::Custom(text) => record.size_custom = Some(text.clone()),
        }
    }
}
