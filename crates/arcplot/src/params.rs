use crate::record::CategoryId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WIDTH: f64 = 640.0;
pub const DEFAULT_INNER_RADIUS: f64 = 90.0;
pub const DEFAULT_OUTER_PADDING: f64 = 120.0;
pub const DEFAULT_CATEGORY_PADDING: f64 = 0.1;
pub const DEFAULT_SKILL_PADDING: f64 = 0.05;
pub const DEFAULT_ARC_COVERAGE: f64 = 0.8;
pub const DEFAULT_ARC_START_OFFSET: f64 = 0.1;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid layout parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Negative layout capacity: padding needs {required:.4} rad of {available:.4} rad")]
    NegativeCapacity { available: f64, required: f64 },
}

/// Caller supplied layout parameters. Angles are in radians, lengths in drawing units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Fraction of the full circle used for skill bars. The rest is left blank.
    pub arc_coverage: f64,
    /// Rotation of the first category's start, as a fraction of the full circle.
    pub arc_start_offset: f64,
    pub category_padding: f64,
    pub skill_padding: f64,
    pub inner_radius: f64,
    pub outer_padding: f64,
    pub width: f64,
    /// Defaults to `width` when unset.
    pub height: Option<f64>,
    pub category_focus: Option<CategoryId>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            arc_coverage: DEFAULT_ARC_COVERAGE,
            arc_start_offset: DEFAULT_ARC_START_OFFSET,
            category_padding: DEFAULT_CATEGORY_PADDING,
            skill_padding: DEFAULT_SKILL_PADDING,
            inner_radius: DEFAULT_INNER_RADIUS,
            outer_padding: DEFAULT_OUTER_PADDING,
            width: DEFAULT_WIDTH,
            height: None,
            category_focus: None,
        }
    }
}

impl LayoutParams {
    pub fn height(&self) -> f64 {
        self.height.unwrap_or(self.width)
    }

    pub fn outer_radius(&self) -> f64 {
        self.width.min(self.height()) / 2.0 - self.outer_padding
    }

    pub fn with_focus(mut self, focus: Option<CategoryId>) -> Self {
        self.category_focus = focus;
        self
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        fn invalid(name: &'static str, reason: impl Into<String>) -> LayoutError {
            LayoutError::InvalidParameter {
                name,
                reason: reason.into(),
            }
        }

        if !(self.arc_coverage > 0.0 && self.arc_coverage <= 1.0) {
            return Err(invalid("arc_coverage", "must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.arc_start_offset) {
            return Err(invalid("arc_start_offset", "must be in [0, 1)"));
        }
        for (name, value) in [
            ("category_padding", self.category_padding),
            ("skill_padding", self.skill_padding),
            ("inner_radius", self.inner_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, "must be a finite, non-negative number"));
            }
        }

        let outer = self.outer_radius();
        if !outer.is_finite() || outer <= self.inner_radius {
            return Err(invalid(
                "outer_padding",
                format!(
                    "outer radius {:.1} must exceed inner radius {:.1}",
                    outer, self.inner_radius
                ),
            ));
        }
        Ok(())
    }
}
