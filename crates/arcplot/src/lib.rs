//! Layout engine for radial skill charts.
//!
//! Turns a flat list of [`SkillRecord`]s into the angles and radii needed to draw a
//! radial bar chart: one wedge per skill, grouped by category, with bars stacked in level
//! segments. Everything here is a pure function of the records and [`LayoutParams`].

pub mod angular;
pub mod arc;
pub mod group;
pub mod layout;
mod macros;
pub mod params;
pub mod radial;
pub mod record;

pub use angular::{AngularLayout, Span};
pub use arc::{AnnotationAnchor, AnnularSector, Point};
pub use group::{Grouping, group};
pub use layout::{Geometry, LayoutSummary, compute};
pub use params::{LayoutError, LayoutParams};
pub use radial::LevelScale;
pub use record::{CategoryId, SkillName, SkillRecord};

pub const FULL_CIRCLE: f64 = std::f64::consts::TAU;
