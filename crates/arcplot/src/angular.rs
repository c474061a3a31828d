use crate::group::Grouping;
use crate::params::{LayoutError, LayoutParams};
use crate::record::{CategoryId, SkillName, SkillRecord};
use crate::FULL_CIRCLE;
use serde::Serialize;
use std::collections::HashMap;

/// An angular interval, in radians clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    /// Whether `angle` falls inside the span, taking wrap-around into account.
    pub fn contains(&self, angle: f64) -> bool {
        (angle - self.start).rem_euclid(FULL_CIRCLE) <= self.width()
    }
}

/// Start angles for every laid out category and skill.
///
/// Padding convention: every skill is preceded by one `skill_padding`, and every category
/// is followed by one `category_padding`. The trailing category pad of the last category
/// falls inside the unused gap.
#[derive(Debug, Clone, Default)]
pub struct AngularLayout {
    total_arc_angle: f64,
    column_angle: f64,
    skill_padding: f64,
    categories: Vec<CategoryId>,
    category_spans: HashMap<CategoryId, Span>,
    skill_starts: HashMap<(CategoryId, SkillName), f64>,
}

impl AngularLayout {
    pub fn compute(grouping: &Grouping<'_>, params: &LayoutParams) -> Result<Self, LayoutError> {
        let categories: Vec<CategoryId> = match &params.category_focus {
            Some(focus) if grouping.contains(focus) => vec![focus.clone()],
            Some(focus) => {
                log::warn!("Category focus '{}' matches no category", focus);
                Vec::new()
            }
            None => grouping.categories().to_vec(),
        };

        let total_arc_angle = FULL_CIRCLE * params.arc_coverage;
        let skill_count: usize = categories.iter().map(|c| grouping.skill_count(c)).sum();

        if skill_count == 0 {
            return Ok(Self {
                total_arc_angle,
                skill_padding: params.skill_padding,
                categories,
                ..Default::default()
            });
        }

        let required = params.category_padding * (categories.len() - 1) as f64
            + params.skill_padding * skill_count as f64;
        let column_angle = (total_arc_angle - required) / skill_count as f64;

        if column_angle <= 0.0 {
            return Err(LayoutError::NegativeCapacity {
                available: total_arc_angle,
                required,
            });
        }

        log::debug!(
            "Laying out {} skills in {} categories, column angle {:.4}",
            skill_count,
            categories.len(),
            column_angle
        );

        let step = column_angle + params.skill_padding;
        let mut category_spans = HashMap::with_capacity(categories.len());
        let mut skill_starts = HashMap::with_capacity(skill_count);
        let mut running = FULL_CIRCLE * params.arc_start_offset;

        for category in &categories {
            let skills = grouping.skills(category);
            let start = running;
            let end = start + skills.len() as f64 * step;

            for record in skills {
                // first match wins for duplicated names
                let key = (category.clone(), record.skill.clone());
                if skill_starts.contains_key(&key) {
                    continue;
                }
                let index = grouping
                    .index_of(category, &record.skill)
                    .unwrap_or_default();
                skill_starts.insert(key, start + params.skill_padding + index as f64 * step);
            }

            category_spans.insert(category.clone(), Span::new(start, end));
            running = end + params.category_padding;
        }

        Ok(Self {
            total_arc_angle,
            column_angle,
            skill_padding: params.skill_padding,
            categories,
            category_spans,
            skill_starts,
        })
    }

    /// Angle covered by skill bars and padding, `2π * arc_coverage`.
    pub fn total_arc_angle(&self) -> f64 {
        self.total_arc_angle
    }

    /// Uniform angular width of one skill bar.
    pub fn column_angle(&self) -> f64 {
        self.column_angle
    }

    pub fn skill_padding(&self) -> f64 {
        self.skill_padding
    }

    /// The categories taking part in this layout, in drawing order.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn category_span(&self, category: &CategoryId) -> Option<Span> {
        self.category_spans.get(category).copied()
    }

    pub fn category_start(&self, category: &CategoryId) -> Option<f64> {
        self.category_span(category).map(|s| s.start)
    }

    pub fn skill_span(&self, record: &SkillRecord) -> Option<Span> {
        self.skill_starts
            .get(&(record.category.clone(), record.skill.clone()))
            .map(|&start| Span::new(start, start + self.column_angle))
    }
}
