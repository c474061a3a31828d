use crate::angular::{AngularLayout, Span};
use crate::arc::{AnnotationAnchor, AnnularSector, Point};
use crate::group::Grouping;
use crate::params::{LayoutError, LayoutParams};
use crate::radial::LevelScale;
use crate::record::{CategoryId, SkillRecord};
use crate::FULL_CIRCLE;
use serde::Serialize;

/// Gap kept between a bar and the inner circle, and between stacked level segments.
pub const BAR_INSET: f64 = 1.0;
/// Thickness of the band drawn under each category.
pub const CATEGORY_BASE_WIDTH: f64 = 5.0;
/// Thickness of a background level ring.
pub const LEVEL_RING_WIDTH: f64 = 0.5;

/// Everything a renderer needs to draw one chart.
///
/// Built in full by [`compute`]; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct Geometry<'a> {
    grouping: Grouping<'a>,
    angular: AngularLayout,
    scale: LevelScale,
}

pub fn compute<'a>(
    records: &'a [SkillRecord],
    params: &LayoutParams,
) -> Result<Geometry<'a>, LayoutError> {
    params.validate()?;

    let grouping = Grouping::new(records);
    let angular = AngularLayout::compute(&grouping, params)?;
    let scale = LevelScale::new(
        grouping.max_level(),
        params.inner_radius,
        params.outer_radius(),
    );

    Ok(Geometry {
        grouping,
        angular,
        scale,
    })
}

impl<'a> Geometry<'a> {
    /// All categories in the input, sorted.
    pub fn sorted_categories(&self) -> &[CategoryId] {
        self.grouping.categories()
    }

    /// Categories drawn in this layout: all of them, or just the focused one.
    pub fn filtered_categories(&self) -> &[CategoryId] {
        self.angular.categories()
    }

    pub fn skills(&self, category: &CategoryId) -> &[&'a SkillRecord] {
        self.grouping.skills(category)
    }

    /// Records of the drawn categories, category by category.
    pub fn filtered_records(&self) -> impl Iterator<Item = &'a SkillRecord> + '_ {
        self.filtered_categories()
            .iter()
            .flat_map(|c| self.grouping.skills(c).iter().copied())
    }

    pub fn column_angle(&self) -> f64 {
        self.angular.column_angle()
    }

    pub fn total_arc_angle(&self) -> f64 {
        self.angular.total_arc_angle()
    }

    pub fn scale(&self) -> &LevelScale {
        &self.scale
    }

    pub fn inner_radius(&self) -> f64 {
        self.scale.inner()
    }

    pub fn outer_radius(&self) -> f64 {
        self.scale.outer()
    }

    pub fn level_to_radius(&self, level: f64) -> f64 {
        self.scale.radius(level)
    }

    pub fn skill_span(&self, record: &SkillRecord) -> Option<Span> {
        self.angular.skill_span(record)
    }

    pub fn category_span(&self, category: &CategoryId) -> Option<Span> {
        self.angular.category_span(category)
    }

    /// Bar whose height is the record's level.
    pub fn bar_arc(&self, record: &SkillRecord) -> Option<AnnularSector> {
        self.skill_span(record).map(|span| {
            AnnularSector::new(
                self.inner_radius() + BAR_INSET,
                self.scale.radius(record.level as f64),
                span,
            )
        })
    }

    /// Bar reaching the outer radius whatever the level. Used as the hit area of a skill.
    pub fn full_height_arc(&self, record: &SkillRecord) -> Option<AnnularSector> {
        self.skill_span(record).map(|span| {
            AnnularSector::new(self.inner_radius() + BAR_INSET, self.outer_radius(), span)
        })
    }

    /// One block of a stacked bar, covering `level - 1 .. level`.
    pub fn segment_arc(&self, record: &SkillRecord, level: u32) -> Option<AnnularSector> {
        if level == 0 || level > record.level {
            return None;
        }
        self.skill_span(record).map(|span| {
            AnnularSector::new(
                self.scale.radius(level as f64 - 1.0) + BAR_INSET,
                self.scale.radius(level as f64) - BAR_INSET,
                span,
            )
        })
    }

    /// Exactly `record.level` segments, innermost first.
    pub fn segments(&self, record: &SkillRecord) -> Vec<AnnularSector> {
        (1..=record.level)
            .filter_map(|level| self.segment_arc(record, level))
            .collect()
    }

    /// Thin band just inside the inner radius, under all skills of the category.
    pub fn category_base_arc(&self, category: &CategoryId) -> Option<AnnularSector> {
        self.category_span(category).map(|span| {
            AnnularSector::new(
                self.inner_radius() - CATEGORY_BASE_WIDTH,
                self.inner_radius(),
                span,
            )
        })
    }

    /// Background ring for `level`. It spans the covered arc plus half of the blank gap.
    pub fn level_ring(&self, level: u32) -> AnnularSector {
        let total = self.total_arc_angle();
        let radius = self.scale.radius(level as f64);
        AnnularSector::new(
            radius - LEVEL_RING_WIDTH,
            radius,
            Span::new(0.0, total + (FULL_CIRCLE - total) / 2.0),
        )
    }

    pub fn level_rings(&self) -> Vec<AnnularSector> {
        self.scale.levels().map(|l| self.level_ring(l)).collect()
    }

    pub fn annotation_anchor(&self, category: &CategoryId) -> Option<AnnotationAnchor> {
        self.angular
            .category_start(category)
            .map(AnnotationAnchor::at)
    }

    /// The skill whose full-height wedge contains `point` (chart coordinates, origin at
    /// the center).
    pub fn skill_at(&self, point: Point) -> Option<&'a SkillRecord> {
        self.filtered_records().find(|record| {
            self.full_height_arc(record)
                .is_some_and(|arc| arc.contains(point))
        })
    }

    pub fn summary(&self) -> LayoutSummary {
        let categories = self
            .filtered_categories()
            .iter()
            .filter_map(|id| {
                let span = self.category_span(id)?;
                Some(CategorySummary {
                    id: id.clone(),
                    start_angle: span.start,
                    end_angle: span.end,
                    skills: self
                        .skills(id)
                        .iter()
                        .filter_map(|r| {
                            let span = self.skill_span(r)?;
                            Some(SkillSummary {
                                skill: r.skill.to_string(),
                                level: r.level,
                                start_angle: span.start,
                                end_angle: span.end,
                                radius: self.scale.radius(r.level as f64),
                            })
                        })
                        .collect(),
                })
            })
            .collect();

        LayoutSummary {
            column_angle: self.column_angle(),
            total_arc_angle: self.total_arc_angle(),
            inner_radius: self.inner_radius(),
            outer_radius: self.outer_radius(),
            max_level: self.scale.max_level(),
            sorted_categories: self.sorted_categories().to_vec(),
            categories,
        }
    }
}

/// Serializable snapshot of a [`Geometry`].
#[derive(Debug, Clone, Serialize)]
pub struct LayoutSummary {
    pub column_angle: f64,
    pub total_arc_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub max_level: u32,
    pub sorted_categories: Vec<CategoryId>,
    pub categories: Vec<CategorySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub start_angle: f64,
    pub end_angle: f64,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillSummary {
    pub skill: String,
    pub level: u32,
    pub start_angle: f64,
    pub end_angle: f64,
    pub radius: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn records() -> Vec<SkillRecord> {
        vec![
            SkillRecord::new("Tech Skill", "node", 7),
            SkillRecord::new("Tech Skill", "react", 6),
            SkillRecord::new("Leadership", "Manager", 2),
            SkillRecord::new("Leadership", "PM", 1),
            SkillRecord::new("Communication", "Networking", 4),
            SkillRecord::new("Communication", "Presenting", 0),
        ]
    }

    #[test]
    fn test_segment_count_matches_level() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();

        assert_eq!(geometry.segments(&records[0]).len(), 7);
        assert_eq!(geometry.segments(&records[3]).len(), 1);
        assert!(geometry.segments(&records[5]).is_empty());
        assert!(geometry.segment_arc(&records[3], 2).is_none());
    }

    #[test]
    fn test_segments_stack_between_levels() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();
        let segments = geometry.segments(&records[4]);

        for (i, segment) in segments.iter().enumerate() {
            let level = (i + 1) as f64;
            let below = geometry.level_to_radius(level - 1.0);
            let above = geometry.level_to_radius(level);
            assert!((segment.inner_radius - (below + 1.0)).abs() < EPS);
            assert!((segment.outer_radius - (above - 1.0)).abs() < EPS);
        }
        for pair in segments.windows(2) {
            assert!(pair[0].outer_radius < pair[1].inner_radius);
        }
    }

    #[test]
    fn test_bar_arcs() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();

        let bar = geometry.bar_arc(&records[0]).unwrap();
        assert_eq!(bar.inner_radius, 91.0);
        assert!((bar.outer_radius - 200.0).abs() < EPS);
        assert!((bar.end_angle - bar.start_angle - geometry.column_angle()).abs() < EPS);

        let empty = geometry.bar_arc(&records[5]).unwrap();
        assert_eq!(empty.outer_radius, 90.0);

        let full = geometry.full_height_arc(&records[5]).unwrap();
        assert_eq!(full.outer_radius, geometry.outer_radius());
        assert_eq!(full.span(), empty.span());
    }

    #[test]
    fn test_category_base_and_rings() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();
        let leadership = CategoryId::from("Leadership");

        let base = geometry.category_base_arc(&leadership).unwrap();
        assert_eq!(base.inner_radius, 85.0);
        assert_eq!(base.outer_radius, 90.0);
        let last = geometry.skill_span(&records[3]).unwrap();
        assert!((base.end_angle - last.end).abs() < EPS);

        let rings = geometry.level_rings();
        assert_eq!(rings.len(), 7);
        let ring = rings[6];
        assert!((ring.outer_radius - 200.0).abs() < EPS);
        assert!((ring.end_angle - 1.8 * PI).abs() < EPS);
    }

    #[test]
    fn test_annotation_anchor_follows_category_start() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();
        let first = CategoryId::from("Communication");

        let anchor = geometry.annotation_anchor(&first).unwrap();
        let start = 0.1 * 2.0 * PI;
        assert!((anchor.inner.x - start.sin()).abs() < EPS);
        assert!((anchor.inner.y + start.cos()).abs() < EPS);
        assert!(geometry.annotation_anchor(&"Cooking".into()).is_none());
    }

    #[test]
    fn test_skill_at_hits_full_height_wedge() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();

        // level 0 skill is still hit near the outer radius
        let wedge = geometry.full_height_arc(&records[5]).unwrap();
        let mid = (wedge.start_angle + wedge.end_angle) / 2.0;
        let point = Point::direction(mid).scale(geometry.outer_radius() - 2.0);
        assert_eq!(geometry.skill_at(point), Some(&records[5]));

        assert_eq!(geometry.skill_at(Point::new(0.0, 0.0)), None);
        // the blank gap at 12 o'clock holds no skill
        assert_eq!(geometry.skill_at(Point::new(0.0, -150.0)), None);
    }

    #[test]
    fn test_empty_input_degrades() {
        let geometry = compute(&[], &LayoutParams::default()).unwrap();

        assert!(geometry.sorted_categories().is_empty());
        assert_eq!(geometry.filtered_records().count(), 0);
        assert!(geometry.level_rings().is_empty());
        assert_eq!(geometry.level_to_radius(3.0), geometry.inner_radius());
        assert_eq!(geometry.summary().categories.len(), 0);
    }

    #[test]
    fn test_focus_keeps_radial_scale() {
        let records = records();
        let params = LayoutParams::default().with_focus(Some("Leadership".into()));
        let geometry = compute(&records, &params).unwrap();

        assert_eq!(geometry.sorted_categories().len(), 3);
        assert_eq!(geometry.filtered_categories(), &[CategoryId::from("Leadership")]);
        assert_eq!(geometry.filtered_records().count(), 2);
        assert_eq!(geometry.scale().max_level(), 7);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let records = records();
        let params = LayoutParams {
            arc_coverage: 0.1,
            category_padding: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            compute(&records, &params),
            Err(LayoutError::NegativeCapacity { .. })
        ));
    }

    #[test]
    fn test_summary_serializes() {
        let records = records();
        let geometry = compute(&records, &LayoutParams::default()).unwrap();
        let json = serde_json::to_value(geometry.summary()).unwrap();

        assert_eq!(json["max_level"], 7);
        assert_eq!(json["categories"][0]["id"], "Communication");
        assert_eq!(json["categories"][0]["skills"][1]["skill"], "Presenting");
    }
}
