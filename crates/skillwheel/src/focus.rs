use arcplot::{CategoryId, Geometry, LayoutError, LayoutParams, Point, SkillRecord};

/// The category the user has drilled into, if any.
///
/// The layout engine never stores this; callers feed it back through
/// [`FocusState::apply`] and lay the chart out again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusState {
    focus: Option<CategoryId>,
}

impl FocusState {
    pub fn new(focus: Option<CategoryId>) -> Self {
        Self { focus }
    }

    pub fn current(&self) -> Option<&CategoryId> {
        self.focus.as_ref()
    }

    /// Selecting the focused category again clears the focus.
    pub fn toggle(&mut self, category: &CategoryId) -> FocusAction {
        if self.focus.as_ref() == Some(category) {
            self.focus = None;
        } else {
            self.focus = Some(category.clone());
        }
        FocusAction::new(true)
    }

    /// Handles a click at `point` (chart coordinates, origin at the center). Clicking any
    /// part of a skill's wedge toggles that skill's category; clicks elsewhere do nothing.
    pub fn click(&mut self, geometry: &Geometry<'_>, point: Point) -> FocusAction {
        match geometry.skill_at(point) {
            Some(record) => {
                log::debug!("Clicked '{}' in '{}'", record.skill, record.category);
                self.toggle(&record.category)
            }
            None => FocusAction::default(),
        }
    }

    /// Clicks and, when the focus changed, lays `records` out again with the new focus.
    pub fn click_and_relayout<'a>(
        &mut self,
        records: &'a [SkillRecord],
        geometry: &Geometry<'_>,
        params: &LayoutParams,
        point: Point,
    ) -> Result<Option<Geometry<'a>>, LayoutError> {
        if !self.click(geometry, point).should_relayout {
            return Ok(None);
        }
        arcplot::compute(records, &self.apply(params)).map(Some)
    }

    pub fn apply(&self, params: &LayoutParams) -> LayoutParams {
        params.clone().with_focus(self.focus.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusAction {
    pub should_relayout: bool,
}

impl FocusAction {
    pub fn new(should_relayout: bool) -> Self {
        Self { should_relayout }
    }
}
