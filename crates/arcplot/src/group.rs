use crate::record::{CategoryId, SkillName, SkillRecord};
use std::collections::HashMap;

/// Records partitioned by category.
///
/// Categories are kept in ordinal (code point) order so the angular position of a category
/// only depends on the set of category names. Within a category, records keep the order in
/// which they first appeared in the input.
#[derive(Debug, Clone, Default)]
pub struct Grouping<'a> {
    categories: Vec<CategoryId>,
    groups: HashMap<CategoryId, Vec<&'a SkillRecord>>,
    max_level: u32,
}

impl<'a> Grouping<'a> {
    pub fn new(records: &'a [SkillRecord]) -> Self {
        let mut groups: HashMap<CategoryId, Vec<&'a SkillRecord>> = HashMap::new();

        for record in records {
            groups
                .entry(record.category.clone())
                .or_default()
                .push(record);
        }

        let mut categories: Vec<CategoryId> = groups.keys().cloned().collect();
        categories.sort();

        let max_level = records.iter().map(|r| r.level).max().unwrap_or(0);

        Self {
            categories,
            groups,
            max_level,
        }
    }

    /// Every category present in the input, sorted.
    pub fn categories(&self) -> &[CategoryId] {
        &self.categories
    }

    pub fn contains(&self, category: &CategoryId) -> bool {
        self.groups.contains_key(category)
    }

    pub fn skills(&self, category: &CategoryId) -> &[&'a SkillRecord] {
        self.groups
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn skill_count(&self, category: &CategoryId) -> usize {
        self.skills(category).len()
    }

    /// Position of `skill` within its category. The first match wins when a category holds
    /// the same skill name twice.
    pub fn index_of(&self, category: &CategoryId, skill: &SkillName) -> Option<usize> {
        self.skills(category).iter().position(|r| &r.skill == skill)
    }

    /// Highest level over all records, regardless of any focus.
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

pub fn group(records: &[SkillRecord]) -> Grouping<'_> {
    Grouping::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SkillRecord> {
        vec![
            SkillRecord::new("Tech Skill", "node", 7),
            SkillRecord::new("Leadership", "PM", 1),
            SkillRecord::new("Tech Skill", "react", 6),
            SkillRecord::new("Communication", "Writing", 3),
            SkillRecord::new("Leadership", "Mentoring", 4),
        ]
    }

    #[test]
    fn test_categories_sorted_lexicographically() {
        let records = sample();
        let grouping = group(&records);

        let names: Vec<&str> = grouping.categories().iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Communication", "Leadership", "Tech Skill"]);
    }

    #[test]
    fn test_category_order_ignores_input_order() {
        let mut records = sample();
        let forward: Vec<CategoryId> = group(&records).categories().to_vec();
        records.reverse();
        let backward: Vec<CategoryId> = group(&records).categories().to_vec();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_skills_keep_insertion_order() {
        let records = sample();
        let grouping = group(&records);
        let tech = CategoryId::from("Tech Skill");

        let skills: Vec<&str> = grouping
            .skills(&tech)
            .iter()
            .map(|r| r.skill.as_str())
            .collect();
        assert_eq!(skills, vec!["node", "react"]);
        assert_eq!(grouping.index_of(&tech, &SkillName::from("react")), Some(1));
        assert_eq!(grouping.index_of(&tech, &SkillName::from("PM")), None);
    }

    #[test]
    fn test_empty_input() {
        let grouping = group(&[]);
        assert!(grouping.is_empty());
        assert_eq!(grouping.max_level(), 0);
        assert!(grouping.skills(&CategoryId::from("missing")).is_empty());
    }

    #[test]
    fn test_max_level() {
        let records = sample();
        assert_eq!(group(&records).max_level(), 7);
    }
}
