use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct CategoryId(String);

crate::impl_string_newtype!(CategoryId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SkillName(String);

crate::impl_string_newtype!(SkillName);

/// One row of input data: how proficient someone is at `skill`, filed under `category`.
///
/// A level of 0 means no proficiency. Skill names are expected to be unique within a
/// category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub category: CategoryId,
    pub skill: SkillName,
    #[serde(alias = "lvl", alias = "skill_level")]
    pub level: u32,
}

impl SkillRecord {
    pub fn new(category: impl Into<String>, skill: impl Into<String>, level: u32) -> Self {
        Self {
            category: CategoryId::new(category),
            skill: SkillName::new(skill),
            level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialization() {
        let cases = vec![
            r#"{"category": "Leadership", "skill": "PM", "level": 1}"#,
            r#"{"category": "Leadership", "skill": "PM", "lvl": 1}"#,
            r#"{"category": "Leadership", "skill": "PM", "skill_level": 1}"#,
        ];

        for json in cases {
            let record: SkillRecord = serde_json::from_str(json).unwrap();
            assert_eq!(record, SkillRecord::new("Leadership", "PM", 1));
        }
    }

    #[test]
    fn test_category_order_is_ordinal() {
        let mut ids = vec![
            CategoryId::from("tech"),
            CategoryId::from("Tech"),
            CategoryId::from("Leadership"),
        ];
        ids.sort();
        let names: Vec<&str> = ids.iter().map(|c| c.as_str()).collect();
        assert_eq!(names, vec!["Leadership", "Tech", "tech"]);
    }
}
