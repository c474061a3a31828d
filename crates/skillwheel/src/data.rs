use arcplot::SkillRecord;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum DataFormat {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Unsupported data file '{}', expected a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML skill sheet: {0}")]
    Toml(#[from] config::ConfigError),
    #[error("Invalid JSON skill sheet: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Skill '{0}' has an empty category")]
    EmptyCategory(String),
}

#[derive(Debug, Deserialize)]
struct SkillSheet {
    #[serde(default)]
    skills: Vec<SkillRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSheet {
    List(Vec<SkillRecord>),
    Sheet(SkillSheet),
}

pub fn load_records(path: &Path) -> Result<Vec<SkillRecord>, DataError> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| e.parse::<DataFormat>().ok())
        .ok_or_else(|| DataError::UnsupportedFormat(path.to_path_buf()))?;

    let text = fs_err::read_to_string(path)?;
    let records = parse_records(&text, format)?;
    log::info!("Loaded {} skills from {}", records.len(), path.display());
    Ok(records)
}

/// Parses a skill sheet. TOML sheets hold `[[skills]]` tables; JSON sheets are either a
/// bare array of records or an object with a `skills` array.
pub fn parse_records(text: &str, format: DataFormat) -> Result<Vec<SkillRecord>, DataError> {
    let records = match format {
        DataFormat::Toml => {
            config::Config::builder()
                .add_source(config::File::from_str(text, config::FileFormat::Toml))
                .build()?
                .try_deserialize::<SkillSheet>()?
                .skills
        }
        DataFormat::Json => match serde_json::from_str::<JsonSheet>(text)? {
            JsonSheet::List(records) => records,
            JsonSheet::Sheet(sheet) => sheet.skills,
        },
    };

    check_records(&records)?;
    Ok(records)
}

fn check_records(records: &[SkillRecord]) -> Result<(), DataError> {
    let mut seen = HashSet::new();

    for record in records {
        if record.category.trim().is_empty() {
            return Err(DataError::EmptyCategory(record.skill.to_string()));
        }
        if !seen.insert((&record.category, &record.skill)) {
            log::warn!(
                "Skill '{}' appears more than once in '{}': each copy takes a column, \
                 but all of them are drawn in the first one's slot",
                record.skill,
                record.category
            );
        }
    }
    Ok(())
}

/// Sample sheet used when no data file is given.
pub fn demo_records() -> Vec<SkillRecord> {
    [
        ("Tech Skill", "node", 7),
        ("Tech Skill", "react", 6),
        ("Tech Skill", "Git", 5),
        ("Tech Skill", "Code", 1),
        ("Leadership", "Manager", 2),
        ("Leadership", "PM", 1),
        ("Leadership", "Leader", 5),
        ("Communication", "Networking", 4),
        ("Communication", "Presenting", 1),
        ("Communication", "Writing", 3),
        ("Tech Skill", "Design", 4),
        ("Tech Skill", "Testing", 5),
        ("Tech Skill", "Debugging", 6),
        ("Leadership", "Mentoring", 4),
        ("Leadership", "Planning", 3),
        ("Communication", "Collaboration", 5),
        ("Communication", "Documentation", 2),
        ("Tech Skill", "Research", 3),
        ("Tech Skill", "Analysis", 4),
    ]
    .into_iter()
    .map(|(category, skill, level)| SkillRecord::new(category, skill, level))
    .collect()
}
