use crate::events::AppEvent;
use crate::theme::{DEFAULT_PALETTE, HexColor};
use arcplot::LayoutParams;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const ENV_PREFIX: &str = "SKILLWHEEL";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    #[strum(serialize = "png")]
    Png,
    #[strum(serialize = "svg")]
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::iter().find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleConfig {
    pub palette: Vec<HexColor>,
    pub unknown_color: HexColor,
    pub background: Option<HexColor>,
    pub annotation_padding: f64,
    pub category_label_width: f64,
    pub label_height: f64,
    pub line_thickness: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| HexColor::from_str(hex).ok())
                .collect(),
            unknown_color: HexColor::rgb(0xcc, 0xcc, 0xcc),
            background: None,
            annotation_padding: 10.0,
            category_label_width: 100.0,
            label_height: 30.0,
            line_thickness: 2.0,
            font_family: "Sans".to_string(),
            font_size: 14.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutParams,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "skillwheel", "skillwheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Resolves the config file: an explicit path wins over the per-user location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = resolve_config_path(explicit)?;
    log::debug!("Loading config from {}", config_path.display());

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(explicit.is_some()))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(text, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn write_default_config(explicit: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = resolve_config_path(explicit)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Sends [`AppEvent::Reload`] whenever one of `files` is created, modified or removed.
pub async fn run_async_watcher(files: Vec<PathBuf>, tx: Sender<AppEvent>) {
    let dirs: BTreeSet<PathBuf> = files
        .iter()
        .map(|p| absolute(p))
        .filter_map(|p| p.parent().map(Path::to_path_buf))
        .collect();

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    let mut watching = 0;
    for dir in &dirs {
        // the per-user config directory only exists once a config has been written
        if let Err(e) = fs_err::create_dir_all(dir) {
            log::warn!("Skipping {}: {}", dir.display(), e);
            continue;
        }
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            log::warn!("Failed to watch {}: {}", dir.display(), e);
            continue;
        }
        log::info!("Watching {}", dir.display());
        watching += 1;
    }

    if watching == 0 {
        log::error!("No directory could be watched, live reload is disabled");
        return;
    }

    // resolved again now that every watched directory exists
    let files: Vec<PathBuf> = files.iter().map(|p| absolute(p)).collect();

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| files.contains(&absolute(p)))
                    && tx.send(AppEvent::Reload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    // canonicalize fails while an editor is replacing the file, or before it is created
    if let Ok(path) = fs_err::canonicalize(path) {
        return path;
    }
    if let (Some(parent), Some(name)) = (path.parent(), path.file_name())
        && let Ok(parent) = fs_err::canonicalize(parent)
    {
        return parent.join(name);
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_output_format_deserialization() {
        let cases = vec![
            ("\"png\"", OutputFormat::Png),
            ("\"PNG\"", OutputFormat::Png),
            ("\"Svg\"", OutputFormat::Svg),
            ("\"svg\"", OutputFormat::Svg),
        ];

        for (json, expected) in cases {
            let deserialized: OutputFormat = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<OutputFormat>("\"pdf\"").is_err());
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.SVG")),
            Some(OutputFormat::Svg)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/chart.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_path(Path::new("chart")), None);
    }

    #[test]
    fn test_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.layout, LayoutParams::default());
        assert_eq!(config.style.palette.len(), 8);
        assert_eq!(config.output.format, OutputFormat::Png);
    }

    #[test]
    fn test_environment_overrides_file() {
        let env = config::Map::from([
            (
                "SKILLWHEEL_LAYOUT__INNER_RADIUS".to_string(),
                "70.5".to_string(),
            ),
            ("SKILLWHEEL_OUTPUT__FORMAT".to_string(), "svg".to_string()),
        ]);

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                "[layout]\ninner_radius = 60.0\nwidth = 800.0\n",
                config::FileFormat::Toml,
            ))
            .add_source(environment().source(Some(env)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.layout.inner_radius, 70.5);
        assert_eq!(config.layout.width, 800.0);
        assert_eq!(config.output.format, OutputFormat::Svg);
    }

    async fn expect_reload(rx: &async_channel::Receiver<AppEvent>) {
        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv())
            .await
            .expect("no reload within 3s")
            .unwrap();
        assert!(matches!(event, AppEvent::Reload));
    }

    #[tokio::test]
    async fn test_watcher_reloads_on_data_change() {
        let tmp = tempfile::tempdir().unwrap();
        // a config "directory" that is really a file can never be watched
        let blocker = tmp.path().join("a_blocker");
        fs_err::write(&blocker, "").unwrap();
        let data_dir = tmp.path().join("b_data");
        fs_err::create_dir_all(&data_dir).unwrap();
        let data = data_dir.join("skills.toml");
        fs_err::write(&data, "").unwrap();

        let (tx, rx) = async_channel::bounded(32);
        tokio::spawn(run_async_watcher(
            vec![blocker.join("config.toml"), data.clone()],
            tx,
        ));
        tokio::time::sleep(Duration::from_millis(300)).await;

        let sheet = "[[skills]]\ncategory = \"A\"\nskill = \"x\"\nlevel = 1\n";
        fs_err::write(&data, sheet).unwrap();
        expect_reload(&rx).await;
    }

    #[tokio::test]
    async fn test_watcher_creates_missing_config_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("skillwheel").join("config.toml");

        let (tx, rx) = async_channel::bounded(32);
        tokio::spawn(run_async_watcher(vec![config_path.clone()], tx));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(config_path.parent().unwrap().is_dir());
        fs_err::write(&config_path, DEFAULT_CONFIG).unwrap();
        expect_reload(&rx).await;
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config(
            r##"
            [layout]
            inner_radius = 60.0
            category_focus = "Leadership"

            [style]
            palette = ["#ff0000", "#00ff00"]

            [output]
            format = "SVG"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout.inner_radius, 60.0);
        assert_eq!(config.layout.arc_coverage, LayoutParams::default().arc_coverage);
        assert_eq!(
            config.layout.category_focus.as_ref().map(|c| c.as_str()),
            Some("Leadership")
        );
        assert_eq!(config.style.palette.len(), 2);
        assert_eq!(config.style.line_thickness, 2.0);
        assert_eq!(config.output.format, OutputFormat::Svg);
    }
}
