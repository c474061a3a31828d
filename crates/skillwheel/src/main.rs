use anyhow::Context as _;
use arcplot::{CategoryId, LayoutParams, Point, SkillRecord};
use clap::{Args, Parser, Subcommand};
use skillwheel::config::{self, Config, OutputFormat};
use skillwheel::data;
use skillwheel::events::AppEvent;
use skillwheel::focus::FocusState;
use skillwheel::render::{self, Canvas};
use skillwheel::sys::runtime;
use skillwheel::theme::Theme;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "skillwheel", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the per-user one
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Skill sheet (.toml or .json). The built-in demo sheet is used when omitted
    #[arg(short = 'd', long)]
    data: Option<PathBuf>,

    /// Only lay out the skills of this category
    #[arg(long)]
    focus: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Draw the chart to a PNG or SVG file
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (defaults to the config's output path, then skillwheel.<format>)
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// png or svg (inferred from --out when omitted)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,

        #[arg(long)]
        width: Option<f64>,

        #[arg(long)]
        height: Option<f64>,

        /// Redraw whenever the config or data file changes
        #[arg(short = 'w', long)]
        watch: bool,
    },
    /// Print the computed layout as JSON
    Layout {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Click at chart coordinates (origin at the center, y down) and print the new focus
    Pick {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        #[command(flatten)]
        input: InputArgs,
    },
    /// Write the default config file
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            input,
            out,
            format,
            width,
            height,
            watch,
        } => {
            let job = RenderJob {
                input,
                out,
                format,
                width,
                height,
            };
            if watch {
                watch_and_render(&job, config_path)
            } else {
                job.run(config_path).map(|_| ())
            }
        }
        Commands::Layout { input } => print_layout(&input, config_path),
        Commands::Pick { x, y, input } => pick(Point::new(x, y), &input, config_path),
        Commands::InitConfig => {
            let path = config::write_default_config(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn load_records(input: &InputArgs) -> anyhow::Result<Vec<SkillRecord>> {
    match &input.data {
        Some(path) => data::load_records(path)
            .with_context(|| format!("Failed to load skills from {}", path.display())),
        None => {
            log::info!("No data file given, using the demo sheet");
            Ok(data::demo_records())
        }
    }
}

/// A `--focus` flag wins over the config's `category_focus`.
fn initial_focus(input: &InputArgs, config: &Config) -> FocusState {
    FocusState::new(
        input
            .focus
            .clone()
            .map(CategoryId::new)
            .or_else(|| config.layout.category_focus.clone()),
    )
}

fn layout_params(input: &InputArgs, config: &Config) -> LayoutParams {
    initial_focus(input, config).apply(&config.layout)
}

struct RenderJob {
    input: InputArgs,
    out: Option<PathBuf>,
    format: Option<OutputFormat>,
    width: Option<f64>,
    height: Option<f64>,
}

impl RenderJob {
    fn run(&self, config_path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let config = config::load_config(config_path)?;
        let records = load_records(&self.input)?;

        let mut params = layout_params(&self.input, &config);
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = Some(height);
        }

        let geometry = arcplot::compute(&records, &params).context("Failed to lay out chart")?;

        let format = self
            .format
            .or_else(|| self.out.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(config.output.format);
        let out = self
            .out
            .clone()
            .or_else(|| config.output.path.clone())
            .unwrap_or_else(|| PathBuf::from(format!("skillwheel.{}", format.extension())));

        let theme = Theme::from_style(&config.style);
        let canvas = Canvas::new(params.width, params.height());
        render::render_to_file(&geometry, &theme, canvas, &out, format)?;

        println!("{}", out.display());
        Ok(out)
    }
}

fn watch_and_render(job: &RenderJob, config_path: Option<&Path>) -> anyhow::Result<()> {
    let mut watched = vec![config::resolve_config_path(config_path)?];
    watched.extend(job.input.data.clone());

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(watched, tx);

    if let Err(e) = job.run(config_path) {
        log::error!("Render failed: {:#}", e);
    }

    while let Ok(event) = rx.recv_blocking() {
        match event {
            AppEvent::Reload => {
                log::info!("Change detected, redrawing");
                if let Err(e) = job.run(config_path) {
                    log::error!("Render failed: {:#}", e);
                }
            }
            AppEvent::Quit => break,
        }
    }
    Ok(())
}

fn print_layout(input: &InputArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = config::load_config(config_path)?;
    let records = load_records(input)?;
    let geometry = arcplot::compute(&records, &layout_params(input, &config))?;

    println!("{}", serde_json::to_string_pretty(&geometry.summary())?);
    Ok(())
}

fn pick(point: Point, input: &InputArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = config::load_config(config_path)?;
    let records = load_records(input)?;
    let mut focus = initial_focus(input, &config);
    let geometry = arcplot::compute(&records, &focus.apply(&config.layout))?;

    let Some(record) = geometry.skill_at(point) else {
        println!("No skill at ({}, {})", point.x, point.y);
        return Ok(());
    };

    println!("{} / {} (level {})", record.category, record.skill, record.level);
    let relaid = focus.click_and_relayout(&records, &geometry, &config.layout, point)?;
    match focus.current() {
        Some(category) => println!("focus: {}", category),
        None => println!("focus: none"),
    }
    if let Some(relaid) = relaid {
        let categories: Vec<&str> = relaid
            .filtered_categories()
            .iter()
            .map(CategoryId::as_str)
            .collect();
        println!("categories: {}", categories.join(", "));
    }
    Ok(())
}
