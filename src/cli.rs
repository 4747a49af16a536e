use crate::config::{ScaleKind, SpiralKind, load_config};
use crate::input::parse_records;
use crate::layout::compute_cloud;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wcr", version, about = "Word cloud layout and renderer")]
pub struct Args {
    /// Input JSON word list (array of objects) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, cloud sections)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Record key holding the word text
    #[arg(long = "wordKey")]
    pub word_key: Option<String>,

    /// Record key holding the word weight
    #[arg(long = "weightKey")]
    pub weight_key: Option<String>,

    /// Font family used for measurement and rendering
    #[arg(short = 'f', long = "fontFamily")]
    pub font_family: Option<String>,

    /// Cap on the number of words laid out
    #[arg(long = "maxWords")]
    pub max_words: Option<usize>,

    /// Weight-to-size mapping
    #[arg(long = "scale", value_enum)]
    pub scale: Option<ScaleKind>,

    /// Spiral search shape
    #[arg(long = "spiral", value_enum)]
    pub spiral: Option<SpiralKind>,

    /// Minimum rotation angle in degrees
    #[arg(long = "minAngle")]
    pub min_angle: Option<f32>,

    /// Maximum rotation angle in degrees
    #[arg(long = "maxAngle")]
    pub max_angle: Option<f32>,

    /// Number of distinct rotation angles
    #[arg(long = "orientations")]
    pub orientations: Option<usize>,

    /// Whitespace padding around each word, in pixels
    #[arg(short = 'p', long = "padding")]
    pub padding: Option<f32>,

    /// RNG seed; a seeded run is fully reproducible
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Write the computed placements as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    if let Some(v) = args.width {
        config.cloud.width = v;
    }
    if let Some(v) = args.height {
        config.cloud.height = v;
    }
    if let Some(v) = args.word_key {
        config.cloud.word_key = v;
    }
    if let Some(v) = args.weight_key {
        config.cloud.weight_key = v;
    }
    if let Some(v) = args.font_family {
        config.cloud.font_family = v;
    }
    if let Some(v) = args.max_words {
        config.cloud.max_words = v;
    }
    if let Some(v) = args.scale {
        config.cloud.scale = v;
    }
    if let Some(v) = args.spiral {
        config.cloud.spiral = v;
    }
    if let Some(v) = args.min_angle {
        config.cloud.min_angle = v;
    }
    if let Some(v) = args.max_angle {
        config.cloud.max_angle = v;
    }
    if let Some(v) = args.orientations {
        config.cloud.orientations = v;
    }
    if let Some(v) = args.padding {
        config.cloud.padding = v;
    }
    if let Some(v) = args.seed {
        config.cloud.seed = Some(v);
    }

    let input = read_input(args.input.as_deref())?;
    let records = parse_records(&input)?;
    let layout = compute_cloud(&records, &config.cloud)?;
    log::info!(
        "placed {} of {} words",
        layout.words.len(),
        records.len().min(config.cloud.max_words)
    );

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }

    let svg = render_svg(&layout, &config);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }

    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &crate::config::Config) -> Result<()> {
    crate::render::write_output_png(svg, output, config)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &crate::config::Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature to be enabled at build time"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
