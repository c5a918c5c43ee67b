use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crossstitch::assets::{AssetCategory, AssetLoader, TABLE_FILE};
use crossstitch::error::AppError;
use crossstitch::models::{AppConfig, PatternVariant};
use crossstitch::services::{self, floss_scraper, PatternPipeline, PatternRequest};
use stitch_pattern::{NearestReference, ReferenceTable, Rgb};

#[derive(Parser)]
#[command(name = "crossstitch")]
#[command(version)]
#[command(about = "Turn an image into a cross-stitch chart and thread key")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the chart and key for an image
    Pattern {
        /// Input image (PNG, JPEG, GIF, BMP, ...)
        image: PathBuf,

        /// Number of thread colours
        colors: usize,

        /// Quantization method: kmeans, meanshift or gmm
        method: String,

        /// Chart width in stitches
        count: u32,

        /// Configuration file (defaults to $CONFIG_FILE, then the embedded config)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Thread table to match against instead of the embedded one
        #[arg(long)]
        table: Option<PathBuf>,

        /// Directory the documents are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Side length of one stitch in the chart
        #[arg(long)]
        cell_size: Option<u32>,

        /// Chart variant to write (repeatable)
        #[arg(long = "variant", value_enum)]
        variants: Vec<PatternVariant>,

        /// Mark the centre row and column
        #[arg(long)]
        center_marks: bool,
    },
    /// Print the thread closest to a colour
    Lookup {
        /// Colour as hex, e.g. "#c72b3b"
        color: String,

        /// Thread table to search instead of the embedded one
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Extract the embedded thread table (and config) for customization
    Init {
        /// Where to write the thread table
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also extract config.yaml
        #[arg(long)]
        config: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
    /// Download the DMC thread table from threadcolors.com
    Scrape {
        /// Where to write the thread table
        #[arg(short, long, default_value = TABLE_FILE)]
        output: PathBuf,

        /// Page to scrape
        #[arg(long, default_value = floss_scraper::DEFAULT_URL)]
        url: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            // Missing input is guidance, not failure.
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            | ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion => {
                e.print()?;
                return Ok(());
            }
            _ => e.exit(),
        },
    };

    init_tracing();

    match cli.command {
        Some(Commands::Pattern {
            image,
            colors,
            method,
            count,
            config,
            table,
            output_dir,
            cell_size,
            variants,
            center_marks,
        }) => {
            let overrides = Overrides {
                table,
                output_dir,
                cell_size,
                variants,
                center_marks,
            };
            run_pattern_command(image, colors, &method, count, config, overrides)
        }
        Some(Commands::Lookup { color, table }) => run_lookup_command(&color, table),
        Some(Commands::Init {
            output,
            config,
            force,
            list,
        }) => run_init_command(output, config, force, list),
        Some(Commands::Scrape { output, url }) => run_scrape_command(&url, &output),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crossstitch=info,stitch_pattern=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Command line values that take precedence over config.yaml
struct Overrides {
    table: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    cell_size: Option<u32>,
    variants: Vec<PatternVariant>,
    center_marks: bool,
}

impl Overrides {
    fn apply(self, config: &mut AppConfig) {
        if let Some(table) = self.table {
            config.reference_table = Some(table);
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if let Some(size) = self.cell_size {
            config.cell_size = size;
        }
        if !self.variants.is_empty() {
            config.variants = self.variants;
        }
        if self.center_marks {
            config.center_marks = true;
        }
    }
}

fn config_path(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

fn load_table(loader: &AssetLoader) -> Result<ReferenceTable, AppError> {
    let (table, report) = services::load_from_assets(loader)?;
    if !report.skipped.is_empty() {
        eprintln!(
            "Skipped {} malformed thread table rows in {}",
            report.skipped.len(),
            loader.table_source()
        );
    }
    Ok(table)
}

/// Generate the documents for one image
fn run_pattern_command(
    image: PathBuf,
    colors: usize,
    method: &str,
    count: u32,
    config: Option<PathBuf>,
    overrides: Overrides,
) -> anyhow::Result<()> {
    // Reject bad arguments before touching the filesystem.
    let request = PatternRequest::new(image, colors, method, count)?;

    let loader = AssetLoader::new(config_path(config), None);
    let mut config = AppConfig::load_from_assets(&loader);
    overrides.apply(&mut config);
    config.validate()?;

    let loader = loader.with_table(config.reference_table.clone());
    let table = load_table(&loader)?;

    let pipeline = PatternPipeline::new(Arc::new(config), Arc::new(table));
    let report = pipeline.run(&request)?;

    println!(
        "Pattern {}x{} stitches, {} threads ({} cells smoothed)",
        report.width,
        report.height,
        report.threads.len(),
        report.smoothed
    );
    for (idx, thread) in report.threads.iter().enumerate() {
        println!(
            "  {idx:>2}  {:<6} {:<32} {}",
            thread.id(),
            thread.name(),
            thread.rgb().to_hex()
        );
    }
    for path in &report.written {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Print the nearest thread for a colour
fn run_lookup_command(color: &str, table: Option<PathBuf>) -> anyhow::Result<()> {
    let rgb: Rgb = color
        .parse()
        .map_err(|e| AppError::Config(format!("{color:?}: {e}")))?;

    let loader = AssetLoader::new(config_path(None), None);
    let config = AppConfig::load_from_assets(&loader);
    let loader = loader.with_table(table.or(config.reference_table));
    let table = load_table(&loader)?;

    let (entry, distance) = table.nearest(rgb);
    println!(
        "{}  {}  {} (distance {distance:.2})",
        entry.id(),
        entry.name(),
        entry.rgb().to_hex()
    );
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    output: Option<PathBuf>,
    config: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Thread tables:");
        for f in AssetLoader::list_embedded(AssetCategory::Table) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = vec![AssetCategory::Table];
    if config {
        categories.push(AssetCategory::Config);
    }

    let config_path = config_path(None);
    let report = AssetLoader::init(
        &categories,
        output.as_deref(),
        config_path.as_deref(),
        force,
    )?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Download the thread table
fn run_scrape_command(url: &str, output: &Path) -> anyhow::Result<()> {
    let rows = floss_scraper::scrape_to_file(url, output)?;
    println!("Wrote {rows} threads to {}", output.display());
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("crossstitch v{VERSION}");
    println!("Cross-stitch pattern generator\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    println!("\nAsset Sources:");
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:  {config_source}");

    let loader = AssetLoader::new(config_file.map(PathBuf::from), None);
    let config = AppConfig::load_from_assets(&loader);
    let table_source = match config.reference_table {
        Some(ref path) => path.display().to_string(),
        None => format!("embedded ({TABLE_FILE})"),
    };
    println!("  Threads: {table_source}");

    println!("\nUsage:");
    println!("  crossstitch pattern <IMAGE> <COLORS> <METHOD> <COUNT>");
    println!("      METHOD is one of kmeans, meanshift, gmm");
    println!("  crossstitch lookup <COLOR>   Nearest thread for a colour");
    println!("  crossstitch init             Extract the embedded thread table");
    println!("  crossstitch scrape           Download the DMC thread table");
    println!("\nRun 'crossstitch --help' for more details.");
}
