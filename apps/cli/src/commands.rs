//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use voyagelog_core::render::{self, RenderOptions};
use voyagelog_core::{Resolution, navigate, parse_location, resolve};
use voyagelog_loader::{ChapterSource, LoadOptions, load_chapters};
use voyagelog_shared::{
    AppConfig, ChapterRecord, Routing, VoyageLogError, init_config, load_config, load_config_from,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// VoyageLog — render the voyage journal.
#[derive(Parser)]
#[command(
    name = "voyagelog",
    version,
    about = "Resolve journal chapters from page URLs and render them as HTML.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.voyagelog/voyagelog.toml.
    #[arg(long, global = true, env = "VOYAGELOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// URL routing mode.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum RoutingArg {
    Hash,
    Query,
}

impl From<RoutingArg> for Routing {
    fn from(arg: RoutingArg) -> Self {
        match arg {
            RoutingArg::Hash => Routing::Hash,
            RoutingArg::Query => Routing::Query,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Render the page for a URL (e.g. `voyage.html?v=3` or `index.html#v3`).
    Render {
        /// Page location, absolute or site-relative.
        location: String,

        /// Journal JSON path or URL (overrides config).
        #[arg(short, long)]
        data: Option<String>,

        /// Routing mode (overrides config).
        #[arg(short, long)]
        routing: Option<RoutingArg>,

        /// Print only the page fragment instead of a full document.
        #[arg(long)]
        fragment: bool,
    },

    /// Print the chapter list.
    List {
        /// Journal JSON path or URL (overrides config).
        #[arg(short, long)]
        data: Option<String>,

        /// Routing mode used for chapter links (overrides config).
        #[arg(short, long)]
        routing: Option<RoutingArg>,
    },

    /// Resolve a chapter identifier and describe the match.
    Show {
        /// Raw identifier as it would appear in a URL (`v3`, `3`, ...).
        id: String,

        /// Journal JSON path or URL (overrides config).
        #[arg(short, long)]
        data: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr; stdout carries the rendered HTML.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "voyagelog=info",
        1 => "voyagelog=debug",
        _ => "voyagelog=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Render {
            location,
            data,
            routing,
            fragment,
        } => cmd_render(&config, &location, data.as_deref(), routing, fragment).await,
        Command::List { data, routing } => cmd_list(&config, data.as_deref(), routing).await,
        Command::Show { id, data } => cmd_show(&config, &id, data.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&config).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load the chapter list with a spinner on stderr.
async fn load(
    config: &AppConfig,
    data: Option<&str>,
) -> std::result::Result<Vec<ChapterRecord>, VoyageLogError> {
    let source = ChapterSource::parse(data.unwrap_or(&config.source.data));
    let opts = LoadOptions::from(&config.source);

    info!(%source, "loading chapter list");

    let spinner = Spinner::new(&format!("Loading {source}"));
    let result = load_chapters(&source, &opts).await;
    spinner.finish();

    result
}

/// Render options from config plus an optional routing override.
fn render_options(config: &AppConfig, routing: Option<RoutingArg>) -> RenderOptions {
    let mut opts = RenderOptions::from(&config.site);
    if let Some(routing) = routing {
        opts.routing = routing.into();
    }
    opts
}

// ---------------------------------------------------------------------------
// CLI spinner
// ---------------------------------------------------------------------------

/// Stderr spinner shown while the journal loads.
struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { bar }
    }

    fn finish(self) {
        self.bar.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_render(
    config: &AppConfig,
    location: &str,
    data: Option<&str>,
    routing: Option<RoutingArg>,
    fragment: bool,
) -> Result<()> {
    let url = parse_location(location)?;
    let opts = render_options(config, routing);

    info!(location, routing = %opts.routing, "rendering page");

    let loaded = load(config, data).await;
    let view = navigate(loaded.as_deref(), &url, &opts);

    if fragment {
        print!("{}", view.body);
    } else {
        print!("{}", view.to_document());
    }

    loaded?;
    if view.is_error() {
        return Err(eyre!("page for '{location}' rendered an error view"));
    }
    Ok(())
}

async fn cmd_list(
    config: &AppConfig,
    data: Option<&str>,
    routing: Option<RoutingArg>,
) -> Result<()> {
    let chapters = load(config, data).await?;
    let opts = render_options(config, routing);
    print!("{}", render::chapter_list(&chapters, &opts));
    Ok(())
}

async fn cmd_show(config: &AppConfig, id: &str, data: Option<&str>) -> Result<()> {
    let chapters = load(config, data).await?;

    let resolution = resolve(&chapters, Some(id));
    let Some(resolved) = resolution.found() else {
        return match &resolution {
            Resolution::NotFound { attempted } => Err(eyre!("no chapter matches '{attempted}'")),
            _ => Err(eyre!("empty chapter identifier")),
        };
    };

    let chapter = resolved.chapter;
    println!();
    println!("  Chapter:  {} ({})", chapter.title, chapter.id);
    println!("  Number:   {}", render::display_number(chapter));
    println!("  Index:    {}", resolved.index);
    println!("  Matched:  {}", resolved.rule);
    println!(
        "  Previous: {}",
        resolved.previous.map_or("—", |c| c.id.as_str())
    );
    println!("  Next:     {}", resolved.next.map_or("—", |c| c.id.as_str()));
    println!(
        "  Images:   {}",
        chapter.images.iter().filter(|src| !src.is_empty()).count()
    );
    println!();
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}
