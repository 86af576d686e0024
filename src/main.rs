use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pokedex_search::output::{print_diagnostics, print_json, print_results};
use pokedex_search::utils::progress::Spinner;
use pokedex_search::utils::{get_config_path, AppConfig};
use pokedex_search::{
    Generation, JsonDirSource, SearchEngine, SearchRequest, TypeFilter,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pokedex-search")]
#[command(about = "Typo-tolerant search over Pokédex creatures, items, abilities and moves")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    #[command(flatten)]
    source: SourceArgs,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// Directory holding the JSON data files
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Config file (defaults to config.json in the app data directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the index
    Search {
        /// Query text
        #[arg(required = true)]
        query: Vec<String>,

        /// Restrict to entry types (creature, item, ability, move)
        #[arg(short = 't', long = "type", value_delimiter = ',')]
        types: Vec<String>,

        /// Maximum number of results
        #[arg(short, long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show index statistics
    Stats {
        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read queries from stdin, one per line
    Interactive,
    /// Show the effective configuration, or write a default config file
    Config {
        /// Write the default configuration to the config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Some(Commands::Config { init, force }) = cli.command {
        return config_command(&cli.source, init, force);
    }
    let engine = open_engine(&cli.source)?;

    match cli.command {
        Some(Commands::Search {
            query,
            types,
            limit,
            json,
        }) => {
            let generation = build(&engine, color).await?;
            let request = search_request(query.join(" "), &types, limit);
            let results = generation.search(&request);
            if json {
                print_json(&results)?;
            } else {
                print_results(&results, color)?;
            }
        }
        Some(Commands::Stats { json }) => {
            let generation = build(&engine, color).await?;
            let stats = generation.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                stats.write_to(&mut io::stdout().lock())?;
            }
        }
        Some(Commands::Interactive) => {
            interactive(&engine, color).await?;
        }
        // handled before the engine is opened
        Some(Commands::Config { .. }) => {}
        None => {
            if cli.query.is_empty() {
                interactive(&engine, color).await?;
            } else {
                let generation = build(&engine, color).await?;
                let results = generation.search(&SearchRequest::new(cli.query.join(" ")));
                print_results(&results, color)?;
            }
        }
    }

    Ok(())
}

fn load_config(args: &SourceArgs) -> Result<AppConfig> {
    match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn config_command(args: &SourceArgs, init: bool, force: bool) -> Result<()> {
    if !init {
        let mut config = load_config(args)?;
        if let Some(dir) = &args.data {
            config.data_dir = Some(dir.clone());
        }
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let path = match &args.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };
    init_config(&path, force)?;
    eprintln!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Write the default configuration, refusing to replace a file unless forced
fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    AppConfig::default().save_to(path)
}

fn open_engine(args: &SourceArgs) -> Result<SearchEngine<JsonDirSource>> {
    let config = load_config(args)?;
    let data_dir = match &args.data {
        Some(dir) => dir.clone(),
        None => config.effective_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "opening data directory");

    let source = JsonDirSource::with_files(data_dir, config.files.clone());
    SearchEngine::with_config(source, config.search).context("Invalid search configuration")
}

/// Build the first generation with a spinner and report diagnostics
async fn build(engine: &SearchEngine<JsonDirSource>, color: bool) -> Result<Arc<Generation>> {
    let spinner = Spinner::start("Building search index...", io::stderr().is_terminal());
    let generation = engine.initialize().await;
    spinner.finish();
    report(&generation, color)?;
    Ok(generation)
}

fn report(generation: &Generation, color: bool) -> Result<()> {
    print_diagnostics(&generation.report().diagnostics, color)?;
    if generation.index().is_empty() {
        eprintln!(
            "Index is empty ({} of 4 categories failed to load)",
            generation.report().failed.len()
        );
    }
    Ok(())
}

/// Negative limits are treated as zero
fn search_request(query: String, types: &[String], limit: Option<i64>) -> SearchRequest {
    let mut request = SearchRequest::new(query).with_types(TypeFilter::parse(types));
    if let Some(limit) = limit {
        request = request.with_limit(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
    }
    request
}

async fn interactive(engine: &SearchEngine<JsonDirSource>, color: bool) -> Result<()> {
    let mut generation = build(engine, color).await?;
    let mut types = TypeFilter::all();
    let prompt = io::stdin().is_terminal();

    eprintln!(
        "{} entries loaded. Commands: :type <types>, :refresh, :stats, :quit",
        generation.index().len()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            eprint!("> ");
            io::stderr().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
            ("", _) => continue,
            (":quit" | ":q", _) => break,
            (":refresh", _) => {
                generation = engine.refresh().await;
                report(&generation, color)?;
                eprintln!(
                    "Generation {}: {} entries",
                    generation.number(),
                    generation.index().len()
                );
            }
            (":stats", _) => generation.stats().write_to(&mut io::stdout().lock())?,
            (":type", rest) => {
                types = TypeFilter::parse(rest.split([',', ' ']).filter(|t| !t.is_empty()));
                let selected: Vec<&str> = types.types().map(|t| t.as_str()).collect();
                if selected.is_empty() {
                    eprintln!("Searching all types");
                } else {
                    eprintln!("Searching {}", selected.join(", "));
                }
            }
            _ => {
                let request = SearchRequest::new(line).with_types(types);
                print_results(&generation.search(&request), color)?;
            }
        }
    }

    Ok(())
}
