use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use slicescout::{Match, SearchConfig, SearchError, Searcher};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    options: CliOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CliOptions {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Elements per worker before another worker is added (0 for default)
    #[arg(long, global = true)]
    max_search_length: Option<usize>,

    /// Maximum number of concurrent workers (0 for default)
    #[arg(short = 'j', long, global = true)]
    max_search_workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

/// Element condition; all given bounds must hold. Without any, the boundary
/// element is returned.
#[derive(Args)]
struct Condition {
    /// Element equals N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    eq: Option<i64>,

    /// Element is greater than N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    gt: Option<i64>,

    /// Element is less than N
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    lt: Option<i64>,
}

impl Condition {
    fn predicate(&self) -> Option<impl Fn(usize, &i64) -> bool + Sync> {
        if self.eq.is_none() && self.gt.is_none() && self.lt.is_none() {
            return None;
        }

        let (eq, gt, lt) = (self.eq, self.gt, self.lt);
        Some(move |_: usize, value: &i64| {
            eq.map_or(true, |n| *value == n)
                && gt.map_or(true, |n| *value > n)
                && lt.map_or(true, |n| *value < n)
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find the first element matching a condition
    First {
        /// File of whitespace-separated integers ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        condition: Condition,
    },

    /// Find the last element matching a condition
    Last {
        /// File of whitespace-separated integers ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        condition: Condition,
    },

    /// Find the index of the first occurrence of a value
    IndexOf {
        /// File of whitespace-separated integers ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Value to look for
        #[arg(short, long, allow_negative_numbers = true)]
        value: i64,
    },

    /// Check whether a value occurs
    Contains {
        /// File of whitespace-separated integers ("-" for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Value to look for
        #[arg(short, long, allow_negative_numbers = true)]
        value: i64,
    },

    /// Print the effective configuration
    ShowConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("{} {}", "error:".red(), e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the search found something
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let config = load_config(&cli.options)?;
    init_logging(&config.log_level);

    let json = cli.options.json;
    let searcher = Searcher::new(config);

    let found = match cli.command {
        Commands::First { input, condition } => {
            let values = read_values(&input)?;
            let found = found_or_none(searcher.try_first(&values, condition.predicate()))?;
            print_match(found, json)
        }
        Commands::Last { input, condition } => {
            let values = read_values(&input)?;
            let found = found_or_none(searcher.try_last(&values, condition.predicate()))?;
            print_match(found, json)
        }
        Commands::IndexOf { input, value } => {
            let values = read_values(&input)?;
            print_index(searcher.index_of(&values, &value), json)
        }
        Commands::Contains { input, value } => {
            let values = read_values(&input)?;
            let found = searcher.contains(&values, &value);
            println!("{}", found);
            found
        }
        Commands::ShowConfig => {
            print!("{}", searcher.config().to_yaml()?);
            true
        }
    };

    searcher.metrics().log_stats();
    Ok(found)
}

fn load_config(options: &CliOptions) -> Result<SearchConfig> {
    let config = SearchConfig::load_from(options.config.as_deref())?;
    Ok(config.merge_with_cli(
        options.max_search_length,
        options.max_search_workers,
        options.log_level.clone(),
    ))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_values(input: &Path) -> Result<Vec<i64>> {
    let mut contents = String::new();
    if input == Path::new("-") {
        std::io::stdin().read_to_string(&mut contents)?;
    } else {
        contents = std::fs::read_to_string(input)?;
    }

    let values = contents
        .split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| SearchError::invalid_input(format!("'{}' is not an integer", token)))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Read {} values from {}", values.len(), input.display());
    Ok(values)
}

/// A miss is a normal outcome for the CLI; only an empty input is an error
fn found_or_none(result: Result<Match<'_, i64>>) -> Result<Option<Match<'_, i64>>> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(SearchError::NotFound) => Ok(None),
        Err(e) => Err(e),
    }
}

fn print_match(found: Option<Match<'_, i64>>, json: bool) -> bool {
    if json {
        println!("{}", serde_json::to_string(&found).unwrap_or_default());
        return found.is_some();
    }

    match found {
        Some(m) => {
            println!(
                "Found {} at index {}",
                m.value.to_string().green(),
                m.index.to_string().blue()
            );
            true
        }
        None => {
            println!("Not found");
            false
        }
    }
}

fn print_index(index: Option<usize>, json: bool) -> bool {
    if json {
        println!("{}", serde_json::json!({ "index": index }));
        return index.is_some();
    }

    match index {
        Some(i) => println!("Found at index {}", i.to_string().blue()),
        None => println!("Not found"),
    }
    index.is_some()
}
