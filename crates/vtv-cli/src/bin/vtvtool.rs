use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vtv_cli::commands::{config_ops, list_ops, search_ops};

#[derive(Parser)]
#[command(name = "vtvtool", about = "Find Vietnamese words hidden in accent-free letters")]
struct Cli {
    /// Custom settings TOML file
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Custom phonetic tables TOML file
    #[arg(long, global = true)]
    phonetics: Option<String>,
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write JSONL pipeline traces to this directory instead of stderr
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search a word list for two-syllable phrases spelled from the query letters
    Search {
        /// Word list (plain text, one entry per line, or compiled .vtwl)
        word_list: String,
        /// Query letters; case, spaces and tone marks are ignored
        query: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Skip the query length check
        #[arg(long)]
        no_limit: bool,
        /// Also report single-syllable words
        #[arg(long)]
        single: bool,
    },
    /// List candidate syllables for the query letters
    Syllables {
        /// Query letters
        query: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Compile a plain-text word list into the binary format
    Compile {
        /// Input text file
        input: String,
        /// Output file
        output: String,
    },
    /// Show word list statistics
    Info {
        /// Word list file
        file: String,
    },
    /// Check whether an entry is in the word list
    Lookup {
        /// Word list file
        file: String,
        /// Word or phrase
        entry: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default phonetic tables as TOML
    PhoneticsExport,
    /// Validate a custom phonetic tables TOML file
    PhoneticsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn init_trace_sink(dir: &Path, verbose: bool) {
    match vtv_engine::init_tracing(dir) {
        Ok(Some(path)) => eprintln!("Tracing to {}", path.display()),
        Ok(None) => {
            eprintln!("vtvtool built without the trace feature; logging to stderr");
            init_logging(verbose);
        }
        Err(e) => {
            eprintln!("Error creating {}: {e}", dir.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    match &cli.trace_dir {
        Some(dir) => init_trace_sink(dir, cli.verbose),
        None => init_logging(cli.verbose),
    }
    config_ops::apply_overrides(cli.settings.as_deref(), cli.phonetics.as_deref());

    match cli.command {
        Command::Search {
            word_list,
            query,
            json,
            no_limit,
            single,
        } => search_ops::search(&word_list, &query, json, no_limit, single),
        Command::Syllables { query, json } => search_ops::syllables(&query, json),
        Command::Compile { input, output } => list_ops::compile(&input, &output),
        Command::Info { file } => list_ops::info(&file),
        Command::Lookup { file, entry } => list_ops::lookup(&file, &entry),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
        Command::PhoneticsExport => config_ops::phonetics_export(),
        Command::PhoneticsValidate { file } => config_ops::phonetics_validate(&file),
    }
}
