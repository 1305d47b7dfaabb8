use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use mdrecall::config::Settings;
use mdrecall::documents::{ChunkRecord, TextChunker, assemble, read_directory};
use mdrecall::retrieve::{ChunkStore, retrieve_sections};
use mdrecall::semantic::{VectorIndex, embedding_model_from_name};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mdrecall")]
#[command(about = "Section-aware semantic retrieval for markdown document collections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Ingest a directory of markdown files and answer queries interactively
    Run {
        /// Directory containing the markdown files
        path: PathBuf,

        /// Number of top chunks to retrieve per query (overrides config)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Print every chunk record produced from a directory as JSON
    Chunks {
        /// Directory containing the markdown files
        path: PathBuf,
    },

    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().map_err(|e| anyhow!("failed to load configuration: {e}"))?;
    mdrecall::logging::init_with_config(&settings.logging);
    settings
        .chunking
        .validate()
        .map_err(|e| anyhow!("invalid chunking configuration: {e}"))?;

    match cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(force)
                .map_err(|e| anyhow!("failed to initialize configuration: {e}"))?;
            println!("Created {}", path.display());
        }

        Commands::Run { path, k } => {
            let k = k.unwrap_or(settings.search.k);
            let records = ingest(&path, &settings)?;
            println!("Building vector index over {} chunks...", records.len());

            let model = embedding_model_from_name(&settings.semantic.model)?;
            let index = VectorIndex::build(&records, model)?;
            let store = ChunkStore::new(records);

            query_loop(&index, &store, k)?;
        }

        Commands::Chunks { path } => {
            let records = ingest(&path, &settings)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }

        Commands::Config => {
            println!("{}", toml::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

/// Read a directory of markdown files and assemble chunk records.
fn ingest(path: &Path, settings: &Settings) -> Result<Vec<ChunkRecord>> {
    let documents = read_directory(path)
        .with_context(|| format!("could not read documents from {}", path.display()))?;
    let chunker = TextChunker::new(&settings.chunking);
    let records = assemble(&documents, &chunker)?;
    Ok(records)
}

/// Interactive query loop: one reconstructed-sections JSON document per
/// query, until `exit` or EOF.
fn query_loop(index: &VectorIndex, store: &ChunkStore, k: usize) -> Result<()> {
    println!("Ask questions about the documents. Type 'exit' to quit.");

    let stdin = std::io::stdin();
    loop {
        print!("query> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            break;
        }

        let sections = retrieve_sections(index, store, query, k)?;
        if sections.is_empty() {
            println!("No relevant sections found.");
        } else {
            println!("{}", serde_json::to_string_pretty(&sections)?);
        }
    }

    Ok(())
}
