use clap::{Parser, Subcommand};
use posbridge::config::{self, ColumnOverflow};
use posbridge::{ConfigError, Document, Position, PositionError, SourceUri};
use std::path::{Path, PathBuf};

/// Convert between LSP positions (UTF-16 columns) and byte offsets
#[derive(Parser)]
#[command(name = "posbridge")]
#[command(version)]
#[command(about = "Convert between LSP positions (UTF-16 columns) and byte offsets")]
struct Cli {
    /// Settings file (default: $XDG_CONFIG_HOME/posbridge/posbridge.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the byte offset of a 0-based line and UTF-16 character
    Offset {
        file: PathBuf,
        line: i32,
        character: i32,

        /// Clamp a character past the end of its line to the line end
        #[arg(long)]
        clamp: bool,
    },
    /// Print the LSP position of a byte offset as JSON
    Position { file: PathBuf, offset: usize },
    /// Print the byte offset where a 1-based line starts
    LineStart { file: PathBuf, line: usize },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Position(#[from] PositionError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn load_document(path: &Path) -> Result<Document, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(read_error)?;
    let absolute = path.canonicalize().map_err(read_error)?;
    let uri = SourceUri::from_file_path(&absolute)?;
    log::debug!("Loaded {} ({} bytes)", uri, bytes.len());
    Ok(Document::new(uri, bytes))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let settings = config::resolve_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Offset {
            file,
            line,
            character,
            clamp,
        } => {
            let overflow = if clamp {
                ColumnOverflow::ClampToLineEnd
            } else {
                settings.column_overflow
            };
            let document = load_document(&file)?;
            let offset = document.to_offset_with(Position::new(line, character), overflow)?;
            Ok(offset.to_string())
        }
        Commands::Position { file, offset } => {
            let document = load_document(&file)?;
            let position = document.to_position(Some(offset));
            Ok(serde_json::to_string(&position)?)
        }
        Commands::LineStart { file, line } => {
            let document = load_document(&file)?;
            let offset = document
                .line_start(line)
                .ok_or(PositionError::LineNotFound { line })?;
            Ok(offset.to_string())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
