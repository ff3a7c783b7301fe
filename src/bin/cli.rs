//! deo CLI
//!
//! Runs store commands against a local root and prints the JSON response
//! envelope, the same one an HTTP transport would send.

use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{Args as ClapArgs, Parser, Subcommand};
use deodb::protocol::{self, Command, Response};
use deodb::{Config, DeoError, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// deo CLI
#[derive(Parser, Debug)]
#[command(name = "deo")]
#[command(about = "Minimal file-backed document store")]
#[command(version)]
struct Args {
    /// Storage root (default: ~/.deo)
    #[arg(short, long, env = "DEO_ROOT")]
    root: Option<PathBuf>,

    /// Log store activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage databases
    #[command(subcommand)]
    Db(DbCommand),

    /// Manage collections
    #[command(subcommand)]
    Collection(CollectionCommand),

    /// Manage documents
    #[command(subcommand)]
    Doc(DocCommand),
}

#[derive(Subcommand, Debug)]
enum DbCommand {
    /// List databases
    List,
    /// Create a database
    Create { name: String },
    /// Delete a database and everything in it
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum CollectionCommand {
    /// List collections of a database
    List { db: String },
    /// Create a collection
    Create { db: String, name: String },
    /// Delete a collection and all of its documents
    Delete { db: String, name: String },
}

#[derive(Subcommand, Debug)]
enum DocCommand {
    /// Create a document from JSON ("-" reads stdin); the id is generated
    Create {
        db: String,
        collection: String,
        json: String,
    },
    /// Read a document
    Get {
        db: String,
        collection: String,
        id: String,
    },
    /// Replace a document with JSON ("-" reads stdin)
    Update {
        db: String,
        collection: String,
        id: String,
        json: String,
    },
    /// Delete a document
    Delete {
        db: String,
        collection: String,
        id: String,
    },
    /// List documents
    List(ListArgs),
    /// Print the file path of a document
    Path {
        db: String,
        collection: String,
        id: String,
    },
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    db: String,
    collection: String,

    /// Equality filter (e.g. --filter status=paid), repeatable
    #[arg(long = "filter", value_parser = parse_key_value)]
    filters: Vec<(String, String)>,

    /// Field to sort by
    #[arg(long)]
    sort_by: Option<String>,

    /// Sort order: asc or desc
    #[arg(long, default_value = "asc")]
    order: String,

    /// Maximum number of documents
    #[arg(long)]
    limit: Option<usize>,

    /// Number of documents to skip
    #[arg(long)]
    offset: Option<usize>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "info,deodb=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.root {
        Some(root) => Ok(Config::builder().root_dir(root).build()),
        None => Config::from_home(),
    };

    let store = match config.and_then(Store::open) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    tracing::debug!("deo v{} rooted at {}", deodb::VERSION, store.root().display());

    let response = match build_command(&store, args.command) {
        Ok(Some(command)) => store.execute(command),
        Ok(None) => return,
        Err(e) => Response::from_error(&e, "Invalid command"),
    };

    let pretty = serde_json::to_string_pretty(&response.to_json())
        .unwrap_or_else(|_| String::from_utf8_lossy(&response.to_bytes()).into_owned());
    println!("{}", pretty);

    if !response.status.is_success() {
        process::exit(1);
    }
}

/// Translate CLI arguments into a store command
///
/// `doc path` is answered directly and yields `None`.
fn build_command(store: &Store, command: Commands) -> Result<Option<Command>, DeoError> {
    let command = match command {
        Commands::Db(DbCommand::List) => Command::ListDatabases,
        Commands::Db(DbCommand::Create { name }) => Command::CreateDatabase { name },
        Commands::Db(DbCommand::Delete { name }) => Command::DeleteDatabase { name },

        Commands::Collection(CollectionCommand::List { db }) => {
            Command::ListCollections { database: db }
        }
        Commands::Collection(CollectionCommand::Create { db, name }) => {
            Command::CreateCollection { database: db, name }
        }
        Commands::Collection(CollectionCommand::Delete { db, name }) => {
            Command::DeleteCollection { database: db, name }
        }

        Commands::Doc(DocCommand::Create {
            db,
            collection,
            json,
        }) => Command::CreateDocument {
            database: db,
            collection,
            content: protocol::decode_document_body(&read_json_arg(&json)?)?,
        },
        Commands::Doc(DocCommand::Get { db, collection, id }) => Command::ReadDocument {
            database: db,
            collection,
            id,
        },
        Commands::Doc(DocCommand::Update {
            db,
            collection,
            id,
            json,
        }) => Command::UpdateDocument {
            database: db,
            collection,
            id,
            content: protocol::decode_document_body(&read_json_arg(&json)?)?,
        },
        Commands::Doc(DocCommand::Delete { db, collection, id }) => Command::DeleteDocument {
            database: db,
            collection,
            id,
        },
        Commands::Doc(DocCommand::List(list)) => {
            let mut params: Vec<(String, String)> = list
                .filters
                .into_iter()
                .map(|(field, value)| (format!("filter[{}]", field), value))
                .collect();
            if let Some(sort_by) = list.sort_by {
                params.push(("sort_by".to_string(), sort_by));
                params.push(("order".to_string(), list.order));
            }
            if let Some(limit) = list.limit {
                params.push(("limit".to_string(), limit.to_string()));
            }
            if let Some(offset) = list.offset {
                params.push(("offset".to_string(), offset.to_string()));
            }

            Command::ListDocuments {
                database: list.db,
                collection: list.collection,
                options: protocol::decode_list_query(params),
            }
        }
        Commands::Doc(DocCommand::Path { db, collection, id }) => {
            let path = store.document_path(&db, &collection, &id)?;
            println!("{}", path.display());
            return Ok(None);
        }
    };

    Ok(Some(command))
}

/// The JSON argument itself, or stdin when it is "-"
fn read_json_arg(arg: &str) -> Result<Vec<u8>, DeoError> {
    if arg == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

/// Parse "key=value"
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    Ok((key.to_string(), value.to_string()))
}
