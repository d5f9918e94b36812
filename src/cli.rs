//! Command-line interface implementation for srvgen.
//! Provides argument parsing and help text formatting using clap.

use crate::config::SerializationMode;
use clap::{error::ErrorKind, ArgAction, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for srvgen.
///
/// Boolean middleware and step switches take an explicit value
/// (`--use-tracer false`); leaving one out falls back to the options
/// manifest and then to the built-in default.
#[derive(Parser, Debug)]
#[command(author, version, about = "srvgen: networked service scaffolding tool", long_about = None)]
pub struct Args {
    /// Directory under which the generated service tree will be created.
    /// The service lands in a subfolder named after the service
    #[arg(value_name = "OUT_DIR")]
    pub out_dir: PathBuf,

    /// Service path (e.g. github.com/foo/foo-srv); the last segment names
    /// the service
    #[arg(long, value_name = "PATH")]
    pub service_path: String,

    /// Template root directory
    #[arg(long, value_name = "DIR", default_value = "templates")]
    pub templates: PathBuf,

    /// Service description
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Service endpoint name; may be repeated. If omitted the service name
    /// will be used
    #[arg(long = "endpoint", value_name = "NAME")]
    pub endpoints: Vec<String>,

    /// The message serialization to use
    #[arg(long, value_enum, value_name = "MODE")]
    pub mode: Option<SerializationMode>,

    /// Register the service for discovery
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub use_discovery: Option<bool>,

    /// Use the request throttle middleware
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub use_throttle: Option<bool>,

    /// Max concurrent service requests
    #[arg(long, value_name = "N")]
    pub throttle_max_concurrent: Option<u32>,

    /// Max execution time for a request in ms. No limit if set to 0
    #[arg(long, value_name = "MS")]
    pub throttle_max_exec_time: Option<u32>,

    /// Use the request tracing middleware
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub use_tracer: Option<bool>,

    /// Max concurrent trace messages in queue
    #[arg(long, value_name = "N")]
    pub tracer_queue_size: Option<u32>,

    /// Trace entry TTL in seconds. TTL will be disabled if set to 0
    #[arg(long, value_name = "SECS")]
    pub tracer_entry_ttl: Option<u32>,

    /// Run the source formatter over the generated tree
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub format: Option<bool>,

    /// Generate message bindings from the schema file (schema mode only)
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub bindings: Option<bool>,

    /// Initialize a git repo at the output folder
    #[arg(long, value_name = "BOOL", action = ArgAction::Set)]
    pub init_repo: Option<bool>,

    /// Path to an options manifest, overriding the template-root lookup
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overwrite files in the output folder without asking if the folder
    /// already exists
    #[arg(long)]
    pub overwrite: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
