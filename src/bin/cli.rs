//! collectd CLI Client
//!
//! Command-line interface for talking to a running collectd daemon.

use std::path::PathBuf;
use std::process;
use std::time::{Duration, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use collectd_client::config::DEFAULT_SOCKET_PATH;
use collectd_client::protocol::format_timestamp;
use collectd_client::{ClientConfig, CollectdError, Connection, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// collectd CLI
#[derive(Parser, Debug)]
#[command(name = "collectd-cli")]
#[command(about = "Control a running collectd daemon over its unix socket")]
#[command(version)]
struct Args {
    /// Path of the daemon's unix socket
    #[arg(short, long, default_value = DEFAULT_SOCKET_PATH)]
    socket: PathBuf,

    /// Read/write timeout in milliseconds (0 waits forever)
    #[arg(long, default_value_t = 0)]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current values of an identifier
    Getval {
        /// host/plugin-instance/type-instance
        identifier: String,
    },

    /// Submit values for an identifier
    Putval {
        /// host/plugin-instance/type-instance
        identifier: String,

        /// Values in data source order; `U` marks an undefined value
        #[arg(required = true, allow_negative_numbers = true, value_parser = parse_value)]
        values: Vec<Value>,

        /// Unix timestamp of the values (defaults to the daemon's clock)
        #[arg(short, long)]
        time: Option<u64>,

        /// Extra option as key=value, e.g. interval=10
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },

    /// Submit a notification
    Putnotif {
        /// Notification text
        message: String,

        /// Notification field as key=value, e.g. severity=warning
        #[arg(short = 'o', long = "option", value_parser = parse_option)]
        options: Vec<(String, String)>,
    },

    /// List every identifier with its last update time
    Listval,

    /// Flush cached values
    Flush {
        /// Only flush data older than this many seconds (-1 for all)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        timeout: i32,

        /// Limit the flush to a plugin (repeatable)
        #[arg(short, long)]
        plugin: Vec<String>,

        /// Limit the flush to an identifier (repeatable)
        #[arg(short, long)]
        identifier: Vec<String>,
    },

    /// Send a raw command line and print the reply lines
    Raw {
        /// Command words, joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
}

fn parse_value(raw: &str) -> Result<Value, String> {
    if raw == "U" {
        return Ok(Value::Undefined);
    }
    raw.parse::<f64>()
        .map(Value::Number)
        .map_err(|e| format!("invalid value {:?}: {}", raw, e))
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

fn run(args: Args) -> Result<(), CollectdError> {
    let config = ClientConfig::builder()
        .socket_path(&args.socket)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let conn = Connection::open(&config)?;

    match args.command {
        Commands::Getval { identifier } => {
            let mut values: Vec<_> = conn.get_value(&identifier)?.into_iter().collect();
            values.sort_by(|a, b| a.0.cmp(&b.0));
            for (name, value) in values {
                println!("{}={}", name, value);
            }
        }
        Commands::Putval {
            identifier,
            values,
            time,
            options,
        } => {
            let time = time.map(|secs| UNIX_EPOCH + Duration::from_secs(secs));
            conn.put_value(&identifier, options, time, values)?;
        }
        Commands::Putnotif { message, options } => {
            conn.put_notification(options, &message)?;
        }
        Commands::Listval => {
            let mut listing: Vec<_> = conn.list_values()?.into_iter().collect();
            listing.sort_by(|a, b| a.0.cmp(&b.0));
            for (identifier, time) in listing {
                println!("{} {}", format_timestamp(time), identifier);
            }
        }
        Commands::Flush {
            timeout,
            plugin,
            identifier,
        } => {
            conn.flush(timeout, plugin, identifier)?;
        }
        Commands::Raw { line } => {
            for reply in conn.send(&line.join(" "))? {
                println!("{}", reply);
            }
        }
    }

    conn.close()
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,collectd_client=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("collectd-cli v{}", collectd_client::VERSION);

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
