//! Hot Rod CLI Client
//!
//! Command-line interface for a single cache on a Hot Rod server.
//! Keys and values are strings.

use clap::{Parser, Subcommand};
use hotrod::{ClientConfig, RemoteCache, Result, Version};
use tracing_subscriber::{fmt, EnvFilter};

/// Hot Rod CLI
#[derive(Parser, Debug)]
#[command(name = "hotrod-cli")]
#[command(about = "CLI for Hot Rod cache servers")]
#[command(version)]
struct Args {
    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "11222")]
    port: u16,

    /// Cache name (empty for the default cache)
    #[arg(short, long, default_value = "")]
    cache: String,

    /// Connect/read/write timeout in milliseconds (0 = none)
    #[arg(short, long, default_value = "0")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ping the server
    Ping,

    /// Remove every entry
    Clear,

    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Store a key-value pair
    Put {
        key: String,
        value: String,
    },

    /// Store a key-value pair if the key is absent
    PutIfAbsent {
        key: String,
        value: String,
    },

    /// Get a value and its version
    Versioned {
        key: String,
    },

    /// Check whether a key exists
    Contains {
        key: String,
    },

    /// Remove a key
    Remove {
        key: String,
    },

    /// Remove a key if its version matches
    RemoveIf {
        key: String,

        /// Version as 16 hex digits (see `versioned`)
        #[arg(value_name = "VERSION")]
        token: Version,
    },

    /// Replace the value of an existing key
    Replace {
        key: String,
        value: String,
    },

    /// Replace a value if its version matches
    ReplaceIf {
        key: String,

        /// Version as 16 hex digits (see `versioned`)
        #[arg(value_name = "VERSION")]
        token: Version,

        value: String,
    },

    /// Fetch a batch of entries
    Bulk {
        /// Number of entries (0 = server default)
        #[arg(short, long, default_value = "0")]
        count: u32,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("Command failed: {}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = ClientConfig::builder()
        .host(&args.host)
        .port(args.port)
        .cache_name(&args.cache)
        .connect_timeout_ms(args.timeout_ms)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build()?;

    tracing::debug!("hotrod-cli v{} -> {}", hotrod::VERSION, config.address());
    let cache = RemoteCache::with_config(config);

    match args.command {
        Commands::Ping => print_status(cache.ping()?),
        Commands::Clear => print_status(cache.clear()?),
        Commands::Get { key } => match cache.get::<str, String>(&key)? {
            Some(value) => println!("{}", value),
            None => println!("(nil)"),
        },
        Commands::Put { key, value } => print_status(cache.put(key.as_str(), value.as_str())?),
        Commands::PutIfAbsent { key, value } => {
            print_status(cache.put_if_absent(key.as_str(), value.as_str())?)
        }
        Commands::Versioned { key } => {
            let versioned = cache.get_versioned::<str, String>(&key)?;
            match versioned.value {
                Some(value) => println!("{} {}", versioned.version, value),
                None => println!("{} (nil)", versioned.version),
            }
        }
        Commands::Contains { key } => print_status(cache.contains_key(key.as_str())?),
        Commands::Remove { key } => print_status(cache.remove(key.as_str())?),
        Commands::RemoveIf { key, token } => {
            print_status(cache.remove_if_unmodified(key.as_str(), token)?)
        }
        Commands::Replace { key, value } => {
            print_status(cache.replace(key.as_str(), value.as_str())?)
        }
        Commands::ReplaceIf { key, token, value } => {
            print_status(cache.replace_if_unmodified(key.as_str(), token, value.as_str())?)
        }
        Commands::Bulk { count } => {
            let mut entries: Vec<(String, String)> = cache.get_bulk(count)?.into_iter().collect();
            entries.sort();
            for (key, value) in entries {
                println!("{} = {}", key, value);
            }
        }
    }

    Ok(())
}

fn print_status(success: bool) {
    println!("{}", if success { "OK" } else { "FAILED" });
}
