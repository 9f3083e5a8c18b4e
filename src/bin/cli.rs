//! cachetable CLI
//!
//! Drives a table of string values from stdin, or runs the bundled demo.

use std::io::{self, BufRead, Write};
use std::process;

use cachetable::command::Command;
use cachetable::{CacheTable, Result, TableConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// cachetable CLI
#[derive(Parser, Debug)]
#[command(name = "cachetable-cli")]
#[command(about = "Fixed-capacity hash table with oldest-entry eviction")]
#[command(version)]
struct Args {
    /// Number of buckets
    #[arg(short, long, default_value = "100")]
    buckets: usize,

    /// Entries per bucket before the oldest is evicted
    #[arg(short = 'c', long, default_value = "20")]
    bucket_capacity: usize,

    /// Grow bucket storage on first insert instead of up front
    #[arg(long)]
    no_preallocate: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read commands from stdin, one per line (default)
    Repl,

    /// Insert, read back, delete and rewrite a handful of keys
    Demo,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,cachetable=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = TableConfig::builder()
        .bucket_count(args.buckets)
        .bucket_capacity(args.bucket_capacity)
        .preallocate(!args.no_preallocate)
        .build();

    let table = match CacheTable::with_config(&config) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Failed to create table: {}", e);
            process::exit(1);
        }
    };

    tracing::info!(
        "cachetable v{} ({} buckets x {} slots)",
        cachetable::VERSION,
        config.bucket_count,
        config.bucket_capacity
    );

    let outcome = match args.command.unwrap_or(Commands::Repl) {
        Commands::Repl => repl(table),
        Commands::Demo => demo(table),
    };

    if let Err(e) = outcome {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn repl(mut table: CacheTable<String>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(command) => writeln!(stdout, "{}", command.execute(&mut table))?,
            Err(e) => writeln!(stdout, "ERR {}", e)?,
        }
        stdout.flush()?;
    }

    Ok(())
}

fn demo(mut table: CacheTable<String>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let keys = ["alpha", "beta", "charlie", "gamma", "delta"];

    for key in keys {
        table.set(key, key.len().to_string());
    }

    writeln!(stdout, "The load factor is: {}", table.load())?;

    for key in keys {
        match table.get(key) {
            Some(entry) => writeln!(stdout, "Key: {} -> Value: {}", key, entry.value())?,
            None => writeln!(stdout, "{} is not present", key)?,
        }
    }

    if let Some(entry) = table.delete("alpha") {
        writeln!(stdout, "{} deleted", entry.value())?;
    }
    match table.get("alpha") {
        Some(entry) => writeln!(stdout, "alpha -> {}", entry.value())?,
        None => writeln!(stdout, "alpha is not present")?,
    }

    for key in keys {
        table.set(key, (key.len() * 10).to_string());
        match table.get(key) {
            Some(entry) => writeln!(stdout, "Key: {} -> Value: {}", key, entry.value())?,
            None => writeln!(stdout, "{} is not present", key)?,
        }
    }

    Ok(())
}
