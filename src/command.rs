//! Command definitions
//!
//! A small line-oriented command language for driving a table of string
//! values from the CLI.
//!
//! ### Commands
//! - `SET <key> <value...>` - store a value (the rest of the line)
//! - `GET <key>`            - fetch a value and its creation stamp
//! - `DEL <key>`            - remove a key
//! - `STATS`                - len, capacity, load and clock
//! - `COMPACT`              - restamp live entries
//! - `PING`                 - health check
//!
//! Verbs are case-insensitive; keys are whitespace-free.

use std::fmt;

use crate::cachetable::CacheTable;
use crate::error::{CacheTableError, Result};

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Get a value by key
    Get { key: String },

    /// Set a key-value pair
    Set { key: String, value: String },

    /// Delete a key
    Delete { key: String },

    /// Table statistics
    Stats,

    /// Force timestamp compaction
    Compact,

    /// Ping (health check)
    Ping,
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Ok,
    Value { value: String, created_at: u64 },
    NotFound,
    Deleted(String),
    Stats {
        len: usize,
        capacity: usize,
        load: f64,
        clock: u64,
    },
    Pong,
}

impl Command {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_uppercase().as_str() {
            "GET" => Ok(Command::Get {
                key: single_key(verb, rest)?,
            }),
            "DEL" | "DELETE" => Ok(Command::Delete {
                key: single_key(verb, rest)?,
            }),
            "SET" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| CacheTableError::Command("usage: SET <key> <value>".into()))?;
                Ok(Command::Set {
                    key: key.to_string(),
                    value: value.trim_start().to_string(),
                })
            }
            "STATS" => no_args(verb, rest, Command::Stats),
            "COMPACT" => no_args(verb, rest, Command::Compact),
            "PING" => no_args(verb, rest, Command::Ping),
            "" => Err(CacheTableError::Command("empty command".into())),
            other => Err(CacheTableError::Command(format!("unknown command: {}", other))),
        }
    }

    /// Run the command against `table`
    pub fn execute(self, table: &mut CacheTable<String>) -> Reply {
        match self {
            Command::Get { key } => match table.get(&key) {
                Some(entry) => Reply::Value {
                    value: entry.value().clone(),
                    created_at: entry.created_at(),
                },
                None => Reply::NotFound,
            },
            Command::Set { key, value } => {
                table.set(&key, value);
                Reply::Ok
            }
            Command::Delete { key } => match table.delete(&key) {
                Some(entry) => Reply::Deleted(entry.into_value()),
                None => Reply::NotFound,
            },
            Command::Stats => Reply::Stats {
                len: table.len(),
                capacity: table.capacity(),
                load: table.load(),
                clock: table.clock(),
            },
            Command::Compact => {
                table.compact();
                Reply::Ok
            }
            Command::Ping => Reply::Pong,
        }
    }
}

fn single_key(verb: &str, rest: &str) -> Result<String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(key.to_string()),
        _ => Err(CacheTableError::Command(format!(
            "usage: {} <key>",
            verb.to_ascii_uppercase()
        ))),
    }
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CacheTableError::Command(format!(
            "{} takes no arguments",
            verb.to_ascii_uppercase()
        )))
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ok => write!(f, "OK"),
            Reply::Value { value, created_at } => write!(f, "{} (created at {})", value, created_at),
            Reply::NotFound => write!(f, "(not found)"),
            Reply::Deleted(value) => write!(f, "deleted {}", value),
            Reply::Stats {
                len,
                capacity,
                load,
                clock,
            } => write!(
                f,
                "len={} capacity={} load={:.4} clock={}",
                len, capacity, load, clock
            ),
            Reply::Pong => write!(f, "PONG"),
        }
    }
}
