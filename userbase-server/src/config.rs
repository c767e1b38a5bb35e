//! Process configuration.
//!
//! Every setting can be given as a flag or through the environment
//! (`HOST`, `PORT`, `DB_URL`, `CORS`). All four are required.

use crate::cors::CorsPolicy;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "userbase-server")]
#[command(about = "Userbase record service")]
pub struct Config {
    /// Address to bind: an IP address or `localhost`
    #[arg(long, env = "HOST", value_parser = parse_host)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: u16,

    /// SQLite database path (`sqlite://` prefix optional), or `:memory:`
    #[arg(long, env = "DB_URL")]
    pub db_url: String,

    /// Space-separated allowed origins, or `*` for any
    #[arg(long, env = "CORS")]
    pub cors: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where the user table lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    InMemory,
    File(PathBuf),
}

impl Config {
    pub fn database(&self) -> Database {
        let location = self.db_url.strip_prefix("sqlite://").unwrap_or(&self.db_url);
        if location == ":memory:" {
            Database::InMemory
        } else {
            Database::File(PathBuf::from(location))
        }
    }

    pub fn cors_policy(&self) -> CorsPolicy {
        CorsPolicy::parse(&self.cors)
    }
}

fn parse_host(s: &str) -> Result<String, String> {
    if s == "localhost" || s.parse::<IpAddr>().is_ok() {
        Ok(s.to_string())
    } else {
        Err("must be a valid IP address or `localhost`".to_string())
    }
}
