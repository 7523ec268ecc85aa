//! CLI 模块

pub mod list;
pub mod web;

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(version)]
#[command(about = "Task list manager: HTTP+JSON API over a flat JSON file")]
pub struct Cli {
    /// Config file (defaults to ~/.tasklist/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (API + optional static frontend)
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<IpAddr>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Task document path (overrides TASKS_FILE and config)
        #[arg(long)]
        data_file: Option<PathBuf>,
        /// Directory of static frontend files
        #[arg(long)]
        static_dir: Option<PathBuf>,
        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
    /// Print tasks as JSON
    List {
        /// all | active | completed
        #[arg(short, long, default_value = "all")]
        filter: String,
        /// Task document path (overrides TASKS_FILE and config)
        #[arg(long)]
        data_file: Option<PathBuf>,
    },
}

impl Commands {
    /// 无子命令时的默认行为
    pub fn default_serve() -> Self {
        Commands::Serve {
            host: None,
            port: None,
            data_file: None,
            static_dir: None,
            no_open: false,
        }
    }
}
