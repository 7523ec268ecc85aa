mod api;
mod cli;
mod error;
mod operations;
mod storage;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

/// Default log filter when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "tasklist=info,tower_http=info";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> io::Result<()> {
    init_logging();

    // 解析命令行参数
    let cli = Cli::parse();
    let config = storage::config::load_config(cli.config.as_deref());

    // 无子命令：默认启动 Web 服务
    let command = cli.command.unwrap_or_else(Commands::default_serve);

    match command {
        Commands::Serve {
            host,
            port,
            data_file,
            static_dir,
            no_open,
        } => {
            let opts = cli::web::ServeOptions {
                host,
                port,
                data_file,
                static_dir,
                no_open,
            };
            tokio::runtime::Runtime::new()?.block_on(cli::web::execute(opts, &config))?;
        }
        Commands::List { filter, data_file } => {
            if let Err(e) = cli::list::execute(&filter, data_file, &config) {
                eprintln!("Failed to list tasks: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
