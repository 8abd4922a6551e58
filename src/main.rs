// src/main.rs

use anyhow::Result;
use clap::Parser;
use logview::cli::{Cli, Commands, ShowArgs};
use logview::config::ConfigBuilder;
use logview::output::{run_show, ShowRequest};
use std::io::{self, BufWriter};

#[cfg(feature = "web")]
use logview::{cli::ServeArgs, web};

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "logview=debug".parse().unwrap()
                } else {
                    "logview=info".parse().unwrap()
                },
            ),
        )
        .init();

    log::info!("Starting logview v{}...", env!("CARGO_PKG_VERSION"));
    log::debug!("Raw arguments: {:?}", std::env::args().collect::<Vec<_>>());

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show(args) => show(args),
        #[cfg(feature = "web")]
        Commands::Serve(args) => serve(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn show(args: ShowArgs) -> Result<()> {
    let config = ConfigBuilder::from_viewer_args(&args.viewer).build()?;
    log::debug!("Configuration built successfully.");

    let request = ShowRequest {
        path: args.path,
        page: args.page.map(|p| usize::try_from(p).unwrap_or(usize::MAX)),
        level: args.level,
        search: args.search,
        json: args.json,
    };
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    run_show(&config, &request, &mut writer)?;
    Ok(())
}

#[cfg(feature = "web")]
fn serve(args: ServeArgs) -> Result<()> {
    let config = ConfigBuilder::from_viewer_args(&args.viewer).build()?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(web::start_server(config, args.port, !args.no_open))
}
