//! Kitgen CLI - Generate a client's document kit from their Drive folder.

use clap::Parser;
use kitgen_cli::commands;
use kitgen_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e.user_message());
        tracing::debug!("{}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> kitgen_cli::Result<()> {
    let path = Config::resolve_path(cli.config.as_deref())?;
    let config = Config::load_from(&path)?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter).await?,
        Command::Scan(args) => commands::execute_scan(args, &config, &formatter).await?,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Config(args) => commands::execute_config(args, &config, &path, &formatter)?,
    }

    Ok(())
}
