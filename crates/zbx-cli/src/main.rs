use clap::Parser;

mod bootstrap;
mod cli;
mod config_warnings;
mod output;
mod pipeline;
mod progress;
mod prompt;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("zbx-audit error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    let config = bootstrap::load_config(&cli.overrides())?;
    config_warnings::warn_misspelled_env(&config);
    tracing::debug!(?config, "configuration resolved");

    let target = prompt::resolve_target(&config.api, &mut prompt::TermPrompter::stderr())?;
    let plan = pipeline::AuditPlan::new(target, &config);
    let summary = pipeline::run(&plan).await?;

    output::output_summary(&summary, flags.format)
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("ZBX_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
