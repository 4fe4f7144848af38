use clap::Parser;
use sisdesk::cli::{Cli, Commands};
use sisdesk::{Config, run};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `init-config` creates the file, so it cannot require one.
    let config = if matches!(cli.command, Some(Commands::InitConfig)) {
        Config::default()
    } else {
        Config::load(cli.config.as_deref())?
    };
    let worker_threads = config.general.worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    let runtime = builder.build()?;
    runtime.block_on(run(cli, config))
}
