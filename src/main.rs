// src/main.rs

use slurm_monitor::config::{load_optional, MonitorSettings};
use slurm_monitor::{cli, logging, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run_main().await {
        eprintln!("slurm-monitor error: {err:?}");
        std::process::exit(1);
    }
}

async fn run_main() -> anyhow::Result<()> {
    let args = cli::parse();

    let target = logging::log_target(args.once, args.log_file.as_deref());
    logging::init_logging(args.log_level, &target)?;

    let file = load_optional(args.config.as_deref())?;
    let settings = MonitorSettings::resolve(&args, file)?;
    run(settings).await
}
