use std::path::{Path, PathBuf};

use base_model::{
    Backend, STAGE,
    logging::{LOGS_DIR, RUNNING_LOG_FILE, install_file_logger},
    run::{run_from_config_file, run_stage},
};
use clap::Parser;

/// Train the base digit classifier and save it under `artifacts/models`.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Run configuration file.
    #[arg(short, long, default_value = "configs/config.yaml")]
    config: PathBuf,

    /// Hyperparameter file; accepted but not read by this stage.
    #[arg(short, long, default_value = "params.yaml")]
    params: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    install_file_logger(&Path::new(LOGS_DIR).join(RUNNING_LOG_FILE))?;
    log::debug!("params file {} accepted", args.params.display());

    let device = <Backend as burn::tensor::backend::Backend>::Device::default();
    run_stage(STAGE, || run_from_config_file::<Backend>(&args.config, &device))?;

    Ok(())
}
