use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use heap_merkle_bench::{cli::BenchCli, driver};
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = try_main() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = BenchCli::parse();
    info!("arguments: {}", serde_json::to_string(&args)?);
    let config = args.config()?;

    let report = driver::run(&config)?;
    let json = serde_json::to_string(&report)?;
    println!("{}", json);

    if let Some(path) = &args.output {
        fs::write(path, format!("{}\n", json))
            .with_context(|| format!("writing report to {}", path))?;
        info!("report written to {}", path);
    }
    Ok(())
}
