use std::process;

use clap::Parser;
use itertools::Itertools;
use log::{error, info, LevelFilter};
use rslbench_gen::{
    args::SweepArgs,
    config::SweepConfig,
    error::{GenError, Result},
    sweep::ConfigSweep,
};
use simple_logger::SimpleLogger;

fn load_sweep(args: &SweepArgs) -> Result<SweepConfig> {
    match &args.config {
        Some(path) => SweepConfig::load(path),
        None => SweepConfig::get_all_configs()
            .remove(&args.preset)
            .ok_or_else(|| GenError::InvalidConfig(format!("no preset named '{}'", args.preset))),
    }
}

fn run(args: SweepArgs) -> Result<()> {
    if args.list {
        println!(
            "SweepConfig: {}",
            SweepConfig::get_all_configs().keys().sorted().join(",")
        );
        return Ok(());
    }

    let sweep = ConfigSweep::new(load_sweep(&args)?)?;
    let written = sweep.run(&args.base_dir, &args.out_dir)?;
    info!(
        "generated {} configs for sweep '{}'",
        written.len(),
        sweep.config.name
    );

    Ok(())
}

fn main() {
    let args = SweepArgs::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init().unwrap();

    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}
