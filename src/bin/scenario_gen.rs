use std::io::{self, Write};
use std::process;

use clap::Parser;
use log::{debug, error, LevelFilter};
use rslbench_gen::{
    args::ScenarioArgs,
    error::Result,
    locations::LocationQuery,
    random::{Random, Seed},
    scenario::ScenarioAssignment,
};
use simple_logger::SimpleLogger;

fn run(args: ScenarioArgs) -> Result<()> {
    let query = LocationQuery {
        map: args.map.clone(),
        map_file: args.map_file,
        maps_dir: args.maps_dir,
        prefer_file: args.prefer_file,
        marker: args.marker,
    };
    let pool = query.resolve()?;

    let seed = match &args.seed {
        Some(seed) => Seed::parse(seed),
        None => Seed::random(),
    };
    debug!("map={} pool={} seed={:?}", args.map, pool.locations.len(), seed);

    let mut rnd = Random::new(seed);
    let assignment = ScenarioAssignment::sample(&pool.locations, args.fires, args.agents, &mut rnd)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    assignment.write_xml(&mut out)?;
    out.flush()?;

    Ok(())
}

fn main() {
    let args = ScenarioArgs::parse();

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
