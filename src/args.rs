use std::path::PathBuf;

use clap::{crate_version, Parser};

use crate::locations::DEFAULT_MARKER;

#[derive(Parser, Debug)]
#[command(name = "RSLBench Config Sweep")]
#[command(version = crate_version!())]
#[command(about = "Generate parameter sweep variants of a base benchmark config", long_about = None)]
pub struct SweepArgs {
    /// name of an embedded sweep preset
    #[arg(default_value = "kobe")]
    pub preset: String,

    /// load the sweep from a json file instead of a preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// directory holding `{map}-base.cfg`
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// directory the generated configs are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,

    /// print the available presets and exit
    #[arg(short, long)]
    pub list: bool,

    /// debug to console
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(name = "RSLBench Scenario Generator")]
#[command(version = crate_version!())]
#[command(about = "Print a random fire scenario for a map", long_about = None)]
pub struct ScenarioArgs {
    /// map name, selects a static location table or map file
    pub map: String,

    /// number of initial fires
    pub fires: usize,

    /// number of fire brigades
    pub agents: usize,

    /// fixed seed, numbers are used directly and anything else is hashed
    #[arg(short, long)]
    pub seed: Option<String>,

    /// map file to scan for building ids
    #[arg(long)]
    pub map_file: Option<PathBuf>,

    /// directory containing `{map}/map/map.gml`
    #[arg(long, default_value = "maps")]
    pub maps_dir: PathBuf,

    /// always use the map file, even if a static table exists
    #[arg(short, long)]
    pub prefer_file: bool,

    /// substring marking building lines in the map file
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,

    /// debug to console
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
