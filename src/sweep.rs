use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use log::{debug, info};

use crate::config::{AlgorithmSpec, SweepAxis, SweepConfig};
use crate::error::{GenError, Result};

/// one value picked per sweep axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination<'a> {
    pub choices: Vec<(&'a SweepAxis, &'a str)>,
}

impl<'a> Combination<'a> {
    pub fn value_of(&self, axis_name: &str) -> Option<&'a str> {
        self.choices
            .iter()
            .find(|(axis, _)| axis.name == axis_name)
            .map(|(_, value)| *value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfig {
    pub file_name: String,
    pub run_name: String,
    pub contents: String,
}

/// Cartesian product of all axis values, first axis outermost.
pub fn combinations(axes: &[SweepAxis]) -> Vec<Combination<'_>> {
    if axes.is_empty() {
        return vec![Combination { choices: vec![] }];
    }

    axes.iter()
        .map(|axis| axis.values.iter().map(move |value| (axis, value.as_str())))
        .multi_cartesian_product()
        .map(|choices| Combination { choices })
        .collect()
}

/// `{label}-{algorithm}-{tag}{value}...`
pub fn run_name(config: &SweepConfig, primary: &AlgorithmSpec, combination: &Combination) -> String {
    let mut parts = vec![config.label.clone(), primary.short_name().to_string()];
    parts.extend(
        combination
            .choices
            .iter()
            .map(|(axis, value)| format!("{}{}", axis.tag, value)),
    );

    parts.join("-")
}

pub fn file_name(config: &SweepConfig, primary: &AlgorithmSpec, combination: &Combination) -> String {
    format!("{}-{}.cfg", config.map, run_name(config, primary, combination))
}

pub fn is_excluded(config: &SweepConfig, algorithm: &AlgorithmSpec, combination: &Combination) -> bool {
    config.exclusions.iter().any(|exclusion| {
        exclusion.algorithm == algorithm.class
            && combination.value_of(&exclusion.axis) == Some(exclusion.value.as_str())
    })
}

/// The block appended to the base config for one primary solver.
pub fn render_settings(
    config: &SweepConfig,
    primary: &AlgorithmSpec,
    combination: &Combination,
) -> Result<String> {
    let mut out = String::from("\n");

    for (axis, value) in combination.choices.iter() {
        if let Some(comment) = &axis.comment {
            let _ = writeln!(out, "# {}", comment);
        }
        let _ = writeln!(out, "{}: {}", axis.key, axis.transformed(value)?);
        out.push('\n');
    }

    let _ = writeln!(out, "solver.class: {}", primary.class);
    let _ = writeln!(out, "solver.time: {}", primary.time);

    let competitors = config
        .algorithms
        .iter()
        .filter(|b| *b != primary && !is_excluded(config, b, combination));
    for (i, b) in competitors.enumerate() {
        let _ = writeln!(out, "solver.{}.class: {}", i + 1, b.class);
        let _ = writeln!(out, "solver.{}.time: {}", i + 1, b.time);
    }

    // reserved slots do not shift when competitors get excluded
    for (j, b) in config.trailing_fallbacks.iter().enumerate() {
        let index = config.algorithms.len() + j;
        let _ = writeln!(out, "solver.{}.class: {}", index, b.class);
        let _ = writeln!(out, "solver.{}.time: {}", index, b.time);
    }

    Ok(out)
}

pub struct ConfigSweep {
    pub config: SweepConfig,
}

impl ConfigSweep {
    pub fn new(config: SweepConfig) -> Result<ConfigSweep> {
        config.validate()?;

        // every planned file must get its own name, otherwise run() drops variants
        let mut names = HashSet::new();
        for combination in combinations(&config.axes) {
            for primary in config.algorithms.iter() {
                if is_excluded(&config, primary, &combination) {
                    continue;
                }
                let name = file_name(&config, primary, &combination);
                if !names.insert(name.clone()) {
                    return Err(GenError::InvalidConfig(format!(
                        "sweep would write {} more than once",
                        name
                    )));
                }
            }
        }

        Ok(ConfigSweep { config })
    }

    pub fn base_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(format!("{}-base.cfg", self.config.map))
    }

    /// every file of the sweep, in generation order
    pub fn plan(&self, base: &str) -> Result<Vec<GeneratedConfig>> {
        let config = &self.config;
        let mut generated = Vec::new();

        for combination in combinations(&config.axes) {
            for primary in config.algorithms.iter() {
                if is_excluded(config, primary, &combination) {
                    debug!(
                        "skipping {} for {}",
                        primary.short_name(),
                        run_name(config, primary, &combination)
                    );
                    continue;
                }

                let mut contents = base.to_string();
                contents.push_str(&render_settings(config, primary, &combination)?);

                generated.push(GeneratedConfig {
                    file_name: file_name(config, primary, &combination),
                    run_name: run_name(config, primary, &combination),
                    contents,
                });
            }
        }

        Ok(generated)
    }

    /// Writes the whole sweep into `out_dir`, existing files get overwritten.
    /// Stops at the first failed write.
    pub fn run(&self, base_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let base_path = self.base_path(base_dir);
        let base = fs::read_to_string(&base_path).map_err(|source| GenError::MissingInputFile {
            path: base_path.clone(),
            source,
        })?;
        debug!("using base config {}", base_path.display());

        let mut written = Vec::new();
        for generated in self.plan(&base)? {
            let path = out_dir.join(&generated.file_name);
            info!("{}", generated.run_name);

            fs::write(&path, generated.contents.as_bytes())
                .map_err(|source| GenError::WriteFailure {
                    path: path.clone(),
                    source,
                })?;
            written.push(path);
        }

        Ok(written)
    }
}
