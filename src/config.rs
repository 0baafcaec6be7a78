//! Run configuration loaded from a TOML file.
//!
//! A config bundles the four roadmap input files, the output directory
//! and the search parameters, so a whole benchmark run can be described
//! in one place instead of a long argument list.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PlannerError, Result};

/// Top-level run configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct RunConfig {
    pub inputs: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Locations of the roadmap input files.
#[derive(Clone, Debug, Deserialize)]
pub struct InputConfig {
    /// Sampled states, start and goal lines.
    pub samples: PathBuf,
    /// Edge list with costs and labels.
    pub roadmap: PathBuf,
    /// Label -> (obstacle, probability) table.
    pub label_weights: PathBuf,
    /// Optional most-promising-labels hint file.
    #[serde(default)]
    pub most_promising_labels: Option<PathBuf>,
    /// Number of regular samples; nodes beyond this index are goals.
    pub nsamples: usize,
}

/// Where result files are written.
#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

/// Search parameters shared by all solvers.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    /// Number of target-pose hypotheses the roadmap was generated with.
    #[serde(default = "default_n_hypotheses")]
    pub n_hypotheses: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            n_hypotheses: default_n_hypotheses(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("trajectories")
}

fn default_n_hypotheses() -> u32 {
    3
}

impl RunConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.search.n_hypotheses == 0 {
            return Err(PlannerError::Config(
                "search.n_hypotheses must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(text: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_full_config() {
        let (_dir, path) = write_config(
            r#"
            [inputs]
            samples = "samples.txt"
            roadmap = "roadmap.txt"
            label_weights = "labelWeights.txt"
            most_promising_labels = "mostPromisingLabels.txt"
            nsamples = 1000

            [output]
            directory = "out"

            [search]
            n_hypotheses = 4
            "#,
        );

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.inputs.nsamples, 1000);
        assert_eq!(config.inputs.samples, PathBuf::from("samples.txt"));
        assert_eq!(
            config.inputs.most_promising_labels,
            Some(PathBuf::from("mostPromisingLabels.txt"))
        );
        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert_eq!(config.search.n_hypotheses, 4);
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let (_dir, path) = write_config(
            r#"
            [inputs]
            samples = "s.txt"
            roadmap = "r.txt"
            label_weights = "w.txt"
            nsamples = 10
            "#,
        );

        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.inputs.most_promising_labels, None);
        assert_eq!(config.output.directory, PathBuf::from("trajectories"));
        assert_eq!(config.search.n_hypotheses, 3);
    }

    #[test]
    fn test_rejects_zero_hypotheses() {
        let (_dir, path) = write_config(
            r#"
            [inputs]
            samples = "s.txt"
            roadmap = "r.txt"
            label_weights = "w.txt"
            nsamples = 10

            [search]
            n_hypotheses = 0
            "#,
        );

        assert!(RunConfig::load(&path).is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let (_dir, path) = write_config("inputs = nonsense [");
        assert!(RunConfig::load(&path).is_err());
    }
}
