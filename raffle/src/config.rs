use anyhow::{anyhow, Context, Result};
use raffle_draw::OptOutPolicy;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is not
/// given.
pub const DEFAULT_CONFIG_FILE: &str = "raffle.toml";

/// Main configuration for a raffle run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// CSV file with one item per row
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// CSV file the results are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_input() -> PathBuf {
    PathBuf::from("raffle_data.csv")
}

fn default_output() -> PathBuf {
    PathBuf::from("raffle_results.csv")
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Ask each winner whether they stay in the following draws
    #[serde(default = "default_true")]
    pub opt_out: bool,

    /// Wait for Enter before each reveal
    #[serde(default = "default_true")]
    pub interactive: bool,

    /// Seed for the random generator. Entropy is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            opt_out: true,
            interactive: true,
            seed: None,
        }
    }
}

impl DrawConfig {
    /// Opt-out policy for the sequencer
    pub fn opt_out_policy(&self) -> OptOutPolicy {
        if self.opt_out {
            OptOutPolicy::Ask
        } else {
            OptOutPolicy::Never
        }
    }

    /// Random generator for this run
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Config {
    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Load the config named on the command line, or the default config file
    /// if one exists, or fall back to built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("Config file not found: {}", path.display()));
                }
                Self::load(path)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply command-line overrides on top of the loaded values
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        seed: Option<u64>,
    ) -> Self {
        if let Some(input) = input {
            self.files.input = input;
        }
        if let Some(output) = output {
            self.files.output = output;
        }
        if seed.is_some() {
            self.draw.seed = seed;
        }
        self
    }
}
