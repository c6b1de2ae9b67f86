//! Runtime configuration.
//!
//! Values come from an optional TOML file, then command-line flags on top.
//! The file lives at `<config dir>/listwatch/config.toml` unless `--config`
//! names another one:
//!
//! ```toml
//! snapshot_path = "/var/lib/listwatch/listings.csv"
//! report_path = "/var/lib/listwatch/listing_changes.txt"
//! match_policy = "existential"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::{CommonArgs, DiffArgs, RunArgs, ShowArgs};
use crate::error::{Error, Result};
use crate::report::DEFAULT_REPORT_PATH;
use crate::store::diff::MatchPolicy;
use crate::store::snapshot::DEFAULT_SNAPSHOT_PATH;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub snapshot_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub match_policy: Option<MatchPolicy>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read the config file. A missing default file is fine; a missing file
    /// the user named explicitly is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path, true),
            None => match default_config_path() {
                Some(path) => Self::load_from(&path, false),
                None => Ok(FileConfig::default()),
            },
        }
    }

    fn load_from(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), "loaded config file");
                Self::parse(&text)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !required => Ok(FileConfig::default()),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "listwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub report_path: PathBuf,
    pub match_policy: MatchPolicy,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            match_policy: MatchPolicy::default(),
            json_output: false,
        }
    }
}

impl Config {
    /// Layer command-line values over the file config and built-in defaults.
    pub fn resolve(
        file: FileConfig,
        common: &CommonArgs,
        snapshot: Option<&PathBuf>,
        report: Option<&PathBuf>,
        policy: Option<MatchPolicy>,
    ) -> Self {
        let defaults = Config::default();

        Config {
            snapshot_path: snapshot
                .cloned()
                .or(file.snapshot_path)
                .unwrap_or(defaults.snapshot_path),
            report_path: report
                .cloned()
                .or(file.report_path)
                .unwrap_or(defaults.report_path),
            match_policy: policy.or(file.match_policy).unwrap_or_default(),
            json_output: common.json,
        }
    }

    pub fn from_run_args(args: &RunArgs) -> Result<Self> {
        let file = FileConfig::load(args.common.config.as_deref())?;
        Ok(Self::resolve(
            file,
            &args.common,
            args.snapshot.as_ref(),
            args.report.as_ref(),
            args.policy,
        ))
    }

    pub fn from_show_args(args: &ShowArgs) -> Result<Self> {
        let file = FileConfig::load(args.common.config.as_deref())?;
        Ok(Self::resolve(
            file,
            &args.common,
            args.snapshot.as_ref(),
            None,
            None,
        ))
    }

    pub fn from_diff_args(args: &DiffArgs) -> Result<Self> {
        let file = FileConfig::load(args.common.config.as_deref())?;
        Ok(Self::resolve(file, &args.common, None, None, args.policy))
    }
}
