use std::env;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;

const APP_DIR: &str = "mineclear";
const DATA_FILE: &str = "games.json";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity,

    /// Where finished games are stored
    #[arg(long, env = "MINECLEAR_DATA")]
    pub data_file: Option<PathBuf>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Do not wait for Enter between replayed moves
    #[arg(long)]
    pub no_pause: bool,

    /// Plain output without colours
    #[arg(long)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start a new game, asking for anything not given here
    Play(PlayArgs),
    /// List saved games
    List,
    /// Replay a saved game move by move
    Replay {
        /// Id shown by `list`
        id: u64,
    },
}

#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct PlayArgs {
    /// Player name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Side of the square board
    #[arg(long)]
    pub size: Option<u8>,

    /// Number of mines
    #[arg(short, long)]
    pub mines: Option<u16>,
}

/// Settings shared by every mode once the arguments are parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Options {
    pub seed: Option<u64>,
    pub pause: bool,
    pub color: bool,
}

impl Args {
    pub fn options(&self) -> Options {
        Options {
            seed: self.seed,
            pause: !self.no_pause,
            color: self.color(),
        }
    }

    pub fn data_path(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(default_data_path)
    }

    pub fn color(&self) -> bool {
        !self.no_color
    }
}

/// `$APPDATA`, then `$XDG_DATA_HOME`, then `~/.local/share`, else the working directory.
fn default_data_path() -> PathBuf {
    let base = env::var_os("APPDATA")
        .or_else(|| env::var_os("XDG_DATA_HOME"))
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share")));

    match base {
        Some(base) => base.join(APP_DIR).join(DATA_FILE),
        None => PathBuf::from(format!("{APP_DIR}-{DATA_FILE}")),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
pub fn init_logging(verbose: &Verbosity) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Error initializing logger: {err}"))
}
