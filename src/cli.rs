use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "propsheet",
    version,
    about = "Key-value extraction from property-sheet zones"
)]
pub struct Cli {
    /// Log row bands, key matches and fallbacks.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Inventory(InventoryArgs),
    Extract(ExtractArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = ".cache/propsheet")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = ".cache/propsheet")]
    pub cache_root: PathBuf,

    #[arg(long = "input")]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub catalog_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OcrMode::Off)]
    pub ocr_mode: OcrMode,

    #[arg(long, default_value_t = 4)]
    pub ocr_min_text_chars: usize,

    #[arg(long, default_value_t = 15.0)]
    pub row_tolerance: f64,

    #[arg(long, default_value_t = 8.0)]
    pub key_echo_tolerance: f64,

    #[arg(long, default_value_t = 20.0)]
    pub min_value_offset: f64,

    #[arg(long, default_value_t = 8.0)]
    pub key_char_width: f64,

    #[arg(long, default_value_t = 3.0)]
    pub same_line_tolerance: f64,

    #[arg(long, default_value_t = false)]
    pub print: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OcrMode {
    Off,
    Auto,
    Force,
}

impl OcrMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Auto => "auto",
            Self::Force => "force",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/propsheet")]
    pub cache_root: PathBuf,
}
