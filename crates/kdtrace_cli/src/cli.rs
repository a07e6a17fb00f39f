use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "kdtrace")]
#[command(about = "Kd-tree accelerated ray tracer", version)]
pub struct Args {
    /// Image width in pixels
    #[arg(long, default_value_t = 256)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 256)]
    pub height: u32,

    /// Edge length of a render bucket in pixels
    #[arg(long, default_value_t = 16)]
    pub bucket_size: u32,

    /// Worker threads (defaults to twice the number of cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Mesh to place in the scene; a tessellated sphere is used if omitted
    #[arg(long)]
    pub obj: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "img.png")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}
