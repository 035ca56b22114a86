use std::path::PathBuf;

use crate::Args;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub max_body_size: usize,
    pub clear_output: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            data_dir: args.data_dir,
            max_body_size: args.max_body_size,
            clear_output: args.clear_output,
        }
    }
}
