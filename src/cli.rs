use std::path::PathBuf;

use clap::Parser;
use shelf_kernel::settings::Settings;

/// Command-line overrides, applied on top of the layered configuration.
#[derive(Parser, Debug, Default)]
#[command(name = "shelf")]
#[command(about = "Serves the book catalogue over HTTP", long_about = None)]
pub struct Cli {
    /// Directory holding base.toml and {env}.toml
    #[arg(short = 'c', long = "config-dir")]
    pub config_dir: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// JSON file holding the book collection
    #[arg(short = 'd', long = "data-file")]
    pub data_file: Option<PathBuf>,
}

impl Cli {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(data_file) = &self.data_file {
            settings.store.path = data_file.clone();
        }
    }
}
