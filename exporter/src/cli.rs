use clap::Parser;

use crate::app::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "gamedata-exporter")]
#[command(about = "Export normalized game data and localization from the upstream repository")]
pub struct Cli {
    /// Write artifacts without committing and pushing them
    #[arg(long, env = "SKIP_PUBLISH")]
    pub skip_publish: bool,

    /// Export even when the upstream commit was already processed
    #[arg(long, env = "FORCE_RUN")]
    pub force: bool,

    /// Reuse the raw cache instead of downloading
    #[arg(long, env = "SKIP_DOWNLOAD")]
    pub skip_download: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            skip_publish: self.skip_publish,
            force: self.force,
            skip_download: self.skip_download,
        }
    }
}
