use std::fs::File;
use std::sync::Arc;

use clap::Parser;
use hanzi_park::core::config::{self, HanziConfig};
use hanzi_park::core::dictionary::LocalDictionary;
use hanzi_park::tui;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "hanzi-park", about = "Watch and practice Chinese character stroke order")]
struct Args {
    /// Character to open with (overrides config and HANZI_PARK_CHARACTER)
    #[arg(short, long)]
    character: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to hanzi-park.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("hanzi-park.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    info!("hanzi-park starting up");

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("{}, using defaults", e);
        HanziConfig::default()
    });
    let resolved = config::resolve(&file_config, args.character.as_deref());
    info!("Default character: {}", resolved.default_character);

    let mut dictionary = LocalDictionary::with_delay(resolved.lookup_delay);
    if let Some(path) = &resolved.dictionary_file {
        if let Err(e) = dictionary.load_entries_file(path) {
            warn!("Ignoring dictionary file {}: {}", path.display(), e);
        }
    }

    tui::run(resolved, Arc::new(dictionary))
}
