// Staffing Calendar scheduler
// Replays a recorded pointer script against the scheduling engine

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use staffing_calendar::services::replay::{run_script, ReplayScript};
use staffing_calendar::services::settings::SettingsService;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let Some(script_path) = args.next().map(PathBuf::from) else {
        bail!("usage: staffing-calendar <script.json> [settings.toml]");
    };

    let settings_service = match args.next() {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location()?,
    };
    let settings = settings_service.get()?;
    log::info!("Loaded scheduler settings from {:?}", settings_service.path());

    let raw = fs::read_to_string(&script_path)
        .with_context(|| format!("Failed to read replay script {:?}", script_path))?;
    let script: ReplayScript = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse replay script {:?}", script_path))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_script(&script, settings, &mut out)?;
    out.flush()?;
    Ok(())
}
