//! `hkj-versions`: record a docs deployment in versions.json.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use hkj_site_tools::{
    cli::VersionsCli,
    log,
    registry::{self, Update},
};

fn main() -> Result<()> {
    let cli = VersionsCli::parse();
    let path = cli.registry_path();

    let update = Update::new(&cli.version, &cli.version_label);
    let registry = registry::update_registry(&path, update, Utc::now())
        .with_context(|| format!("Failed to update {}", path.display()))?;

    log!("versions"; "applied {}", update.version());
    log!("versions"; "stable: {}", registry.stable.as_deref().unwrap_or("none"));
    log!("versions"; "releases: {}", registry.versions.len());
    Ok(())
}
