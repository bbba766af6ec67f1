//! `hkj-sitemap`: write sitemap.xml for the rendered book.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use hkj_site_tools::{
    cli::SitemapCli,
    config::SitemapConfig,
    generator::sitemap::{self, Sitemap},
    log,
    utils::date,
};
use std::env;

fn main() -> Result<()> {
    let cli = SitemapCli::parse();

    let config = SitemapConfig::load(cli.config.as_deref())
        .context("Failed to load sitemap rules")?;

    if let Err(err) = sitemap::check_root(&cli.book_dir) {
        log!("error"; "{err}");
        report_cwd();
        return Err(err.into());
    }

    let lastmod = date::to_ymd(Utc::now());
    let sitemap = Sitemap::scan(&cli.book_dir, &cli.base_url, &config, &lastmod)?;

    let output = cli.output_path();
    sitemap.write(&output)?;

    log!("sitemap"; "wrote {} urls to {}", sitemap.len(), output.display());
    Ok(())
}

/// Show what the working directory holds, to debug a wrong `BOOK_DIR`.
fn report_cwd() {
    let Ok(cwd) = env::current_dir() else {
        log!("error"; "current directory is not accessible");
        return;
    };

    match sitemap::list_dir(&cwd) {
        Ok(names) => {
            log!("error"; "contents of {}:", cwd.display());
            for name in names {
                log!("error"; "  {name}");
            }
        }
        Err(err) => log!("error"; "cannot list {}: {err}", cwd.display()),
    }
}
