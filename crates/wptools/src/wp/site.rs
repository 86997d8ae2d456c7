use crate::prelude::{println, *};
use colored::Colorize;
use wptools_core::wordpress::SiteInfo;

use super::WordPressClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SiteOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl WordPressClient {
    /// Site information comes from the bare wp-json root rather than the
    /// v2 API base. Missing fields default to `""`/`0`.
    pub async fn get_site_info(&self) -> Result<SiteInfo, Error> {
        self.get(&self.config().root_api(), &[], false).await
    }
}

pub async fn run(options: SiteOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching site information...");
    }

    let client = super::client_from_env()?;
    let site = client.get_site_info().await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&site)?);
        return Ok(());
    }

    println!("{}", site.name.bold());
    if !site.description.is_empty() {
        println!("{}", site.description);
    }
    println!("{}: {}", "URL".green(), site.url.cyan().underline());
    println!("{}: {}", "Home".green(), site.home.cyan().underline());
    println!(
        "{}: {} | {}: {}",
        "GMT offset".green(),
        site.gmt_offset,
        "Timezone".green(),
        if site.timezone_string.is_empty() {
            "(not set)"
        } else {
            &site.timezone_string
        }
    );

    Ok(())
}
