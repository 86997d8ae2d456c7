use crate::prelude::{println, *};
use wptools_core::wordpress::{transform_plugins, PluginInfo, WpPlugin};

use super::WordPressClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Filter by status: active, inactive, or all
    #[arg(long, default_value = "all")]
    pub status: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl WordPressClient {
    /// List installed plugins. Always requires authentication.
    pub async fn get_plugins(&self, status: &str) -> Result<Vec<PluginInfo>, Error> {
        let mut query = Vec::new();
        if status != "all" {
            query.push(("status", status.to_string()));
        }

        let plugins: Vec<WpPlugin> = self.get(&self.endpoint("plugins"), &query, true).await?;

        Ok(transform_plugins(plugins))
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching plugins...");
    }

    let client = super::client_from_env()?;
    let plugins = client.get_plugins(&options.status).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(());
    }

    println!("Found {} plugin(s):\n", plugins.len());

    if plugins.is_empty() {
        println!("No plugins found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["Name", "Plugin", "Status", "Version"]);

    for plugin in &plugins {
        table.add_row(prettytable::row![
            plugin.name,
            plugin.plugin,
            plugin.status,
            plugin.version
        ]);
    }

    table.printstd();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Error;
    use crate::wp::{WordPressClient, WordPressConfig};

    #[tokio::test]
    async fn test_get_plugins_fails_fast_without_credentials() {
        let config = WordPressConfig {
            url: "http://127.0.0.1:1".to_string(),
            user: None,
            app_password: None,
        };
        let client = WordPressClient::new(config).unwrap();

        let result = client.get_plugins("all").await;
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
