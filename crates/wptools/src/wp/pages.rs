use crate::prelude::{println, *};
use wptools_core::wordpress::{transform_pages, PageSummary, WpPage};

use super::WordPressClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of pages to return (1-100)
    #[arg(long, default_value = "10")]
    pub per_page: u32,

    /// Search term to filter pages by title/content
    #[arg(long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl WordPressClient {
    /// List pages. No authentication requirement and no status filter.
    pub async fn get_pages(
        &self,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Vec<PageSummary>, Error> {
        let mut query = vec![("per_page", per_page.to_string())];
        if let Some(term) = search {
            query.push(("search", term.to_string()));
        }

        let pages: Vec<WpPage> = self.get(&self.endpoint("pages"), &query, false).await?;

        Ok(transform_pages(pages))
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching pages...");
    }

    let client = super::client_from_env()?;
    let pages = client
        .get_pages(options.per_page, options.search.as_deref())
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    println!("Found {} page(s):\n", pages.len());

    if pages.is_empty() {
        println!("No pages found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "Status", "Slug"]);

    for page in &pages {
        table.add_row(prettytable::row![
            page.id,
            page.title,
            page.status,
            page.slug
        ]);
    }

    table.printstd();

    Ok(())
}
