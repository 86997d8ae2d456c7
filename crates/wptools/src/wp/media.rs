use crate::prelude::{println, *};
use wptools_core::wordpress::{transform_media, MediaItem, WpMedia};

use super::WordPressClient;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Number of items to return (1-100)
    #[arg(long, default_value = "10")]
    pub per_page: u32,

    /// Filter by type: image, video, audio, or application
    #[arg(long)]
    pub media_type: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl WordPressClient {
    /// List media library items. The type filter is passed through to
    /// WordPress verbatim.
    pub async fn get_media(
        &self,
        per_page: u32,
        media_type: Option<&str>,
    ) -> Result<Vec<MediaItem>, Error> {
        let mut query = vec![("per_page", per_page.to_string())];
        if let Some(kind) = media_type {
            query.push(("media_type", kind.to_string()));
        }

        let media: Vec<WpMedia> = self.get(&self.endpoint("media"), &query, false).await?;

        Ok(transform_media(media))
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching media library...");
    }

    let client = super::client_from_env()?;
    let media = client
        .get_media(options.per_page, options.media_type.as_deref())
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&media)?);
        return Ok(());
    }

    println!("Found {} media item(s):\n", media.len());

    if media.is_empty() {
        println!("No media found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "Type", "URL"]);

    for item in &media {
        table.add_row(prettytable::row![
            item.id,
            item.title,
            item.mime_type,
            item.url
        ]);
    }

    table.printstd();

    Ok(())
}
