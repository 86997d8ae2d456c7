//! Post operations: list, get, create, update, delete.

use crate::prelude::{println, *};
use colored::Colorize;
use wptools_core::wordpress::{
    build_delete_confirmation, status_requires_auth, transform_post_detail,
    transform_post_summary, transform_posts, DeleteConfirmation, PostDetail, PostSummary,
    WpDeleteResponse, WpPost, WpPostEdit,
};

use super::WordPressClient;

/// Post commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List posts
    #[clap(name = "list")]
    List(ListOptions),

    /// Get a single post with its raw content
    #[clap(name = "get")]
    Get(GetOptions),

    /// Create a new post
    #[clap(name = "create")]
    Create(CreateOptions),

    /// Update an existing post
    #[clap(name = "update")]
    Update(UpdateOptions),

    /// Delete a post
    #[clap(name = "delete")]
    Delete(DeleteOptions),
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Post status filter: publish, draft, or all. Anything but publish
    /// needs credentials.
    #[arg(long, default_value = "publish")]
    pub status: String,

    /// Number of posts to return (1-100)
    #[arg(long, default_value = "10")]
    pub per_page: u32,

    /// Search term to filter posts by title/content
    #[arg(long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct GetOptions {
    /// ID of the post to retrieve
    pub post_id: u64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct CreateOptions {
    /// Title of the post
    pub title: String,

    /// Content/body of the post (HTML and Gutenberg blocks are accepted)
    #[arg(long)]
    pub content: String,

    /// Post status: draft, publish, pending, private
    #[arg(long, default_value = "draft")]
    pub status: String,

    /// Optional excerpt/summary of the post
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct UpdateOptions {
    /// ID of the post to update
    pub post_id: u64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content
    #[arg(long)]
    pub content: Option<String>,

    /// New status: draft, publish, pending, private, trash
    #[arg(long)]
    pub status: Option<String>,

    /// New excerpt
    #[arg(long)]
    pub excerpt: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct DeleteOptions {
    /// ID of the post to delete
    pub post_id: u64,

    /// Permanently delete instead of moving to trash
    #[arg(long)]
    pub force: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Optional fields for a partial post update.
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<String>,
    pub excerpt: Option<String>,
}

fn list_query(status: &str, per_page: u32, search: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("per_page", per_page.to_string())];

    // "all" means no status filter at all
    if status != "all" {
        query.push(("status", status.to_string()));
    }

    if let Some(term) = search {
        query.push(("search", term.to_string()));
    }

    query
}

fn create_payload(
    title: &str,
    content: &str,
    status: &str,
    excerpt: Option<&str>,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "title": title,
        "content": content,
        "status": status,
    });

    if let Some(excerpt) = excerpt {
        payload["excerpt"] = serde_json::json!(excerpt);
    }

    payload
}

/// Build the partial update body from the fields actually supplied.
fn update_payload(fields: &UpdateFields) -> Result<serde_json::Value, Error> {
    let mut payload = serde_json::Map::new();

    if let Some(title) = &fields.title {
        payload.insert("title".to_string(), serde_json::json!(title));
    }
    if let Some(content) = &fields.content {
        payload.insert("content".to_string(), serde_json::json!(content));
    }
    if let Some(status) = &fields.status {
        payload.insert("status".to_string(), serde_json::json!(status));
    }
    if let Some(excerpt) = &fields.excerpt {
        payload.insert("excerpt".to_string(), serde_json::json!(excerpt));
    }

    if payload.is_empty() {
        return Err(Error::Validation(
            "At least one field must be provided to update".to_string(),
        ));
    }

    Ok(serde_json::Value::Object(payload))
}

impl WordPressClient {
    /// List posts. A status other than `publish` needs credentials; the
    /// client refuses locally before issuing the request.
    pub async fn get_posts(
        &self,
        status: &str,
        per_page: u32,
        search: Option<&str>,
    ) -> Result<Vec<PostSummary>, Error> {
        let query = list_query(status, per_page, search);
        let require_auth = status_requires_auth(status);

        let posts: Vec<WpPost> = self
            .get(&self.endpoint("posts"), &query, require_auth)
            .await?;

        Ok(transform_posts(posts))
    }

    /// Fetch one post in edit context to obtain the raw source fields.
    pub async fn get_post(&self, post_id: u64) -> Result<PostDetail, Error> {
        let query = vec![("context", "edit".to_string())];

        let post: WpPostEdit = self
            .get(&self.endpoint(&format!("posts/{post_id}")), &query, true)
            .await?;

        Ok(transform_post_detail(post))
    }

    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        status: &str,
        excerpt: Option<&str>,
    ) -> Result<PostSummary, Error> {
        let payload = create_payload(title, content, status, excerpt);

        let post: WpPost = self.post(&self.endpoint("posts"), &payload, true).await?;

        Ok(transform_post_summary(post))
    }

    pub async fn update_post(
        &self,
        post_id: u64,
        fields: &UpdateFields,
    ) -> Result<PostSummary, Error> {
        let payload = update_payload(fields)?;

        let post: WpPost = self
            .post(&self.endpoint(&format!("posts/{post_id}")), &payload, true)
            .await?;

        Ok(transform_post_summary(post))
    }

    /// Delete a post. Without `force` the post moves to trash and remains
    /// recoverable; with `force` it is permanently removed.
    pub async fn delete_post(
        &self,
        post_id: u64,
        force: bool,
    ) -> Result<DeleteConfirmation, Error> {
        let query = vec![("force", force.to_string())];

        let response: WpDeleteResponse = self
            .delete(&self.endpoint(&format!("posts/{post_id}")), &query, true)
            .await?;

        Ok(build_delete_confirmation(post_id, response))
    }
}

async fn list_handler(options: ListOptions) -> Result<()> {
    let client = super::client_from_env()?;
    let posts = client
        .get_posts(&options.status, options.per_page, options.search.as_deref())
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Found {} post(s):\n", posts.len());

    if posts.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", "Title", "Status", "Date", "Slug"]);

    for post in &posts {
        table.add_row(prettytable::row![
            post.id,
            post.title,
            post.status,
            post.date,
            post.slug
        ]);
    }

    table.printstd();

    Ok(())
}

async fn get_handler(options: GetOptions) -> Result<()> {
    let client = super::client_from_env()?;
    let post = client.get_post(options.post_id).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Post".bold(),
        post.id.to_string().bright_white().bold()
    );
    println!("{}: {}", "Title".green(), post.title);
    println!(
        "{}: {} | {}: {}",
        "Status".green(),
        post.status,
        "Date".green(),
        post.date
    );
    println!("{}: {}", "Slug".green(), post.slug);
    if !post.link.is_empty() {
        println!("{}: {}", "Link".green(), post.link.cyan().underline());
    }
    if !post.excerpt.is_empty() {
        println!("{}: {}", "Excerpt".green(), post.excerpt);
    }
    println!("\n{}\n{}", "Content:".bold(), post.content);

    Ok(())
}

async fn create_handler(options: CreateOptions) -> Result<()> {
    let client = super::client_from_env()?;
    let post = client
        .create_post(
            &options.title,
            &options.content,
            &options.status,
            options.excerpt.as_deref(),
        )
        .await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!(
        "Created post {} ({}): {}",
        post.id.to_string().bright_white().bold(),
        post.status,
        post.title
    );
    if !post.link.is_empty() {
        println!("{}: {}", "Link".green(), post.link.cyan().underline());
    }

    Ok(())
}

async fn update_handler(options: UpdateOptions) -> Result<()> {
    let fields = UpdateFields {
        title: options.title.clone(),
        content: options.content.clone(),
        status: options.status.clone(),
        excerpt: options.excerpt.clone(),
    };

    let client = super::client_from_env()?;
    let post = client.update_post(options.post_id, &fields).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!(
        "Updated post {} ({}): {}",
        post.id.to_string().bright_white().bold(),
        post.status,
        post.title
    );

    Ok(())
}

async fn delete_handler(options: DeleteOptions) -> Result<()> {
    let client = super::client_from_env()?;
    let confirmation = client.delete_post(options.post_id, options.force).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&confirmation)?);
        return Ok(());
    }

    let action = if options.force {
        "Permanently deleted"
    } else {
        "Moved to trash"
    };

    match &confirmation.previous {
        Some(previous) => println!(
            "{} post {}: {}",
            action,
            confirmation.id.to_string().bright_white().bold(),
            previous.title
        ),
        None => println!(
            "{} post {}",
            action,
            confirmation.id.to_string().bright_white().bold()
        ),
    }

    Ok(())
}

/// Run post commands
pub async fn run(cmd: Commands, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running post command...");
    }

    match cmd {
        Commands::List(options) => list_handler(options).await,
        Commands::Get(options) => get_handler(options).await,
        Commands::Create(options) => create_handler(options).await,
        Commands::Update(options) => update_handler(options).await,
        Commands::Delete(options) => delete_handler(options).await,
    }
}
