use serde::{Deserialize, Serialize};

/// Excerpts returned by post listings are cut to this many characters.
pub const EXCERPT_MAX_CHARS: usize = 200;

/// Plugin descriptions are cut to this many characters.
pub const PLUGIN_DESCRIPTION_MAX_CHARS: usize = 100;

/// Rendered text field as the REST API returns it in `view` context,
/// e.g. `{"rendered": "<p>Hello</p>"}`.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RenderedText {
    #[serde(default)]
    pub rendered: String,
}

/// Editable text field in `edit` context. WordPress sends either an object
/// carrying the raw source text or a plain string; both forms normalize to
/// the raw text via [`EditableText::into_raw`].
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(untagged)]
pub enum EditableText {
    Object { raw: String },
    Plain(String),
}

impl EditableText {
    /// The raw, unprocessed source text.
    pub fn into_raw(self) -> String {
        match self {
            EditableText::Object { raw } => raw,
            EditableText::Plain(text) => text,
        }
    }
}

impl Default for EditableText {
    fn default() -> Self {
        EditableText::Plain(String::new())
    }
}

/// Post from `GET /wp-json/wp/v2/posts` in the default view context.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WpPost {
    pub id: u64,
    #[serde(default)]
    pub title: RenderedText,
    pub status: String,
    // Drafts with a floating publish date report null here.
    #[serde(default)]
    pub date: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<RenderedText>,
    #[serde(default)]
    pub link: String,
}

/// Post from `GET /wp-json/wp/v2/posts/{id}?context=edit`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WpPostEdit {
    pub id: u64,
    #[serde(default)]
    pub title: EditableText,
    #[serde(default)]
    pub content: EditableText,
    #[serde(default)]
    pub excerpt: EditableText,
    pub status: String,
    #[serde(default)]
    pub date: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub link: String,
}

/// Page from `GET /wp-json/wp/v2/pages`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WpPage {
    pub id: u64,
    #[serde(default)]
    pub title: RenderedText,
    pub status: String,
    pub slug: String,
    #[serde(default)]
    pub link: String,
}

/// Media item from `GET /wp-json/wp/v2/media`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WpMedia {
    pub id: u64,
    #[serde(default)]
    pub title: RenderedText,
    pub source_url: String,
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: String,
}

/// Plugin description sub-object; only the raw text is kept.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WpPluginDescription {
    #[serde(default)]
    pub raw: String,
}

/// Plugin from `GET /wp-json/wp/v2/plugins`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WpPlugin {
    pub name: String,
    pub plugin: String,
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<WpPluginDescription>,
}

/// Response from `DELETE /wp-json/wp/v2/posts/{id}`. Trashing returns the
/// post object itself; a forced delete returns a wrapper with no top-level
/// title. Every field is optional so both shapes deserialize.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WpDeleteResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<RenderedText>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Post summary returned by listings and by create/update.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostSummary {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub date: String,
    pub slug: String,
    pub excerpt: String,
    pub link: String,
}

/// Single post with its raw, editable fields.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostDetail {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: String,
    pub date: String,
    pub slug: String,
    pub link: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PageSummary {
    pub id: u64,
    pub title: String,
    pub status: String,
    pub slug: String,
    pub link: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaItem {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub mime_type: String,
    pub alt_text: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PluginInfo {
    pub name: String,
    pub plugin: String,
    pub status: String,
    pub version: String,
    pub description: String,
}

/// Site information from the bare `wp-json` root. Deserializes directly
/// from the upstream payload; every field falls back to `""`/`0` when the
/// site omits it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SiteInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub gmt_offset: f64,
    #[serde(default)]
    pub timezone_string: String,
}

/// Title and status of a post as it was before deletion.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreviousPost {
    pub title: String,
    pub status: String,
}

/// Confirmation returned after deleting a post.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeleteConfirmation {
    pub id: u64,
    pub deleted: bool,
    pub previous: Option<PreviousPost>,
}

/// Whether listing posts with this status needs credentials. WordPress
/// only serves non-published posts to authenticated users, and the client
/// refuses locally before issuing the request.
pub fn status_requires_auth(status: &str) -> bool {
    status != "publish"
}

/// Truncate to at most `max_chars` characters, never splitting a UTF-8
/// sequence. No ellipsis is appended.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Reshape one raw post into the summary record. The rendered excerpt is
/// cut to [`EXCERPT_MAX_CHARS`]; a missing excerpt becomes `""`.
pub fn transform_post_summary(post: WpPost) -> PostSummary {
    let excerpt = post
        .excerpt
        .map(|e| truncate_chars(&e.rendered, EXCERPT_MAX_CHARS))
        .unwrap_or_default();

    PostSummary {
        id: post.id,
        title: post.title.rendered,
        status: post.status,
        date: post.date.unwrap_or_default(),
        slug: post.slug,
        excerpt,
        link: post.link,
    }
}

pub fn transform_posts(posts: Vec<WpPost>) -> Vec<PostSummary> {
    posts.into_iter().map(transform_post_summary).collect()
}

/// Reshape an edit-context post, normalizing title/content/excerpt from
/// either the object or plain-string form to the raw text.
pub fn transform_post_detail(post: WpPostEdit) -> PostDetail {
    PostDetail {
        id: post.id,
        title: post.title.into_raw(),
        content: post.content.into_raw(),
        excerpt: post.excerpt.into_raw(),
        status: post.status,
        date: post.date.unwrap_or_default(),
        slug: post.slug,
        link: post.link,
    }
}

pub fn transform_pages(pages: Vec<WpPage>) -> Vec<PageSummary> {
    pages
        .into_iter()
        .map(|page| PageSummary {
            id: page.id,
            title: page.title.rendered,
            status: page.status,
            slug: page.slug,
            link: page.link,
        })
        .collect()
}

pub fn transform_media(media: Vec<WpMedia>) -> Vec<MediaItem> {
    media
        .into_iter()
        .map(|item| MediaItem {
            id: item.id,
            title: item.title.rendered,
            url: item.source_url,
            mime_type: item.mime_type,
            alt_text: item.alt_text,
        })
        .collect()
}

/// Reshape plugins: the raw description is cut to
/// [`PLUGIN_DESCRIPTION_MAX_CHARS`] and defaults to `""`, the version to
/// `"unknown"`.
pub fn transform_plugins(plugins: Vec<WpPlugin>) -> Vec<PluginInfo> {
    plugins
        .into_iter()
        .map(|plugin| {
            let description = plugin.description.map(|d| d.raw).unwrap_or_default();
            PluginInfo {
                name: plugin.name,
                plugin: plugin.plugin,
                status: plugin.status,
                version: plugin.version.unwrap_or_else(|| "unknown".to_string()),
                description: truncate_chars(&description, PLUGIN_DESCRIPTION_MAX_CHARS),
            }
        })
        .collect()
}

/// Build the deletion confirmation. `previous` is only present when the
/// response carried a title; a forced delete nests the old post one level
/// down and therefore reports no previous record.
pub fn build_delete_confirmation(
    requested_id: u64,
    response: WpDeleteResponse,
) -> DeleteConfirmation {
    let status = response.status.unwrap_or_default();
    let previous = response.title.map(|title| PreviousPost {
        title: title.rendered,
        status,
    });

    DeleteConfirmation {
        id: response.id.unwrap_or(requested_id),
        deleted: true,
        previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_fixture(id: u64, excerpt: Option<&str>) -> WpPost {
        WpPost {
            id,
            title: RenderedText {
                rendered: "Hello World".to_string(),
            },
            status: "publish".to_string(),
            date: Some("2024-05-01T10:00:00".to_string()),
            slug: "hello-world".to_string(),
            excerpt: excerpt.map(|e| RenderedText {
                rendered: e.to_string(),
            }),
            link: "https://example.com/hello-world".to_string(),
        }
    }

    #[test]
    fn test_truncate_chars_short_input() {
        assert_eq!(truncate_chars("short", 200), "short");
    }

    #[test]
    fn test_truncate_chars_exact_length() {
        let text = "x".repeat(200);
        assert_eq!(truncate_chars(&text, 200), text);
    }

    #[test]
    fn test_truncate_chars_long_input() {
        let text = "x".repeat(300);
        let truncated = truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let text = "ü".repeat(150);
        let truncated = truncate_chars(&text, 100);
        assert_eq!(truncated.chars().count(), 100);
        assert_eq!(truncated, "ü".repeat(100));
    }

    #[test]
    fn test_status_requires_auth() {
        assert!(!status_requires_auth("publish"));
        assert!(status_requires_auth("draft"));
        assert!(status_requires_auth("all"));
        assert!(status_requires_auth("private"));
    }

    #[test]
    fn test_transform_post_summary_truncates_excerpt() {
        let excerpt = "e".repeat(300);
        let summary = transform_post_summary(post_fixture(1, Some(&excerpt)));

        assert_eq!(summary.excerpt.chars().count(), 200);
        assert_eq!(summary.excerpt, "e".repeat(200));
    }

    #[test]
    fn test_transform_post_summary_missing_excerpt() {
        let summary = transform_post_summary(post_fixture(2, None));
        assert_eq!(summary.excerpt, "");
    }

    #[test]
    fn test_transform_post_summary_fields() {
        let summary = transform_post_summary(post_fixture(7, Some("A teaser")));

        assert_eq!(summary.id, 7);
        assert_eq!(summary.title, "Hello World");
        assert_eq!(summary.status, "publish");
        assert_eq!(summary.date, "2024-05-01T10:00:00");
        assert_eq!(summary.slug, "hello-world");
        assert_eq!(summary.excerpt, "A teaser");
        assert_eq!(summary.link, "https://example.com/hello-world");
    }

    #[test]
    fn test_transform_post_summary_null_date_defaults_empty() {
        let value = serde_json::json!({
            "id": 4,
            "title": {"rendered": "Floating draft"},
            "status": "draft",
            "date": null,
            "slug": "floating-draft",
            "link": "https://example.com/?p=4"
        });

        let summary = transform_post_summary(serde_json::from_value(value).unwrap());
        assert_eq!(summary.date, "");
    }

    #[test]
    fn test_transform_posts_preserves_order() {
        let posts = vec![post_fixture(1, None), post_fixture(2, None)];
        let summaries = transform_posts(posts);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, 1);
        assert_eq!(summaries[1].id, 2);
    }

    #[test]
    fn test_editable_text_from_object() {
        let value = serde_json::json!({"raw": "Raw title", "rendered": "<p>Raw title</p>"});
        let field: EditableText = serde_json::from_value(value).unwrap();
        assert_eq!(field.into_raw(), "Raw title");
    }

    #[test]
    fn test_editable_text_from_plain_string() {
        let field: EditableText = serde_json::from_value(serde_json::json!("Plain")).unwrap();
        assert_eq!(field.into_raw(), "Plain");
    }

    #[test]
    fn test_editable_text_default_is_empty() {
        assert_eq!(EditableText::default().into_raw(), "");
    }

    #[test]
    fn test_post_edit_deserializes_both_field_forms() {
        let value = serde_json::json!({
            "id": 42,
            "title": {"raw": "T", "rendered": "<p>T</p>"},
            "content": "C",
            "excerpt": {"raw": ""},
            "status": "draft",
            "date": "2024-05-01T10:00:00",
            "slug": "t",
            "link": "https://example.com/?p=42"
        });

        let post: WpPostEdit = serde_json::from_value(value).unwrap();
        let detail = transform_post_detail(post);

        assert_eq!(detail.id, 42);
        assert_eq!(detail.title, "T");
        assert_eq!(detail.content, "C");
        assert_eq!(detail.excerpt, "");
        assert_eq!(detail.status, "draft");
    }

    #[test]
    fn test_post_edit_missing_link_defaults_empty() {
        let value = serde_json::json!({
            "id": 9,
            "title": "T",
            "content": "C",
            "excerpt": "E",
            "status": "draft",
            "date": "2024-05-01T10:00:00",
            "slug": "t"
        });

        let detail = transform_post_detail(serde_json::from_value(value).unwrap());
        assert_eq!(detail.link, "");
    }

    #[test]
    fn test_transform_pages() {
        let pages = vec![WpPage {
            id: 3,
            title: RenderedText {
                rendered: "About".to_string(),
            },
            status: "publish".to_string(),
            slug: "about".to_string(),
            link: "https://example.com/about".to_string(),
        }];

        let summaries = transform_pages(pages);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 3);
        assert_eq!(summaries[0].title, "About");
        assert_eq!(summaries[0].slug, "about");
    }

    #[test]
    fn test_transform_media_defaults_alt_text() {
        let value = serde_json::json!([{
            "id": 11,
            "title": {"rendered": "Logo"},
            "source_url": "https://example.com/logo.png",
            "mime_type": "image/png"
        }]);

        let media: Vec<WpMedia> = serde_json::from_value(value).unwrap();
        let items = transform_media(media);

        assert_eq!(items[0].id, 11);
        assert_eq!(items[0].url, "https://example.com/logo.png");
        assert_eq!(items[0].mime_type, "image/png");
        assert_eq!(items[0].alt_text, "");
    }

    #[test]
    fn test_transform_plugins_truncates_description() {
        let plugins = vec![WpPlugin {
            name: "Akismet".to_string(),
            plugin: "akismet/akismet".to_string(),
            status: "active".to_string(),
            version: Some("5.3".to_string()),
            description: Some(WpPluginDescription {
                raw: "d".repeat(250),
            }),
        }];

        let info = transform_plugins(plugins);

        assert_eq!(info[0].description.chars().count(), 100);
        assert_eq!(info[0].version, "5.3");
    }

    #[test]
    fn test_transform_plugins_defaults() {
        let plugins = vec![WpPlugin {
            name: "Hello Dolly".to_string(),
            plugin: "hello".to_string(),
            status: "inactive".to_string(),
            version: None,
            description: None,
        }];

        let info = transform_plugins(plugins);

        assert_eq!(info[0].version, "unknown");
        assert_eq!(info[0].description, "");
    }

    #[test]
    fn test_site_info_defaults_for_missing_fields() {
        let site: SiteInfo = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(site.name, "");
        assert_eq!(site.description, "");
        assert_eq!(site.url, "");
        assert_eq!(site.home, "");
        assert_eq!(site.gmt_offset, 0.0);
        assert_eq!(site.timezone_string, "");
    }

    #[test]
    fn test_site_info_reads_upstream_fields() {
        let site: SiteInfo = serde_json::from_value(serde_json::json!({
            "name": "Demo",
            "description": "Just another WordPress site",
            "url": "https://example.com",
            "home": "https://example.com",
            "gmt_offset": 5.5,
            "timezone_string": "Asia/Kolkata",
            "namespaces": ["wp/v2"]
        }))
        .unwrap();

        assert_eq!(site.name, "Demo");
        assert_eq!(site.gmt_offset, 5.5);
        assert_eq!(site.timezone_string, "Asia/Kolkata");
    }

    #[test]
    fn test_delete_confirmation_with_previous() {
        let response = WpDeleteResponse {
            id: Some(5),
            title: Some(RenderedText {
                rendered: "Old Title".to_string(),
            }),
            status: Some("trash".to_string()),
        };

        let confirmation = build_delete_confirmation(5, response);

        assert_eq!(confirmation.id, 5);
        assert!(confirmation.deleted);
        let previous = confirmation.previous.unwrap();
        assert_eq!(previous.title, "Old Title");
        assert_eq!(previous.status, "trash");
    }

    #[test]
    fn test_delete_confirmation_without_title() {
        let response = WpDeleteResponse {
            id: None,
            title: None,
            status: None,
        };

        let confirmation = build_delete_confirmation(77, response);

        assert_eq!(confirmation.id, 77);
        assert!(confirmation.deleted);
        assert!(confirmation.previous.is_none());
    }
}
