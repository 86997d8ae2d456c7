//! MCP tool handlers delegating to the WordPress client.

use crate::prelude::{eprintln, *};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::OnceLock;

use super::{CallToolResult, Content, JsonRpcError};
use crate::wp::posts::UpdateFields;
use crate::wp::{WordPressClient, WordPressConfig};

static CLIENT: OnceLock<WordPressClient> = OnceLock::new();

/// Shared client, constructed lazily on the first tool call and reused for
/// the life of the server. The client holds no resources beyond reqwest's
/// connection pool, so there is no teardown.
fn shared_client() -> Result<&'static WordPressClient, Error> {
    if let Some(client) = CLIENT.get() {
        return Ok(client);
    }

    let config = WordPressConfig::from_env()?;
    let client = WordPressClient::new(config)?;
    Ok(CLIENT.get_or_init(|| client))
}

/// Map a client error onto a JSON-RPC error object. Validation failures
/// are the caller's fault and use the invalid-params code.
fn rpc_error(err: Error) -> JsonRpcError {
    let code = match err {
        Error::Validation(_) => -32602,
        _ => -32603,
    };

    JsonRpcError {
        code,
        message: err.to_string(),
        data: None,
    }
}

fn parse_args<T: DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| {
        JsonRpcError {
            code: -32602,
            message: format!("Invalid arguments: {e}"),
            data: None,
        }
    })
}

/// Wrap tool output as an MCP text content result.
fn tool_result<T: serde::Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Serialization error: {e}"),
        data: None,
    })?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_get_posts(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetPostsArgs {
        status: Option<String>,
        per_page: Option<u32>,
        search: Option<String>,
    }

    let args: GetPostsArgs = parse_args(arguments)?;
    let status = args.status.unwrap_or_else(|| "publish".to_string());
    let per_page = args.per_page.unwrap_or(10);

    if global.verbose {
        eprintln!(
            "Calling get_posts: status={status}, per_page={per_page}, search={:?}",
            args.search
        );
    }

    let client = shared_client().map_err(rpc_error)?;
    let posts = client
        .get_posts(&status, per_page, args.search.as_deref())
        .await
        .map_err(rpc_error)?;

    tool_result(&posts)
}

pub async fn handle_get_pages(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetPagesArgs {
        per_page: Option<u32>,
        search: Option<String>,
    }

    let args: GetPagesArgs = parse_args(arguments)?;
    let per_page = args.per_page.unwrap_or(10);

    if global.verbose {
        eprintln!(
            "Calling get_pages: per_page={per_page}, search={:?}",
            args.search
        );
    }

    let client = shared_client().map_err(rpc_error)?;
    let pages = client
        .get_pages(per_page, args.search.as_deref())
        .await
        .map_err(rpc_error)?;

    tool_result(&pages)
}

pub async fn handle_get_media(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetMediaArgs {
        per_page: Option<u32>,
        media_type: Option<String>,
    }

    let args: GetMediaArgs = parse_args(arguments)?;
    let per_page = args.per_page.unwrap_or(10);

    if global.verbose {
        eprintln!(
            "Calling get_media: per_page={per_page}, media_type={:?}",
            args.media_type
        );
    }

    let client = shared_client().map_err(rpc_error)?;
    let media = client
        .get_media(per_page, args.media_type.as_deref())
        .await
        .map_err(rpc_error)?;

    tool_result(&media)
}

pub async fn handle_get_plugins(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetPluginsArgs {
        status: Option<String>,
    }

    let args: GetPluginsArgs = parse_args(arguments)?;
    let status = args.status.unwrap_or_else(|| "all".to_string());

    if global.verbose {
        eprintln!("Calling get_plugins: status={status}");
    }

    let client = shared_client().map_err(rpc_error)?;
    let plugins = client.get_plugins(&status).await.map_err(rpc_error)?;

    tool_result(&plugins)
}

pub async fn handle_site_info(
    _arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!("Calling site_info");
    }

    let client = shared_client().map_err(rpc_error)?;
    let site = client.get_site_info().await.map_err(rpc_error)?;

    tool_result(&site)
}

pub async fn handle_get_post(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct GetPostArgs {
        post_id: u64,
    }

    let args: GetPostArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!("Calling get_post: post_id={}", args.post_id);
    }

    let client = shared_client().map_err(rpc_error)?;
    let post = client.get_post(args.post_id).await.map_err(rpc_error)?;

    tool_result(&post)
}

pub async fn handle_create_post(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct CreatePostArgs {
        title: String,
        content: String,
        status: Option<String>,
        excerpt: Option<String>,
    }

    let args: CreatePostArgs = parse_args(arguments)?;
    let status = args.status.unwrap_or_else(|| "draft".to_string());

    if global.verbose {
        eprintln!(
            "Calling create_post: title={}, status={status}, excerpt={:?}",
            args.title, args.excerpt
        );
    }

    let client = shared_client().map_err(rpc_error)?;
    let post = client
        .create_post(&args.title, &args.content, &status, args.excerpt.as_deref())
        .await
        .map_err(rpc_error)?;

    tool_result(&post)
}

pub async fn handle_update_post(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct UpdatePostArgs {
        post_id: u64,
        title: Option<String>,
        content: Option<String>,
        status: Option<String>,
        excerpt: Option<String>,
    }

    let args: UpdatePostArgs = parse_args(arguments)?;

    if global.verbose {
        eprintln!(
            "Calling update_post: post_id={}, title={:?}, status={:?}",
            args.post_id, args.title, args.status
        );
    }

    let fields = UpdateFields {
        title: args.title,
        content: args.content,
        status: args.status,
        excerpt: args.excerpt,
    };

    let client = shared_client().map_err(rpc_error)?;
    let post = client
        .update_post(args.post_id, &fields)
        .await
        .map_err(rpc_error)?;

    tool_result(&post)
}

pub async fn handle_delete_post(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    #[derive(Deserialize)]
    struct DeletePostArgs {
        post_id: u64,
        force: Option<bool>,
    }

    let args: DeletePostArgs = parse_args(arguments)?;
    let force = args.force.unwrap_or(false);

    if global.verbose {
        eprintln!("Calling delete_post: post_id={}, force={force}", args.post_id);
    }

    let client = shared_client().map_err(rpc_error)?;
    let confirmation = client
        .delete_post(args.post_id, force)
        .await
        .map_err(rpc_error)?;

    tool_result(&confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Error;

    #[test]
    fn test_rpc_error_codes() {
        let validation = rpc_error(Error::Validation("no fields".to_string()));
        assert_eq!(validation.code, -32602);

        let auth = rpc_error(Error::Auth("missing credentials".to_string()));
        assert_eq!(auth.code, -32603);

        let http = rpc_error(Error::Http {
            status: 404,
            body: "not found".to_string(),
        });
        assert_eq!(http.code, -32603);
        assert!(http.message.contains("404"));
    }

    #[test]
    fn test_parse_args_rejects_missing_required_field() {
        #[derive(serde::Deserialize)]
        struct Args {
            post_id: u64,
        }

        let result: Result<Args, JsonRpcError> = parse_args(Some(serde_json::json!({})));
        assert!(result.is_err());
        assert_eq!(result.err().map(|e| e.code), Some(-32602));
    }

    #[test]
    fn test_tool_result_wraps_text_content() {
        let value = tool_result(&serde_json::json!({"id": 1})).unwrap();
        assert_eq!(value["content"][0]["type"], "text");
        assert!(value["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("\"id\": 1"));
    }
}
