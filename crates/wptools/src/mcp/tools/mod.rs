mod wp;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "wptools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "get_posts".to_string(),
            description: "Get posts from WordPress. Returns a list of posts with id, title, status, date, slug, excerpt, and link. Statuses other than 'publish' require WORDPRESS_USER and WORDPRESS_APP_PASSWORD environment variables.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "description": "Post status filter: 'publish', 'draft', or 'all' (default: 'publish')"
                    },
                    "per_page": {
                        "type": "number",
                        "description": "Number of posts to return, 1-100 (default: 10)"
                    },
                    "search": {
                        "type": "string",
                        "description": "Search term to filter posts by title/content"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_pages".to_string(),
            description: "Get pages from WordPress. Returns a list of pages with id, title, status, slug, and link.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "number",
                        "description": "Number of pages to return, 1-100 (default: 10)"
                    },
                    "search": {
                        "type": "string",
                        "description": "Search term to filter pages by title/content"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_media".to_string(),
            description: "Get items from the WordPress media library. Returns a list of media items with id, title, url, mime_type, and alt_text.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "per_page": {
                        "type": "number",
                        "description": "Number of items to return, 1-100 (default: 10)"
                    },
                    "media_type": {
                        "type": "string",
                        "description": "Filter by type: 'image', 'video', 'audio', or 'application'",
                        "enum": ["image", "video", "audio", "application"]
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "get_plugins".to_string(),
            description: "Get installed plugins from WordPress. Requires WORDPRESS_USER and WORDPRESS_APP_PASSWORD environment variables. Returns a list of plugins with name, plugin identifier, status, version, and description.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "description": "Filter by status: 'active', 'inactive', or 'all' (default: 'all')"
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: "site_info".to_string(),
            description: "Get WordPress site information: name, description, url, home, gmt_offset, and timezone_string.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        },
        Tool {
            name: "get_post".to_string(),
            description: "Get a single WordPress post by ID with its full raw content (title, content, and excerpt in editable form). Requires authentication.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "number",
                        "description": "The ID of the post to retrieve"
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "create_post".to_string(),
            description: "Create a new WordPress post. Requires authentication. Returns the created post summary.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "The title of the post"
                    },
                    "content": {
                        "type": "string",
                        "description": "The content/body of the post (supports HTML and Gutenberg blocks)"
                    },
                    "status": {
                        "type": "string",
                        "description": "Post status: 'draft', 'publish', 'pending', 'private' (default: 'draft')"
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "Optional excerpt/summary of the post"
                    }
                },
                "required": ["title", "content"]
            }),
        },
        Tool {
            name: "update_post".to_string(),
            description: "Update an existing WordPress post. Only the supplied fields are changed; at least one must be given. Requires authentication.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "number",
                        "description": "The ID of the post to update"
                    },
                    "title": {
                        "type": "string",
                        "description": "New title"
                    },
                    "content": {
                        "type": "string",
                        "description": "New content"
                    },
                    "status": {
                        "type": "string",
                        "description": "New status: 'draft', 'publish', 'pending', 'private', 'trash'"
                    },
                    "excerpt": {
                        "type": "string",
                        "description": "New excerpt"
                    }
                },
                "required": ["post_id"]
            }),
        },
        Tool {
            name: "delete_post".to_string(),
            description: "Delete a WordPress post. With force=false (default) the post moves to trash and remains recoverable; with force=true it is permanently deleted. Requires authentication.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "post_id": {
                        "type": "number",
                        "description": "The ID of the post to delete"
                    },
                    "force": {
                        "type": "boolean",
                        "description": "Permanently delete instead of moving to trash (default: false)"
                    }
                },
                "required": ["post_id"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "get_posts" => wp::handle_get_posts(params.arguments, global).await,
        "get_pages" => wp::handle_get_pages(params.arguments, global).await,
        "get_media" => wp::handle_get_media(params.arguments, global).await,
        "get_plugins" => wp::handle_get_plugins(params.arguments, global).await,
        "site_info" => wp::handle_site_info(params.arguments, global).await,
        "get_post" => wp::handle_get_post(params.arguments, global).await,
        "create_post" => wp::handle_create_post(params.arguments, global).await,
        "update_post" => wp::handle_update_post(params.arguments, global).await,
        "delete_post" => wp::handle_delete_post(params.arguments, global).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tools_list_exposes_every_wordpress_tool() {
        let value = handle_tools_list().unwrap();
        let names: Vec<&str> = value["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|tool| tool["name"].as_str().unwrap())
            .collect();

        assert_eq!(
            names,
            vec![
                "get_posts",
                "get_pages",
                "get_media",
                "get_plugins",
                "site_info",
                "get_post",
                "create_post",
                "update_post",
                "delete_post",
            ]
        );
    }

    #[test]
    fn test_tools_list_schemas_are_objects() {
        let value = handle_tools_list().unwrap();
        for tool in value["tools"].as_array().unwrap() {
            assert_eq!(tool["inputSchema"]["type"], "object");
            assert!(tool["inputSchema"]["properties"].is_object());
        }
    }

    #[test]
    fn test_initialize_reports_tool_capability() {
        let value = handle_initialize().unwrap();
        assert_eq!(value["serverInfo"]["name"], "wptools");
        assert!(value["capabilities"]["tools"].is_object());
    }
}
