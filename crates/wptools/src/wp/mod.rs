use crate::prelude::{println, *};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub mod media;
pub mod pages;
pub mod plugins;
pub mod posts;
pub mod site;

/// Fixed timeout applied to every request against the WordPress API.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Route prefix for the v2 REST API, appended to the site URL.
const REST_BASE: &str = "/wp-json/wp/v2";

/// WordPress module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "wp")]
#[command(about = "WordPress (wp-json REST API) operations")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Post operations
    #[clap(subcommand)]
    Posts(posts::Commands),

    /// List pages
    Pages(pages::ListOptions),

    /// List media library items
    Media(media::ListOptions),

    /// List installed plugins (requires authentication)
    Plugins(plugins::ListOptions),

    /// Show site information
    Site(site::SiteOptions),
}

/// WordPress connection settings from environment variables
#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub url: String,
    pub user: Option<String>,
    pub app_password: Option<String>,
}

impl WordPressConfig {
    pub fn new(
        url: impl Into<String>,
        user: Option<String>,
        app_password: Option<String>,
    ) -> Result<Self, Error> {
        let url = url.into();
        if url.is_empty() {
            return Err(Error::Config(
                "WORDPRESS_URL environment variable is required".to_string(),
            ));
        }

        Ok(Self {
            url,
            user,
            app_password,
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Error> {
        Self::new(
            std::env::var("WORDPRESS_URL").unwrap_or_default(),
            std::env::var("WORDPRESS_USER").ok().filter(|v| !v.is_empty()),
            std::env::var("WORDPRESS_APP_PASSWORD")
                .ok()
                .filter(|v| !v.is_empty()),
        )
    }

    /// Whether both credential halves are present and non-empty.
    pub fn has_auth(&self) -> bool {
        matches!(
            (&self.user, &self.app_password),
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty()
        )
    }

    /// Base URL for the v2 REST API.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), REST_BASE)
    }

    /// Bare wp-json root, used only for site information.
    pub fn root_api(&self) -> String {
        format!("{}/wp-json", self.url.trim_end_matches('/'))
    }
}

/// HTTP client for the WordPress REST API. Constructed once and shared;
/// the inner reqwest client pools connections and is safe for concurrent
/// use, so tool calls may be dispatched concurrently against one instance.
#[derive(Debug, Clone)]
pub struct WordPressClient {
    config: WordPressConfig,
    http: reqwest::Client,
}

impl WordPressClient {
    pub fn new(config: WordPressConfig) -> Result<Self, Error> {
        use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &WordPressConfig {
        &self.config
    }

    /// Basic auth header when credentials are configured. Operations that
    /// require authentication fail here, before any request is issued.
    fn auth_header(
        &self,
        require_auth: bool,
    ) -> Result<Option<reqwest::header::HeaderValue>, Error> {
        use base64::Engine;

        if self.config.has_auth() {
            let user = self.config.user.as_deref().unwrap_or_default();
            let password = self.config.app_password.as_deref().unwrap_or_default();
            let encoded =
                base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
            let value = reqwest::header::HeaderValue::from_str(&format!("Basic {encoded}"))
                .map_err(|e| Error::Config(format!("Invalid credential characters: {e}")))?;
            Ok(Some(value))
        } else if require_auth {
            Err(Error::Auth(
                "WORDPRESS_USER and WORDPRESS_APP_PASSWORD must be set for this operation"
                    .to_string(),
            ))
        } else {
            Ok(None)
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base(), path)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        require_auth: bool,
    ) -> Result<T, Error> {
        let auth = self.auth_header(require_auth)?;

        let mut request = self.http.get(url).query(query);
        if let Some(value) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("GET {url} failed: {e}")))?;

        Self::read_json(response).await
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
        require_auth: bool,
    ) -> Result<T, Error> {
        let auth = self.auth_header(require_auth)?;

        let mut request = self.http.post(url).json(body);
        if let Some(value) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("POST {url} failed: {e}")))?;

        Self::read_json(response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
        require_auth: bool,
    ) -> Result<T, Error> {
        let auth = self.auth_header(require_auth)?;

        let mut request = self.http.delete(url).query(query);
        if let Some(value) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(format!("DELETE {url} failed: {e}")))?;

        Self::read_json(response).await
    }

    /// Non-2xx responses become [`Error::Http`] carrying status and body.
    async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Network(format!("Failed to parse WordPress response: {e}")))
    }
}

/// Build a client from the process environment.
pub fn client_from_env() -> Result<WordPressClient, Error> {
    WordPressClient::new(WordPressConfig::from_env()?)
}

/// Module entry point
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Running WordPress module...");
    }

    match app.command {
        Commands::Posts(cmd) => posts::run(cmd, global).await,
        Commands::Pages(options) => pages::run(options, global).await,
        Commands::Media(options) => media::run(options, global).await,
        Commands::Plugins(options) => plugins::run(options, global).await,
        Commands::Site(options) => site::run(options, global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Error;

    fn config(url: &str, user: Option<&str>, password: Option<&str>) -> WordPressConfig {
        WordPressConfig {
            url: url.to_string(),
            user: user.map(str::to_string),
            app_password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_url_is_rejected() {
        let result = WordPressConfig::new("", None, None);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_api_base_trims_trailing_slash() {
        let config = config("https://example.com/", None, None);
        assert_eq!(config.api_base(), "https://example.com/wp-json/wp/v2");
    }

    #[test]
    fn test_api_base_without_trailing_slash() {
        let config = config("https://example.com", None, None);
        assert_eq!(config.api_base(), "https://example.com/wp-json/wp/v2");
    }

    #[test]
    fn test_root_api_is_not_the_v2_base() {
        let config = config("https://example.com/", None, None);
        assert_eq!(config.root_api(), "https://example.com/wp-json");
        assert!(!config.root_api().contains("/wp/v2"));
    }

    #[test]
    fn test_has_auth_requires_both_halves() {
        assert!(!config("https://example.com", None, None).has_auth());
        assert!(!config("https://example.com", Some("admin"), None).has_auth());
        assert!(!config("https://example.com", None, Some("secret")).has_auth());
        assert!(!config("https://example.com", Some(""), Some("secret")).has_auth());
        assert!(config("https://example.com", Some("admin"), Some("secret")).has_auth());
    }

    #[test]
    fn test_auth_header_absent_without_credentials() {
        let client = WordPressClient::new(config("https://example.com", None, None)).unwrap();
        let header = client.auth_header(false).unwrap();
        assert!(header.is_none());
    }

    #[test]
    fn test_auth_header_fails_fast_when_required() {
        let client = WordPressClient::new(config("https://example.com", None, None)).unwrap();
        let result = client.auth_header(true);
        assert!(matches!(result, Err(Error::Auth(_))));
    }

    #[test]
    fn test_auth_header_encodes_basic_credentials() {
        let client =
            WordPressClient::new(config("https://example.com", Some("user"), Some("pass")))
                .unwrap();
        let header = client.auth_header(true).unwrap().unwrap();
        assert_eq!(header.to_str().unwrap(), "Basic dXNlcjpwYXNz");
    }
}
