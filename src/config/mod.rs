use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub cms: CmsConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

/// Where the headless CMS lives. `internal_url` is what this server talks
/// to (often a container hostname); `public_url` is what browsers can reach.
#[derive(Debug, Deserialize, Clone)]
pub struct CmsConfig {
    pub internal_url: String,
    pub public_url: String,
    pub api_token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub banner_rotation_secs: u64,
    pub csrf_secret: String,
    pub dismissal_cookie: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "We Love Sousse".to_string(),
            banner_rotation_secs: 10,
            csrf_secret: "change-me-in-production".to_string(),
            dismissal_cookie: "dismissed_announcements".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.base_url", "http://localhost:3000")?
            .set_default("cms.internal_url", "http://localhost:1337")?
            .set_default("cms.public_url", "http://localhost:1337")?
            .set_default("cms.timeout_secs", 10)?
            .set_default("site.name", "We Love Sousse")?
            .set_default("site.banner_rotation_secs", 10)?
            .set_default("site.csrf_secret", "change-me-in-production")?
            .set_default("site.dismissal_cookie", "dismissed_announcements")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with SOUSSE__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("SOUSSE").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                base_url: "http://localhost:3000".to_string(),
            },
            cms: CmsConfig {
                internal_url: "http://localhost:1337".to_string(),
                public_url: "http://localhost:1337".to_string(),
                api_token: None,
                timeout_secs: 10,
            },
            site: SiteConfig::default(),
        }
    }
}
