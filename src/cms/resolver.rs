use url::{ParseError, Position, Url};

use crate::config::CmsConfig;

/// Who is going to use a URL: this server, or the visitor's browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestContext {
    Server,
    Browser,
}

/// Single place that decides which CMS host a URL should point at.
pub trait EndpointResolver: Send + Sync {
    fn base_url(&self, context: RequestContext) -> &str;

    /// REST endpoint of a collection, e.g. `http://cms:1337/api/announcements`.
    fn api_url(&self, collection: &str, context: RequestContext) -> String {
        format!(
            "{}/api/{}",
            self.base_url(context).trim_end_matches('/'),
            collection.trim_start_matches('/')
        )
    }

    /// A media URL the visitor's browser can load.
    fn media_url(&self, raw: &str) -> String;
}

/// Resolves the CMS through two base URLs: an internal one reachable from the
/// server (a container hostname, say) and a public one for browsers.
#[derive(Debug, Clone)]
pub struct HostResolver {
    internal: String,
    public: String,
    internal_url: Option<Url>,
    public_url: Option<Url>,
}

impl HostResolver {
    pub fn new(internal: impl Into<String>, public: impl Into<String>) -> Self {
        let internal = internal.into().trim_end_matches('/').to_string();
        let public = public.into().trim_end_matches('/').to_string();

        Self {
            internal_url: parse_base(&internal),
            public_url: parse_base(&public),
            internal,
            public,
        }
    }

    pub fn from_config(config: &CmsConfig) -> Self {
        Self::new(config.internal_url.clone(), config.public_url.clone())
    }

    /// Path, query and fragment of `url` relative to the internal base, when
    /// `url` lives on the internal host.
    fn internal_path<'a>(&self, url: &'a Url) -> Option<&'a str> {
        let base = self.internal_url.as_ref()?;
        let same_origin = url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default();
        if !same_origin {
            return None;
        }

        let rest = &url[Position::BeforePath..];
        let prefix = base.path().trim_end_matches('/');
        match rest.strip_prefix(prefix) {
            Some(tail) if tail.is_empty() || tail.starts_with(&['/', '?', '#'][..]) => Some(tail),
            _ => None,
        }
    }

    fn on_public(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match self.public_url.as_ref().and_then(|base| base.join(path).ok()) {
            Some(url) => url.into(),
            None => format!("{}/{}", self.public, path),
        }
    }
}

/// Parses a base URL so that joining keeps its whole path.
fn parse_base(raw: &str) -> Option<Url> {
    let mut url = Url::parse(raw).ok()?;
    if url.cannot_be_a_base() {
        return None;
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Some(url)
}

impl EndpointResolver for HostResolver {
    fn base_url(&self, context: RequestContext) -> &str {
        match context {
            RequestContext::Server => &self.internal,
            RequestContext::Browser => &self.public,
        }
    }

    fn media_url(&self, raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return String::new();
        }

        // Protocol-relative URLs already point somewhere reachable.
        if raw.starts_with("//") {
            return raw.to_string();
        }

        match Url::parse(raw) {
            Ok(url) => match self.internal_path(&url) {
                Some(path) => self.on_public(path),
                None => raw.to_string(),
            },
            Err(ParseError::RelativeUrlWithoutBase) => self.on_public(raw),
            Err(e) => {
                tracing::debug!("Leaving unparseable media URL {:?} as is: {}", raw, e);
                raw.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> HostResolver {
        HostResolver::new("http://strapi:1337/", "https://cms.welovesousse.tn")
    }

    #[test]
    fn test_api_url_per_context() {
        let resolver = resolver();
        assert_eq!(
            resolver.api_url("announcements", RequestContext::Server),
            "http://strapi:1337/api/announcements"
        );
        assert_eq!(
            resolver.api_url("/contacts", RequestContext::Browser),
            "https://cms.welovesousse.tn/api/contacts"
        );
    }

    #[test]
    fn test_relative_media_uses_public_host() {
        assert_eq!(
            resolver().media_url("/uploads/beach.jpg"),
            "https://cms.welovesousse.tn/uploads/beach.jpg"
        );
        assert_eq!(
            resolver().media_url("uploads/beach.jpg"),
            "https://cms.welovesousse.tn/uploads/beach.jpg"
        );
    }

    #[test]
    fn test_internal_media_is_rewritten() {
        assert_eq!(
            resolver().media_url("http://strapi:1337/uploads/medina.png"),
            "https://cms.welovesousse.tn/uploads/medina.png"
        );
        // Same prefix, different host.
        assert_eq!(
            resolver().media_url("http://strapi:13370/uploads/x.png"),
            "http://strapi:13370/uploads/x.png"
        );
    }

    #[test]
    fn test_external_media_passes_through() {
        assert_eq!(
            resolver().media_url("https://img.youtube.com/vi/abc/0.jpg"),
            "https://img.youtube.com/vi/abc/0.jpg"
        );
        assert_eq!(resolver().media_url(""), "");
        assert_eq!(
            resolver().media_url("//cdn.example.org/a.png"),
            "//cdn.example.org/a.png"
        );
    }

    #[test]
    fn test_internal_media_matches_case_insensitively() {
        let resolver = HostResolver::new("http://strapi:1337", "https://cms.example.org");
        assert_eq!(
            resolver.media_url("HTTP://Strapi:1337/uploads/a.jpg"),
            "https://cms.example.org/uploads/a.jpg"
        );
    }

    #[test]
    fn test_internal_media_keeps_query() {
        assert_eq!(
            resolver().media_url("http://strapi:1337/uploads/a.jpg?format=webp"),
            "https://cms.welovesousse.tn/uploads/a.jpg?format=webp"
        );
        // Other scheme on the same host is not the internal endpoint.
        assert_eq!(
            resolver().media_url("https://strapi:1337/uploads/a.jpg"),
            "https://strapi:1337/uploads/a.jpg"
        );
    }

    #[test]
    fn test_public_base_with_path_prefix() {
        let resolver = HostResolver::new("http://strapi:1337/cms", "https://example.org/cms/");
        assert_eq!(
            resolver.media_url("/uploads/a.jpg"),
            "https://example.org/cms/uploads/a.jpg"
        );
        assert_eq!(
            resolver.media_url("http://strapi:1337/cms/uploads/a.jpg"),
            "https://example.org/cms/uploads/a.jpg"
        );
        assert_eq!(
            resolver.media_url("http://strapi:1337/other/a.jpg"),
            "http://strapi:1337/other/a.jpg"
        );
    }
}
