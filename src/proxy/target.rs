use hyper::Uri;
use std::fmt::Display;
use thiserror::Error;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid request format. Expected /{host}/{path}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("missing host segment in path '{0}'")]
    MissingHost(String),
}

/// Where an inbound `/{host}/{path}?{query}` request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub query: Option<String>,
}

impl Target {
    /// Split the inbound path into the origin host and the path forwarded to it.
    ///
    /// The raw path is used as received, so percent-encoded bytes are not altered.
    pub fn resolve(scheme: &str, uri: &Uri) -> Result<Self, TargetError> {
        let raw_path = uri.path();
        let trimmed = raw_path.strip_prefix('/').unwrap_or(raw_path);
        let (host, rest) = match trimmed.split_once('/') {
            Some((host, rest)) => (host, rest),
            None => (trimmed, ""),
        };
        if host.is_empty() {
            return Err(TargetError::MissingHost(raw_path.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: format!("/{}", rest),
            query: uri.query().map(str::to_string),
        })
    }

    pub fn url(&self) -> String {
        match &self.query {
            Some(query) => format!("{}://{}{}?{}", self.scheme, self.host, self.path, query),
            None => format!("{}://{}{}", self.scheme, self.host, self.path),
        }
    }
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(uri: &str) -> Result<Target, TargetError> {
        Target::resolve("https", &uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_resolve_host_and_path() {
        let target = resolve("/example.com/api/v1/users").unwrap();
        assert_eq!(target.host, "example.com");
        assert_eq!(target.path, "/api/v1/users");
        assert_eq!(target.query, None);
        assert_eq!(target.url(), "https://example.com/api/v1/users");
    }

    #[test]
    fn test_resolve_host_with_port() {
        let target = resolve("/api.example.com:8443/v1/users?active=true").unwrap();
        assert_eq!(target.host, "api.example.com:8443");
        assert_eq!(target.path, "/v1/users");
        assert_eq!(target.url(), "https://api.example.com:8443/v1/users?active=true");
    }

    #[test]
    fn test_resolve_host_only_defaults_to_root() {
        assert_eq!(resolve("/example.com").unwrap().path, "/");
        assert_eq!(resolve("/example.com/").unwrap().path, "/");
    }

    #[test]
    fn test_resolve_keeps_trailing_slash_and_encoding() {
        let target = resolve("/example.com/a%20b/c/").unwrap();
        assert_eq!(target.path, "/a%20b/c/");
    }

    #[test]
    fn test_resolve_missing_host() {
        assert_eq!(resolve("/"), Err(TargetError::MissingHost("/".to_string())));
        assert!(resolve("/?x=1").is_err());
    }

    #[test]
    fn test_query_passed_verbatim() {
        let target = resolve("/h/p?b=2&a=1&a=3&flag").unwrap();
        assert_eq!(target.query.as_deref(), Some("b=2&a=1&a=3&flag"));
        assert_eq!(target.url(), "https://h/p?b=2&a=1&a=3&flag");

        let target = resolve("/h/p?q=%2Fx%20y").unwrap();
        assert_eq!(target.url(), "https://h/p?q=%2Fx%20y");
    }

    #[test]
    fn test_no_query_has_no_question_mark() {
        assert_eq!(resolve("/h/p").unwrap().url(), "https://h/p");
    }

    #[test]
    fn test_empty_query_keeps_question_mark() {
        let target = resolve("/h/p?").unwrap();
        assert_eq!(target.query.as_deref(), Some(""));
        assert_eq!(target.url(), "https://h/p?");
    }

    #[test]
    fn test_scheme_is_fixed_by_caller() {
        let target = Target::resolve("http", &"/localhost:8080/x".parse::<Uri>().unwrap()).unwrap();
        assert_eq!(target.to_string(), "http://localhost:8080/x");
    }
}
