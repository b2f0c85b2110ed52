//! Release feed abstraction for upstream release listings.
//!
//! The [`ReleaseFeed`] trait decouples the check command from the HTTP
//! transport. Tests use a scripted feed that returns fixed descriptors
//! without touching the network.

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::ACCEPT;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::core::types::ReleaseDescriptor;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("release-poller/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching the release feed.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    #[error("release feed request failed: {0}")]
    Transport(String),
    #[error("release feed returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("release feed payload is not a release list: {0}")]
    Parse(String),
}

/// Source of release descriptors, newest first.
pub trait ReleaseFeed {
    fn fetch_releases(&self) -> Result<Vec<ReleaseDescriptor>, FeedError>;
}

/// Release feed backed by the GitHub releases REST endpoint.
#[derive(Debug, Clone)]
pub struct GithubReleaseFeed {
    http: Client,
    url: String,
    token: Option<String>,
}

impl GithubReleaseFeed {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self, FeedError> {
        Self::with_client(Client::builder(), url, token)
    }

    fn with_client(
        builder: ClientBuilder,
        url: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, FeedError> {
        let http = builder
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
            token,
        })
    }
}

impl ReleaseFeed for GithubReleaseFeed {
    #[instrument(skip_all, fields(url = %self.url, authenticated = self.token.is_some()))]
    fn fetch_releases(&self) -> Result<Vec<ReleaseDescriptor>, FeedError> {
        debug!("requesting release feed");
        let mut request = self.http.get(&self.url).header(ACCEPT, GITHUB_ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "release feed returned error");
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let releases = parse_releases(&body)?;
        debug!(count = releases.len(), "release feed fetched");
        Ok(releases)
    }
}

/// Parse a releases payload (JSON array of release objects).
pub fn parse_releases(body: &str) -> Result<Vec<ReleaseDescriptor>, FeedError> {
    serde_json::from_str(body).map_err(|e| FeedError::Parse(e.to_string()))
}

/// Read a feed credential from `var`, ignoring unset or blank values.
pub fn token_from_env(var: &str) -> Option<String> {
    normalize_token(std::env::var(var).ok())
}

fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    /// Serve one HTTP response on a local port; the handle yields the
    /// lowercased request head.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}/releases", listener.local_addr().expect("addr"));
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut chunk).expect("read request");
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            String::from_utf8_lossy(&request).to_lowercase()
        });
        (url, handle)
    }

    /// Feed that ignores proxy environment so local listeners are reached directly.
    fn local_feed(url: String, token: Option<String>) -> GithubReleaseFeed {
        GithubReleaseFeed::with_client(Client::builder().no_proxy(), url, token).expect("feed")
    }

    const GITHUB_PAYLOAD: &str = r#"[
        {
            "url": "https://api.github.com/repos/comfyanonymous/ComfyUI/releases/3",
            "tag_name": "v0.3.10-rc1",
            "name": "v0.3.10 release candidate",
            "draft": false,
            "prerelease": true,
            "assets": []
        },
        {
            "url": "https://api.github.com/repos/comfyanonymous/ComfyUI/releases/2",
            "tag_name": "v0.3.9",
            "name": "v0.3.9",
            "draft": false,
            "prerelease": false,
            "assets": [{"name": "ComfyUI_windows_portable.7z"}]
        }
    ]"#;

    #[test]
    fn parses_github_release_payload() {
        let releases = parse_releases(GITHUB_PAYLOAD).expect("parse");
        assert_eq!(
            releases,
            vec![
                ReleaseDescriptor {
                    tag_name: "v0.3.10-rc1".to_string(),
                    prerelease: true,
                },
                ReleaseDescriptor {
                    tag_name: "v0.3.9".to_string(),
                    prerelease: false,
                },
            ]
        );
    }

    #[test]
    fn empty_payload_is_empty_list() {
        assert!(parse_releases("[]").expect("parse").is_empty());
    }

    #[test]
    fn error_object_is_parse_error() {
        let err = parse_releases(r#"{"message": "API rate limit exceeded"}"#)
            .expect_err("object is not a list");
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn status_error_mentions_code() {
        let err = FeedError::Status {
            status: 403,
            body: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "release feed returned HTTP 403: rate limited"
        );
    }

    #[test]
    fn fetch_sends_auth_and_accept_headers() {
        let (url, server) = serve_once("200 OK", GITHUB_PAYLOAD);
        let feed = local_feed(url, Some("secret-token".to_string()));

        let releases = feed.fetch_releases().expect("fetch");

        let request = server.join().expect("server thread");
        assert!(request.starts_with("get /releases "));
        assert!(request.contains("authorization: bearer secret-token\r\n"));
        assert!(request.contains("accept: application/vnd.github.v3+json\r\n"));
        assert!(request.contains("user-agent: release-poller/"));
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1].tag_name, "v0.3.9");
    }

    #[test]
    fn fetch_without_token_sends_no_authorization() {
        let (url, server) = serve_once("200 OK", "[]");
        let feed = local_feed(url, None);

        assert!(feed.fetch_releases().expect("fetch").is_empty());

        let request = server.join().expect("server thread");
        assert!(!request.contains("authorization:"));
    }

    #[test]
    fn fetch_maps_error_status() {
        let (url, server) = serve_once("403 Forbidden", r#"{"message":"rate limited"}"#);
        let feed = local_feed(url, None);

        let err = feed.fetch_releases().expect_err("403");
        server.join().expect("server thread");

        match err {
            FeedError::Status { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn fetch_maps_non_list_body_to_parse_error() {
        let (url, server) = serve_once("200 OK", r#"{"message":"Not Found"}"#);
        let feed = local_feed(url, None);

        let err = feed.fetch_releases().expect_err("object body");
        server.join().expect("server thread");

        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn fetch_maps_refused_connection_to_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let url = format!("http://{}/releases", listener.local_addr().expect("addr"));
        drop(listener);
        let feed = local_feed(url, None);

        let err = feed.fetch_releases().expect_err("nothing listening");

        assert!(matches!(err, FeedError::Transport(_)));
    }

    #[test]
    fn blank_or_unset_token_is_none() {
        assert_eq!(normalize_token(None), None);
        assert_eq!(normalize_token(Some(String::new())), None);
        assert_eq!(normalize_token(Some("  \n".to_string())), None);
        assert_eq!(
            normalize_token(Some(" ghp_abc \n".to_string())),
            Some("ghp_abc".to_string())
        );
    }

    #[test]
    fn unset_env_var_yields_no_token() {
        assert_eq!(
            token_from_env("RELEASE_POLLER_TEST_TOKEN_THAT_IS_NEVER_SET"),
            None
        );
    }
}
