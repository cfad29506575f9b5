use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::header;
use uuid::Uuid;

use procdash_core::config::UpstreamConfig;
use procdash_core::{DashError, LoginCredentials, ProcessAction, ProcessMetadata, Result};

/// Characters that cannot appear raw inside a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encode a value for use as one upstream path segment.
///
/// Router extractors hand path parameters percent-decoded, so a process
/// name containing `/` or `?` would otherwise splice into a different
/// upstream endpoint when joined back into a URL.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

/// Lifecycle operations the supervisor exposes per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Stop,
    Restart,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::Stop => "stop",
            Lifecycle::Restart => "restart",
        }
    }
}

/// HTTP client for the externally-owned supervisor backend.
///
/// Every request forwards the browser's `Cookie` header verbatim; the
/// backend is the authority on whether the session is actually valid.
#[derive(Debug, Clone)]
pub struct Upstream {
    http: reqwest::Client,
    base_url: String,
}

impl Upstream {
    /// Build a client from the upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DashError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Join a path onto the configured base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        builder
            .send()
            .await
            .map_err(|e| DashError::Upstream(e.to_string()))
    }

    fn with_cookie(
        &self,
        builder: reqwest::RequestBuilder,
        cookie: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match cookie {
            Some(value) => builder.header(header::COOKIE, value),
            None => builder,
        }
    }

    /// `POST /api/auth/login`.
    pub async fn login(
        &self,
        cookie: Option<&str>,
        credentials: &LoginCredentials,
    ) -> Result<reqwest::Response> {
        let builder = self.http.post(self.url("/api/auth/login")).json(credentials);
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `GET /api/auth/logout`.
    pub async fn logout(&self, cookie: Option<&str>) -> Result<reqwest::Response> {
        let builder = self.http.get(self.url("/api/auth/logout"));
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `GET /api/dashboard/processes`.
    pub async fn list_processes(&self, cookie: Option<&str>) -> Result<reqwest::Response> {
        let builder = self.http.get(self.url("/api/dashboard/processes"));
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `GET /api/dashboard/process-by-id/{uuid}`.
    pub async fn process_by_id(
        &self,
        cookie: Option<&str>,
        uuid: Uuid,
    ) -> Result<reqwest::Response> {
        let builder = self
            .http
            .get(self.url(&format!("/api/dashboard/process-by-id/{}", uuid)));
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `GET /api/dashboard/process/{name}`.
    pub async fn process_metadata(
        &self,
        cookie: Option<&str>,
        name: &str,
    ) -> Result<reqwest::Response> {
        let builder = self
            .http
            .get(self.url(&format!("/api/dashboard/process/{}", encode_segment(name))));
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `PUT /api/dashboard/process/{name}/update-meta-data`.
    pub async fn update_metadata(
        &self,
        cookie: Option<&str>,
        name: &str,
        metadata: &ProcessMetadata,
    ) -> Result<reqwest::Response> {
        let builder = self
            .http
            .put(self.url(&format!(
                "/api/dashboard/process/{}/update-meta-data",
                encode_segment(name)
            )))
            .json(metadata);
        self.send(self.with_cookie(builder, cookie)).await
    }

    /// `POST /api/dashboard/process/{start,stop,restart}`.
    pub async fn lifecycle(
        &self,
        cookie: Option<&str>,
        action: Lifecycle,
        body: &ProcessAction,
    ) -> Result<reqwest::Response> {
        let builder = self
            .http
            .post(self.url(&format!("/api/dashboard/process/{}", action.as_str())))
            .json(body);
        self.send(self.with_cookie(builder, cookie)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream(base: &str) -> Upstream {
        Upstream::new(&UpstreamConfig {
            base_url: base.to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = upstream("http://127.0.0.1:3001");
        assert_eq!(
            client.url("/api/dashboard/processes"),
            "http://127.0.0.1:3001/api/dashboard/processes"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base() {
        let client = upstream("http://pm2.internal:4000/");
        assert_eq!(
            client.url("/api/auth/logout"),
            "http://pm2.internal:4000/api/auth/logout"
        );
    }

    #[test]
    fn test_segment_encoding_keeps_name_in_one_segment() {
        // A decoded slash in a process name must not splice into a
        // different upstream endpoint.
        assert_eq!(encode_segment("web/stop"), "web%2Fstop");
        assert_eq!(
            upstream("http://127.0.0.1:3001").url(&format!(
                "/api/dashboard/process/{}",
                encode_segment("web/stop")
            )),
            "http://127.0.0.1:3001/api/dashboard/process/web%2Fstop"
        );
    }

    #[test]
    fn test_segment_encoding_covers_reserved_characters() {
        assert_eq!(encode_segment("a?b"), "a%3Fb");
        assert_eq!(encode_segment("a#b"), "a%23b");
        assert_eq!(encode_segment("a%b"), "a%25b");
        assert_eq!(encode_segment("a b"), "a%20b");
        // Ordinary names pass through untouched.
        assert_eq!(encode_segment("api-server_2"), "api-server_2");
    }

    #[test]
    fn test_lifecycle_paths() {
        assert_eq!(Lifecycle::Start.as_str(), "start");
        assert_eq!(Lifecycle::Stop.as_str(), "stop");
        assert_eq!(Lifecycle::Restart.as_str(), "restart");
    }
}
