use serde::{Deserialize, Serialize};

/// Route guard configuration.
///
/// Passed explicitly into [`RouteGuard::new`] rather than living as a
/// module-level constant, so tests can run with alternate path sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Name of the session cookie. Presence (non-empty value) is all the
    /// guard checks; the value is never validated here. The backend owns
    /// real authorization.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Where unauthenticated navigations are redirected.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Paths that never require the cookie. Matched by exact string
    /// equality: no prefix matching, no trailing-slash normalization.
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,

    /// Infrastructure prefixes (static assets, favicon, the API proxy,
    /// the health endpoint) that bypass the guard entirely. Matched by
    /// prefix, checked before the allow/redirect decision.
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            login_path: default_login_path(),
            public_paths: default_public_paths(),
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

fn default_cookie_name() -> String {
    "admincookie".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec!["/auth/login".to_string(), "/".to_string()]
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "/assets/".to_string(),
        "/api/".to_string(),
        "/favicon.ico".to_string(),
        "/health".to_string(),
    ]
}

/// Outcome of a single navigation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Forward the request unchanged.
    Allow,
    /// Redirect the browser to the given path.
    RedirectTo(String),
}

/// Per-navigation access decision.
///
/// Stateless and synchronous: every check is a pure function of the
/// requested path, the cookie presence flag, and the immutable config.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    config: GuardConfig,
}

impl RouteGuard {
    /// Create a guard from the given configuration.
    pub fn new(config: GuardConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// The configured session cookie name.
    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    /// Whether the path is excluded from interception altogether.
    ///
    /// Prefix match, evaluated before [`decide`](Self::decide) is even
    /// consulted.
    pub fn is_exempt(&self, path: &str) -> bool {
        self.config
            .skip_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// The allow/redirect decision for an intercepted navigation.
    ///
    /// Public-path matching is exact string equality: `/auth/login/`
    /// (trailing slash) is a different path from `/auth/login` and does
    /// NOT match the allowlist. This mirrors the observed system; it is
    /// deliberately not normalized.
    pub fn decide(&self, requested_path: &str, has_auth_cookie: bool) -> RouteDecision {
        if self
            .config
            .public_paths
            .iter()
            .any(|p| p == requested_path)
        {
            return RouteDecision::Allow;
        }
        if has_auth_cookie {
            return RouteDecision::Allow;
        }
        RouteDecision::RedirectTo(self.config.login_path.clone())
    }

    /// Full check for an incoming navigation: exemption first, then the
    /// allow/redirect decision.
    pub fn check(&self, requested_path: &str, has_auth_cookie: bool) -> RouteDecision {
        if self.is_exempt(requested_path) {
            return RouteDecision::Allow;
        }
        self.decide(requested_path, has_auth_cookie)
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(GuardConfig::default())
    }
}
