use axum::{
    extract::Query,
    response::Html,
};
use serde::Deserialize;
use uuid::Uuid;

/// Base HTML template.
fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Process Dashboard</title>
    <link rel="stylesheet" href="/assets/styles.css">
    <script src="/assets/main.js" defer></script>
</head>
<body>
{content}
</body>
</html>"#,
        title = title,
        content = content,
    )
}

/// Welcome page at `/`.
pub async fn index() -> Html<String> {
    let content = r#"
    <main class="centered">
        <div class="card welcome-card">
            <h1>Welcome to the Process Dashboard</h1>
            <p class="subtitle">
                Manage and monitor your supervised processes. Log in for real-time
                status, memory &amp; CPU usage, domain mapping, and more.
            </p>
            <div class="button-row">
                <a href="/auth/login" class="btn btn-primary">Login to Continue</a>
                <a href="/dashboard/home" class="btn btn-outline">Already Logged In? Click to Continue</a>
            </div>
        </div>
    </main>
    "#;

    Html(base_template("Welcome", content))
}

/// Login page at `/auth/login`.
pub async fn login() -> Html<String> {
    let content = r#"
    <main class="centered">
        <form id="login-form" class="card login-card">
            <h2>Admin Login</h2>
            <div id="login-error" class="banner banner-error" hidden></div>
            <label for="email">Email</label>
            <input type="email" id="email" required placeholder="admin@example.com">
            <label for="password">Password</label>
            <input type="password" id="password" required placeholder="••••••••">
            <button type="submit" id="login-submit" class="btn btn-primary">Login</button>
        </form>
    </main>
    "#;

    Html(base_template("Login", content))
}

/// Process list page at `/dashboard/home`.
pub async fn home() -> Html<String> {
    let content = r#"
    <header class="topbar">
        <h1>Process Dashboard</h1>
        <button id="logout-btn" class="btn btn-ghost">Logout</button>
    </header>
    <main class="page">
        <div id="notification" class="banner" hidden></div>
        <div class="toolbar">
            <button id="refresh-btn" class="btn btn-primary">Refresh Processes</button>
        </div>
        <div id="error" class="banner banner-error" hidden></div>
        <div class="card table-card">
            <table class="process-table">
                <thead>
                    <tr>
                        <th>ID</th>
                        <th>Name</th>
                        <th>Port</th>
                        <th>Status</th>
                        <th>Memory</th>
                        <th>CPU</th>
                        <th>Domain</th>
                        <th>Actions</th>
                    </tr>
                </thead>
                <tbody id="process-tbody">
                    <tr class="empty-row"><td colspan="8">Loading processes...</td></tr>
                </tbody>
            </table>
        </div>
    </main>

    <!-- Update Metadata Modal -->
    <div id="metadata-modal" class="modal" hidden>
        <div class="modal-content">
            <div class="modal-header">
                <h2 id="metadata-modal-title">Update Metadata</h2>
                <button class="modal-close" id="metadata-close">&times;</button>
            </div>
            <div class="modal-body">
                <label for="meta-domain">Domain Name</label>
                <input id="meta-domain" placeholder="example.com">
                <label for="meta-public-ip">Public IP</label>
                <input id="meta-public-ip" placeholder="203.0.113.9">
                <label for="meta-private-ip">Private IP</label>
                <input id="meta-private-ip" placeholder="10.0.0.1">
                <label for="meta-type">Type</label>
                <input id="meta-type" placeholder="web, api, worker, etc.">
            </div>
            <div class="modal-footer">
                <button id="metadata-cancel" class="btn btn-ghost">Cancel</button>
                <button id="metadata-save" class="btn btn-primary">Save Changes</button>
            </div>
        </div>
    </div>
    "#;

    Html(base_template("Processes", content))
}

/// Query string for the details page.
#[derive(Debug, Deserialize)]
pub struct DetailsQuery {
    pub uuid: Option<String>,
}

/// Process detail page at `/dashboard/details?uuid=...`.
///
/// The uuid is parsed before it is interpolated into the page, so
/// arbitrary query input never reaches the HTML.
pub async fn details(Query(query): Query<DetailsQuery>) -> Html<String> {
    let uuid = query.uuid.as_deref().and_then(|s| Uuid::parse_str(s).ok());

    let content = match uuid {
        Some(uuid) => format!(
            r#"
    <header class="topbar">
        <a href="/dashboard/home" class="btn btn-ghost">&larr; Back</a>
        <h1>Process Details</h1>
        <button id="detail-refresh" class="btn btn-ghost">Refresh</button>
    </header>
    <main class="page">
        <div id="error" class="banner banner-error" hidden></div>
        <div class="card" id="detail-card">
            <div class="detail-rows" id="detail-rows">
                <p class="empty-state">Loading process details...</p>
            </div>
        </div>
    </main>
    <script>window.PROCESS_UUID = '{uuid}';</script>
    "#,
            uuid = uuid
        ),
        None => r#"
    <main class="centered">
        <div class="card error-card">
            <h2>Error Loading Process Details</h2>
            <p>UUID not found</p>
            <a href="/dashboard/home" class="btn btn-primary">&larr; Back to Dashboard</a>
        </div>
    </main>
    "#
        .to_string(),
    };

    Html(base_template("Process Details", &content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_template() {
        let html = base_template("Test", "<p>Content</p>");
        assert!(html.contains("Test - Process Dashboard"));
        assert!(html.contains("<p>Content</p>"));
        assert!(html.contains("/assets/styles.css"));
    }

    #[tokio::test]
    async fn test_index_page() {
        let Html(html) = index().await;
        assert!(html.contains("Login to Continue"));
        assert!(html.contains("/auth/login"));
        assert!(html.contains("/dashboard/home"));
    }

    #[tokio::test]
    async fn test_login_page() {
        let Html(html) = login().await;
        assert!(html.contains("id=\"login-form\""));
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("type=\"password\""));
    }

    #[tokio::test]
    async fn test_home_page_structure() {
        let Html(html) = home().await;
        assert!(html.contains("id=\"process-tbody\""));
        assert!(html.contains("id=\"metadata-modal\""));
        assert!(html.contains("id=\"logout-btn\""));
    }

    #[tokio::test]
    async fn test_details_page_with_valid_uuid() {
        let uuid = "7f3c5a1e-9d2b-4a8f-b6c1-0e4d5f6a7b8c";
        let Html(html) = details(Query(DetailsQuery {
            uuid: Some(uuid.to_string()),
        }))
        .await;
        assert!(html.contains(&format!("window.PROCESS_UUID = '{}'", uuid)));
    }

    #[tokio::test]
    async fn test_details_page_missing_uuid() {
        let Html(html) = details(Query(DetailsQuery { uuid: None })).await;
        assert!(html.contains("UUID not found"));
    }

    #[tokio::test]
    async fn test_details_page_rejects_malformed_uuid() {
        let hostile = "<script>alert(1)</script>";
        let Html(html) = details(Query(DetailsQuery {
            uuid: Some(hostile.to_string()),
        }))
        .await;
        assert!(!html.contains(hostile));
        assert!(html.contains("UUID not found"));
    }
}
