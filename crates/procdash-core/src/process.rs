use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `{ "data": ... }` wrapper the supervisor API puts around payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One row of the process list.
///
/// Unknown fields are kept in `extra` so the proxy can re-serialize the
/// payload without dropping anything the backend added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub process_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    pub status: ProcessStatus,
    #[serde(default)]
    pub memory: u64,
    #[serde(default)]
    pub cpu: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Supervisor-reported process state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProcessStatus {
    Online,
    Stopped,
    Other(String),
}

impl ProcessStatus {
    /// Whether the process is currently running.
    pub fn is_online(&self) -> bool {
        matches!(self, ProcessStatus::Online)
    }

    /// Human-readable label, matching the dashboard's rendering.
    pub fn label(&self) -> &str {
        match self {
            ProcessStatus::Online => "Running",
            _ => "Stopped",
        }
    }
}

impl From<String> for ProcessStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "online" => ProcessStatus::Online,
            "stopped" => ProcessStatus::Stopped,
            _ => ProcessStatus::Other(s),
        }
    }
}

impl From<ProcessStatus> for String {
    fn from(status: ProcessStatus) -> Self {
        match status {
            ProcessStatus::Online => "online".to_string(),
            ProcessStatus::Stopped => "stopped".to_string(),
            ProcessStatus::Other(s) => s,
        }
    }
}

/// Deployment metadata attached to a process by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub public_ip: String,
    #[serde(default)]
    pub private_ip: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Login form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginOutcome {
    pub success: bool,
}

/// Generic error body surfaced to the view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Body of a start/stop/restart request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessAction {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_process_list() {
        let json = r#"{
            "data": [
                {
                    "process_id": 0,
                    "name": "api-server",
                    "uuid": "7f3c5a1e-9d2b-4a8f-b6c1-0e4d5f6a7b8c",
                    "port": 3000,
                    "status": "online",
                    "memory": 52428800,
                    "cpu": 1.5,
                    "domain_name": "api.example.com",
                    "pm_uptime": 1716823945000
                },
                {
                    "process_id": 1,
                    "name": "worker",
                    "status": "stopped",
                    "memory": 0,
                    "cpu": 0
                }
            ]
        }"#;

        let envelope: Envelope<Vec<ProcessSummary>> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.data.len(), 2);

        let api = &envelope.data[0];
        assert_eq!(api.name, "api-server");
        assert_eq!(api.port, Some(3000));
        assert!(api.status.is_online());
        assert_eq!(api.status.label(), "Running");
        // Unknown fields survive the typed pass-through.
        assert!(api.extra.contains_key("pm_uptime"));

        let worker = &envelope.data[1];
        assert_eq!(worker.status, ProcessStatus::Stopped);
        assert!(worker.uuid.is_none());
        assert!(worker.domain_name.is_none());
    }

    #[test]
    fn test_reserialize_keeps_extra_fields() {
        let json = r#"{"process_id":3,"name":"cron","status":"online","memory":1024,"cpu":0.1,"pm_id":3}"#;
        let summary: ProcessSummary = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&summary).unwrap();
        assert_eq!(back["pm_id"], 3);
        assert_eq!(back["status"], "online");
        // Absent optionals stay absent.
        assert!(back.get("port").is_none());
    }

    #[test]
    fn test_unexpected_status_preserved() {
        let status = ProcessStatus::from("errored".to_string());
        assert_eq!(status, ProcessStatus::Other("errored".to_string()));
        assert!(!status.is_online());
        assert_eq!(status.label(), "Stopped");
        assert_eq!(String::from(status), "errored");
    }

    #[test]
    fn test_metadata_type_rename() {
        let json = r#"{"domain_name":"a.example.com","public_ip":"203.0.113.9","private_ip":"10.0.0.9","type":"web"}"#;
        let meta: ProcessMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.kind, "web");

        let out = serde_json::to_value(&meta).unwrap();
        assert_eq!(out["type"], "web");
        assert!(out.get("kind").is_none());
    }

    #[test]
    fn test_metadata_missing_fields_default_empty() {
        let meta: ProcessMetadata = serde_json::from_str("{}").unwrap();
        assert!(meta.domain_name.is_empty());
        assert!(meta.kind.is_empty());
    }

    #[test]
    fn test_login_bodies() {
        let creds: LoginCredentials =
            serde_json::from_str(r#"{"email":"admin@example.com","password":"hunter2"}"#).unwrap();
        assert_eq!(creds.email, "admin@example.com");

        let outcome: LoginOutcome = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(outcome.success);

        let err: ErrorBody = serde_json::from_str(r#"{"error":"Invalid credentials"}"#).unwrap();
        assert_eq!(err.error, "Invalid credentials");
    }
}
