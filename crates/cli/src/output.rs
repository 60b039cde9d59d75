//! Result rendering & exit codes
//!
//! JSON output uses the envelope `{"status":0,"result":true}` on success and
//! `{"status":1,"name":...,"message":...}` on failure.

use colored::Colorize;
use community_probe_core::AppError;
use serde::Serialize;
use std::fmt;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
/// Conventional exit status for SIGINT
pub const EXIT_CANCELED: u8 = 130;

pub const TIMEOUT_ERROR_NAME: &str = "CommunityExistsTimeoutError";
pub const CANCELED_ERROR_NAME: &str = "CommunityExistsCanceledError";
pub const CONFIG_ERROR_NAME: &str = "ConfigurationError";

/// Org details attached to poll failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgContext {
    pub username: String,
    #[serde(rename = "orgId", skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    pub name: String,
}

impl fmt::Display for OrgContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "while checking community '{}' on {}",
            self.name, self.username
        )
    }
}

#[derive(Serialize)]
struct SuccessEnvelope {
    status: u8,
    result: bool,
}

/// Classified terminal failure
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub status: u8,
    pub name: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<OrgContext>,
}

impl ErrorReport {
    pub fn from_error(err: &anyhow::Error) -> Self {
        let data = err.downcast_ref::<OrgContext>().cloned();

        let (status, name, message, actions) = match err.downcast_ref::<AppError>() {
            Some(e @ AppError::Timeout { .. }) => (
                EXIT_FAILURE,
                TIMEOUT_ERROR_NAME,
                e.to_string(),
                vec!["Try your command again with a longer --timelimit value".to_string()],
            ),
            Some(e @ AppError::Canceled { .. }) => {
                (EXIT_CANCELED, CANCELED_ERROR_NAME, e.to_string(), Vec::new())
            }
            Some(AppError::Config(msg)) => {
                (EXIT_FAILURE, CONFIG_ERROR_NAME, msg.clone(), Vec::new())
            }
            Some(AppError::Validation(msg)) => {
                (EXIT_FAILURE, "ValidationError", msg.clone(), Vec::new())
            }
            Some(e) => (EXIT_FAILURE, "Error", e.to_string(), Vec::new()),
            None => (EXIT_FAILURE, "Error", format!("{:#}", err), Vec::new()),
        };

        Self {
            status,
            name,
            message,
            actions,
            data,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.status
    }
}

pub fn render_success(exists: bool, json: bool) -> String {
    if json {
        serde_json::to_string_pretty(&SuccessEnvelope {
            status: EXIT_SUCCESS,
            result: exists,
        })
        .unwrap_or_else(|_| format!("{{\"status\":0,\"result\":{}}}", exists))
    } else if exists {
        "true".to_string()
    } else {
        "false".to_string()
    }
}

pub fn render_error(report: &ErrorReport, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(report)
            .unwrap_or_else(|_| format!("{{\"status\":{}}}", report.status));
    }

    let mut out = format!(
        "{} {}",
        format!("Error ({}):", report.name).red().bold(),
        report.message
    );
    if !report.actions.is_empty() {
        out.push_str(&format!("\n\n{}", "Try this:".yellow().bold()));
        for action in &report.actions {
            out.push_str(&format!("\n  • {}", action));
        }
    }
    out
}
