//! Builds the combined alert body sent to every destination.

use crate::constants::alerts::ALERT_SUBJECT;

const REMEDIATION_TITLE: &str = "Steps to fix:";

const REMEDIATION_STEPS: [&str; 4] = [
    "1. Go to Azure Portal → App registrations → Your app → Certificates & secrets",
    "2. Create a new client secret (if it expired)",
    "3. Update the secret in the mail-server integration settings",
    "4. Re-authorize the mail servers",
];

/// One alert in two renditions: HTML for rich sinks, plain text for the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBody {
    pub html: String,
    pub text: String,
}

/// Callers never pass an empty list; the orchestrator returns early instead.
pub fn compose(messages: &[String]) -> AlertBody {
    let escaped: Vec<String> = messages.iter().map(|m| html_escape(m)).collect();

    let html = format!(
        "<b>{}</b><br/><br/>{}<br/><br/><b>{}</b><br/>{}",
        html_escape(ALERT_SUBJECT),
        escaped.join("<br/>"),
        REMEDIATION_TITLE,
        REMEDIATION_STEPS.join("<br/>"),
    );

    let text = format!(
        "{}\n\n{}\n\n{}\n{}",
        ALERT_SUBJECT,
        messages.join("\n"),
        REMEDIATION_TITLE,
        REMEDIATION_STEPS.join("\n"),
    );

    AlertBody { html, text }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
