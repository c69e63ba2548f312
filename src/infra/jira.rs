use std::time::Duration;

use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::Deserialize;

use crate::domain::ticket::{Ticket, TicketFilter};
use crate::error::{AppError, AppResult};
use crate::services::IssueTrackerService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct JiraClient {
    http: Client,
    base_url: Option<String>,
    email: Option<String>,
    token: Option<String>,
}

impl JiraClient {
    pub fn new(base_url: Option<String>, email: Option<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            email,
            token,
        }
    }

    fn api_details(&self) -> AppResult<(&str, &str, &str)> {
        let base_url = self.base_url.as_deref().ok_or_else(|| {
            AppError::Configuration("Jira base URL not configured; run 'baton setup'".to_string())
        })?;
        let email = self.email.as_deref().ok_or_else(|| {
            AppError::Configuration("Jira email not configured; run 'baton setup'".to_string())
        })?;
        let token = self.token.as_deref().ok_or_else(|| {
            AppError::Configuration("Jira API token not configured; run 'baton setup'".to_string())
        })?;
        Ok((base_url, email, token))
    }

    fn auth_header(email: &str, token: &str) -> String {
        let credentials = format!("{email}:{token}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn search_endpoint(base_url: &str) -> String {
        format!("{}/rest/api/3/search/jql", base_url.trim_end_matches('/'))
    }

    fn myself_endpoint(base_url: &str) -> String {
        format!("{}/rest/api/3/myself", base_url.trim_end_matches('/'))
    }

    pub fn browse_url(base_url: &str, key: &str) -> String {
        format!("{}/browse/{}", base_url.trim_end_matches('/'), key)
    }

    /// Calls the `myself` endpoint to prove the stored credentials work.
    /// Returns the display name Jira knows the user by.
    pub async fn verify_credentials(&self) -> AppResult<String> {
        let (base_url, email, token) = self.api_details()?;

        let response = self
            .http
            .get(Self::myself_endpoint(base_url))
            .header(AUTHORIZATION, Self::auth_header(email, token))
            .header(ACCEPT, "application/json")
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraMyself = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(payload
            .display_name
            .or(payload.email_address)
            .unwrap_or_else(|| email.to_string()))
    }
}

/// Builds the JQL for "my tickets in the current sprint", narrowed by the
/// configured projects, statuses and any extra clause verbatim.
fn build_jql(email: &str, filter: &TicketFilter) -> String {
    let mut clauses = vec![
        format!("assignee = '{email}'"),
        "sprint in openSprints()".to_string(),
    ];

    if !filter.project_keys.is_empty() {
        clauses.push(format!("project in ({})", quote_list(&filter.project_keys)));
    }
    if !filter.statuses.is_empty() {
        clauses.push(format!("status in ({})", quote_list(&filter.statuses)));
    }
    if let Some(extra) = &filter.extra_jql {
        clauses.push(extra.clone());
    }

    clauses.join(" AND ")
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{value}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl IssueTrackerService for JiraClient {
    async fn fetch_assigned_tickets(&self, filter: &TicketFilter) -> AppResult<Vec<Ticket>> {
        let (base_url, email, token) = self.api_details()?;
        let jql = build_jql(email, filter);

        let response = self
            .http
            .get(Self::search_endpoint(base_url))
            .header(AUTHORIZATION, Self::auth_header(email, token))
            .header(ACCEPT, "application/json")
            .query(&[
                ("jql", jql.as_str()),
                ("maxResults", &filter.max_results.to_string()),
                ("fields", "summary,status,issuetype"),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| AppError::IssueTracker(format!("failed to call Jira: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::IssueTracker(format!(
                "Jira responded with {status}: {body}"
            )));
        }

        let payload: JiraSearchResponse = response.json().await.map_err(|err| {
            AppError::IssueTracker(format!("failed to parse Jira response: {err}"))
        })?;

        Ok(tickets_from_response(payload))
    }
}

fn tickets_from_response(payload: JiraSearchResponse) -> Vec<Ticket> {
    payload
        .issues
        .into_iter()
        .map(|issue| Ticket {
            key: issue.key,
            issue_type: issue
                .fields
                .issuetype
                .map(|kind| kind.name)
                .unwrap_or_default(),
            summary: issue.fields.summary,
            status: issue
                .fields
                .status
                .map(|status| status.name)
                .unwrap_or_default(),
        })
        .collect()
}

#[derive(Deserialize)]
struct JiraSearchResponse {
    #[serde(default)]
    issues: Vec<JiraIssue>,
}

#[derive(Deserialize)]
struct JiraIssue {
    key: String,
    fields: JiraIssueFields,
}

#[derive(Deserialize)]
struct JiraIssueFields {
    #[serde(default)]
    summary: String,
    status: Option<JiraNamed>,
    issuetype: Option<JiraNamed>,
}

#[derive(Deserialize)]
struct JiraNamed {
    name: String,
}

#[derive(Deserialize)]
struct JiraMyself {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    #[serde(rename = "emailAddress")]
    email_address: Option<String>,
}
