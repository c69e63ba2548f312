/// An issue-tracker ticket as fetched, immutable for the rest of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: String,
    pub issue_type: String,
    pub summary: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub project_keys: Vec<String>,
    pub statuses: Vec<String>,
    pub max_results: u32,
    pub extra_jql: Option<String>,
}
