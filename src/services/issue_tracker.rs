use async_trait::async_trait;

use crate::domain::ticket::{Ticket, TicketFilter};
use crate::error::AppResult;

#[async_trait]
pub trait IssueTrackerService: Send + Sync {
    /// Fetch the open tickets assigned to the configured user.
    async fn fetch_assigned_tickets(&self, filter: &TicketFilter) -> AppResult<Vec<Ticket>>;
}
