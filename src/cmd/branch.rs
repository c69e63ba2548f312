use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::jira::JiraClient;
use crate::workflow::branch::{BranchOutcome, create_branch_from_ticket};

#[derive(Args, Debug, Clone)]
pub struct BranchArgs {
    /// Limit tickets to a single project key, overriding the config.
    #[arg(short, long)]
    pub project: Option<String>,
}

pub async fn run(ctx: &AppContext, args: BranchArgs) -> AppResult<()> {
    match create_branch_from_ticket(ctx, args.project).await? {
        BranchOutcome::Created {
            ticket,
            branch,
            base,
        } => {
            let rule = "=".repeat(50);
            println!();
            println!("{rule}");
            println!("SUMMARY:");
            println!("   Ticket: {}", ticket.key);
            println!("   Summary: {}", ticket.summary);
            println!("   Type: {}", ticket.issue_type);
            println!("   Status: {}", ticket.status);
            println!("   Branch: {branch} (from {base})");
            println!("{rule}");
            if let Some(base_url) = &ctx.config.jira_base_url {
                println!(
                    "View ticket: {}",
                    JiraClient::browse_url(base_url, &ticket.key)
                );
            }
        }
        BranchOutcome::CheckedOut { branch, .. } => {
            println!("Checked out existing branch: {branch}");
        }
        BranchOutcome::NoTickets => {
            println!("No tickets found matching the configured filters.");
        }
        BranchOutcome::Cancelled => {
            println!("Operation cancelled.");
        }
    }
    Ok(())
}
