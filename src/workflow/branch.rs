use crate::context::AppContext;
use crate::domain::branch::BranchName;
use crate::domain::status::icon_for;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Summaries longer than this are shortened for the selection list.
const SUMMARY_DISPLAY_MAX: usize = 53;
const SUMMARY_DISPLAY_KEEP: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    Created {
        ticket: Ticket,
        branch: BranchName,
        base: String,
    },
    CheckedOut {
        ticket: Ticket,
        branch: BranchName,
    },
    NoTickets,
    Cancelled,
}

/// Fetches the user's assigned tickets, lets them pick one, and creates or
/// checks out a branch named after it. Every prompt can back out, so the
/// only fallible side effects are the git calls at the very end.
pub async fn create_branch_from_ticket(
    ctx: &AppContext,
    project_override: Option<String>,
) -> AppResult<BranchOutcome> {
    ctx.version_control.ensure_repository().await?;

    let mut filter = ctx.config.filter.clone();
    if let Some(project) = project_override {
        filter.project_keys = vec![project];
    }

    let tickets = ctx.issue_tracker.fetch_assigned_tickets(&filter).await?;
    if tickets.is_empty() {
        return Ok(BranchOutcome::NoTickets);
    }

    println!(
        "Found {} ticket(s) assigned to you in the current sprint.",
        tickets.len()
    );
    if filter.max_results > 0 && tickets.len() as u32 >= filter.max_results {
        eprintln!(
            "Warning: hit the configured limit of {}; raise max_results in the config to see more.",
            filter.max_results
        );
    }

    let labels: Vec<String> = tickets.iter().map(selection_label).collect();
    let Some(index) = ctx
        .prompt
        .select("Select a ticket to create a branch for:", &labels)?
    else {
        return Ok(BranchOutcome::Cancelled);
    };
    let Some(ticket) = tickets.get(index) else {
        return Ok(BranchOutcome::Cancelled);
    };

    let suggested = BranchName::generate(ticket, &ctx.config.naming);
    println!("Generated branch name: {suggested}");
    println!(
        "Branch prefixes are {} (edit the config to change).",
        if ctx.config.naming.use_prefixes {
            "enabled"
        } else {
            "disabled"
        }
    );

    let Some(edited) = ctx
        .prompt
        .edit_line("Edit branch name if needed", suggested.as_str())?
    else {
        return Ok(BranchOutcome::Cancelled);
    };
    let Some(branch) = BranchName::from_user_input(&edited) else {
        println!("Nothing usable left in that branch name.");
        return Ok(BranchOutcome::Cancelled);
    };

    if ctx.version_control.has_uncommitted_changes().await? {
        println!("Warning: you have uncommitted changes.");
        if !ctx.prompt.confirm("Proceed anyway?", false)? {
            return Ok(BranchOutcome::Cancelled);
        }
    }

    if ctx.version_control.branch_exists(&branch).await? {
        let options = [
            "Check out the existing branch".to_string(),
            "Cancel".to_string(),
        ];
        let choice = ctx
            .prompt
            .select(&format!("Branch '{branch}' already exists."), &options)?;
        return match choice {
            Some(0) => {
                ctx.version_control.switch(&branch).await?;
                Ok(BranchOutcome::CheckedOut {
                    ticket: ticket.clone(),
                    branch,
                })
            }
            _ => Ok(BranchOutcome::Cancelled),
        };
    }

    let base = ctx.version_control.current_branch().await?;
    create_and_switch(ctx.version_control.as_ref(), &branch).await?;

    Ok(BranchOutcome::Created {
        ticket: ticket.clone(),
        branch,
        base,
    })
}

/// Creates the branch and moves onto it. Creation is guarded by an
/// existence check, and a switch failure after a successful create
/// reports the partial state instead of pretending nothing happened.
pub async fn create_and_switch(
    vcs: &dyn VersionControlService,
    branch: &BranchName,
) -> AppResult<()> {
    if vcs.branch_exists(branch).await? {
        return Err(AppError::BranchAlreadyExists(branch.as_str().to_string()));
    }
    vcs.create_branch(branch).await?;
    if let Err(err) = vcs.switch(branch).await {
        return Err(AppError::VersionControl(format!(
            "branch '{branch}' was created but could not be checked out ({err}); \
             run 'git switch {branch}' to finish"
        )));
    }
    Ok(())
}

fn selection_label(ticket: &Ticket) -> String {
    let summary = if ticket.summary.chars().count() > SUMMARY_DISPLAY_MAX {
        let kept: String = ticket.summary.chars().take(SUMMARY_DISPLAY_KEEP).collect();
        format!("{kept}...")
    } else {
        ticket.summary.clone()
    };
    format!(
        "{} {} - {summary} [{}]",
        icon_for(&ticket.status),
        ticket.key,
        ticket.status
    )
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::config::{AppConfig, StoredConfig};
    use crate::domain::ticket::TicketFilter;
    use crate::domain::update::UpdateCache;
    use crate::domain::version::SemVer;
    use crate::services::{CacheStore, IssueTrackerService, PromptService, ReleaseService};

    #[derive(Default)]
    struct FakeVcs {
        not_a_repository: bool,
        dirty: bool,
        fail_switch: bool,
        current: String,
        existing: Mutex<Vec<String>>,
        created: Mutex<Vec<String>>,
        switched: Mutex<Vec<String>>,
    }

    impl FakeVcs {
        fn on_main() -> Self {
            Self {
                current: "main".to_string(),
                ..Self::default()
            }
        }

        fn with_existing(self, branch: &str) -> Self {
            self.existing.lock().unwrap().push(branch.to_string());
            self
        }

        fn created_branches(&self) -> Vec<String> {
            self.created.lock().unwrap().clone()
        }

        fn switched_branches(&self) -> Vec<String> {
            self.switched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VersionControlService for FakeVcs {
        async fn ensure_repository(&self) -> AppResult<()> {
            if self.not_a_repository {
                return Err(AppError::NotARepository);
            }
            Ok(())
        }

        async fn current_branch(&self) -> AppResult<String> {
            Ok(self.current.clone())
        }

        async fn branch_exists(&self, branch: &BranchName) -> AppResult<bool> {
            Ok(self
                .existing
                .lock()
                .unwrap()
                .iter()
                .any(|name| name == branch.as_str()))
        }

        async fn create_branch(&self, branch: &BranchName) -> AppResult<()> {
            self.existing.lock().unwrap().push(branch.as_str().to_string());
            self.created.lock().unwrap().push(branch.as_str().to_string());
            Ok(())
        }

        async fn switch(&self, branch: &BranchName) -> AppResult<()> {
            if self.fail_switch {
                return Err(AppError::VersionControl("disk full".to_string()));
            }
            self.switched.lock().unwrap().push(branch.as_str().to_string());
            Ok(())
        }

        async fn has_uncommitted_changes(&self) -> AppResult<bool> {
            Ok(self.dirty)
        }
    }

    #[derive(Default)]
    struct FakeTracker {
        tickets: Vec<Ticket>,
        seen_filter: Mutex<Option<TicketFilter>>,
    }

    impl FakeTracker {
        fn with(tickets: Vec<Ticket>) -> Self {
            Self {
                tickets,
                seen_filter: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl IssueTrackerService for FakeTracker {
        async fn fetch_assigned_tickets(&self, filter: &TicketFilter) -> AppResult<Vec<Ticket>> {
            *self.seen_filter.lock().unwrap() = Some(filter.clone());
            Ok(self.tickets.clone())
        }
    }

    /// Scripted answers; an empty queue falls back to the neutral answer
    /// so unscripted prompts do not hang a test.
    #[derive(Default)]
    struct FakePrompt {
        selections: Mutex<VecDeque<Option<usize>>>,
        edits: Mutex<VecDeque<Option<String>>>,
        confirms: Mutex<VecDeque<bool>>,
    }

    impl FakePrompt {
        fn selecting(indices: Vec<Option<usize>>) -> Self {
            Self {
                selections: Mutex::new(indices.into()),
                ..Self::default()
            }
        }

        fn with_edit(self, edit: Option<&str>) -> Self {
            self.edits
                .lock()
                .unwrap()
                .push_back(edit.map(str::to_string));
            self
        }

        fn with_confirm(self, answer: bool) -> Self {
            self.confirms.lock().unwrap().push_back(answer);
            self
        }
    }

    impl PromptService for FakePrompt {
        fn select(&self, _question: &str, _options: &[String]) -> AppResult<Option<usize>> {
            Ok(self.selections.lock().unwrap().pop_front().flatten())
        }

        fn edit_line(&self, _question: &str, initial: &str) -> AppResult<Option<String>> {
            Ok(self
                .edits
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Some(initial.to_string())))
        }

        fn confirm(&self, _question: &str, default_yes: bool) -> AppResult<bool> {
            Ok(self
                .confirms
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(default_yes))
        }
    }

    struct NullRelease;

    #[async_trait]
    impl ReleaseService for NullRelease {
        async fn fetch_latest_version(&self) -> AppResult<SemVer> {
            Err(AppError::ReleaseSource("not used here".to_string()))
        }
    }

    struct NullCache;

    impl CacheStore for NullCache {
        fn read(&self) -> AppResult<UpdateCache> {
            Ok(UpdateCache::default())
        }

        fn write(&self, _cache: &UpdateCache) -> AppResult<()> {
            Ok(())
        }
    }

    fn context(
        vcs: Arc<FakeVcs>,
        tracker: Arc<FakeTracker>,
        prompt: Arc<FakePrompt>,
    ) -> AppContext {
        AppContext::new(
            AppConfig::from_stored(StoredConfig::default()),
            vcs,
            tracker,
            Arc::new(NullRelease),
            prompt,
            Arc::new(NullCache),
        )
    }

    fn ticket(key: &str, issue_type: &str, summary: &str, status: &str) -> Ticket {
        Ticket {
            key: key.to_string(),
            issue_type: issue_type.to_string(),
            summary: summary.to_string(),
            status: status.to_string(),
        }
    }

    fn story() -> Ticket {
        ticket(
            "CDEM-1234",
            "Story",
            "Implement User Authentication!!",
            "In Progress",
        )
    }

    #[tokio::test]
    async fn creates_and_switches_to_the_generated_branch() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        let expected = "feature/cdem-1234-implement-user-authentication";
        match outcome {
            BranchOutcome::Created {
                ticket,
                branch,
                base,
            } => {
                assert_eq!(ticket.key, "CDEM-1234");
                assert_eq!(branch.as_str(), expected);
                assert_eq!(base, "main");
            }
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(vcs.created_branches(), vec![expected.to_string()]);
        assert_eq!(vcs.switched_branches(), vec![expected.to_string()]);
    }

    #[tokio::test]
    async fn refuses_to_run_outside_a_repository() {
        let vcs = Arc::new(FakeVcs {
            not_a_repository: true,
            ..FakeVcs::default()
        });
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]));
        let ctx = context(vcs, tracker, prompt);

        let err = create_branch_from_ticket(&ctx, None).await.unwrap_err();
        assert!(matches!(err, AppError::NotARepository));
    }

    #[tokio::test]
    async fn empty_ticket_list_short_circuits() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(Vec::new()));
        let prompt = Arc::new(FakePrompt::default());
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert_eq!(outcome, BranchOutcome::NoTickets);
        assert!(vcs.created_branches().is_empty());
    }

    #[tokio::test]
    async fn cancelling_the_selection_touches_nothing() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![None]));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert_eq!(outcome, BranchOutcome::Cancelled);
        assert!(vcs.created_branches().is_empty());
        assert!(vcs.switched_branches().is_empty());
    }

    #[tokio::test]
    async fn project_override_narrows_the_filter() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]));
        let ctx = context(vcs, tracker.clone(), prompt);

        create_branch_from_ticket(&ctx, Some("OPS".to_string()))
            .await
            .unwrap();

        let seen = tracker.seen_filter.lock().unwrap().clone().unwrap();
        assert_eq!(seen.project_keys, vec!["OPS".to_string()]);
    }

    #[tokio::test]
    async fn an_edited_name_is_sanitized_before_use() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt =
            Arc::new(FakePrompt::selecting(vec![Some(0)]).with_edit(Some("hotfix/urgent fix")));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        match outcome {
            BranchOutcome::Created { branch, .. } => {
                assert_eq!(branch.as_str(), "hotfix/urgent-fix");
            }
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(vcs.created_branches(), vec!["hotfix/urgent-fix".to_string()]);
    }

    #[tokio::test]
    async fn an_unusable_edited_name_cancels() {
        let vcs = Arc::new(FakeVcs::on_main());
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]).with_edit(Some("!!??")));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert_eq!(outcome, BranchOutcome::Cancelled);
        assert!(vcs.created_branches().is_empty());
    }

    #[tokio::test]
    async fn declining_the_dirty_tree_warning_cancels() {
        let vcs = Arc::new(FakeVcs {
            dirty: true,
            ..FakeVcs::on_main()
        });
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]).with_confirm(false));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert_eq!(outcome, BranchOutcome::Cancelled);
        assert!(vcs.created_branches().is_empty());
    }

    #[tokio::test]
    async fn accepting_the_dirty_tree_warning_proceeds() {
        let vcs = Arc::new(FakeVcs {
            dirty: true,
            ..FakeVcs::on_main()
        });
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0)]).with_confirm(true));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert!(matches!(outcome, BranchOutcome::Created { .. }));
    }

    #[tokio::test]
    async fn existing_branch_can_be_checked_out_instead() {
        let name = "feature/cdem-1234-implement-user-authentication";
        let vcs = Arc::new(FakeVcs::on_main().with_existing(name));
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0), Some(0)]));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        match outcome {
            BranchOutcome::CheckedOut { branch, .. } => assert_eq!(branch.as_str(), name),
            other => panic!("expected CheckedOut, got {other:?}"),
        }
        assert!(vcs.created_branches().is_empty());
        assert_eq!(vcs.switched_branches(), vec![name.to_string()]);
    }

    #[tokio::test]
    async fn existing_branch_offer_can_be_declined() {
        let name = "feature/cdem-1234-implement-user-authentication";
        let vcs = Arc::new(FakeVcs::on_main().with_existing(name));
        let tracker = Arc::new(FakeTracker::with(vec![story()]));
        let prompt = Arc::new(FakePrompt::selecting(vec![Some(0), Some(1)]));
        let ctx = context(vcs.clone(), tracker, prompt);

        let outcome = create_branch_from_ticket(&ctx, None).await.unwrap();

        assert_eq!(outcome, BranchOutcome::Cancelled);
        assert!(vcs.switched_branches().is_empty());
    }

    #[tokio::test]
    async fn create_and_switch_guards_against_duplicates() {
        let vcs = FakeVcs::on_main();
        let branch = BranchName::from_user_input("feature/cdem-1-x").unwrap();

        create_and_switch(&vcs, &branch).await.unwrap();
        let err = create_and_switch(&vcs, &branch).await.unwrap_err();

        match err {
            AppError::BranchAlreadyExists(name) => assert_eq!(name, "feature/cdem-1-x"),
            other => panic!("expected BranchAlreadyExists, got {other:?}"),
        }
        assert_eq!(vcs.created_branches().len(), 1);
    }

    #[tokio::test]
    async fn switch_failure_after_create_reports_the_partial_state() {
        let vcs = FakeVcs {
            fail_switch: true,
            ..FakeVcs::on_main()
        };
        let branch = BranchName::from_user_input("feature/cdem-1-x").unwrap();

        let err = create_and_switch(&vcs, &branch).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("was created but could not be checked out"));
        assert!(message.contains("git switch feature/cdem-1-x"));
        assert_eq!(vcs.created_branches().len(), 1);
    }

    #[test]
    fn selection_label_shows_icon_key_summary_and_status() {
        let label = selection_label(&story());
        assert_eq!(
            label,
            "🔨 CDEM-1234 - Implement User Authentication!! [In Progress]"
        );
    }

    #[test]
    fn selection_label_truncates_long_summaries() {
        let long = "x".repeat(60);
        let label = selection_label(&ticket("CDEM-2", "Bug", &long, "To Do"));
        let shortened = format!("{}...", "x".repeat(50));
        assert!(label.contains(&shortened));
        assert!(!label.contains(&long));
        assert!(label.ends_with("[To Do]"));
    }

    #[test]
    fn selection_label_keeps_short_summaries_intact() {
        let label = selection_label(&ticket("CDEM-3", "Bug", "Crash on login", "Done"));
        assert_eq!(label, "✅ CDEM-3 - Crash on login [Done]");
    }
}
