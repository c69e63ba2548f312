use crate::error::AppResult;

/// Interaction loop collaborator. Workflows describe what they need answered;
/// implementations own the terminal, keeping the core logic free of I/O.
pub trait PromptService: Send + Sync {
    /// Pick one of `options`; `None` means the user cancelled.
    fn select(&self, question: &str, options: &[String]) -> AppResult<Option<usize>>;
    /// Accept or edit a prefilled value; `None` means the user cancelled.
    fn edit_line(&self, question: &str, initial: &str) -> AppResult<Option<String>>;
    fn confirm(&self, question: &str, default_yes: bool) -> AppResult<bool>;
}
