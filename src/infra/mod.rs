pub mod git;
pub mod github;
pub mod installer;
pub mod jira;
pub mod terminal;
