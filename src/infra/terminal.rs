use std::io::{self, Write};

use crate::error::AppResult;
use crate::services::PromptService;

/// Interactive prompts on stdin/stdout.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }

    /// Reads one trimmed line, or `None` when stdin is closed.
    fn read_line(&self) -> AppResult<Option<String>> {
        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

impl PromptService for TerminalPrompt {
    fn select(&self, question: &str, options: &[String]) -> AppResult<Option<usize>> {
        println!("{question}");
        for (index, option) in options.iter().enumerate() {
            println!("{:2}. {option}", index + 1);
        }

        loop {
            let mut stdout = io::stdout();
            write!(
                stdout,
                "Enter a number (1-{}, Enter to cancel): ",
                options.len()
            )?;
            stdout.flush()?;

            let Some(input) = self.read_line()? else {
                return Ok(None);
            };
            match parse_selection(&input, options.len()) {
                Selection::Cancel => return Ok(None),
                Selection::Pick(index) => return Ok(Some(index)),
                Selection::Invalid => {
                    println!("Please enter a number between 1 and {}.", options.len());
                }
            }
        }
    }

    fn edit_line(&self, question: &str, initial: &str) -> AppResult<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{question} [{initial}] (Enter to accept, '-' to cancel): ")?;
        stdout.flush()?;

        let Some(input) = self.read_line()? else {
            return Ok(None);
        };
        Ok(parse_edit(&input, initial))
    }

    fn confirm(&self, question: &str, default_yes: bool) -> AppResult<bool> {
        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };

        loop {
            let mut stdout = io::stdout();
            write!(stdout, "{question} {hint}: ")?;
            stdout.flush()?;

            let Some(input) = self.read_line()? else {
                return Ok(false);
            };
            match parse_confirm(&input, default_yes) {
                Some(answer) => return Ok(answer),
                None => println!("Please answer 'y' or 'n'."),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Selection {
    Pick(usize),
    Cancel,
    Invalid,
}

fn parse_selection(input: &str, option_count: usize) -> Selection {
    if input.is_empty() {
        return Selection::Cancel;
    }
    match input.parse::<usize>() {
        Ok(number) if (1..=option_count).contains(&number) => Selection::Pick(number - 1),
        _ => Selection::Invalid,
    }
}

fn parse_edit(input: &str, initial: &str) -> Option<String> {
    if input.is_empty() {
        return Some(initial.to_string());
    }
    if input == "-" {
        return None;
    }
    Some(input.to_string())
}

fn parse_confirm(input: &str, default_yes: bool) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "" => Some(default_yes),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
