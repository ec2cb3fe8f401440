//! Interactive prompts backed by dialoguer

use codeforge_core::host::Prompter;
use codeforge_core::{Error, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};

/// Prompter reading answers from the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(
        &self,
        question: &str,
        default: &str,
        validate: &dyn Fn(&str) -> std::result::Result<(), String>,
    ) -> Result<String> {
        Input::<String>::new()
            .with_prompt(style(question).cyan().to_string())
            .default(default.to_string())
            .validate_with(|input: &String| validate(input))
            .interact_text()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn select(&self, question: &str, items: &[String], default: usize) -> Result<usize> {
        Select::new()
            .with_prompt(style(question).cyan().to_string())
            .items(items)
            .default(default)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn confirm(&self, question: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(style(question).cyan().to_string())
            .default(default)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }
}
