//! Interactive answers via `dialoguer`.

use dialoguer::{Confirm, Input, Select};
use serde_json::Value;

use rustplate_core::answers::Prompter;
use rustplate_core::error::Result;
use rustplate_core::manifest::{Variable, VariableKind};

/// Asks each unanswered variable on the terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, name: &str, variable: &Variable, default: Option<&Value>) -> Result<Option<Value>> {
        let prompt = if variable.help.is_empty() {
            name.to_string()
        } else {
            variable.help.clone()
        };

        let value = match &variable.kind {
            VariableKind::Bool => {
                let default = default.and_then(Value::as_bool).unwrap_or(false);
                let answer = Confirm::new()
                    .with_prompt(prompt)
                    .default(default)
                    .interact()
                    .map_err(anyhow::Error::from)?;
                Value::Bool(answer)
            }
            VariableKind::Choice { choices } => {
                let default_idx = default
                    .and_then(Value::as_str)
                    .and_then(|d| choices.iter().position(|c| c == d))
                    .unwrap_or(0);
                let selection = Select::new()
                    .with_prompt(prompt)
                    .items(choices)
                    .default(default_idx)
                    .interact()
                    .map_err(anyhow::Error::from)?;
                Value::String(choices[selection].clone())
            }
            VariableKind::Str => {
                let mut input = Input::<String>::new().with_prompt(prompt);
                if let Some(d) = default.and_then(Value::as_str) {
                    input = input.default(d.to_string());
                }
                Value::String(input.interact_text().map_err(anyhow::Error::from)?)
            }
        };

        Ok(Some(value))
    }
}
