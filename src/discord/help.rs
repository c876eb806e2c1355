use std::fmt::Write;

use crate::discord::permissions::{check_preconditions, CallerContext};
use crate::discord::registry::Module;

pub struct HelpSection {
    pub module: &'static str,
    pub body: String,
}

/// Builds the help listing for one caller: registry order, one line per
/// command whose preconditions all pass, modules with no passing command
/// omitted entirely. Permissions only filter lines, never reorder them, so
/// the output is deterministic for a fixed registry.
pub fn build_help(modules: &[Module], caller: &CallerContext, prefix: &str) -> Vec<HelpSection> {
    let mut sections = Vec::new();

    for module in modules {
        let mut body = String::new();
        for command in module.commands {
            if check_preconditions(command.preconditions, caller).is_ok() {
                let _ = write!(body, "**{}{}**\n*{}*\n", prefix, command.name(), command.summary);
            }
        }

        if !body.is_empty() {
            sections.push(HelpSection {
                module: module.name,
                body,
            });
        }
    }

    sections
}
