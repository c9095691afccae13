//! Renderers and formatting helpers.

use clap::ValueEnum;

use devmatch_core::{Candidate, Identity};

use crate::context::{CliError, CliResult};

/// Output format for commands that render structured data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

pub(crate) fn render_identity(identity: &Identity, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(identity),
        OutputFormat::Table => {
            println!("id:     {}", identity.id);
            println!("name:   {} {}", identity.first_name, identity.last_name);
            println!("email:  {}", identity.email);
            if let Some(gender) = identity.gender {
                println!("gender: {gender}");
            }
            if let Some(dob) = identity.dob {
                println!("dob:    {}", dob.format("%Y-%m-%d"));
            }
            if !identity.skill.is_empty() {
                println!("skills: {}", identity.skill.join(", "));
            }
            Ok(())
        }
    }
}

pub(crate) fn render_candidates(candidates: &[Candidate], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(candidates),
        OutputFormat::Table => {
            if candidates.is_empty() {
                println!("No candidates in the feed.");
                return Ok(());
            }
            println!("{:<26} {:<24} {:<28} SKILLS", "ID", "NAME", "EMAIL");
            for candidate in candidates {
                println!(
                    "{:<26} {:<24} {:<28} {}",
                    candidate.id,
                    candidate.display_name(),
                    candidate.email,
                    candidate.skill.join(", ")
                );
            }
            Ok(())
        }
    }
}

/// One candidate rendered as a card for the interactive swipe loop.
pub(crate) fn render_card(candidate: &Candidate) {
    println!();
    println!("── {} ──", candidate.display_name());
    println!("   {}", candidate.email);
    if !candidate.skill.is_empty() {
        println!("   skills: {}", candidate.skill.join(", "));
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow::anyhow!("failed to render JSON: {err}")))?;
    println!("{rendered}");
    Ok(())
}
