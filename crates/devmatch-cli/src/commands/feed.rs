//! Feed listing and the interactive swipe loop.

use std::io::{self, Write};

use anyhow::anyhow;

use devmatch_core::{Decision, FetchStatus};

use crate::cli::FeedArgs;
use crate::context::{AppContext, CliError, CliResult, authenticate};
use crate::output::{render_candidates, render_card};

pub(crate) async fn handle_feed(ctx: &AppContext, args: &FeedArgs) -> CliResult<()> {
    let engine = ctx.engine_with(args.cursor())?;
    authenticate(ctx, &engine).await?;

    engine.ensure_fed().await;
    let view = engine.feed_view();
    if view.status == FetchStatus::Errored {
        let detail = view.last_error.unwrap_or_else(|| "feed fetch failed".into());
        return Err(CliError::failure(anyhow!(detail)));
    }

    render_candidates(&view.candidates, ctx.output)
}

pub(crate) async fn handle_swipe(ctx: &AppContext, args: &FeedArgs) -> CliResult<()> {
    let engine = ctx.engine_with(args.cursor())?;
    let identity = authenticate(ctx, &engine).await?;
    println!("Signed in as {} {}.", identity.first_name, identity.last_name);

    loop {
        engine.ensure_fed().await;
        let view = engine.feed_view();
        if view.status == FetchStatus::Errored {
            let detail = view.last_error.unwrap_or_else(|| "feed fetch failed".into());
            return Err(CliError::failure(anyhow!(detail)));
        }

        let Some(candidate) = engine.select_next() else {
            println!("Feed exhausted; no more candidates.");
            break;
        };

        render_card(&candidate);
        match prompt_verdict()? {
            Verdict::Accept => {
                engine.decide(&candidate.id, Decision::Accept);
            }
            Verdict::Reject => {
                engine.decide(&candidate.id, Decision::Reject);
            }
            Verdict::Quit => {
                engine.logout().await;
                println!("Signed out.");
                break;
            }
        }
    }

    // Decisions are fired without being awaited; flush the outstanding
    // ones before the process exits.
    engine.drain_decisions().await;
    Ok(())
}

enum Verdict {
    Accept,
    Reject,
    Quit,
}

fn prompt_verdict() -> CliResult<Verdict> {
    loop {
        print!("[y] interested  [n] ignore  [q] quit > ");
        io::stdout()
            .flush()
            .map_err(|err| CliError::failure(anyhow!("failed to flush stdout: {err}")))?;

        let mut line = String::new();
        let read = io::stdin()
            .read_line(&mut line)
            .map_err(|err| CliError::failure(anyhow!("failed to read input: {err}")))?;
        if read == 0 {
            // EOF behaves like quit.
            return Ok(Verdict::Quit);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "y" => return Ok(Verdict::Accept),
            "n" => return Ok(Verdict::Reject),
            "q" => return Ok(Verdict::Quit),
            _ => println!("Enter y, n, or q."),
        }
    }
}
