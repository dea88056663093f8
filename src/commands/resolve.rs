//! Resolve command handler

use std::time::Instant;

use anyhow::Result;

use harvest::presentation::{build_request, create_resolve_use_case, ResolveArgs};

use super::CommandContext;
use crate::ui::json::{emit_event, events::*};

pub fn cmd_resolve(ctx: &CommandContext, args: &ResolveArgs) -> Result<()> {
    let started = Instant::now();
    let request = build_request(args, &ctx.config)?;
    let use_case = create_resolve_use_case(&ctx.config, args.follow_links, ctx.cancel.clone());
    let outcome = use_case.resolve(&request)?;

    if !ctx.json {
        for file in &outcome.files {
            println!("{}", file.path.display());
        }
        return Ok(());
    }

    ctx.warn_all("resolve", &outcome.warnings)?;
    for file in &outcome.files {
        emit_event(&FileEvent::new(
            file.entity.id(),
            &file.tech,
            &file.level,
            &file.path,
        ))?;
    }
    emit_event(
        &DoneEvent::new("resolve", outcome.files.len())
            .with_duration(started.elapsed().as_millis() as u64),
    )?;
    Ok(())
}
