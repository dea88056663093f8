//! Closure command handler

use anyhow::Result;

use harvest::presentation::{build_request, create_resolve_use_case, ResolveArgs};

use super::CommandContext;
use crate::ui::json::{emit_event, events::*};

pub fn cmd_closure(ctx: &CommandContext, args: &ResolveArgs) -> Result<()> {
    let request = build_request(args, &ctx.config)?;
    let use_case = create_resolve_use_case(&ctx.config, args.follow_links, ctx.cancel.clone());
    let outcome = use_case.closure(&request)?;

    if !ctx.json {
        for cell in &outcome.closure {
            println!("{}", cell);
        }
        return Ok(());
    }

    ctx.warn_all("closure", &outcome.warnings)?;
    for cell in &outcome.closure {
        emit_event(&CellEvent::new(cell.id(), cell.tech()))?;
    }
    emit_event(&DoneEvent::new("closure", outcome.closure.len()))?;
    Ok(())
}
