//! Cat command handler
//!
//! Plain concatenation of the resolved files, in order.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use harvest::presentation::{build_request, create_resolve_use_case, ResolveArgs};
use harvest::FileStream;

use super::CommandContext;
use crate::ui::json::{emit_event, events::*};

pub fn cmd_cat(ctx: &CommandContext, args: &ResolveArgs, output: Option<&Path>) -> Result<()> {
    let request = build_request(args, &ctx.config)?;
    let use_case = create_resolve_use_case(&ctx.config, args.follow_links, ctx.cancel.clone());
    let outcome = use_case.resolve(&request)?;
    let stream = FileStream::new(outcome.files);

    if ctx.json && output.is_none() {
        ctx.warn_all("cat", &outcome.warnings)?;
        for file in stream.iter() {
            let file = file?;
            let contents = String::from_utf8_lossy(file.contents.as_deref().unwrap_or_default())
                .into_owned();
            emit_event(
                &FileEvent::new(&file.name, &file.tech, &file.level, &file.path)
                    .with_contents(contents),
            )?;
        }
        emit_event(&DoneEvent::new("cat", stream.len()))?;
        return Ok(());
    }

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    for file in stream.iter() {
        let file = file?;
        if let Some(contents) = &file.contents {
            out.write_all(contents)?;
            if !contents.ends_with(b"\n") {
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;

    if ctx.json {
        ctx.warn_all("cat", &outcome.warnings)?;
        emit_event(&DoneEvent::new("cat", stream.len()))?;
    }
    Ok(())
}
