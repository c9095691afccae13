//! Profile display and update handlers.

use std::path::Path;

use anyhow::anyhow;

use devmatch_core::{ImageUpload, ProfileUpdate};

use crate::cli::ProfileUpdateArgs;
use crate::context::{AppContext, CliError, CliResult, authenticate};
use crate::output::render_identity;

pub(crate) async fn handle_show(ctx: &AppContext) -> CliResult<()> {
    let engine = ctx.engine()?;
    let identity = authenticate(ctx, &engine).await?;
    render_identity(&identity, ctx.output)
}

pub(crate) async fn handle_update(ctx: &AppContext, args: ProfileUpdateArgs) -> CliResult<()> {
    let engine = ctx.engine()?;
    authenticate(ctx, &engine).await?;

    let photo = match &args.photo {
        Some(path) => Some(read_photo(path)?),
        None => None,
    };
    let update = ProfileUpdate {
        first_name: args.first_name,
        last_name: args.last_name,
        gender: args.gender.into(),
        dob: args.dob,
        skill: args.skills,
        photo,
    };

    let identity = engine.update_profile(&update).await?;
    println!("Profile updated.");
    render_identity(&identity, ctx.output)
}

fn read_photo(path: &Path) -> CliResult<ImageUpload> {
    let bytes = std::fs::read(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read photo '{}': {err}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| CliError::validation("photo path has no usable file name"))?;

    let content_type = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    };

    Ok(ImageUpload {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}
