//! Login and signup handlers.

use devmatch_core::Registration;

use crate::cli::SignupArgs;
use crate::context::{AppContext, CliResult, authenticate};
use crate::output::render_identity;

pub(crate) async fn handle_login(ctx: &AppContext) -> CliResult<()> {
    let engine = ctx.engine()?;
    let identity = authenticate(ctx, &engine).await?;
    render_identity(&identity, ctx.output)
}

pub(crate) async fn handle_signup(ctx: &AppContext, args: SignupArgs) -> CliResult<()> {
    let credentials = ctx.credentials()?;
    let registration = Registration {
        first_name: args.first_name,
        last_name: args.last_name,
        email: credentials.email,
        gender: args.gender.into(),
        dob: args.dob,
        password: credentials.password,
        skill: args.skills,
    };

    let engine = ctx.engine()?;
    let identity = engine.signup(&registration).await?;
    println!("Account created.");
    render_identity(&identity, ctx.output)
}
