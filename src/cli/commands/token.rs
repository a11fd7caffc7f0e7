use anyhow::Context;
use clap::Args;

use crate::auth::issue_token;
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long = "permission", short = 'p', help = "Permission to grant (repeatable)")]
    pub permissions: Vec<String>,

    #[arg(long, default_value = "dev-barista", help = "Token subject")]
    pub subject: String,
}

pub fn handle(args: TokenArgs, config: &AppConfig) -> anyhow::Result<()> {
    let token = issue_token(&config.auth, &args.subject, args.permissions)
        .context("failed to mint token")?;
    println!("{}", token);
    Ok(())
}
