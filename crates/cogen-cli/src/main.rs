//! `cogen` - contract project generator
//!
//! Exit codes:
//! - `0`: project created
//! - `1`: generation failed (stage and kind printed with `--verbose`)
//! - `2`: usage or configuration error, including a missing API key

use anyhow::Context;
use cogen_core::{resolve_credential, GenerationRequest, GenerationSession, GeneratorConfig};
use cogen_provider::Credential;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod report;

use cli::GenerateArgs;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli::command().get_matches();

    match matches.subcommand() {
        Some(("generate", args)) => {
            let args = GenerateArgs::from_matches(args);
            init_tracing(args.verbose);
            generate(args).await
        }
        _ => {
            eprintln!("error: unknown command");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn generate(args: GenerateArgs) -> ExitCode {
    let (session, credential) = match prepare(&args) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let request = GenerationRequest::new(args.description, args.output_dir, credential).with_verbose(args.verbose);

    match session.run(request).await {
        Ok(result) => {
            if args.json {
                match report::success_json(&result) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: serializing result: {e}");
                        return ExitCode::from(EXIT_FAILURE);
                    }
                }
            } else {
                print!("{}", report::success_text(&result));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", report::failure_text(&e, args.verbose));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Resolve configuration and credential; nothing here touches the network
fn prepare(args: &GenerateArgs) -> anyhow::Result<(GenerationSession, Credential)> {
    let env = |var: &str| std::env::var(var).ok();

    let mut config = GeneratorConfig::load(args.config.as_deref())
        .context("loading configuration")?
        .with_env_overrides(env);
    if let Some(model) = &args.model {
        config.provider.model.clone_from(model);
    }
    if args.no_tests {
        config.scaffold.include_tests = false;
    }

    let credential = resolve_credential(args.api_key.as_deref(), env)?;
    let session = GenerationSession::from_config(&config).context("invalid configuration")?;
    tracing::debug!(model = %config.provider.model, base_url = %config.provider.base_url, "configuration loaded");

    Ok((session, credential))
}
