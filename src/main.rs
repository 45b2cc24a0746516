mod cli;
mod error;
mod logging;
mod pipeline;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};
use crate::pipeline::Pipeline;
use clap::Parser;
use docsets_bundle::{Package, archive};
use docsets_config::Config;
use exn::ResultExt;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    let pipeline = Pipeline::new(config)?;
    match cli.command {
        Command::Build => pipeline.build().await,
        Command::Clean => pipeline.clean(),
        Command::Fetch => pipeline.fetch().await,
        Command::Docset { package, html, no_archive } => {
            let package = Package::find(&package).or_raise(|| ErrorKind::Package)?;
            let bundle = pipeline.docset(package, html).await?;
            if !no_archive {
                archive(&bundle, pipeline.compression()).or_raise(|| ErrorKind::Compress(package.docset))?;
            }
            Ok(())
        },
        Command::Compress => pipeline.compress().map(drop),
    }
}
