use crate::models::Args;
use crate::platform::{self, SystemProbe};
use crate::runner::{self, InstallRequest};
use crate::{config, download, install, output, process};
use anyhow::Result;
use clap::Parser;

/// Set up output switches and the diagnostic logger.
///
/// `RUST_LOG` still wins over the level picked from the flags.
pub fn init_logging(args: &Args) {
    output::set_quiet(args.quiet);
    output::set_verbose(args.verbose);

    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

/// Main CLI entry point
pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    init_logging(&args);

    let config = config::resolve(&args)?;

    process::need_cmds(process::REQUIRED_COMMANDS)?;
    download::check(config.downloader)?;

    let platform = platform::detect(&SystemProbe)?;
    log::debug!("detected platform {platform}");

    let downloader = download::select(config.downloader)?;
    let install_dir = install::default_install_dir()?;

    runner::install(
        &InstallRequest {
            config: &config,
            install_dir,
            temp_root: None,
            args: &args.args,
        },
        downloader.as_ref(),
        &platform,
    )?;

    Ok(())
}
