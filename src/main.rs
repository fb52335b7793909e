use anyhow::Result;
use clap::Parser;

use auto_version::cli::{run_release_workflow, ReleaseWorkflowArgs};
use auto_version::git::Git2Repository;
use auto_version::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "auto-version",
    version,
    about = "Tag the next version and generate release notes from commit prefixes"
)]
struct Args {
    #[arg(long, help = "Increment the release field instead of minor")]
    hotfix: bool,

    #[arg(
        long,
        help = "Classify and render only; no tag is created and no files are written"
    )]
    test: bool,

    #[arg(
        long,
        conflicts_with = "test",
        help = "Write the release note, commit it and push branch and tag"
    )]
    push: bool,

    #[arg(long, help = "Do not fetch tags from the remote first")]
    offline: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let repo = match Git2Repository::open(".") {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let workflow_args = ReleaseWorkflowArgs {
        hotfix: args.hotfix,
        test: args.test,
        push: args.push,
        offline: args.offline,
    };

    if !args.offline {
        ui::display_status(&format!("Fetching tags from {}...", config.remote));
    }

    match run_release_workflow(&repo, &workflow_args, &config) {
        Ok(result) => {
            ui::display_workflow_result(&result, &config.remote);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
