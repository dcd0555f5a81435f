use std::{path::PathBuf, sync::Arc};

use budget_alerts::{
    app::App,
    console::ConsoleNotices,
    errors::{AppError, Result},
    init,
    utils::build_info,
};
use clap::Parser;
use uuid::Uuid;

/// Watch category budgets and raise alerts as spend crosses 80% and 100%.
#[derive(Debug, Parser)]
#[command(name = "budget_alerts_cli", disable_version_flag = true)]
struct Args {
    /// Directory holding config/, budgets.json and transactions.json.
    #[arg(long, env = "BUDGET_ALERTS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// User whose budgets are evaluated.
    #[arg(long, env = "BUDGET_ALERTS_USER")]
    user: Option<Uuid>,

    /// Evaluate once and exit.
    #[arg(long)]
    once: bool,

    /// Disable colored output.
    #[arg(long)]
    plain: bool,

    /// Print build information and exit.
    #[arg(long)]
    version: bool,
}

#[tokio::main]
async fn main() {
    init();

    if let Err(err) = run(Args::parse()).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    if args.version {
        println!("{}", build_info::current().summary());
        return Ok(());
    }

    let user_id = args
        .user
        .ok_or_else(|| AppError::Input("--user (or BUDGET_ALERTS_USER) is required".into()))?;
    let app = App::open(args.data_dir)?;
    let notices = Arc::new(ConsoleNotices::new(args.plain));

    if args.once {
        let (outcome, stats) = app.run_once(user_id, notices).await;
        let unread = app.notifications().unread_count(user_id)?;
        tracing::info!(?outcome, ?stats, unread, "Single evaluation finished");
        return Ok(());
    }

    let stats = app
        .run_session(user_id, notices, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {}", err);
            }
        })
        .await;
    tracing::info!(?stats, "Alert session finished");
    Ok(())
}
