use std::path::PathBuf;
use std::sync::Arc;

use eyre::Result;
use legalbrain_client::http::HttpClient;
use legalbrain_client::pack::read_pack_file;
use legalbrain_console::config;
use legalbrain_console::render::{render_dashboard, render_submission};
use legalbrain_sync::engine::RuleSync;
use legalbrain_sync::view::DashboardView;
use legalbrain_sync::workflow::{SubmissionPhase, UploadWorkflow};
use tracing_subscriber::EnvFilter;

/// Usage: `legalbrain [PACK.pdf|PACK.zip]`
///
/// Prints the rule dashboard, then analyzes the given pack if there is one.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::load_or_default(&config::config_dir()?)?.with_env_overrides();
    init_tracing(config.json_logs);

    let client = Arc::new(HttpClient::new(&config.client_settings())?);
    tracing::info!(url = %client.rules_url(), "connecting to rules api");

    let mut engine = RuleSync::new(Arc::clone(&client));
    if let Err(err) = engine.load().await {
        tracing::error!(error = %err, "could not load rules");
    }
    print!("{}", render_dashboard(&DashboardView::build(&engine)));

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return Ok(());
    };

    let pack = read_pack_file(&path).await?;
    let mut workflow = UploadWorkflow::new(client);
    workflow.select_file(Some(pack));
    eprint!("{}", render_submission(&SubmissionPhase::Submitting));

    let phase = workflow.submit().await;
    print!("\n{}", render_submission(phase));
    if let SubmissionPhase::Failed(message) = phase {
        return Err(eyre::eyre!("analysis failed: {message}"));
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
