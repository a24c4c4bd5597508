//! One-shot pipeline: upload a file, analyze it, forecast, download reports.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use hismarketing_core::analytics::ReportRequest;
use hismarketing_core::error::HisError;

use super::exit_code;
use crate::context::AppContext;

pub struct RunArgs<'a> {
    pub file: &'a Path,
    pub reports: &'a [ReportRequest],
    pub skip_prediction: bool,
}

/// Stops at the first failing stage. Reports are attempted only after
/// every stage succeeded.
pub async fn run(ctx: &AppContext, args: RunArgs<'_>) -> Result<ExitCode> {
    let orchestrator = &ctx.orchestrator;
    let mut pipeline = orchestrator.new_pipeline();

    tracing::info!(
        pipeline_id = %pipeline.id(),
        file = %args.file.display(),
        "[CLI] Running pipeline"
    );

    let stages = async {
        orchestrator.open_dashboard(&mut pipeline)?;
        orchestrator.upload_path(&mut pipeline, args.file).await?;
        orchestrator.analyze(&mut pipeline).await?;
        if !args.skip_prediction {
            orchestrator.predict(&mut pipeline).await?;
        }
        Ok::<_, HisError>(())
    }
    .await;
    if stages.is_err() {
        return Ok(exit_code(stages));
    }

    let mut code = ExitCode::SUCCESS;
    for request in args.reports {
        let saved = orchestrator.download_report(&mut pipeline, *request).await;
        if saved.is_err() {
            code = exit_code(saved);
        }
    }

    tracing::info!(state = %pipeline.state(), "[CLI] Pipeline finished");
    Ok(code)
}
