mod bootstrap;
mod render;

use anyhow::Result;
use audit_context::prompt::build_compliance_prompt;
use audit_core::penalty::PenaltySchedule;
use audit_core::settings::Settings;
use audit_data::analysis::analyze_file;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("trai-audit v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Dataset: {}, Format: {}",
        settings.dataset.display(),
        settings.format
    );

    let schedule = PenaltySchedule::load_or_default(settings.penalty_schedule.as_deref())?;
    let report = analyze_file(&settings.dataset, &schedule)?;

    match settings.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => println!("{}", render::render_report(&report)),
    }

    if settings.prompt {
        println!();
        println!("{}", build_compliance_prompt(&report));
    }

    Ok(())
}
