use pdftab_core::error::PdftabError;
use pdftab_core::orchestrator::RunSummary;

pub fn print(summary: &RunSummary) -> Result<(), PdftabError> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{json}");
    Ok(())
}
