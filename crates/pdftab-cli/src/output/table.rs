use pdftab_core::orchestrator::{RunStatus, RunSummary};

pub fn print(summary: &RunSummary) {
    println!("{}\n", summary.message);

    if summary.status == RunStatus::NoInputFound {
        return;
    }

    println!("  Documents attempted:  {}", summary.attempted);
    println!("  Documents succeeded:  {}", summary.succeeded);
    println!("  Rows extracted:       {}", summary.total_rows);
    if let Some(ref path) = summary.output {
        println!("  Output:               {}", path.display());
    }

    if !summary.failed.is_empty() {
        println!("\n  Failed documents:");
        let max_name = summary
            .failed
            .iter()
            .map(|f| f.name.len())
            .max()
            .unwrap_or(10);
        for failure in &summary.failed {
            println!(
                "    {:<width$}  {}",
                failure.name,
                failure.reason,
                width = max_name
            );
        }
    }
}
