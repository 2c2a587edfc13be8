//! Output formatting module

use logbook_app::app::GenerationReport;
use logbook_domain::model::MonthSummary;
use logbook_types::{OutputFormat, Result};

pub fn print_summaries(output_format: OutputFormat, summaries: &[MonthSummary]) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(summaries)?;
        println!("{}", content);
    } else {
        print_table(summaries);
    }
    Ok(())
}

fn print_table(summaries: &[MonthSummary]) {
    println!(
        "{:<6} {:>9} {:>9} {:>9} {:>5} {:>5} {:>5} {:>10}",
        "Sheet", "Odo start", "Odo end", "Km", "Work", "Wknd", "Hol", "Amount"
    );
    println!("{}", "-".repeat(66));
    for s in summaries {
        println!(
            "{:<6} {:>9} {:>9} {:>9} {:>5} {:>5} {:>5} {:>10}",
            s.sheet_name,
            s.starting_odometer,
            s.ending_odometer,
            s.total_distance,
            s.workdays,
            s.weekend_days,
            s.holidays,
            s.total_cost
        );
    }
    println!("{}", "-".repeat(66));

    let total_km: u64 = summaries.iter().map(|s| s.total_distance).sum();
    let total_cost: u64 = summaries.iter().map(|s| s.total_cost).sum();
    println!(
        "{:<6} {:>9} {:>9} {:>9} {:>5} {:>5} {:>5} {:>10}",
        "Total", "", "", total_km, "", "", "", total_cost
    );
}

pub fn print_report(report: &GenerationReport) {
    println!("\nLog Book Generated");
    println!("==================");
    println!("Output:          {}", report.output_path.display());
    println!("Size:            {} bytes", report.bytes_written);
    println!("Sheets:          {}", report.months.len());
    if let Some(odometer) = report.final_odometer() {
        println!("Final odometer:  {}", odometer);
    }
    println!("Total claim:     {} INR", report.total_cost());
    println!();
    print_table(&report.months);
}
