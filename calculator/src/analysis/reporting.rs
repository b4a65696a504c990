use super::statistics::HistoryStatistics;
use crate::models::breakdown::EmissionBreakdown;
use crate::models::input::EmissionInput;
use crate::models::suggestion::Suggestion;
use crate::storage::history::HistoryEntry;

pub fn print_breakdown(input: &EmissionInput, breakdown: &EmissionBreakdown) {
    let shares = breakdown.shares();

    println!("\nCarbon Footprint Summary");
    println!("----------------------------------------");
    println!("Household size: {}", input.household_size);
    println!("Yearly Emissions (kg CO2e):");
    println!("  Transport:   {:>10.1}  ({:.1}%)", breakdown.transport, shares.transport);
    println!("  Electricity: {:>10.1}  ({:.1}%)", breakdown.electricity, shares.electricity);
    println!("  Diet:        {:>10.1}  ({:.1}%)", breakdown.diet, shares.diet);
    println!("  Waste:       {:>10.1}  ({:.1}%)", breakdown.waste, shares.waste);
    println!("  Total:       {:>10.1}", breakdown.total);
    println!("Per capita: {:.1} kg CO2e ({:.2} tonnes)", breakdown.per_capita, breakdown.per_capita / 1000.0);
    println!("Emission level: {}", breakdown.level);
    println!("----------------------------------------");
}

pub fn print_suggestions(suggestions: &[Suggestion]) {
    println!("\nSuggestions:");
    for suggestion in suggestions {
        println!(
            "  [{}] {} (impact: {}, saves ~{:.0} kg CO2e/year)",
            suggestion.category, suggestion.title, suggestion.impact, suggestion.estimated_savings
        );
        println!("      {}", suggestion.description);
    }
}

pub fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No saved calculations.");
        return;
    }

    println!("\nSaved Calculations (newest first)");
    println!("----------------------------------------");
    for entry in entries {
        println!(
            "{}  total {:>9.1}  per capita {:>9.1}  {:<9}  household {}",
            entry.date, entry.total, entry.per_capita, entry.level, entry.household_size
        );
    }
    println!("----------------------------------------");
}

pub fn print_statistics(stats: &HistoryStatistics) {
    println!("\nFootprint Statistics");
    println!("----------------------------------------");
    println!("Calculations: {}", stats.total_calculations);
    println!("Average total: {:.1} kg CO2e", stats.average_total);
    println!("Average per capita: {:.1} kg CO2e", stats.average_per_capita);
    println!("Latest: {:.1} kg CO2e on {}", stats.latest.total, stats.latest.date);
    println!("Emission level: {}", stats.emission_level);
    println!("----------------------------------------");
}
