use crate::config::constants::*;
use crate::config::emission_factors::SuggestionThresholds;
use crate::models::breakdown::EmissionBreakdown;
use crate::models::suggestion::{Impact, Suggestion, SuggestionCategory};

/// Reduction suggestions for a breakdown, using the default thresholds.
pub fn generate_suggestions(breakdown: &EmissionBreakdown) -> Vec<Suggestion> {
    generate_suggestions_with(breakdown, &SuggestionThresholds::default())
}

/// Category suggestions whose threshold is exceeded, in transport,
/// electricity, diet order, followed by the tree planting suggestion.
pub fn generate_suggestions_with(
    breakdown: &EmissionBreakdown,
    thresholds: &SuggestionThresholds,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if breakdown.transport > thresholds.transport {
        suggestions.push(Suggestion::new(
            SuggestionCategory::Transport,
            "Drive less",
            "Consider using public transport or carpooling to reduce your transport emissions by up to 50%.",
            Impact::High,
            TRANSPORT_SUGGESTION_SAVINGS,
        ));
    }

    if breakdown.electricity > thresholds.electricity {
        suggestions.push(Suggestion::new(
            SuggestionCategory::Electricity,
            "Cut home energy use",
            "Switch to energy-efficient appliances and consider solar panels for your home.",
            Impact::Medium,
            ELECTRICITY_SUGGESTION_SAVINGS,
        ));
    }

    if breakdown.diet > thresholds.diet {
        suggestions.push(Suggestion::new(
            SuggestionCategory::Diet,
            "Eat less meat",
            "Reduce meat consumption to 1-2 times per week to significantly lower your dietary carbon footprint.",
            Impact::High,
            DIET_SUGGESTION_SAVINGS,
        ));
    }

    suggestions.push(Suggestion::new(
        SuggestionCategory::General,
        "Plant native trees",
        "Plant native trees in your community - each tree can absorb up to 21 kg of CO2 per year.",
        Impact::Medium,
        TREE_PLANTING_SAVINGS,
    ));

    suggestions
}
