use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SuggestionCategory {
    Transport,
    Electricity,
    Diet,
    General,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionCategory::Transport => write!(f, "Transport"),
            SuggestionCategory::Electricity => write!(f, "Electricity"),
            SuggestionCategory::Diet => write!(f, "Diet"),
            SuggestionCategory::General => write!(f, "General"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Impact::High => write!(f, "High"),
            Impact::Medium => write!(f, "Medium"),
            Impact::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub estimated_savings: f64,     // kg CO2e per year
}

impl Suggestion {
    pub fn new(
        category: SuggestionCategory,
        title: &str,
        description: &str,
        impact: Impact,
        estimated_savings: f64,
    ) -> Self {
        Self {
            category,
            title: title.to_string(),
            description: description.to_string(),
            impact,
            estimated_savings,
        }
    }
}
