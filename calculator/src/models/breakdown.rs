use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EmissionLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl EmissionLevel {
    /// Human readable label, as shown to users and stored in the local history.
    pub fn label(&self) -> &'static str {
        match self {
            EmissionLevel::Low => "Low",
            EmissionLevel::Moderate => "Moderate",
            EmissionLevel::High => "High",
            EmissionLevel::VeryHigh => "Very High",
        }
    }
}

impl FromStr for EmissionLevel {
    type Err = String;

    // Accepts both the tag ("very_high") and the label ("Very High")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "_").as_str() {
            "low" => Ok(EmissionLevel::Low),
            "moderate" => Ok(EmissionLevel::Moderate),
            "high" => Ok(EmissionLevel::High),
            "very_high" => Ok(EmissionLevel::VeryHigh),
            _ => Err(format!("Unknown emission level: {}", s)),
        }
    }
}

impl fmt::Display for EmissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Yearly emissions per category, in kg CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryEmissions {
    pub transport: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    pub transport: f64,
    pub electricity: f64,
    pub diet: f64,
    pub waste: f64,
    pub total: f64,
    pub per_capita: f64,
    pub level: EmissionLevel,
}

impl EmissionBreakdown {
    pub fn categories(&self) -> CategoryEmissions {
        CategoryEmissions {
            transport: self.transport,
            electricity: self.electricity,
            diet: self.diet,
            waste: self.waste,
        }
    }

    /// Share of the total for each category, in percent. All zero when the total is zero.
    pub fn shares(&self) -> CategoryEmissions {
        if self.total <= 0.0 {
            return CategoryEmissions { transport: 0.0, electricity: 0.0, diet: 0.0, waste: 0.0 };
        }
        CategoryEmissions {
            transport: self.transport / self.total * 100.0,
            electricity: self.electricity / self.total * 100.0,
            diet: self.diet / self.total * 100.0,
            waste: self.waste / self.total * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_tags_and_labels() {
        assert_eq!("very_high".parse::<EmissionLevel>(), Ok(EmissionLevel::VeryHigh));
        assert_eq!("Very High".parse::<EmissionLevel>(), Ok(EmissionLevel::VeryHigh));
        assert_eq!("Moderate".parse::<EmissionLevel>(), Ok(EmissionLevel::Moderate));
        assert!("extreme".parse::<EmissionLevel>().is_err());
    }

    #[test]
    fn level_serializes_as_tag() {
        let json = serde_json::to_string(&EmissionLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
    }

    #[test]
    fn shares_of_empty_breakdown_are_zero() {
        let breakdown = EmissionBreakdown {
            transport: 0.0,
            electricity: 0.0,
            diet: 0.0,
            waste: 0.0,
            total: 0.0,
            per_capita: 0.0,
            level: EmissionLevel::Low,
        };
        let shares = breakdown.shares();
        assert_eq!(shares.transport + shares.electricity + shares.diet + shares.waste, 0.0);
    }
}
