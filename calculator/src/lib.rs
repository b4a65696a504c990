// Main module declarations for the carbon footprint calculator

// Estimation core
pub mod core {
    pub mod estimator;
    pub mod suggestions;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod emission_factors;
    pub mod calculator_config;
}

// Model definitions
pub mod models {
    pub mod input;
    pub mod breakdown;
    pub mod suggestion;
}

// Persistence: local history, remote backend and the fallback between them
pub mod storage {
    pub mod history;
    pub mod remote;
    pub mod persistence;
}

// Analysis and reporting
pub mod analysis {
    pub mod statistics;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::core::estimator::{classify, compute, EmissionCalculator};
pub use crate::core::suggestions::generate_suggestions;
pub use crate::models::breakdown::{EmissionBreakdown, EmissionLevel};
pub use crate::models::input::EmissionInput;
pub use crate::config::calculator_config::CalculatorConfig;
