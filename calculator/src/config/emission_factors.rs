use serde::{Deserialize, Serialize};

use crate::config::constants::*;
use crate::models::breakdown::EmissionLevel;
use crate::models::input::{DietType, RenewableShare, TransportMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportFactors {
    pub petrol: f64,
    pub diesel: f64,
    pub hybrid: f64,
    pub electric: f64,
    pub none: f64,
    pub public_transport: f64,
    pub flight_speed_kmh: f64,
    pub flight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectricityFactors {
    pub grid_intensity: f64,    // kg CO2e per kWh
    pub renewable_none: f64,
    pub renewable_some: f64,
    pub renewable_most: f64,
    pub renewable_all: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietEmissions {
    pub vegetarian: f64,
    pub meat_light: f64,
    pub meat_medium: f64,
    pub meat_heavy: f64,
}

/// Every coefficient the estimator uses. Defaults are calibrated for Kenya.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    pub weeks_per_year: f64,
    pub months_per_year: f64,
    pub transport: TransportFactors,
    pub electricity: ElectricityFactors,
    pub diet: DietEmissions,
    pub waste: f64,             // kg CO2e per kg waste
}

impl Default for TransportFactors {
    fn default() -> Self {
        Self {
            petrol: PETROL_CAR_FACTOR,
            diesel: DIESEL_CAR_FACTOR,
            hybrid: HYBRID_CAR_FACTOR,
            electric: ELECTRIC_CAR_FACTOR,
            none: NO_CAR_FACTOR,
            public_transport: PUBLIC_TRANSPORT_FACTOR,
            flight_speed_kmh: FLIGHT_AVERAGE_SPEED_KMH,
            flight: FLIGHT_FACTOR,
        }
    }
}

impl Default for ElectricityFactors {
    fn default() -> Self {
        Self {
            grid_intensity: GRID_INTENSITY_KG_PER_KWH,
            renewable_none: RENEWABLE_NONE_FACTOR,
            renewable_some: RENEWABLE_SOME_FACTOR,
            renewable_most: RENEWABLE_MOST_FACTOR,
            renewable_all: RENEWABLE_ALL_FACTOR,
        }
    }
}

impl Default for DietEmissions {
    fn default() -> Self {
        Self {
            vegetarian: VEGETARIAN_DIET_EMISSIONS,
            meat_light: MEAT_LIGHT_DIET_EMISSIONS,
            meat_medium: MEAT_MEDIUM_DIET_EMISSIONS,
            meat_heavy: MEAT_HEAVY_DIET_EMISSIONS,
        }
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            weeks_per_year: WEEKS_PER_YEAR,
            months_per_year: MONTHS_PER_YEAR,
            transport: TransportFactors::default(),
            electricity: ElectricityFactors::default(),
            diet: DietEmissions::default(),
            waste: WASTE_FACTOR,
        }
    }
}

impl EmissionFactors {
    /// Every coefficient by its config path, for validation.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        let t = &self.transport;
        let e = &self.electricity;
        let d = &self.diet;
        vec![
            ("weeks_per_year", self.weeks_per_year),
            ("months_per_year", self.months_per_year),
            ("transport.petrol", t.petrol),
            ("transport.diesel", t.diesel),
            ("transport.hybrid", t.hybrid),
            ("transport.electric", t.electric),
            ("transport.none", t.none),
            ("transport.public_transport", t.public_transport),
            ("transport.flight_speed_kmh", t.flight_speed_kmh),
            ("transport.flight", t.flight),
            ("electricity.grid_intensity", e.grid_intensity),
            ("electricity.renewable_none", e.renewable_none),
            ("electricity.renewable_some", e.renewable_some),
            ("electricity.renewable_most", e.renewable_most),
            ("electricity.renewable_all", e.renewable_all),
            ("diet.vegetarian", d.vegetarian),
            ("diet.meat_light", d.meat_light),
            ("diet.meat_medium", d.meat_medium),
            ("diet.meat_heavy", d.meat_heavy),
            ("waste", self.waste),
        ]
    }

    pub fn car_factor(&self, mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Petrol => self.transport.petrol,
            TransportMode::Diesel => self.transport.diesel,
            TransportMode::Hybrid => self.transport.hybrid,
            TransportMode::Electric => self.transport.electric,
            TransportMode::None => self.transport.none,
        }
    }

    pub fn renewable_factor(&self, share: RenewableShare) -> f64 {
        match share {
            RenewableShare::None => self.electricity.renewable_none,
            RenewableShare::Some => self.electricity.renewable_some,
            RenewableShare::Most => self.electricity.renewable_most,
            RenewableShare::All => self.electricity.renewable_all,
        }
    }

    pub fn diet_emissions(&self, diet: DietType) -> f64 {
        match diet {
            DietType::Vegetarian => self.diet.vegetarian,
            DietType::MeatLight => self.diet.meat_light,
            DietType::MeatMedium => self.diet.meat_medium,
            DietType::MeatHeavy => self.diet.meat_heavy,
        }
    }
}

/// Upper bounds (exclusive) of the per-capita emission levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
    pub low: f64,
    pub moderate: f64,
    pub high: f64,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        Self {
            low: LOW_EMISSION_LIMIT,
            moderate: MODERATE_EMISSION_LIMIT,
            high: HIGH_EMISSION_LIMIT,
        }
    }
}

impl LevelThresholds {
    pub fn classify(&self, per_capita: f64) -> EmissionLevel {
        if per_capita < self.low {
            EmissionLevel::Low
        } else if per_capita < self.moderate {
            EmissionLevel::Moderate
        } else if per_capita < self.high {
            EmissionLevel::High
        } else {
            EmissionLevel::VeryHigh
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionThresholds {
    pub transport: f64,
    pub electricity: f64,
    pub diet: f64,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            transport: TRANSPORT_SUGGESTION_THRESHOLD,
            electricity: ELECTRICITY_SUGGESTION_THRESHOLD,
            diet: DIET_SUGGESTION_THRESHOLD,
        }
    }
}
