//! Yearly household emission estimates.
//!
//! Transport, diet and waste are household figures. Electricity is divided by
//! the household size before it is added to the total, so the total mixes
//! per-person and per-household units. Keep that asymmetry: stored histories
//! and the backend rely on these exact numbers.

use tracing::debug;

use crate::config::calculator_config::CalculatorConfig;
use crate::config::emission_factors::{EmissionFactors, LevelThresholds};
use crate::models::breakdown::{EmissionBreakdown, EmissionLevel};
use crate::models::input::EmissionInput;

/// Estimator context, built per session from configuration.
#[derive(Debug, Clone, Default)]
pub struct EmissionCalculator {
    factors: EmissionFactors,
    levels: LevelThresholds,
}

impl EmissionCalculator {
    pub fn new(factors: EmissionFactors, levels: LevelThresholds) -> Self {
        Self { factors, levels }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::new(config.factors.clone(), config.levels.clone())
    }

    pub fn transport_emissions(&self, input: &EmissionInput) -> f64 {
        let f = &self.factors;
        let car = input.car_km_per_week * f.weeks_per_year * f.car_factor(input.transport_mode);
        let public = input.public_transport_km_per_week * f.weeks_per_year * f.transport.public_transport;
        let flight_km = input.flight_hours_per_year * f.transport.flight_speed_kmh;
        let flights = flight_km * f.transport.flight;

        car + public + flights
    }

    pub fn electricity_emissions(&self, input: &EmissionInput) -> f64 {
        let f = &self.factors;
        let household = input.electricity_kwh_per_month
            * f.months_per_year
            * f.electricity.grid_intensity
            * f.renewable_factor(input.renewable_share);

        household / input.household_divisor()
    }

    pub fn diet_emissions(&self, input: &EmissionInput) -> f64 {
        self.factors.diet_emissions(input.diet_type)
    }

    pub fn waste_emissions(&self, input: &EmissionInput) -> f64 {
        input.waste_kg_per_week * self.factors.weeks_per_year * self.factors.waste
    }

    pub fn compute(&self, input: &EmissionInput) -> EmissionBreakdown {
        let transport = self.transport_emissions(input);
        let electricity = self.electricity_emissions(input);
        let diet = self.diet_emissions(input);
        let waste = self.waste_emissions(input);

        let total = transport + electricity + diet + waste;
        let per_capita = total / input.household_divisor();
        let level = self.levels.classify(per_capita);

        debug!(transport, electricity, diet, waste, total, per_capita, level = %level, "Computed footprint");

        EmissionBreakdown {
            transport,
            electricity,
            diet,
            waste,
            total,
            per_capita,
            level,
        }
    }
}

/// Computes a breakdown with the default (Kenya) factors.
pub fn compute(input: &EmissionInput) -> EmissionBreakdown {
    EmissionCalculator::default().compute(input)
}

/// Classifies a per-capita figure with the default thresholds.
pub fn classify(per_capita: f64) -> EmissionLevel {
    LevelThresholds::default().classify(per_capita)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::input::{DietType, RenewableShare, TransportMode};
    use std::collections::HashMap;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    fn reference_input() -> EmissionInput {
        EmissionInput {
            transport_mode: TransportMode::Petrol,
            car_km_per_week: 20.0,
            public_transport_km_per_week: 0.0,
            flight_hours_per_year: 0.0,
            electricity_kwh_per_month: 200.0,
            renewable_share: RenewableShare::None,
            diet_type: DietType::MeatMedium,
            waste_kg_per_week: 10.0,
            household_size: 2,
        }
    }

    #[test]
    fn reference_household() {
        let breakdown = compute(&reference_input());

        assert_close(breakdown.transport, 124.8);
        assert_close(breakdown.electricity, 600.0);
        assert_close(breakdown.diet, 2000.0);
        assert_close(breakdown.waste, 260.0);
        assert_close(breakdown.total, 2984.8);
        assert_close(breakdown.per_capita, 1492.4);
        assert_eq!(breakdown.level, EmissionLevel::Low);
    }

    #[test]
    fn total_is_exact_sum_of_categories() {
        let modes = [
            TransportMode::Petrol,
            TransportMode::Diesel,
            TransportMode::Hybrid,
            TransportMode::Electric,
            TransportMode::None,
        ];
        let shares = [RenewableShare::None, RenewableShare::Some, RenewableShare::Most, RenewableShare::All];

        for (i, mode) in modes.iter().enumerate() {
            for (j, share) in shares.iter().enumerate() {
                let input = EmissionInput {
                    transport_mode: *mode,
                    car_km_per_week: 13.7 * i as f64,
                    public_transport_km_per_week: 3.3,
                    flight_hours_per_year: 1.5 * j as f64,
                    electricity_kwh_per_month: 97.1,
                    renewable_share: *share,
                    diet_type: DietType::MeatHeavy,
                    waste_kg_per_week: 2.9,
                    household_size: 3,
                };
                let b = compute(&input);
                assert_eq!(b.total, b.transport + b.electricity + b.diet + b.waste);
                assert_eq!(b.per_capita, b.total / 3.0);
            }
        }
    }

    #[test]
    fn transport_components() {
        let input = EmissionInput {
            transport_mode: TransportMode::Diesel,
            car_km_per_week: 100.0,
            public_transport_km_per_week: 50.0,
            flight_hours_per_year: 10.0,
            ..EmissionInput::default()
        };
        // 100*52*0.13 + 50*52*0.05 + 10*800*0.2
        assert_close(compute(&input).transport, 676.0 + 130.0 + 1600.0);
    }

    #[test]
    fn no_car_ignores_car_distance() {
        let input = EmissionInput {
            transport_mode: TransportMode::None,
            car_km_per_week: 500.0,
            ..EmissionInput::default()
        };
        assert_eq!(compute(&input).transport, 0.0);
    }

    #[test]
    fn only_electricity_is_divided_by_household() {
        let single = EmissionInput {
            transport_mode: TransportMode::Petrol,
            car_km_per_week: 50.0,
            electricity_kwh_per_month: 300.0,
            waste_kg_per_week: 5.0,
            ..EmissionInput::default()
        };
        let family = EmissionInput { household_size: 4, ..single.clone() };

        let a = compute(&single);
        let b = compute(&family);
        assert_eq!(a.transport, b.transport);
        assert_eq!(a.diet, b.diet);
        assert_eq!(a.waste, b.waste);
        assert_close(b.electricity, a.electricity / 4.0);
        assert_close(b.per_capita, b.total / 4.0);
    }

    #[test]
    fn renewable_share_scales_electricity() {
        let base = EmissionInput { electricity_kwh_per_month: 100.0, ..EmissionInput::default() };
        let expected = [
            (RenewableShare::None, 600.0),
            (RenewableShare::Some, 420.0),
            (RenewableShare::Most, 180.0),
            (RenewableShare::All, 60.0),
        ];
        for (share, kg) in expected {
            let input = EmissionInput { renewable_share: share, ..base.clone() };
            assert_close(compute(&input).electricity, kg);
        }
    }

    #[test]
    fn unknown_form_choices_use_fallback_factors() {
        let mut form = HashMap::new();
        form.insert("diet_type".to_string(), "fruitarian".to_string());
        form.insert("renewable_energy".to_string(), "partly".to_string());
        form.insert("electricity_kwh".to_string(), "100".to_string());

        let breakdown = compute(&EmissionInput::from_form(&form));
        assert_eq!(breakdown.diet, 2000.0);
        assert_close(breakdown.electricity, 100.0 * 12.0 * 0.5 * 1.0);
    }

    #[test]
    fn diet_constants() {
        let cases = [
            (DietType::Vegetarian, 1000.0),
            (DietType::MeatLight, 1500.0),
            (DietType::MeatMedium, 2000.0),
            (DietType::MeatHeavy, 3000.0),
        ];
        for (diet, kg) in cases {
            let input = EmissionInput { diet_type: diet, ..EmissionInput::default() };
            assert_eq!(compute(&input).diet, kg);
        }
    }

    #[test]
    fn classification_boundaries_are_half_open() {
        assert_eq!(classify(0.0), EmissionLevel::Low);
        assert_eq!(classify(1999.99), EmissionLevel::Low);
        assert_eq!(classify(2000.0), EmissionLevel::Moderate);
        assert_eq!(classify(4999.99), EmissionLevel::Moderate);
        assert_eq!(classify(5000.0), EmissionLevel::High);
        assert_eq!(classify(9999.99), EmissionLevel::High);
        assert_eq!(classify(10000.0), EmissionLevel::VeryHigh);
        assert_eq!(classify(1e9), EmissionLevel::VeryHigh);
    }

    #[test]
    fn custom_factors_are_used() {
        let mut factors = EmissionFactors::default();
        factors.electricity.grid_intensity = 0.25;
        let calculator = EmissionCalculator::new(factors, LevelThresholds::default());

        let input = EmissionInput { electricity_kwh_per_month: 100.0, ..EmissionInput::default() };
        assert_close(calculator.compute(&input).electricity, 300.0);
    }

    #[test]
    fn zero_household_size_is_guarded() {
        let input = EmissionInput { household_size: 0, electricity_kwh_per_month: 10.0, ..EmissionInput::default() };
        let breakdown = compute(&input);
        assert!(breakdown.per_capita.is_finite());
        assert!(breakdown.electricity.is_finite());
        assert_eq!(breakdown.per_capita, breakdown.total);
    }
}
