use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::config::constants::DEFAULT_HOUSEHOLD_SIZE;

// Form field names used at the UI boundary
pub const FIELD_CAR_TYPE: &str = "car_type";
pub const FIELD_CAR_KM: &str = "car_km";
pub const FIELD_PUBLIC_TRANSPORT_KM: &str = "public_transport_km";
pub const FIELD_FLIGHT_HOURS: &str = "flight_hours";
pub const FIELD_ELECTRICITY_KWH: &str = "electricity_kwh";
pub const FIELD_RENEWABLE_ENERGY: &str = "renewable_energy";
pub const FIELD_DIET_TYPE: &str = "diet_type";
pub const FIELD_WASTE_KG: &str = "waste_kg";
pub const FIELD_HOUSEHOLD_SIZE: &str = "household_size";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
    #[default]
    None,           // No car, also the fallback for unknown values
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "petrol" => Ok(TransportMode::Petrol),
            "diesel" => Ok(TransportMode::Diesel),
            "hybrid" => Ok(TransportMode::Hybrid),
            "electric" => Ok(TransportMode::Electric),
            "none" => Ok(TransportMode::None),
            _ => Err(format!("Unknown transport mode: {}", s)),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportMode::Petrol => write!(f, "petrol"),
            TransportMode::Diesel => write!(f, "diesel"),
            TransportMode::Hybrid => write!(f, "hybrid"),
            TransportMode::Electric => write!(f, "electric"),
            TransportMode::None => write!(f, "none"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RenewableShare {
    #[default]
    None,
    Some,
    Most,
    All,
}

impl FromStr for RenewableShare {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(RenewableShare::None),
            "some" => Ok(RenewableShare::Some),
            "most" => Ok(RenewableShare::Most),
            "all" => Ok(RenewableShare::All),
            _ => Err(format!("Unknown renewable share: {}", s)),
        }
    }
}

impl fmt::Display for RenewableShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenewableShare::None => write!(f, "none"),
            RenewableShare::Some => write!(f, "some"),
            RenewableShare::Most => write!(f, "most"),
            RenewableShare::All => write!(f, "all"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegetarian,
    MeatLight,      // Meat 1-2 times a week
    #[default]
    MeatMedium,     // Meat 3-5 times a week
    MeatHeavy,      // Meat daily
}

impl FromStr for DietType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vegetarian" => Ok(DietType::Vegetarian),
            "meat_light" => Ok(DietType::MeatLight),
            "meat_medium" => Ok(DietType::MeatMedium),
            "meat_heavy" => Ok(DietType::MeatHeavy),
            _ => Err(format!("Unknown diet type: {}", s)),
        }
    }
}

impl fmt::Display for DietType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietType::Vegetarian => write!(f, "vegetarian"),
            DietType::MeatLight => write!(f, "meat_light"),
            DietType::MeatMedium => write!(f, "meat_medium"),
            DietType::MeatHeavy => write!(f, "meat_heavy"),
        }
    }
}

/// Household inputs for one footprint calculation.
///
/// Built once at the UI boundary, usually through [`EmissionInput::from_form`],
/// so the estimator never sees raw form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionInput {
    pub transport_mode: TransportMode,
    pub car_km_per_week: f64,
    pub public_transport_km_per_week: f64,
    pub flight_hours_per_year: f64,
    pub electricity_kwh_per_month: f64,
    pub renewable_share: RenewableShare,
    pub diet_type: DietType,
    pub waste_kg_per_week: f64,
    pub household_size: u32,
}

impl Default for EmissionInput {
    fn default() -> Self {
        Self {
            transport_mode: TransportMode::default(),
            car_km_per_week: 0.0,
            public_transport_km_per_week: 0.0,
            flight_hours_per_year: 0.0,
            electricity_kwh_per_month: 0.0,
            renewable_share: RenewableShare::default(),
            diet_type: DietType::default(),
            waste_kg_per_week: 0.0,
            household_size: DEFAULT_HOUSEHOLD_SIZE,
        }
    }
}

impl EmissionInput {
    /// Builds an input from flat form values. Never fails: missing or
    /// malformed numbers become 0, unknown choices fall back to their
    /// default variant and the household size falls back to 1.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let field = |name: &str| form.get(name).map(String::as_str);

        Self {
            transport_mode: parse_choice(field(FIELD_CAR_TYPE)),
            car_km_per_week: parse_amount(field(FIELD_CAR_KM)),
            public_transport_km_per_week: parse_amount(field(FIELD_PUBLIC_TRANSPORT_KM)),
            flight_hours_per_year: parse_amount(field(FIELD_FLIGHT_HOURS)),
            electricity_kwh_per_month: parse_amount(field(FIELD_ELECTRICITY_KWH)),
            renewable_share: parse_choice(field(FIELD_RENEWABLE_ENERGY)),
            diet_type: parse_choice(field(FIELD_DIET_TYPE)),
            waste_kg_per_week: parse_amount(field(FIELD_WASTE_KG)),
            household_size: parse_household_size(field(FIELD_HOUSEHOLD_SIZE)),
        }
    }

    /// Household size with the division guard applied.
    pub fn household_divisor(&self) -> f64 {
        self.household_size.max(1) as f64
    }
}

/// Parses a non-negative amount, treating anything unusable as 0.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        Ok(value) if value.is_finite() => 0.0,
        _ => {
            debug!(value = raw, "Unparseable amount, using 0");
            0.0
        }
    }
}

/// Parses the household size; whole part of the number, at least 1.
pub fn parse_household_size(raw: Option<&str>) -> u32 {
    let Some(raw) = raw.map(str::trim) else {
        return DEFAULT_HOUSEHOLD_SIZE;
    };

    let parsed = raw
        .parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        });

    match parsed {
        Some(size) if size >= 1 => u32::try_from(size).unwrap_or(u32::MAX),
        _ => DEFAULT_HOUSEHOLD_SIZE,
    }
}

fn parse_choice<T>(raw: Option<&str>) -> T
where
    T: FromStr<Err = String> + Default,
{
    match raw {
        Some(value) => value.parse().unwrap_or_else(|e: String| {
            debug!("{}, using default", e);
            T::default()
        }),
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_form_uses_defaults() {
        let input = EmissionInput::from_form(&HashMap::new());
        assert_eq!(input, EmissionInput::default());
        assert_eq!(input.household_size, 1);
        assert_eq!(input.diet_type, DietType::MeatMedium);
        assert_eq!(input.renewable_share, RenewableShare::None);
        assert_eq!(input.transport_mode, TransportMode::None);
    }

    #[test]
    fn parses_full_form() {
        let input = EmissionInput::from_form(&form(&[
            ("car_type", "Diesel"),
            ("car_km", "120.5"),
            ("public_transport_km", " 40 "),
            ("flight_hours", "6"),
            ("electricity_kwh", "250"),
            ("renewable_energy", "most"),
            ("diet_type", "vegetarian"),
            ("waste_kg", "7"),
            ("household_size", "4"),
        ]));

        assert_eq!(input.transport_mode, TransportMode::Diesel);
        assert_eq!(input.car_km_per_week, 120.5);
        assert_eq!(input.public_transport_km_per_week, 40.0);
        assert_eq!(input.flight_hours_per_year, 6.0);
        assert_eq!(input.electricity_kwh_per_month, 250.0);
        assert_eq!(input.renewable_share, RenewableShare::Most);
        assert_eq!(input.diet_type, DietType::Vegetarian);
        assert_eq!(input.waste_kg_per_week, 7.0);
        assert_eq!(input.household_size, 4);
    }

    #[test]
    fn malformed_amounts_become_zero() {
        assert_eq!(parse_amount(Some("abc")), 0.0);
        assert_eq!(parse_amount(Some("")), 0.0);
        assert_eq!(parse_amount(Some("NaN")), 0.0);
        assert_eq!(parse_amount(Some("inf")), 0.0);
        assert_eq!(parse_amount(Some("-12")), 0.0);
        assert_eq!(parse_amount(None), 0.0);
        assert_eq!(parse_amount(Some("3.25")), 3.25);
    }

    #[test]
    fn household_size_is_never_zero() {
        assert_eq!(parse_household_size(None), 1);
        assert_eq!(parse_household_size(Some("0")), 1);
        assert_eq!(parse_household_size(Some("-3")), 1);
        assert_eq!(parse_household_size(Some("many")), 1);
        assert_eq!(parse_household_size(Some("2.7")), 2);
        assert_eq!(parse_household_size(Some("0.5")), 1);
        assert_eq!(parse_household_size(Some("5")), 5);
    }

    #[test]
    fn unknown_choices_fall_back() {
        let input = EmissionInput::from_form(&form(&[
            ("car_type", "rocket"),
            ("renewable_energy", "half"),
            ("diet_type", "carnivore"),
        ]));
        assert_eq!(input.transport_mode, TransportMode::None);
        assert_eq!(input.renewable_share, RenewableShare::None);
        assert_eq!(input.diet_type, DietType::MeatMedium);
    }

    #[test]
    fn display_matches_form_values() {
        for diet in ["vegetarian", "meat_light", "meat_medium", "meat_heavy"] {
            assert_eq!(diet.parse::<DietType>().unwrap().to_string(), diet);
        }
        assert!("unknown".parse::<RenewableShare>().is_err());
    }
}
