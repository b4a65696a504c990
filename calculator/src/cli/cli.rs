use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::models::input::*;

#[derive(Parser)]
#[command(author, version, about = "Household carbon footprint calculator", long_about = None)]
pub struct Args {
    #[arg(short, long, global = true, help = "JSON config file with emission factors and storage settings")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Override the local history file")]
    history_file: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, global = true, default_value_t = false)]
    debug_logging: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate a household's yearly footprint
    Calculate(CalculateArgs),
    /// List locally saved calculations
    History,
    /// Summarize locally saved calculations
    Stats,
    /// Export locally saved calculations to CSV
    Export {
        #[arg(short, long, default_value = "carbon_history.csv")]
        output: PathBuf,
    },
}

// Values are kept as raw strings so they go through the same lenient parsing as form input
#[derive(clap::Args, Default)]
pub struct CalculateArgs {
    #[arg(long, help = "petrol, diesel, hybrid, electric or none")]
    car_type: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Car distance per week (km)")]
    car_km: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Public transport distance per week (km)")]
    public_transport_km: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Hours flown per year")]
    flight_hours: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Electricity use per month (kWh)")]
    electricity_kwh: Option<String>,

    #[arg(long, help = "none, some, most or all")]
    renewable_energy: Option<String>,

    #[arg(long, help = "vegetarian, meat_light, meat_medium or meat_heavy")]
    diet_type: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "Waste per week (kg)")]
    waste_kg: Option<String>,

    #[arg(long, allow_hyphen_values = true, help = "People in the household")]
    household_size: Option<String>,

    #[arg(long, default_value_t = false, help = "Save the result (server first, local history otherwise)")]
    save: bool,

    #[arg(long, default_value_t = false, help = "Print the result as JSON")]
    json: bool,
}

impl Args {
    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.history_file.as_deref()
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

impl CalculateArgs {
    /// The provided values as a flat form, keyed by form field name.
    pub fn form_values(&self) -> HashMap<String, String> {
        let fields = [
            (FIELD_CAR_TYPE, &self.car_type),
            (FIELD_CAR_KM, &self.car_km),
            (FIELD_PUBLIC_TRANSPORT_KM, &self.public_transport_km),
            (FIELD_FLIGHT_HOURS, &self.flight_hours),
            (FIELD_ELECTRICITY_KWH, &self.electricity_kwh),
            (FIELD_RENEWABLE_ENERGY, &self.renewable_energy),
            (FIELD_DIET_TYPE, &self.diet_type),
            (FIELD_WASTE_KG, &self.waste_kg),
            (FIELD_HOUSEHOLD_SIZE, &self.household_size),
        ];

        fields
            .into_iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
            .collect()
    }

    pub fn input(&self) -> EmissionInput {
        EmissionInput::from_form(&self.form_values())
    }

    pub fn save(&self) -> bool {
        self.save
    }

    pub fn json(&self) -> bool {
        self.json
    }
}
