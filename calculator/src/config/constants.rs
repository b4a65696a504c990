// Time Conversion Constants
pub const WEEKS_PER_YEAR: f64 = 52.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;

// Transport Emission Factors (kg CO2e per km)
pub const PETROL_CAR_FACTOR: f64 = 0.12;
pub const DIESEL_CAR_FACTOR: f64 = 0.13;
pub const HYBRID_CAR_FACTOR: f64 = 0.08;
pub const ELECTRIC_CAR_FACTOR: f64 = 0.05;
pub const NO_CAR_FACTOR: f64 = 0.0;
pub const PUBLIC_TRANSPORT_FACTOR: f64 = 0.05;

// Aviation
pub const FLIGHT_AVERAGE_SPEED_KMH: f64 = 800.0;  // Used to turn flight hours into distance
pub const FLIGHT_FACTOR: f64 = 0.2;               // kg CO2e per passenger km

// Electricity
pub const GRID_INTENSITY_KG_PER_KWH: f64 = 0.5;   // Kenya grid average
pub const RENEWABLE_NONE_FACTOR: f64 = 1.0;
pub const RENEWABLE_SOME_FACTOR: f64 = 0.7;
pub const RENEWABLE_MOST_FACTOR: f64 = 0.3;
pub const RENEWABLE_ALL_FACTOR: f64 = 0.1;

// Diet (kg CO2e per year)
pub const VEGETARIAN_DIET_EMISSIONS: f64 = 1000.0;
pub const MEAT_LIGHT_DIET_EMISSIONS: f64 = 1500.0;
pub const MEAT_MEDIUM_DIET_EMISSIONS: f64 = 2000.0;
pub const MEAT_HEAVY_DIET_EMISSIONS: f64 = 3000.0;

// Waste
pub const WASTE_FACTOR: f64 = 0.5;                // kg CO2e per kg waste

// Emission level thresholds (per capita, kg CO2e per year)
pub const LOW_EMISSION_LIMIT: f64 = 2000.0;
pub const MODERATE_EMISSION_LIMIT: f64 = 5000.0;
pub const HIGH_EMISSION_LIMIT: f64 = 10000.0;

// Suggestion triggers (kg CO2e per year)
pub const TRANSPORT_SUGGESTION_THRESHOLD: f64 = 2000.0;
pub const ELECTRICITY_SUGGESTION_THRESHOLD: f64 = 1500.0;
pub const DIET_SUGGESTION_THRESHOLD: f64 = 2000.0;

// Suggestion savings estimates (kg CO2e per year)
pub const TRANSPORT_SUGGESTION_SAVINGS: f64 = 1000.0;
pub const ELECTRICITY_SUGGESTION_SAVINGS: f64 = 750.0;
pub const DIET_SUGGESTION_SAVINGS: f64 = 1000.0;
pub const TREE_PLANTING_SAVINGS: f64 = 100.0;

// Local history
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_HISTORY_FILE: &str = "carbon_history.json";

// Remote backend
pub const CARBON_FOOTPRINTS_ENDPOINT: &str = "api/carbon-footprints/";

// Household
pub const DEFAULT_HOUSEHOLD_SIZE: u32 = 1;
