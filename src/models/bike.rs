use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BikeCategory {
    Adventure,
    Touring,
    Sport,
    Roadster,
    Heritage,
}

impl fmt::Display for BikeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BikeCategory::Adventure => write!(f, "adventure"),
            BikeCategory::Touring => write!(f, "touring"),
            BikeCategory::Sport => write!(f, "sport"),
            BikeCategory::Roadster => write!(f, "roadster"),
            BikeCategory::Heritage => write!(f, "heritage"),
        }
    }
}

impl FromStr for BikeCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adventure" => Ok(BikeCategory::Adventure),
            "touring" => Ok(BikeCategory::Touring),
            "sport" | "sport-touring" => Ok(BikeCategory::Sport),
            "roadster" => Ok(BikeCategory::Roadster),
            "heritage" => Ok(BikeCategory::Heritage),
            _ => Err(format!("Invalid bike category: '{}'", s)),
        }
    }
}

/// Fuel and comfort characteristics of a motorcycle model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BikeProfile {
    pub name: String,
    pub tank_capacity_l: f64,
    pub fuel_consumption_l_per_100km: f64,
    /// Hours of riding between rest breaks
    pub comfort_stop_interval_h: f64,
    pub category: BikeCategory,
}

impl BikeProfile {
    /// Distance a full tank covers, ignoring reserve
    pub fn range_km(&self) -> f64 {
        self.tank_capacity_l / self.fuel_consumption_l_per_100km * 100.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidConfiguration(
                "Bike name must not be empty".to_string(),
            ));
        }
        for (label, value) in [
            ("tank_capacity_l", self.tank_capacity_l),
            (
                "fuel_consumption_l_per_100km",
                self.fuel_consumption_l_per_100km,
            ),
            ("comfort_stop_interval_h", self.comfort_stop_interval_h),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::InvalidConfiguration(format!(
                    "Bike '{}': {} must be a positive number, got {}",
                    self.name, label, value
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BikeCatalog {
    bikes: Vec<BikeProfile>,
}

impl BikeCatalog {
    pub fn new(bikes: Vec<BikeProfile>) -> Result<Self> {
        for (i, bike) in bikes.iter().enumerate() {
            bike.validate()?;
            if bikes[..i].iter().any(|b| b.name == bike.name) {
                return Err(AppError::InvalidConfiguration(format!(
                    "Duplicate bike name: '{}'",
                    bike.name
                )));
            }
        }
        Ok(BikeCatalog { bikes })
    }

    pub fn get(&self, name: &str) -> Result<&BikeProfile> {
        self.bikes
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| AppError::InvalidConfiguration(format!("Unknown bike model: '{}'", name)))
    }

    pub fn all(&self) -> &[BikeProfile] {
        &self.bikes
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }
}

impl Default for BikeCatalog {
    fn default() -> Self {
        let bike = |name: &str, tank: f64, consumption: f64, comfort: f64, category: BikeCategory| BikeProfile {
            name: name.to_string(),
            tank_capacity_l: tank,
            fuel_consumption_l_per_100km: consumption,
            comfort_stop_interval_h: comfort,
            category,
        };

        BikeCatalog {
            bikes: vec![
                bike("R 1250 GS", 20.0, 5.5, 2.5, BikeCategory::Adventure),
                bike("R 1250 GS Adventure", 30.0, 6.0, 3.0, BikeCategory::Adventure),
                bike("R 1250 RT", 25.0, 5.8, 3.5, BikeCategory::Touring),
                bike("K 1600 GT", 26.5, 6.4, 3.5, BikeCategory::Touring),
                bike("S 1000 XR", 20.0, 6.6, 2.0, BikeCategory::Sport),
                bike("R nineT", 18.0, 5.3, 2.0, BikeCategory::Heritage),
            ],
        }
    }
}
