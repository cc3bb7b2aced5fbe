use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// A named preset controlling how far a loop reaches and how many waypoints
/// it gets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteTemplate {
    pub name: String,
    pub description: String,
    pub terrain: String,
    pub difficulty: String,
    /// Multiplier on the loop radius
    pub scenic_factor: f64,
    /// Multiplier on the perimeter waypoint count
    pub waypoint_factor: f64,
}

impl RouteTemplate {
    /// Template with only the two geometry factors set. Handy for tests and
    /// ad-hoc loops that skip the catalog.
    pub fn with_factors(name: &str, scenic_factor: f64, waypoint_factor: f64) -> Self {
        RouteTemplate {
            name: name.to_string(),
            description: String::new(),
            terrain: "mixed".to_string(),
            difficulty: "moderate".to_string(),
            scenic_factor,
            waypoint_factor,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidConfiguration(
                "Template name must not be empty".to_string(),
            ));
        }
        for (label, value) in [
            ("scenic_factor", self.scenic_factor),
            ("waypoint_factor", self.waypoint_factor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AppError::InvalidConfiguration(format!(
                    "Template '{}': {} must be a positive number, got {}",
                    self.name, label, value
                )));
            }
        }
        Ok(())
    }
}

/// Immutable, ordered set of route templates keyed by name.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<RouteTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<RouteTemplate>) -> Result<Self> {
        for (i, template) in templates.iter().enumerate() {
            template.validate()?;
            if templates[..i].iter().any(|t| t.name == template.name) {
                return Err(AppError::InvalidConfiguration(format!(
                    "Duplicate template name: '{}'",
                    template.name
                )));
            }
        }
        Ok(TemplateCatalog { templates })
    }

    pub fn get(&self, name: &str) -> Result<&RouteTemplate> {
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| AppError::InvalidConfiguration(format!("Unknown template: '{}'", name)))
    }

    pub fn all(&self) -> &[RouteTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        fn template(
            name: &str,
            description: &str,
            terrain: &str,
            difficulty: &str,
            scenic_factor: f64,
            waypoint_factor: f64,
        ) -> RouteTemplate {
            RouteTemplate {
                name: name.to_string(),
                description: description.to_string(),
                terrain: terrain.to_string(),
                difficulty: difficulty.to_string(),
                scenic_factor,
                waypoint_factor,
            }
        }

        TemplateCatalog {
            templates: vec![
                template(
                    "Custom Route",
                    "Balanced loop with no particular terrain bias",
                    "mixed",
                    "moderate",
                    1.0,
                    1.0,
                ),
                template(
                    "Mountain Twisties",
                    "Challenging mountain roads with tight curves",
                    "mountain",
                    "advanced",
                    1.4,
                    1.3,
                ),
                template(
                    "Scenic Coastal",
                    "Relaxed coastal cruising with ocean views",
                    "coastal",
                    "easy",
                    1.2,
                    1.0,
                ),
                template(
                    "Countryside Cruise",
                    "Rolling back roads through farmland and small towns",
                    "rural",
                    "easy",
                    1.1,
                    0.9,
                ),
                template(
                    "Adventure Gravel",
                    "Long loop mixing paved and unpaved roads",
                    "offroad",
                    "expert",
                    1.6,
                    1.5,
                ),
            ],
        }
    }
}
