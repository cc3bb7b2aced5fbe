use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub directions: DirectionsConfig,
    pub track_cache_ttl: u64,
    pub track_cache_max_entries: u64,
}

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub api_key: String,
    /// Set when requests go through a proxy; switches auth to a Bearer header
    pub base_url: Option<String>,
    /// OpenRouteService routing profile, e.g. `driving-car`
    pub profile: String,
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    pub fn from_env() -> Result<Self, String> {
        let timeout_secs: u64 = env::var("DIRECTIONS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_DIRECTIONS_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid DIRECTIONS_TIMEOUT_SECS")?;

        if !(1..=300).contains(&timeout_secs) {
            return Err("DIRECTIONS_TIMEOUT_SECS must be between 1 and 300 seconds".to_string());
        }

        let profile = env::var("ORS_PROFILE").unwrap_or_else(|_| DEFAULT_ORS_PROFILE.to_string());
        if profile.trim().is_empty() || profile.contains('/') {
            return Err(format!("Invalid ORS_PROFILE: '{}'", profile));
        }

        Ok(DirectionsConfig {
            api_key: env::var("ORS_API_KEY").map_err(|_| "ORS_API_KEY must be set")?,
            base_url: env::var("ORS_BASE_URL").ok().filter(|url| !url.is_empty()),
            profile,
            timeout_secs,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let track_cache_max_entries: u64 = env::var("TRACK_CACHE_MAX_ENTRIES")
            .unwrap_or_else(|_| DEFAULT_TRACK_CACHE_MAX_ENTRIES.to_string())
            .parse()
            .map_err(|_| "Invalid TRACK_CACHE_MAX_ENTRIES")?;

        if track_cache_max_entries == 0 {
            return Err("TRACK_CACHE_MAX_ENTRIES must be at least 1".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            directions: DirectionsConfig::from_env()?,
            track_cache_ttl: env::var("TRACK_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_TRACK_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid TRACK_CACHE_TTL")?,
            track_cache_max_entries,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "HOST",
        "PORT",
        "ORS_API_KEY",
        "ORS_BASE_URL",
        "ORS_PROFILE",
        "DIRECTIONS_TIMEOUT_SECS",
        "TRACK_CACHE_TTL",
        "TRACK_CACHE_MAX_ENTRIES",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    #[serial]
    fn config_defaults() {
        clear_env();
        unsafe { env::set_var("ORS_API_KEY", "ors-test") };

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.server_address(), "0.0.0.0:3000");
        assert_eq!(cfg.directions.api_key, "ors-test");
        assert_eq!(cfg.directions.profile, "driving-car");
        assert!(cfg.directions.base_url.is_none());
        assert_eq!(cfg.directions.timeout_secs, 30);
        assert_eq!(cfg.track_cache_ttl, 3_600);
        assert_eq!(cfg.track_cache_max_entries, 500);

        clear_env();
    }

    #[test]
    #[serial]
    fn config_overrides() {
        clear_env();
        unsafe {
            env::set_var("ORS_API_KEY", "ors-test");
            env::set_var("ORS_BASE_URL", "http://localhost:4000/v2/directions");
            env::set_var("ORS_PROFILE", "driving-hgv");
            env::set_var("PORT", "8080");
            env::set_var("TRACK_CACHE_TTL", "60");
        }

        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(
            cfg.directions.base_url.as_deref(),
            Some("http://localhost:4000/v2/directions")
        );
        assert_eq!(cfg.directions.profile, "driving-hgv");
        assert_eq!(cfg.track_cache_ttl, 60);

        clear_env();
    }

    #[test]
    #[serial]
    fn config_missing_api_key() {
        clear_env();
        assert!(Config::from_env().is_err());
    }

    #[test]
    #[serial]
    fn config_rejects_bad_values() {
        clear_env();
        unsafe {
            env::set_var("ORS_API_KEY", "ors-test");
            env::set_var("DIRECTIONS_TIMEOUT_SECS", "0");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::set_var("DIRECTIONS_TIMEOUT_SECS", "10");
            env::set_var("PORT", "not-a-port");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("PORT");
            env::set_var("TRACK_CACHE_MAX_ENTRIES", "0");
        }
        assert!(Config::from_env().is_err());

        clear_env();
    }
}
