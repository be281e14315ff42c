use std::env;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_PAGE_LIMIT: u64 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Empty means any origin is allowed
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound applied to the `limit` query parameter of the list endpoint
    pub max_page_limit: u64,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| "sqlite://bookshelf.db?mode=rwc".to_string());

        Self {
            database_url,
            port: lookup("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            max_page_limit: lookup("MAX_PAGE_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&v: &u64| v > 0)
                .unwrap_or(DEFAULT_MAX_PAGE_LIMIT),
            seed_demo: lookup("SEED_DEMO").is_some(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite://bookshelf.db?mode=rwc");
        assert_eq!(config.port, 3001);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.max_page_limit, 100);
        assert!(!config.seed_demo);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8080"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:3000, https://books.example ,"),
            ("MAX_PAGE_LIMIT", "25"),
            ("SEED_DEMO", "1"),
        ]);

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "https://books.example"]
        );
        assert_eq!(config.max_page_limit, 25);
        assert!(config.seed_demo);
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let config = config_from(&[("PORT", "http"), ("MAX_PAGE_LIMIT", "0")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.max_page_limit, DEFAULT_MAX_PAGE_LIMIT);
    }
}
