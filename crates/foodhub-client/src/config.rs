use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub storage_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            storage_path: "./data/foodhub.db".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("FOODHUB_API_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.api_url),
            storage_path: env::var("FOODHUB_STORAGE_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.storage_path),
        }
    }

    /// Applies command-line overrides on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, storage_path: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(path) = storage_path {
            self.storage_path = path;
        }
        self
    }
}
