use std::env;

const DEFAULT_PORTAL_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    pub portal_url: String,
}

impl Config {
    pub fn load() -> Self {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let portal_url = env::var("PORTAL_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_PORTAL_URL.to_string());

        Config {
            portal_url: portal_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        env::set_var("PORTAL_URL", "http://example.edu:9000/");
        let config = Config::load();
        assert_eq!(config.portal_url, "http://example.edu:9000");
        env::remove_var("PORTAL_URL");
    }
}
