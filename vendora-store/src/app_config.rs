use serde::Deserialize;
use std::env;

use vendora_catalog::LOW_STOCK_THRESHOLD;
use vendora_order::CheckoutPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i32,
}

fn default_low_stock_threshold() -> i32 {
    LOW_STOCK_THRESHOLD
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

impl BusinessRules {
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy {
            low_stock_threshold: self.low_stock_threshold,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment file, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VENDORA_BUSINESS_RULES__LOW_STOCK_THRESHOLD=5`
            .add_source(config::Environment::with_prefix("VENDORA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_threshold() {
        let rules = BusinessRules::default();
        assert_eq!(rules.low_stock_threshold, LOW_STOCK_THRESHOLD);
        assert_eq!(rules.checkout_policy().low_stock_threshold, LOW_STOCK_THRESHOLD);
    }
}
