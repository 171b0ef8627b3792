use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub paystack: PaystackConfig,
    pub mailer: MailerConfig,
    #[serde(default)]
    pub commission: CommissionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaystackConfig {
    pub secret_key: String,
    pub base_url: String,
    pub callback_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub api_key: String,
    pub base_url: String,
    pub from_email: String,
}

/// Commission ledger knobs. The flat rate applies to referral-code orders and
/// to affiliate-link orders whose product carries no percentage of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionConfig {
    pub flat_rate_percent: i64,
    pub maturation_days: i64,
}

impl Default for CommissionConfig {
    fn default() -> Self {
        Self {
            flat_rate_percent: 20,
            maturation_days: 30,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse configuration file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No config file: build entirely from environment variables
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    paystack: PaystackConfig {
                        secret_key: get_env("PAYSTACK_SECRET_KEY").unwrap_or_default(),
                        base_url: get_env("PAYSTACK_BASE_URL")
                            .unwrap_or_else(|| "https://api.paystack.co".to_string()),
                        callback_url: get_env("PAYSTACK_CALLBACK_URL").unwrap_or_default(),
                    },
                    mailer: MailerConfig {
                        api_key: get_env("MAILER_API_KEY").unwrap_or_default(),
                        base_url: get_env("MAILER_BASE_URL")
                            .unwrap_or_else(|| "https://api.postmarkapp.com".to_string()),
                        from_email: get_env("MAILER_FROM_EMAIL").unwrap_or_default(),
                    },
                    commission: CommissionConfig {
                        flat_rate_percent: get_env_parse("COMMISSION_FLAT_RATE_PERCENT", 20i64),
                        maturation_days: get_env_parse("COMMISSION_MATURATION_DAYS", 30i64),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Cannot read configuration file {config_path}: {e}").into());
            }
        };

        // Environment overrides apply even when the file exists
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.refresh_token_expires_in = n;
        }
        if let Ok(v) = env::var("PAYSTACK_SECRET_KEY") {
            config.paystack.secret_key = v;
        }
        if let Ok(v) = env::var("PAYSTACK_BASE_URL") {
            config.paystack.base_url = v;
        }
        if let Ok(v) = env::var("PAYSTACK_CALLBACK_URL") {
            config.paystack.callback_url = v;
        }
        if let Ok(v) = env::var("MAILER_API_KEY") {
            config.mailer.api_key = v;
        }
        if let Ok(v) = env::var("MAILER_BASE_URL") {
            config.mailer.base_url = v;
        }
        if let Ok(v) = env::var("MAILER_FROM_EMAIL") {
            config.mailer.from_email = v;
        }
        if let Ok(v) = env::var("COMMISSION_FLAT_RATE_PERCENT")
            && let Ok(n) = v.parse()
        {
            config.commission.flat_rate_percent = n;
        }
        if let Ok(v) = env::var("COMMISSION_MATURATION_DAYS")
            && let Ok(n) = v.parse()
        {
            config.commission.maturation_days = n;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commission_defaults() {
        let commission = CommissionConfig::default();
        assert_eq!(commission.flat_rate_percent, 20);
        assert_eq!(commission.maturation_days, 30);
    }
}
