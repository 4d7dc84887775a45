use std::env;
use std::str::FromStr;

/// How unknown candidate tokens are treated when resolving delivery targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Drop candidate tokens that are not already registered.
    Filter,
    /// Register unknown tokens on first use and keep them as targets.
    Upsert,
}

impl FromStr for TokenPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "filter" => Ok(TokenPolicy::Filter),
            "upsert" => Ok(TokenPolicy::Upsert),
            other => Err(format!("unknown token policy '{}'", other)),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub push_endpoint: String,
    pub push_server_key: String,
    pub sms_endpoint: String,
    pub sms_api_key: String,
    pub provider_timeout_secs: u64,
    pub token_policy: TokenPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "./.db/relay.db".to_string()),
            push_endpoint: env::var("PUSH_ENDPOINT")
                .unwrap_or_else(|_| "https://fcm.googleapis.com".to_string()),
            push_server_key: env::var("PUSH_SERVER_KEY").expect("PUSH_SERVER_KEY must be set"),
            sms_endpoint: env::var("SMS_ENDPOINT")
                .unwrap_or_else(|_| "https://api.callr.com".to_string()),
            sms_api_key: env::var("SMS_API_KEY").expect("SMS_API_KEY must be set"),
            provider_timeout_secs: env::var("PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("PROVIDER_TIMEOUT_SECS must be a valid number"),
            token_policy: env::var("TOKEN_POLICY")
                .unwrap_or_else(|_| "upsert".to_string())
                .parse()
                .expect("TOKEN_POLICY must be 'filter' or 'upsert'"),
        }
    }
}
