#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub db_max_connections: u32,
    /// Base URL of the COLIN business API, without a trailing slash.
    pub colin_api_url: String,
    pub colin_api_svc_client_id: String,
    pub colin_api_svc_client_secret: String,
    /// Token endpoint used for the client-credentials grant.
    pub auth_token_url: String,
    pub rest_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a positive number"))?,
            colin_api_url: optional_var("COLIN_API_URL")
                .trim_end_matches('/')
                .to_string(),
            colin_api_svc_client_id: optional_var("COLIN_API_SVC_CLIENT_ID"),
            colin_api_svc_client_secret: optional_var("COLIN_API_SVC_CLIENT_SECRET"),
            auth_token_url: optional_var("KEYCLOAK_AUTH_TOKEN_URL"),
            rest_timeout_secs: std::env::var("REST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("REST_TIMEOUT_SECS must be a number of seconds"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            config.database_url.chars().take(20).collect::<String>()
        );
        tracing::debug!("COLIN API URL: {}", config.colin_api_url);
        tracing::debug!("Auth token URL: {}", config.auth_token_url);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// COLIN and auth settings are not validated here. A missing value shows up
/// later as a token or connection failure on the details endpoint.
fn optional_var(name: &str) -> String {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::warn!("{} is not set; COLIN detail lookups will fail", name);
            String::new()
        }
    }
}
