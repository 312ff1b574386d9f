use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub swagger: SwaggerConfig,
    pub anti_cheat: AntiCheatConfig,
    pub economy: EconomyConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: String,
    pub jwt_leeway: Duration,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Anti-cheat guard and consistency checker settings
#[derive(Debug, Clone)]
pub struct AntiCheatConfig {
    /// When false every guard check allows and nothing is recorded
    pub enabled: bool,
    /// How often the ledger sweeper runs
    pub sweep_interval: Duration,
    /// Records whose latest call is older than this are evicted by the sweeper
    pub idle_ttl: Duration,
    /// Allowed absolute difference between a declared and a stored berrys balance
    pub balance_tolerance: i64,
    /// How far in the future a declared request timestamp may lie
    pub clock_skew: Duration,
}

#[derive(Debug, Clone)]
pub struct EconomyConfig {
    /// Berrys credited to a player row when it is first created
    pub starting_berrys: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            anti_cheat: AntiCheatConfig::from_env()?,
            economy: EconomyConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "sqlite://cardgame.db?mode=rwc";
    // SQLite serializes writers, so the pool stays small
    const DEFAULT_MAX_CONNECTIONS: u32 = 5;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string());

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl AuthConfig {
    const DEFAULT_AUDIENCE: &'static str = "cardgame-api";
    const DEFAULT_JWT_LEEWAY_SECS: u64 = 60; // 1 minute

    pub fn from_env() -> Result<Self, String> {
        let jwt_secret = env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "JWT_SECRET environment variable is required".to_string())?;

        let issuer = env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty());

        let audience =
            env::var("JWT_AUDIENCE").unwrap_or_else(|_| Self::DEFAULT_AUDIENCE.to_string());

        let jwt_leeway_secs = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| Self::DEFAULT_JWT_LEEWAY_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_LEEWAY must be a valid number".to_string())?;

        Ok(Self {
            jwt_secret,
            issuer,
            audience,
            jwt_leeway: Duration::from_secs(jwt_leeway_secs),
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Cardgame API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "API documentation for the collectible card game".to_string());

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl AntiCheatConfig {
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300; // 5 minutes
    const DEFAULT_IDLE_TTL_SECS: u64 = 7200; // 2 hours, past the longest window
    const DEFAULT_BALANCE_TOLERANCE: i64 = 0;
    const DEFAULT_CLOCK_SKEW_SECS: u64 = 5;

    pub fn from_env() -> Result<Self, String> {
        let enabled = parse_bool(
            &env::var("ANTI_CHEAT_ENABLED").unwrap_or_else(|_| "true".to_string()),
        )
        .ok_or_else(|| "ANTI_CHEAT_ENABLED must be true or false".to_string())?;

        let sweep_interval_secs = env::var("ANTI_CHEAT_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_SWEEP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ANTI_CHEAT_SWEEP_INTERVAL_SECS must be a valid number".to_string())?;

        let idle_ttl_secs = env::var("ANTI_CHEAT_IDLE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "ANTI_CHEAT_IDLE_TTL_SECS must be a valid number".to_string())?;

        let balance_tolerance = env::var("BALANCE_TOLERANCE")
            .unwrap_or_else(|_| Self::DEFAULT_BALANCE_TOLERANCE.to_string())
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| "BALANCE_TOLERANCE must be a non-negative number".to_string())?;

        let clock_skew_secs = env::var("CLOCK_SKEW_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_CLOCK_SKEW_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CLOCK_SKEW_SECS must be a valid number".to_string())?;

        if sweep_interval_secs == 0 {
            return Err("ANTI_CHEAT_SWEEP_INTERVAL_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            enabled,
            sweep_interval: Duration::from_secs(sweep_interval_secs),
            idle_ttl: Duration::from_secs(idle_ttl_secs),
            balance_tolerance,
            clock_skew: Duration::from_secs(clock_skew_secs),
        })
    }
}

impl Default for AntiCheatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval: Duration::from_secs(Self::DEFAULT_SWEEP_INTERVAL_SECS),
            idle_ttl: Duration::from_secs(Self::DEFAULT_IDLE_TTL_SECS),
            balance_tolerance: Self::DEFAULT_BALANCE_TOLERANCE,
            clock_skew: Duration::from_secs(Self::DEFAULT_CLOCK_SKEW_SECS),
        }
    }
}

impl EconomyConfig {
    const DEFAULT_STARTING_BERRYS: i64 = 100;

    pub fn from_env() -> Result<Self, String> {
        let starting_berrys = env::var("STARTING_BERRYS")
            .unwrap_or_else(|_| Self::DEFAULT_STARTING_BERRYS.to_string())
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| "STARTING_BERRYS must be a non-negative number".to_string())?;

        Ok(Self { starting_berrys })
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_berrys: Self::DEFAULT_STARTING_BERRYS,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
