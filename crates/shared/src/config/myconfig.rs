use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub cors_origin: String,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: String,
    pub cloudinary: CloudinaryConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key).with_context(|| format!("Missing environment variable: {key}"))
        };
        let or_default =
            |key: &str, default: &str| -> String { lookup(key).unwrap_or_else(|| default.into()) };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let run_migrations = match or_default("RUN_MIGRATIONS", "true").as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = or_default("PORT", "3001")
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = or_default("DB_MIN_CONN", "1")
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = or_default("DB_MAX_CONN", "5")
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) must not exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        // media host
        let cloudinary = CloudinaryConfig {
            cloud_name: required("CLOUDINARY_CLOUD_NAME")?,
            api_key: required("CLOUDINARY_API_KEY")?,
            api_secret: required("CLOUDINARY_API_SECRET")?,
            folder: or_default("CLOUDINARY_FOLDER", "ecommerce"),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            cors_origin: or_default("CORS_ORIGIN", "http://localhost:3000"),
            db_min_conn,
            db_max_conn,
            otel_endpoint: or_default("OTEL_ENDPOINT", "http://otel-collector:4317"),
            cloudinary,
        })
    }
}
