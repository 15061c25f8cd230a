use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    /// Token lifetime in minutes.
    pub jwt_maxage: i64,
    pub port: u16,
    pub smtp: Option<SmtpConfig>,
    pub sms: Option<SmsConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_url: String,
    pub api_key: String,
}

impl Config {
    pub fn init() -> anyhow::Result<Config> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET_KEY").context("JWT_SECRET_KEY must be set")?;

        let jwt_maxage = match std::env::var("JWT_MAXAGE") {
            Ok(value) => value
                .parse::<i64>()
                .context("JWT_MAXAGE must be a number of minutes")?,
            Err(_) => 60,
        };

        let port = match std::env::var("PORT") {
            Ok(value) => value.parse::<u16>().context("PORT must be a valid port")?,
            Err(_) => 8000,
        };

        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        // Email and SMS stay in log-only mode unless their host is configured.
        let smtp = std::env::var("SMTP_HOST").ok().map(|host| SmtpConfig {
            host,
            username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
            password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
            from: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Rentnest <no-reply@rentnest.local>".to_string()),
        });

        let sms = std::env::var("SMS_API_URL").ok().map(|api_url| SmsConfig {
            api_url,
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
        });

        Ok(Config {
            database_url,
            frontend_url,
            jwt_secret,
            jwt_maxage,
            port,
            smtp,
            sms,
        })
    }
}
