use std::env;

/// Infrastructure settings read once at startup
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub password_pepper: String,

    /// When set, a SUPER_ADMIN account is seeded at startup
    pub bootstrap_admin_password: Option<String>,
    pub bootstrap_admin_username: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

fn required(name: &'static str) -> Result<String, SettingsError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SettingsError::Missing(name)),
    }
}

impl BootstrapSettings {
    /// Load settings from environment variables.
    ///
    /// `JWT_SECRET` and `PASSWORD_PEPPER` are required and must be at least
    /// 32 characters; everything else has a development default.
    pub fn from_env() -> Result<Self, SettingsError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://admissions.db?mode=rwc".to_string());
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            return Err(SettingsError::Invalid {
                name: "JWT_SECRET",
                reason: "must be at least 32 characters".to_string(),
            });
        }

        let password_pepper = required("PASSWORD_PEPPER")?;
        if password_pepper.len() < 32 {
            return Err(SettingsError::Invalid {
                name: "PASSWORD_PEPPER",
                reason: "must be at least 32 characters".to_string(),
            });
        }

        let bootstrap_admin_password = env::var("BOOTSTRAP_ADMIN_PASSWORD")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let bootstrap_admin_username =
            env::var("BOOTSTRAP_ADMIN_USERNAME").unwrap_or_else(|_| "superadmin".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            password_pepper,
            bootstrap_admin_password,
            bootstrap_admin_username,
        })
    }
}
