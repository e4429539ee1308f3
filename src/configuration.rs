use config::ConfigError;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub port: u16,
    /// "dev" unlocks the destructive admin reset endpoint; anything
    /// else keeps it disabled.
    pub platform: String,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }
}

/// Auth secrets and lifetimes, loaded once at startup and held
/// immutably for the process lifetime. Rotating `jwt_secret`
/// invalidates all outstanding access tokens immediately but leaves
/// issued refresh tokens untouched.
#[derive(serde::Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    /// Shared key presented by the billing webhook caller.
    pub api_key: String,
    pub access_token_expiry: i64, // seconds (3600 = the 1 hour session convention)
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("configuration").required(false))
        .add_source(config::Environment::with_prefix("MURMUR").separator("__"))
        .build()?;
    settings.try_deserialize::<Settings>()
}
