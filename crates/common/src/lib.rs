use clap::Parser;
use database::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:cards.db")]
    pub database_url: String,

    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_flags_override_defaults() {
        let config =
            Config::try_parse_from(["cards", "--port", "8080", "--database-url", "sqlite:other.db"])
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite:other.db");
    }
}
