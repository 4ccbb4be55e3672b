use std::{env, fs, ops::Deref, str::FromStr, sync::Arc, time::Duration};

use bigdecimal::BigDecimal;

use crate::{error::Error, provider::DatabasePool};

/// One week.
const MAX_LOAN_STATUS_INTERVAL_IN_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

#[derive(Debug)]
pub struct State {
    pub config: Config,
    pub database: DatabasePool,
}

impl State {
    pub fn new(config: Config, database: DatabasePool) -> State {
        Self { config, database }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub auth: String,
    pub loan_interest_rate: BigDecimal,
    pub fixed_deposit_interest_rate: BigDecimal,
    pub bill_payment_fee_rate: BigDecimal,
    pub loan_status_interval: Duration,
}

pub fn get_configuration() -> Result<Config, Error> {
    let database_url = env::var("DATABASE_URL")?;
    let database_max_connections: u32 =
        env::var("DATABASE_MAX_CONNECTIONS")?.parse()?;
    let server_host = env::var("SERVER_HOST")?;
    let port: u16 = env::var("PORT")?.parse()?;
    let allowed_origins = env::var("ALLOWED_ORIGINS")?
        .split(',')
        .map(|item| item.trim().to_owned())
        .collect::<Vec<String>>();
    let auth = env::var("AUTH")?;

    let loan_interest_rate = parse_rate("LOAN_INTEREST_RATE")?;
    let fixed_deposit_interest_rate =
        parse_rate("FIXED_DEPOSIT_INTEREST_RATE")?;
    let bill_payment_fee_rate = parse_rate("BILL_PAYMENT_FEE_RATE")?;
    let loan_status_interval = interval_from_minutes(
        env::var("LOAN_STATUS_INTERVAL_IN_MINUTES")?.parse()?,
    )?;

    let config = Config {
        database_url,
        database_max_connections,
        server_host,
        port,
        allowed_origins,
        auth,
        loan_interest_rate,
        fixed_deposit_interest_rate,
        bill_payment_fee_rate,
        loan_status_interval,
    };

    Ok(config)
}

fn interval_from_minutes(minutes: u64) -> Result<Duration, Error> {
    if minutes == 0 {
        return Err(Error::ConfigurationError(String::from(
            "LOAN_STATUS_INTERVAL_IN_MINUTES must be greater than zero",
        )));
    }

    if minutes > MAX_LOAN_STATUS_INTERVAL_IN_MINUTES {
        return Err(Error::ConfigurationError(format!(
            "LOAN_STATUS_INTERVAL_IN_MINUTES must be at most {}, got {}",
            MAX_LOAN_STATUS_INTERVAL_IN_MINUTES, minutes
        )));
    }

    Ok(Duration::from_secs(minutes * 60))
}

fn parse_rate(key: &str) -> Result<BigDecimal, Error> {
    let rate = BigDecimal::from_str(env::var(key)?.trim())?;

    if rate < BigDecimal::from(0) || rate >= BigDecimal::from(1) {
        return Err(Error::ConfigurationError(format!(
            "{} must be a fraction in [0, 1), got {}",
            key, rate
        )));
    }

    Ok(rate)
}

pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let ledger_config_file: &str = "ledger.conf";

    let directory = env!("CARGO_MANIFEST_DIR");
    let path = format!("{}/{}", directory, config_file);
    let ledger_config_path = format!("{}/{}", directory, ledger_config_file);

    let ledger_config_string = fs::read_to_string(ledger_config_path)?;
    set_env(parse_config_string(&ledger_config_string));

    // Secrets may come from the real environment instead of `.env`.
    if let Ok(config_string) = fs::read_to_string(path) {
        set_env(parse_config_string(&config_string));
    }

    Ok(())
}

fn set_env(params: Vec<(String, String)>) {
    for (key, value) in params {
        env::set_var(key, value);
    }
}

fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_string() {
        let params = parse_config_string(
            "# comment\nPORT=8080\n\nDATABASE_URL=postgres://u:p@h/db?sslmode=disable\nBROKEN\n",
        );

        assert_eq!(
            params,
            vec![
                (String::from("PORT"), String::from("8080")),
                (
                    String::from("DATABASE_URL"),
                    String::from("postgres://u:p@h/db?sslmode=disable")
                ),
            ]
        );
    }

    #[test]
    fn test_parse_config_string_keeps_equals_in_value() {
        let params = parse_config_string("AUTH=a=b=c");
        assert_eq!(params, vec![(String::from("AUTH"), String::from("a=b=c"))]);
    }

    #[test]
    fn test_interval_from_minutes() {
        assert_eq!(
            interval_from_minutes(5).unwrap(),
            Duration::from_secs(300)
        );
        assert!(matches!(
            interval_from_minutes(0),
            Err(Error::ConfigurationError(_))
        ));
        assert_eq!(
            interval_from_minutes(10_080).unwrap(),
            Duration::from_secs(604_800)
        );
        assert!(matches!(
            interval_from_minutes(10_081),
            Err(Error::ConfigurationError(_))
        ));
        assert!(matches!(
            interval_from_minutes(u64::MAX),
            Err(Error::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_ledger_conf_is_parseable() {
        let content = include_str!("../ledger.conf");
        let params = parse_config_string(content);
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();

        for key in [
            "SERVER_HOST",
            "PORT",
            "LOAN_INTEREST_RATE",
            "FIXED_DEPOSIT_INTEREST_RATE",
            "BILL_PAYMENT_FEE_RATE",
            "LOAN_STATUS_INTERVAL_IN_MINUTES",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }
}
