use anyhow::Context as _;
use tracing::{error, Level};

use ledger::{
    configuration::{
        get_configuration, set_configuration, AppState, Config, State,
    },
    error::Error,
    handler::loan_status,
    migration::run_migrations,
    provider::DatabasePool,
    server,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let result = app_main().await;

    if let Err(err) = &result {
        error!("{}", err);
    }

    result
}

async fn app_main() -> Result<(), Error> {
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_level(true)
        .with_max_level(Level::INFO)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let (config, database) = match init().await {
        Ok((config, database)) => (config, database),
        Err(e) => return Err(Error::ConfigurationError(format!("{:#}", e))),
    };

    let state = State::new(config, database);
    let app_state = AppState::new(state);

    let (_, _) = tokio::try_join!(
        server::server_task(&app_state),
        loan_status::loan_status_task(app_state.clone()),
    )?;

    Ok(())
}

async fn init() -> anyhow::Result<(Config, DatabasePool)> {
    set_configuration().context("Failed to load ledger.conf")?;
    let config = get_configuration().context("Invalid configuration")?;
    run_migrations(&config.database_url)
        .await
        .context("Failed to migrate the database")?;
    let database = DatabasePool::new(&config)
        .await
        .context("Failed to connect to the database")?;
    Ok((config, database))
}
