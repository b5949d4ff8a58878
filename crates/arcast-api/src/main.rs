use arcast_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    arcast_api::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (storage, converter, routes)
    let (_state, router) = arcast_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    arcast_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
