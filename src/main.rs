use clinic_slots_api::config::ApiConfig;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration, including clinic hours
    let config = ApiConfig::from_env()?;

    clinic_slots_api::start_server(config).await?;

    Ok(())
}
