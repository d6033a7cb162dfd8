use domain::RainforestClient;
use log::{error, info, warn};
use service::{config::Config, logging::Logger};

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config as &Config);

    let client = match RainforestClient::from_config(&config) {
        Ok(client) => config
            .tests()
            .iter()
            .fold(client, |client, id| client.add_test(id.as_str())),
        Err(e) => {
            error!("Failed to create Rainforest client: {e}");
            std::process::exit(1);
        }
    };

    info!(
        "Enqueueing run of tests {:?} on [{}]...",
        client.selected_tests(),
        client.base_url()
    );

    match client.run().await {
        Ok(response) if response.is_success() => {
            info!("Run enqueued ({}): {}", response.status, response.text);
        }
        Ok(response) => {
            warn!("Rainforest rejected the run ({}): {}", response.status, response.text);
            std::process::exit(1);
        }
        Err(e) => {
            error!("Failed to enqueue run: {e}");
            std::process::exit(1);
        }
    }
}
