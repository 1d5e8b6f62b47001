//! NASA fetcher worker.

use crate::nasa::client::NasaClient;
use crate::nasa::types::{NasaChannels, NasaCommand, NasaConfig, NasaResult};
use bevy::log::{error, info};
use std::sync::{
    Arc, Mutex,
    mpsc::{self},
};
use std::thread;

pub fn start_nasa_worker(config: NasaConfig) -> NasaChannels {
    let (cmd_tx, cmd_rx) = mpsc::channel::<NasaCommand>();
    let (res_tx, res_rx) = mpsc::channel::<NasaResult>();

    thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
        rt.block_on(async move {
            let client = match NasaClient::new(config) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    error!("[NASA] worker could not start: {:#}", err);
                    return;
                }
            };

            // Each command runs as its own task so slow feeds don't hold up the rest
            while let Ok(cmd) = cmd_rx.recv() {
                let client = client.clone();
                let res_tx = res_tx.clone();
                tokio::spawn(async move {
                    let _ = res_tx.send(run_command(&client, cmd).await);
                });
            }
            info!("[NASA] worker shutting down");
        });
    });

    NasaChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    }
}

pub async fn run_command(client: &NasaClient, cmd: NasaCommand) -> NasaResult {
    let feed = cmd.feed();
    let result = match cmd {
        NasaCommand::FetchApod => client.fetch_apod().await.map(NasaResult::Apod),
        NasaCommand::FetchPlanetaryData => client
            .fetch_planetary_data()
            .await
            .map(NasaResult::PlanetaryData),
        NasaCommand::SearchImages => client
            .search_planet_images()
            .await
            .map(NasaResult::ImageSearch),
    };

    result.unwrap_or_else(|err| NasaResult::Error {
        feed,
        error: format!("{:#}", err),
    })
}
