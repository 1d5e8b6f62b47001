//! NASA systems (requests + apply).

use crate::nasa::fetcher::start_nasa_worker;
use crate::nasa::types::{
    FeedStatus, NasaChannels, NasaCommand, NasaConfig, NasaData, NasaResult, NasaState,
};
use bevy::prelude::*;
use chrono::Utc;

pub fn setup_nasa_worker(mut commands: Commands, config: Res<NasaConfig>) {
    let channels = start_nasa_worker(config.clone());
    info!("[INIT] NASA worker started");
    commands.insert_resource(channels);
}

/// Startup only: the picture of the day is requested exactly once
pub fn queue_startup_apod(channels: Option<Res<NasaChannels>>, mut state: ResMut<NasaState>) {
    let Some(channels) = channels else {
        warn!("[NASA] no worker, picture of the day not requested");
        return;
    };
    queue_request(&channels, &mut state, NasaCommand::FetchApod);
}

/// N fetches APOD + NEO feed together, I runs the planet image search
pub fn nasa_hotkeys(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    channels: Option<Res<NasaChannels>>,
    mut state: ResMut<NasaState>,
) {
    let (Some(keys), Some(channels)) = (keys, channels) else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyN) {
        queue_request(&channels, &mut state, NasaCommand::FetchPlanetaryData);
    }
    if keys.just_pressed(KeyCode::KeyI) {
        queue_request(&channels, &mut state, NasaCommand::SearchImages);
    }
}

fn queue_request(channels: &NasaChannels, state: &mut NasaState, cmd: NasaCommand) {
    let feed = cmd.feed();
    if state.status(feed).is_loading() {
        return;
    }
    *state.status_mut(feed) = match channels.cmd_tx.send(cmd) {
        Ok(()) => FeedStatus::Loading,
        Err(err) => {
            warn!("[NASA] failed to queue {:?} request: {}", feed, err);
            FeedStatus::Failed(format!("Failed to queue request: {}", err))
        }
    };
}

pub fn apply_nasa_results(
    mut data: ResMut<NasaData>,
    mut state: ResMut<NasaState>,
    channels: Option<Res<NasaChannels>>,
) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        let now = Utc::now();
        match msg {
            NasaResult::Apod(apod) => {
                info!("[NASA] picture of the day: {} ({})", apod.title, apod.date);
                data.apod = Some(apod);
                state.apod = FeedStatus::Loaded { at: now };
            }
            NasaResult::PlanetaryData(planetary) => {
                data.planetary = Some(planetary);
                state.planetary = FeedStatus::Loaded { at: now };
            }
            NasaResult::ImageSearch(search) => {
                data.image_search = Some(search);
                state.image_search = FeedStatus::Loaded { at: now };
            }
            NasaResult::Error { feed, error } => {
                *state.status_mut(feed) = FeedStatus::Failed(error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nasa::NasaPlugin;
    use crate::nasa::types::{Apod, NasaFeed};
    use crate::ui::apod::{ApodPanel, spawn_apod_panel};
    use chrono::NaiveDate;
    use std::sync::{Arc, Mutex, mpsc};

    /// App with hand-made channels in place of the network worker
    fn app_with_channels() -> (App, mpsc::Sender<NasaResult>, mpsc::Receiver<NasaCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (res_tx, res_rx) = mpsc::channel();
        let mut app = App::new();
        app.init_resource::<NasaData>()
            .init_resource::<NasaState>()
            .insert_resource(NasaChannels {
                cmd_tx,
                res_rx: Arc::new(Mutex::new(res_rx)),
            })
            .add_systems(Update, apply_nasa_results);
        (app, res_tx, cmd_rx)
    }

    fn panel_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&ApodPanel>().iter(world).count()
    }

    #[test]
    fn startup_requests_apod_once() {
        let (mut app, _res_tx, cmd_rx) = app_with_channels();
        app.add_systems(Startup, queue_startup_apod)
            .add_systems(Update, nasa_hotkeys);
        for _ in 0..4 {
            app.update();
        }

        let queued: Vec<NasaCommand> = cmd_rx.try_iter().collect();
        assert_eq!(queued.len(), 1);
        assert!(matches!(queued[0], NasaCommand::FetchApod));
        assert!(app.world().resource::<NasaState>().apod.is_loading());
    }

    #[test]
    fn failed_apod_leaves_overlay_absent() {
        let (mut app, res_tx, _cmd_rx) = app_with_channels();
        app.add_systems(Startup, queue_startup_apod)
            .add_systems(Update, spawn_apod_panel.after(apply_nasa_results));
        app.update();

        res_tx
            .send(NasaResult::Error {
                feed: NasaFeed::Apod,
                error: "http 503".to_string(),
            })
            .unwrap();
        app.update();
        app.update();

        assert_eq!(panel_count(&mut app), 0);
        assert!(app.world().resource::<NasaData>().apod.is_none());
        assert_eq!(
            app.world().resource::<NasaState>().apod,
            FeedStatus::Failed("http 503".to_string())
        );

        // A later success still brings the panel up
        res_tx
            .send(NasaResult::Apod(Apod {
                title: "Orion".to_string(),
                url: "https://apod.nasa.gov/apod/image/orion.jpg".to_string(),
                explanation: "Nebula.".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap(),
                copyright: None,
                media_type: Some("image".to_string()),
                hdurl: None,
            }))
            .unwrap();
        app.update();
        assert_eq!(panel_count(&mut app), 1);
    }

    #[test]
    fn error_result_marks_only_its_feed() {
        let (mut app, res_tx, _cmd_rx) = app_with_channels();
        res_tx
            .send(NasaResult::Error {
                feed: NasaFeed::PlanetaryData,
                error: "http 500".to_string(),
            })
            .unwrap();
        app.update();

        let state = app.world().resource::<NasaState>();
        assert_eq!(state.planetary, FeedStatus::Failed("http 500".to_string()));
        assert_eq!(state.apod, FeedStatus::Idle);
        assert!(app.world().resource::<NasaData>().planetary.is_none());
    }

    #[test]
    fn image_search_result_is_stored() {
        let (mut app, res_tx, _cmd_rx) = app_with_channels();
        res_tx
            .send(NasaResult::ImageSearch(serde_json::json!({ "collection": {} })))
            .unwrap();
        app.update();

        assert!(app.world().resource::<NasaData>().image_search.is_some());
        assert!(matches!(
            app.world().resource::<NasaState>().image_search,
            FeedStatus::Loaded { .. }
        ));
    }

    #[test]
    fn duplicate_requests_are_not_queued_while_loading() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_res_tx, res_rx) = mpsc::channel();
        let channels = NasaChannels {
            cmd_tx,
            res_rx: Arc::new(Mutex::new(res_rx)),
        };
        let mut state = NasaState::default();
        queue_request(&channels, &mut state, NasaCommand::SearchImages);
        queue_request(&channels, &mut state, NasaCommand::SearchImages);

        assert!(state.image_search.is_loading());
        assert_eq!(cmd_rx.try_iter().count(), 1);
    }

    #[test]
    fn closed_worker_marks_feed_failed() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        drop(cmd_rx);
        let (_res_tx, res_rx) = mpsc::channel();
        let channels = NasaChannels {
            cmd_tx,
            res_rx: Arc::new(Mutex::new(res_rx)),
        };
        let mut state = NasaState::default();
        queue_request(&channels, &mut state, NasaCommand::FetchApod);
        assert!(matches!(state.apod, FeedStatus::Failed(_)));
    }

    #[test]
    fn plugin_registers_resources() {
        let mut app = App::new();
        app.add_plugins(NasaPlugin);
        assert!(app.world().contains_resource::<NasaState>());
        assert!(app.world().contains_resource::<NasaConfig>());
        assert!(app.world().contains_resource::<NasaData>());
    }
}
