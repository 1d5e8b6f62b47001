//! Bottom status line

use bevy::prelude::*;

use crate::interaction::InfoPanelState;
use crate::nasa::types::{image_total_hits, neo_element_count};
use crate::nasa::{FeedStatus, NasaData, NasaState};
use crate::orbital::{ClockMode, OrbitClock};
use crate::ui::PANEL_MARGIN;

const KEY_HINTS: &str = "[Space] pause  [.] step  [N] planetary data  [I] image search";

#[derive(Component)]
pub struct StatusLine;

pub fn spawn_status_line(mut commands: Commands) {
    commands.spawn((
        StatusLine,
        Text::new(""),
        TextFont::from_font_size(12.0),
        TextColor(Color::srgb(0.75, 0.75, 0.75)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PANEL_MARGIN),
            bottom: Val::Px(10.0),
            ..default()
        },
        Name::new("Status line"),
    ));
}

fn feed_label(status: &FeedStatus, detail: Option<String>) -> String {
    match status {
        FeedStatus::Idle => "idle".to_string(),
        FeedStatus::Loading => "loading".to_string(),
        FeedStatus::Loaded { at } => match detail {
            Some(detail) => format!("{detail} ({})", at.format("%H:%M:%S")),
            None => format!("ok ({})", at.format("%H:%M:%S")),
        },
        FeedStatus::Failed(_) => "failed".to_string(),
    }
}

pub fn status_text(
    clock: &OrbitClock,
    panel: &InfoPanelState,
    state: &NasaState,
    data: &NasaData,
) -> String {
    let clock_label = match clock.mode() {
        ClockMode::Running => "running",
        ClockMode::Paused { .. } => "paused",
        ClockMode::Stopped => "stopped",
    };
    let selected = panel.selected().unwrap_or("none");

    let neo = data
        .planetary
        .as_ref()
        .and_then(|p| neo_element_count(&p.neo_feed))
        .map(|n| format!("{n} objects"));
    let hits = data
        .image_search
        .as_ref()
        .and_then(image_total_hits)
        .map(|n| format!("{n} hits"));

    format!(
        "Orbits: {} (frame {})  |  Selected: {}  |  APOD: {}  NEO: {}  Images: {}  |  {}",
        clock_label,
        clock.frames(),
        selected,
        feed_label(&state.apod, None),
        feed_label(&state.planetary, neo),
        feed_label(&state.image_search, hits),
        KEY_HINTS,
    )
}

pub fn update_status_line(
    clock: Res<OrbitClock>,
    panel: Res<InfoPanelState>,
    state: Res<NasaState>,
    data: Res<NasaData>,
    mut line: Query<&mut Text, With<StatusLine>>,
) {
    let text = status_text(&clock, &panel, &state, &data);
    for mut current in &mut line {
        if current.0 != text {
            current.0 = text.clone();
        }
    }
}
