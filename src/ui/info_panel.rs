//! Selected body details, top right

use bevy::prelude::*;

use crate::bodies::{Body, BodyRegistry};
use crate::interaction::{BodyInfoView, InfoPanelState};
use crate::orbital::OrbitState;
use crate::ui::{PANEL_BACKGROUND, PANEL_MARGIN, PANEL_MAX_WIDTH, PANEL_PADDING};

#[derive(Component)]
pub struct InfoPanel;

#[derive(Component)]
pub struct InfoPanelTitle;

#[derive(Component)]
pub struct InfoPanelBody;

pub fn spawn_info_panel(mut commands: Commands) {
    commands
        .spawn((
            InfoPanel,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(PANEL_MARGIN),
                top: Val::Px(PANEL_MARGIN),
                max_width: Val::Px(PANEL_MAX_WIDTH),
                padding: UiRect::all(Val::Px(PANEL_PADDING)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                display: Display::None,
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            Name::new("Info panel"),
        ))
        .with_children(|panel| {
            panel.spawn((
                InfoPanelTitle,
                Text::new(""),
                TextFont::from_font_size(18.0),
                TextColor(Color::WHITE),
            ));
            panel.spawn((
                InfoPanelBody,
                Text::new(""),
                TextFont::from_font_size(13.0),
                TextColor(Color::WHITE),
            ));
        });
}

/// Rewrite the panel text when the selection changes
pub fn update_info_panel(
    state: Res<InfoPanelState>,
    registry: Option<Res<BodyRegistry>>,
    orbits: Query<(&Body, &OrbitState)>,
    mut panel: Query<&mut Node, With<InfoPanel>>,
    mut title: Query<&mut Text, (With<InfoPanelTitle>, Without<InfoPanelBody>)>,
    mut body: Query<&mut Text, (With<InfoPanelBody>, Without<InfoPanelTitle>)>,
) {
    if !state.is_changed() {
        return;
    }
    let Some(name) = state.selected() else {
        return;
    };
    let Some(registry) = registry else { return };
    let descriptor = match registry.get(name) {
        Ok(descriptor) => descriptor,
        Err(err) => {
            warn!("[UI] {err:#}");
            return;
        }
    };

    let orbit = orbits
        .iter()
        .find(|(b, _)| b.name == name)
        .map(|(_, orbit)| *orbit)
        .unwrap_or_else(|| OrbitState::new(descriptor.distance));
    let view = BodyInfoView::new(descriptor, &orbit);

    for mut text in &mut title {
        text.0 = view.title.clone();
    }
    for mut text in &mut body {
        text.0 = view.body_text();
    }
    for mut node in &mut panel {
        node.display = Display::Flex;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::catalog::PLANETS;

    fn panel_app() -> App {
        let mut app = App::new();
        app.init_resource::<InfoPanelState>()
            .insert_resource(BodyRegistry::from_descriptors(PLANETS).unwrap())
            .add_systems(Startup, spawn_info_panel)
            .add_systems(Update, update_info_panel);
        app.update();
        app
    }

    fn panel_display(app: &mut App) -> Display {
        let world = app.world_mut();
        world
            .query_filtered::<&Node, With<InfoPanel>>()
            .single(world)
            .unwrap()
            .display
    }

    fn title_text(app: &mut App) -> String {
        let world = app.world_mut();
        world
            .query_filtered::<&Text, With<InfoPanelTitle>>()
            .single(world)
            .unwrap()
            .0
            .clone()
    }

    #[test]
    fn hidden_while_idle() {
        let mut app = panel_app();
        app.update();
        assert_eq!(panel_display(&mut app), Display::None);
    }

    #[test]
    fn selection_shows_and_replaces_text() {
        let mut app = panel_app();

        *app.world_mut().resource_mut::<InfoPanelState>() = InfoPanelState::ShowingInfo("Mars");
        app.update();
        assert_eq!(panel_display(&mut app), Display::Flex);
        assert_eq!(title_text(&mut app), "Mars");

        *app.world_mut().resource_mut::<InfoPanelState>() = InfoPanelState::ShowingInfo("Venus");
        app.update();
        assert_eq!(title_text(&mut app), "Venus");

        // Still one panel, updated in place
        let world = app.world_mut();
        assert_eq!(world.query::<&InfoPanel>().iter(world).count(), 1);
        let body = world
            .query_filtered::<&Text, With<InfoPanelBody>>()
            .single(world)
            .unwrap()
            .0
            .clone();
        assert!(body.starts_with("Distance from Sun: 15 units\nOrbital Speed: 0.0013"));
    }
}
