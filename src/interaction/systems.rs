//! Click handling

use bevy::picking::events::{Click, Pointer};
use bevy::picking::pointer::PointerButton;
use bevy::prelude::*;

use crate::bodies::Body;
use crate::interaction::info::InfoPanelState;

/// Select the clicked planet. Mesh picking delivers each click to the nearest
/// hit only, so the sun, orbit rings and UI panels absorb clicks aimed at
/// whatever lies behind them.
pub fn handle_body_clicks(
    mut click_events: MessageReader<Pointer<Click>>,
    bodies: Query<&Body>,
    mut panel: ResMut<InfoPanelState>,
) {
    for ev in click_events.read() {
        if ev.button != PointerButton::Primary {
            continue;
        }

        let before = *panel;
        panel.on_click(bodies.get(ev.entity).ok());
        if *panel != before
            && let Some(name) = panel.selected()
        {
            info!("[PICK] Selected {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::CentralBody;
    use crate::scene::OrbitRing;
    use bevy::camera::NormalizedRenderTarget;
    use bevy::picking::backend::HitData;
    use bevy::picking::pointer::{Location, PointerId};
    use bevy::window::{PrimaryWindow, WindowRef};
    use std::time::Duration;

    struct ClickApp {
        app: App,
        window: Entity,
        camera: Entity,
    }

    impl ClickApp {
        fn new() -> Self {
            let mut app = App::new();
            app.init_resource::<InfoPanelState>()
                .add_message::<Pointer<Click>>()
                .add_systems(Update, handle_body_clicks);
            let window = app.world_mut().spawn((Window::default(), PrimaryWindow)).id();
            let camera = app.world_mut().spawn_empty().id();
            Self {
                app,
                window,
                camera,
            }
        }

        fn spawn(&mut self, bundle: impl Bundle) -> Entity {
            self.app.world_mut().spawn(bundle).id()
        }

        fn click(&mut self, entity: Entity, button: PointerButton) {
            let target = WindowRef::Primary
                .normalize(Some(self.window))
                .map(NormalizedRenderTarget::Window)
                .unwrap();
            self.app.world_mut().write_message(Pointer {
                entity,
                pointer_id: PointerId::Mouse,
                pointer_location: Location {
                    target,
                    position: Vec2::new(640.0, 360.0),
                },
                event: Click {
                    button,
                    hit: HitData::new(self.camera, 40.0, None, None),
                    duration: Duration::from_millis(120),
                },
            });
            self.app.update();
        }

        fn state(&self) -> InfoPanelState {
            *self.app.world().resource::<InfoPanelState>()
        }
    }

    fn mars() -> Body {
        Body { name: "Mars" }
    }

    #[test]
    fn click_on_body_selects_it() {
        let mut app = ClickApp::new();
        let planet = app.spawn(mars());
        app.click(planet, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::ShowingInfo("Mars"));

        let jupiter = app.spawn(Body { name: "Jupiter" });
        app.click(jupiter, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::ShowingInfo("Jupiter"));
    }

    #[test]
    fn click_on_panel_keeps_selection() {
        let mut app = ClickApp::new();
        app.spawn(mars());
        let panel = app.spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                ..default()
            },
            Name::new("Info panel"),
        ));

        app.click(panel, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::Idle);

        app.app.insert_resource(InfoPanelState::ShowingInfo("Venus"));
        app.click(panel, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::ShowingInfo("Venus"));
    }

    #[test]
    fn ring_and_sun_hits_change_nothing() {
        let mut app = ClickApp::new();
        let ring = app.spawn(OrbitRing::around(20.0, 0.1));
        let sun = app.spawn(CentralBody);

        app.click(ring, PointerButton::Primary);
        app.click(sun, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::Idle);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut app = ClickApp::new();
        let planet = app.spawn(mars());
        app.click(planet, PointerButton::Secondary);
        assert_eq!(app.state(), InfoPanelState::Idle);
    }

    #[test]
    fn click_after_despawn_is_a_no_op() {
        let mut app = ClickApp::new();
        let planet = app.spawn(mars());
        app.app.world_mut().despawn(planet);
        app.click(planet, PointerButton::Primary);
        assert_eq!(app.state(), InfoPanelState::Idle);
    }
}
