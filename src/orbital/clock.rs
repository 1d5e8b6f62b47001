//! Frame clock driving the orbit loop

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockMode {
    Running,
    /// Advances only the queued single steps
    Paused { pending: u32 },
    /// Cancelled; never advances again
    Stopped,
}

/// Schedules orbit advancement, one tick per rendered frame while running
#[derive(Resource, Debug)]
pub struct OrbitClock {
    mode: ClockMode,
    frames: u64,
}

impl Default for OrbitClock {
    fn default() -> Self {
        Self {
            mode: ClockMode::Running,
            frames: 0,
        }
    }
}

impl OrbitClock {
    pub fn paused() -> Self {
        Self {
            mode: ClockMode::Paused { pending: 0 },
            frames: 0,
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// Frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pause(&mut self) {
        if self.mode == ClockMode::Running {
            self.mode = ClockMode::Paused { pending: 0 };
        }
    }

    pub fn resume(&mut self) {
        if matches!(self.mode, ClockMode::Paused { .. }) {
            self.mode = ClockMode::Running;
        }
    }

    /// Queue `n` single frames; only meaningful while paused
    pub fn step(&mut self, n: u32) {
        if let ClockMode::Paused { pending } = &mut self.mode {
            *pending = pending.saturating_add(n);
        }
    }

    pub fn stop(&mut self) {
        self.mode = ClockMode::Stopped;
    }

    pub fn is_stopped(&self) -> bool {
        self.mode == ClockMode::Stopped
    }

    /// Consume one tick for the current frame. Returns false if orbits should hold still.
    pub fn tick(&mut self) -> bool {
        let advance = match &mut self.mode {
            ClockMode::Running => true,
            ClockMode::Paused { pending } if *pending > 0 => {
                *pending -= 1;
                true
            }
            ClockMode::Paused { .. } | ClockMode::Stopped => false,
        };
        if advance {
            self.frames += 1;
        }
        advance
    }
}

/// Space toggles pause, period single-steps while paused
pub fn orbit_clock_controls(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut clock: ResMut<OrbitClock>,
) {
    let Some(keys) = keys else { return };

    if keys.just_pressed(KeyCode::Space) {
        match clock.mode() {
            ClockMode::Running => {
                clock.pause();
                info!("Orbits paused at frame {}", clock.frames());
            }
            ClockMode::Paused { .. } => {
                clock.resume();
                info!("Orbits resumed");
            }
            ClockMode::Stopped => {}
        }
    }
    if keys.just_pressed(KeyCode::Period) {
        clock.step(1);
    }
}

/// Cancel the orbit loop once the app starts shutting down
pub fn stop_clock_on_exit(mut exits: MessageReader<AppExit>, mut clock: ResMut<OrbitClock>) {
    if exits.read().next().is_some() && !clock.is_stopped() {
        clock.stop();
        info!("Orbit clock stopped after {} frames", clock.frames());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_clock_ticks_every_frame() {
        let mut clock = OrbitClock::default();
        assert!((0..10).all(|_| clock.tick()));
        assert_eq!(clock.frames(), 10);
    }

    #[test]
    fn paused_clock_only_runs_queued_steps() {
        let mut clock = OrbitClock::paused();
        assert!(!clock.tick());
        clock.step(2);
        assert!(clock.tick());
        assert!(clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.frames(), 2);
    }

    #[test]
    fn step_is_ignored_while_running() {
        let mut clock = OrbitClock::default();
        clock.step(5);
        assert_eq!(clock.mode(), ClockMode::Running);
    }

    #[test]
    fn stopped_clock_never_advances() {
        let mut clock = OrbitClock::default();
        clock.tick();
        clock.stop();
        clock.resume();
        clock.step(3);
        assert!((0..10).all(|_| !clock.tick()));
        assert!(clock.is_stopped());
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn app_exit_stops_clock() {
        let mut app = App::new();
        app.init_resource::<OrbitClock>()
            .add_systems(Update, stop_clock_on_exit);
        app.update();
        assert_eq!(app.world().resource::<OrbitClock>().mode(), ClockMode::Running);

        app.world_mut().write_message(AppExit::Success);
        app.update();
        assert!(app.world().resource::<OrbitClock>().is_stopped());
    }
}
