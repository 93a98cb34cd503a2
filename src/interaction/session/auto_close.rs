//! `window.autoClose`: leave the app after a fixed wall-clock delay (demos, CI).
use bevy::prelude::*;

use crate::core::config::PinballConfig;

#[derive(Resource, Deref, DerefMut)]
struct ExitCountdown(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_exit_countdown)
            .add_systems(Update, tick_exit_countdown);
    }
}

fn arm_exit_countdown(mut commands: Commands, cfg: Res<PinballConfig>) {
    let secs = cfg.window.auto_close;
    if secs <= 0.0 {
        return;
    }
    info!(target = "session", seconds = secs, "table closes automatically");
    commands.insert_resource(ExitCountdown(Timer::from_seconds(secs, TimerMode::Once)));
}

fn tick_exit_countdown(
    time: Res<Time>,
    countdown: Option<ResMut<ExitCountdown>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut countdown) = countdown else {
        return;
    };
    if countdown.tick(time.delta()).finished() {
        info!(target = "session", "auto-close reached, exiting");
        exit.write(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn session_app(auto_close: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let mut cfg = PinballConfig::default();
        cfg.window.auto_close = auto_close;
        app.insert_resource(cfg);
        app.add_plugins(AutoClosePlugin);
        app.update();
        app
    }

    #[test]
    fn disabled_by_default() {
        let app = session_app(0.0);
        assert!(app.world().get_resource::<ExitCountdown>().is_none());
    }

    #[test]
    fn negative_delay_is_ignored() {
        let app = session_app(-3.0);
        assert!(app.world().get_resource::<ExitCountdown>().is_none());
    }

    #[test]
    fn elapsed_countdown_requests_exit() {
        let mut app = session_app(0.5);
        assert!(app.world().resource::<Events<AppExit>>().is_empty());
        app.world_mut()
            .resource_mut::<ExitCountdown>()
            .tick(Duration::from_secs(1));
        app.update();
        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
    }
}
