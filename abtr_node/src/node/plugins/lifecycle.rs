// abtr_node/src/node/plugins/lifecycle.rs

use crate::prelude::*;

/// Ends the run when the configured duration is over and reports on exit.
/// Ctrl-C is handled by Bevy's `TerminalCtrlCHandlerPlugin`, which also goes
/// through `AppExit`, so the frame in progress always completes.
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunDuration>()
            .add_systems(Update, run_duration_system.in_set(NodeSet::Lifecycle))
            .add_systems(Last, log_shutdown_summary);
    }
}

fn run_duration_system(
    time: Res<Time>,
    limit: Res<RunDuration>,
    mut exit: EventWriter<AppExit>,
    mut requested: Local<bool>,
) {
    let Some(limit) = limit.0 else {
        return;
    };
    if !*requested && time.elapsed() >= limit {
        info!("Run duration of {:.1}s reached, shutting down.", limit.as_secs_f64());
        exit.write(AppExit::Success);
        *requested = true;
    }
}

fn log_shutdown_summary(mut exit: EventReader<AppExit>, arbiter: Res<SharedArbiter>) {
    if exit.read().next().is_none() {
        return;
    }
    let snapshot = arbiter.0.snapshot();
    info!(
        "Arbiter stopped after {} tick(s); {} A and {} B command(s) left unconsumed.",
        arbiter.0.tick_count(),
        snapshot.a_len,
        snapshot.b_len
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn test_app(limit: Option<Duration>) -> App {
        let arbiter = Arbiter::new(ArbiterConfig::default()).unwrap();
        let mut app = App::new();
        app.init_resource::<Time>()
            .insert_resource(SharedArbiter(Arc::new(arbiter)))
            .insert_resource(RunDuration(limit))
            .add_plugins(LifecyclePlugin);
        app
    }

    fn advance(app: &mut App, dt: Duration) {
        app.world_mut().resource_mut::<Time>().advance_by(dt);
        app.update();
    }

    #[test]
    fn test_exit_requested_once_limit_reached() {
        let mut app = test_app(Some(Duration::from_secs(1)));

        advance(&mut app, Duration::from_millis(600));
        assert_eq!(app.should_exit(), None);

        advance(&mut app, Duration::from_millis(400));
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn test_no_limit_never_exits() {
        let mut app = test_app(None);
        advance(&mut app, Duration::from_secs(3600));
        assert_eq!(app.should_exit(), None);
    }
}
