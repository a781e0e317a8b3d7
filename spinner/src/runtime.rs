use std::time::Duration;
use shared::SpinState;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval, sleep, Instant, MissedTickBehavior};
use tracing::{error, info, warn};
use crate::admin::AdminCommand;
use crate::config::WheelConfig;
use crate::controller::WheelController;
use crate::error::SpinnerError;

#[derive(Debug)]
pub enum WheelEvent {
    SpinRequested,
    Acknowledge,
    Admin(AdminCommand, oneshot::Sender<Result<String, SpinnerError>>),
    Snapshot(oneshot::Sender<SpinState>),
    Shutdown,
}

/// Cheap handle for posting events to the wheel task.
#[derive(Clone)]
pub struct WheelHandle {
    tx: mpsc::UnboundedSender<WheelEvent>,
}

impl WheelHandle {
    fn send(&self, event: WheelEvent) -> Result<(), SpinnerError> {
        self.tx.send(event).map_err(|_| SpinnerError::ChannelClosed)
    }

    pub fn request_spin(&self) -> Result<(), SpinnerError> {
        self.send(WheelEvent::SpinRequested)
    }

    pub fn acknowledge(&self) -> Result<(), SpinnerError> {
        self.send(WheelEvent::Acknowledge)
    }

    pub async fn admin(&self, command: AdminCommand) -> Result<String, SpinnerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(WheelEvent::Admin(command, reply_tx))?;
        reply_rx.await.map_err(|_| SpinnerError::ChannelClosed)?
    }

    pub async fn snapshot(&self) -> Result<SpinState, SpinnerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(WheelEvent::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| SpinnerError::ChannelClosed)
    }

    pub fn shutdown(&self) {
        let _ = self.send(WheelEvent::Shutdown);
    }
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    spin_duration: Duration,
    reveal_delay: Duration,
    frame_interval: Duration,
}

/// Moves the controller onto its own task. The task ends on `Shutdown` or
/// once every handle is dropped, and hands the controller back.
pub fn spawn(controller: WheelController, config: &WheelConfig) -> (WheelHandle, JoinHandle<WheelController>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let timing = Timing {
        spin_duration: config.spin_duration,
        reveal_delay: config.reveal_delay,
        frame_interval: config.frame_interval,
    };
    let task = tokio::spawn(run(controller, rx, timing));
    (WheelHandle { tx }, task)
}

async fn run(
    mut controller: WheelController,
    mut rx: mpsc::UnboundedReceiver<WheelEvent>,
    timing: Timing,
) -> WheelController {
    // reveal timers; dropping the set aborts whatever is still pending
    let mut reveals: JoinSet<u64> = JoinSet::new();
    let mut frames = interval(timing.frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut spin_started: Option<Instant> = None;

    loop {
        tokio::select! {
            event = rx.recv() => {
                let Some(event) = event else { break };
                match event {
                    WheelEvent::SpinRequested => match controller.request_spin() {
                        Ok(Some(ticket)) => {
                            spin_started = Some(Instant::now());
                            let delay = timing.reveal_delay;
                            reveals.spawn(async move {
                                sleep(delay).await;
                                ticket.spin_id
                            });
                        }
                        Ok(None) => {}
                        Err(e) => error!("Failed to plan spin: {}", e),
                    },
                    WheelEvent::Acknowledge => {
                        controller.acknowledge();
                    }
                    WheelEvent::Admin(command, reply) => {
                        let _ = reply.send(controller.apply_admin(command));
                    }
                    WheelEvent::Snapshot(reply) => {
                        let _ = reply.send(controller.state().clone());
                    }
                    WheelEvent::Shutdown => break,
                }
            }
            Some(done) = reveals.join_next() => match done {
                Ok(spin_id) => {
                    controller.reveal(spin_id);
                    spin_started = None;
                }
                Err(e) => warn!("Reveal timer failed: {}", e),
            },
            _ = frames.tick(), if spin_started.is_some() => {
                if let Some(started) = spin_started {
                    let progress = started.elapsed().as_secs_f64() / timing.spin_duration.as_secs_f64();
                    controller.sample_frame(progress.min(1.0));
                }
            }
        }
    }

    if !reveals.is_empty() {
        info!("Wheel stopping with {} reveal(s) pending", reveals.len());
    }
    reveals.shutdown().await;
    controller
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::recording::{Recorder, Seen};
    use shared::{RigConfiguration, RigMode, SpinPhase, DEFAULT_PRIZES};

    fn start(recorder: &Recorder, rig: RigConfiguration) -> (WheelHandle, JoinHandle<WheelController>) {
        let config = WheelConfig { rig, seed: Some(99), ..WheelConfig::default() };
        let controller = WheelController::new(DEFAULT_PRIZES.clone(), &config, recorder.collaborators());
        spawn(controller, &config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_waits_for_animation() {
        let recorder = Recorder::default();
        let (wheel, task) = start(&recorder, RigConfiguration::default());

        wheel.request_spin().unwrap();
        assert_eq!(wheel.snapshot().await.unwrap().phase, SpinPhase::Spinning);

        sleep(Duration::from_millis(5000)).await;
        let state = wheel.snapshot().await.unwrap();
        assert_eq!(state.phase, SpinPhase::Spinning);
        assert!(state.last_selected.is_none());

        sleep(Duration::from_millis(250)).await;
        let state = wheel.snapshot().await.unwrap();
        assert_eq!(state.phase, SpinPhase::Result);
        assert!(!state.last_selected.unwrap().is_win);

        // ticks were sampled while the wheel turned
        assert!(recorder.events().contains(&Seen::Tick));

        wheel.shutdown();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_trigger_during_spin_is_ignored() {
        let recorder = Recorder::default();
        let (wheel, task) = start(&recorder, RigConfiguration::default());

        wheel.request_spin().unwrap();
        let first = wheel.snapshot().await.unwrap();
        sleep(Duration::from_millis(1000)).await;
        wheel.request_spin().unwrap();
        let second = wheel.snapshot().await.unwrap();

        assert_eq!(first.spin_id, second.spin_id);
        assert_eq!(first.cumulative_rotation, second.cumulative_rotation);

        sleep(Duration::from_millis(6000)).await;
        let state = wheel.snapshot().await.unwrap();
        assert_eq!(state.phase, SpinPhase::Result);
        assert_eq!(state.spin_id, 1);

        drop(wheel);
        let controller = task.await.unwrap();
        assert_eq!(controller.state().spin_id, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acknowledge_and_admin_round_trip() {
        let recorder = Recorder::default();
        let (wheel, task) = start(&recorder, RigConfiguration::default());

        let reply = wheel.admin(AdminCommand::SetMode(RigMode::ForceSpecific)).await.unwrap();
        assert!(reply.contains("FORCE_SPECIFIC"));
        wheel.admin(AdminCommand::SetTarget(2)).await.unwrap();
        assert!(wheel.admin(AdminCommand::SetChance(-5.0)).await.is_err());

        wheel.request_spin().unwrap();
        sleep(Duration::from_millis(5300)).await;
        let state = wheel.snapshot().await.unwrap();
        assert_eq!(state.last_selected.map(|p| p.id), Some(2));
        assert!(recorder.events().contains(&Seen::Celebrate(true)));

        wheel.acknowledge().unwrap();
        assert_eq!(wheel.snapshot().await.unwrap().phase, SpinPhase::Idle);

        wheel.shutdown();
        task.await.unwrap();
        assert!(matches!(wheel.request_spin(), Err(SpinnerError::ChannelClosed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_mid_spin_cancels_reveal() {
        let recorder = Recorder::default();
        let (wheel, task) = start(&recorder, RigConfiguration::default());

        wheel.request_spin().unwrap();
        wheel.snapshot().await.unwrap();
        wheel.shutdown();

        let controller = task.await.unwrap();
        assert_eq!(controller.state().phase, SpinPhase::Spinning);
        assert!(!recorder.events().iter().any(|e| matches!(e, Seen::Outcome(_))));
    }
}
