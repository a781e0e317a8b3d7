use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::wheel_layout::{slice_definitions, SliceDefinition};
use shared::{
    plan_rotation, select_outcome, PrizeEntry, PrizeTable, RigConfiguration, RotationParams,
    RotationPlan, SpinState, TickTracker,
};
use tracing::{debug, info};
use crate::admin::{self, AdminCommand};
use crate::config::WheelConfig;
use crate::effects::{Collaborators, WheelView};
use crate::error::SpinnerError;

/// Returned when a spin request is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinTicket {
    pub spin_id: u64,
    pub plan: RotationPlan,
}

/// Sole owner of the wheel's mutable state. Every change goes through one of
/// its methods, in order, on a single task.
pub struct WheelController {
    table: PrizeTable,
    slices: Vec<SliceDefinition>,
    rig: RigConfiguration,
    params: RotationParams,
    state: SpinState,
    rng: StdRng,
    effects: Collaborators,
    active_plan: Option<RotationPlan>,
    ticks: TickTracker,
}

impl WheelController {
    pub fn new(table: PrizeTable, config: &WheelConfig, effects: Collaborators) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ticks = TickTracker::new(table.len());

        Self {
            slices: slice_definitions(&table),
            table,
            rig: config.rig.clone(),
            params: config.rotation,
            state: SpinState::new(),
            rng,
            effects,
            active_plan: None,
            ticks,
        }
    }

    pub fn state(&self) -> &SpinState {
        &self.state
    }

    pub fn rig(&self) -> &RigConfiguration {
        &self.rig
    }

    pub fn table(&self) -> &PrizeTable {
        &self.table
    }

    pub fn active_plan(&self) -> Option<&RotationPlan> {
        self.active_plan.as_ref()
    }

    /// Picks an outcome under the current rigging and sets the wheel turning
    /// towards it. A request while a spin is running is ignored.
    pub fn request_spin(&mut self) -> Result<Option<SpinTicket>, SpinnerError> {
        if self.state.is_spinning() {
            debug!(spin_id = self.state.spin_id, "spin already running, request ignored");
            return Ok(None);
        }

        let outcome = select_outcome(&self.table, &self.rig, &mut self.rng);
        let plan = plan_rotation(
            outcome.slice_index,
            self.table.len(),
            self.state.cumulative_rotation,
            &self.params,
            &mut self.rng,
        )?;
        let prize = outcome.prize.clone();
        let roll = outcome.roll;

        let Some(spin_id) = self.state.start_spin(prize, plan.final_rotation) else {
            return Ok(None);
        };

        info!(
            spin_id,
            mode = %self.rig.mode,
            slice = plan.slice_index,
            roll = ?roll,
            turns = plan.extra_turns,
            target_angle = plan.target_angle,
            rotation = plan.final_rotation,
            "🎡 spin started"
        );

        self.active_plan = Some(plan);
        self.ticks.reset();
        self.ticks.observe(plan.start_rotation);
        self.render();

        Ok(Some(SpinTicket { spin_id, plan }))
    }

    /// Samples the running animation at `progress` (0..=1) and plays a tick
    /// when a slice boundary passed the pointer. Returns whether it ticked.
    pub fn sample_frame(&mut self, progress: f64) -> bool {
        let Some(plan) = self.active_plan else {
            return false;
        };
        if !self.ticks.observe(plan.angle_at(progress)) {
            return false;
        }
        if let Err(e) = self.effects.audio.play_tick() {
            debug!(error = %e, "tick sound skipped");
        }
        true
    }

    /// Shows the outcome of `spin_id`. Stale or duplicate reveals do nothing.
    pub fn reveal(&mut self, spin_id: u64) -> Option<PrizeEntry> {
        let prize = self.state.complete_spin(spin_id)?.clone();
        self.active_plan = None;

        if prize.is_win {
            info!(spin_id, prize = %prize.label, "🎉 spin revealed a win");
        } else {
            info!(spin_id, prize = %prize.label, "spin revealed a loss");
        }

        if let Err(e) = self.effects.audio.play_outcome(prize.is_win) {
            debug!(error = %e, "outcome sound skipped");
        }
        if prize.is_win {
            self.effects.celebration.celebrate(prize.is_win);
        }
        self.render();
        Some(prize)
    }

    /// User acknowledgment of the result screen.
    pub fn acknowledge(&mut self) -> bool {
        if !self.state.acknowledge() {
            return false;
        }
        self.render();
        true
    }

    pub fn apply_admin(&mut self, command: AdminCommand) -> Result<String, SpinnerError> {
        admin::apply(&mut self.rig, &self.table, command)
    }

    fn render(&mut self) {
        let view = WheelView {
            phase: self.state.phase,
            current_rotation: self.state.cumulative_rotation,
            is_spinning: self.state.is_spinning(),
            slices: &self.slices,
            result: self.state.last_selected.as_ref(),
        };
        self.effects.renderer.render(&view);
    }
}
