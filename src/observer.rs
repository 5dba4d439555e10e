//! Hooks into the phases of `Cloth::step_observed`.

/// Receives a callback at each phase of a step. Every method defaults to
/// doing nothing, so implementors override only what they watch.
pub trait StepObserver {
    /// Called after each force evaluation. `stage` is always 0 except for RK4.
    fn on_forces(&mut self, _stage: usize) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called after each constraint pass with the number of springs corrected.
    fn on_constraint_pass(&mut self, _pass: usize, _corrections: usize) {}

    /// Called after collision response with the number of contacts.
    fn on_collisions(&mut self, _contacts: usize) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// Ignores every callback. `Cloth::step` uses it.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}

/// Reports every step phase through the `log` facade at trace level.
#[derive(Default)]
pub struct LogStepObserver {
    steps: u64,
}

impl LogStepObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed steps seen so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl StepObserver for LogStepObserver {
    fn on_forces(&mut self, stage: usize) {
        log::trace!("step {}: forces evaluated (stage {})", self.steps, stage);
    }

    fn on_constraint_pass(&mut self, pass: usize, corrections: usize) {
        log::trace!("step {}: constraint pass {} corrected {} springs", self.steps, pass, corrections);
    }

    fn on_collisions(&mut self, contacts: usize) {
        if contacts > 0 {
            log::trace!("step {}: {} contacts", self.steps, contacts);
        }
    }

    fn on_step_complete(&mut self) {
        self.steps += 1;
    }
}
