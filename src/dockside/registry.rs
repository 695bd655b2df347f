use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Local};
use tracing::info;

use super::error::OpsError;
use super::journal::OperationLog;
use super::pool::OperatorPool;
use super::types::{CraneId, OperatorName, CRANE_IDS};

/// Live state for one crane. `start_time` and `operator` are both set
/// exactly while `running` is true.
#[derive(Debug, Clone, Default)]
pub struct CraneState {
    pub running: bool,
    pub start_time: Option<DateTime<Local>>,
    pub operator: Option<OperatorName>,
}

/// Running/stopped state for the fixed crane set, plus the operator pool
/// that crane assignments consume. All reads are computed fresh on demand;
/// the render loop polls them every frame.
#[derive(Debug, Clone)]
pub struct EquipmentRegistry {
    cranes: BTreeMap<CraneId, CraneState>,
    operators: OperatorPool,
}

impl EquipmentRegistry {
    pub fn new() -> Self {
        EquipmentRegistry {
            cranes: CRANE_IDS.iter().map(|id| (*id, CraneState::default())).collect(),
            operators: OperatorPool::new(),
        }
    }

    pub fn operators(&self) -> &OperatorPool {
        &self.operators
    }

    fn crane(&self, id: CraneId) -> Result<&CraneState, OpsError> {
        self.cranes.get(&id).ok_or(OpsError::InvalidUnit(id.0))
    }

    fn crane_mut(&mut self, id: CraneId) -> Result<&mut CraneState, OpsError> {
        self.cranes.get_mut(&id).ok_or(OpsError::InvalidUnit(id.0))
    }

    pub fn start(&mut self, id: CraneId, operator: &str) -> Result<(), OpsError> {
        self.start_at(id, operator, Local::now())
    }

    /// Starting an already-running crane re-captures the baseline and the
    /// operator without logging anything.
    pub fn start_at(
        &mut self,
        id: CraneId,
        operator: &str,
        now: DateTime<Local>,
    ) -> Result<(), OpsError> {
        let crane = self.crane_mut(id)?;
        crane.running = true;
        crane.start_time = Some(now);
        crane.operator = Some(operator.to_string());
        self.operators.mark_used(operator);
        info!(crane = id.0, operator, "crane started");
        Ok(())
    }

    pub fn stop(
        &mut self,
        id: CraneId,
        idle_reason: &str,
        log: &OperationLog,
    ) -> Result<Option<(DateTime<Local>, DateTime<Local>)>, OpsError> {
        self.stop_at(id, idle_reason, Local::now(), log)
    }

    /// Completes the running interval. The row is appended before the crane
    /// state is reset, so a failed append leaves the crane running and the
    /// stop can be retried. A crane that is not running is a no-op.
    pub fn stop_at(
        &mut self,
        id: CraneId,
        idle_reason: &str,
        now: DateTime<Local>,
        log: &OperationLog,
    ) -> Result<Option<(DateTime<Local>, DateTime<Local>)>, OpsError> {
        let crane = self.crane(id)?;
        let (start, operator) = match (crane.start_time, &crane.operator) {
            (Some(start), Some(operator)) if crane.running => (start, operator.clone()),
            _ => return Ok(None),
        };

        log.append_crane(id, &operator, start, now, idle_reason)?;

        let crane = self.crane_mut(id)?;
        crane.running = false;
        crane.start_time = None;
        crane.operator = None;
        info!(crane = id.0, operator, idle_reason, "crane stopped");
        Ok(Some((start, now)))
    }

    /// Elapsed running time right now; zero when stopped. Never cached.
    pub fn elapsed(&self, id: CraneId) -> Duration {
        self.elapsed_at(id, Local::now())
    }

    pub fn elapsed_at(&self, id: CraneId, now: DateTime<Local>) -> Duration {
        match self.cranes.get(&id) {
            Some(crane) if crane.running => crane
                .start_time
                .map(|start| now - start)
                .unwrap_or_else(Duration::zero),
            _ => Duration::zero(),
        }
    }

    pub fn is_running(&self, id: CraneId) -> bool {
        self.cranes.get(&id).map(|crane| crane.running).unwrap_or(false)
    }

    pub fn reset_timer(&mut self, id: CraneId) -> Result<(), OpsError> {
        self.reset_timer_at(id, Local::now())
    }

    /// Rebase the elapsed baseline of a running crane without stopping or
    /// logging.
    pub fn reset_timer_at(&mut self, id: CraneId, now: DateTime<Local>) -> Result<(), OpsError> {
        let crane = self.crane_mut(id)?;
        if crane.running {
            crane.start_time = Some(now);
        }
        Ok(())
    }
}
