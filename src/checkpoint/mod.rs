//! Persisting solved plans.
//!
//! A [`PlanCheckpoint`] records everything needed to rebuild a plan: the
//! environment, the initial configuration, the goal and the action list.
//! Intermediate States are not stored; [`PlanCheckpoint::restore`] replays
//! the actions and refuses a record that no longer reaches its goal.

use crate::actions::Action;
use crate::core::{Environment, Object, Plan, State, StateKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::{CheckpointError, ReplayError};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable record of a solved problem.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub created_at: DateTime<Utc>,

    pub environment: Environment,

    /// Configuration the plan starts from
    pub initial: StateKey,

    /// Goal specification (constrained objects only)
    pub goal: StateKey,

    pub actions: Vec<Action>,
}

/// A plan rebuilt from a checkpoint, with its goal.
#[derive(Clone, Debug)]
pub struct RestoredPlan {
    pub plan: Plan,
    pub goal: State,
}

impl PlanCheckpoint {
    /// Record `plan`, which was found for `goal`.
    pub fn capture(plan: &Plan, goal: &State) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            environment: plan.initial_state().environment().as_ref().clone(),
            initial: plan.initial_state().key(),
            goal: goal.key(),
            actions: plan.actions().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "JSON",
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            serde_json::from_str(json).map_err(|e| CheckpointError::DeserializationFailed {
                format: "JSON",
                reason: e.to_string(),
            })?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed {
            format: "binary",
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self =
            bincode::deserialize(bytes).map_err(|e| CheckpointError::DeserializationFailed {
                format: "binary",
                reason: e.to_string(),
            })?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Rebuild the plan by replaying the recorded actions.
    pub fn restore(&self) -> Result<RestoredPlan, CheckpointError> {
        self.check_version()?;
        let env = Arc::new(self.environment.clone());

        let objects = self
            .initial
            .objects
            .iter()
            .map(|&(id, pose)| Object { id, pose });
        let initial = State::initial(Arc::clone(&env), objects, self.initial.holding)
            .map_err(ReplayError::InvalidInitial)?;

        let constraints = self
            .goal
            .objects
            .iter()
            .map(|&(id, pose)| {
                pose.map(|pose| (id, pose))
                    .ok_or(ReplayError::UnplacedGoalObject(id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let goal = State::goal(env, constraints, self.goal.holding)
            .map_err(ReplayError::InvalidGoal)?;

        let mut current = Arc::new(initial);
        for (step, action) in self.actions.iter().enumerate() {
            let next = action.apply(&current).ok_or(ReplayError::InfeasibleStep {
                step,
                action: *action,
            })?;
            current = Arc::new(next);
        }
        if !current.satisfies_goal(&goal) {
            return Err(ReplayError::GoalNotReached {
                actions: self.actions.len(),
            }
            .into());
        }

        Ok(RestoredPlan {
            plan: Plan::from_leaf(&current),
            goal,
        })
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ProblemBuilder;
    use crate::core::{ObjectId, PoseId};
    use crate::search::Planner;

    fn solved() -> (Plan, State) {
        let problem = ProblemBuilder::new()
            .locations(["A", "B", "C"])
            .object("X", "A")
            .object("Y", "B")
            .goal("X", "B")
            .goal("Y", "A")
            .build()
            .unwrap();
        let outcome = problem.solve(&Planner::unbounded()).unwrap();
        (outcome.plan, problem.goal().clone())
    }

    #[test]
    fn capture_records_plan() {
        let (plan, goal) = solved();
        let checkpoint = PlanCheckpoint::capture(&plan, &goal);

        assert_eq!(checkpoint.version, CHECKPOINT_VERSION);
        assert_eq!(checkpoint.actions, plan.actions());
        assert_eq!(checkpoint.initial, plan.initial_state().key());
        assert_eq!(checkpoint.environment.len(), 3);
        assert!(Uuid::parse_str(&checkpoint.id).is_ok());
    }

    #[test]
    fn json_round_trip_restores_plan() {
        let (plan, goal) = solved();
        let json = PlanCheckpoint::capture(&plan, &goal).to_json().unwrap();

        let restored = PlanCheckpoint::from_json(&json).unwrap().restore().unwrap();

        assert_eq!(restored.plan.actions(), plan.actions());
        assert_eq!(restored.plan.final_state().key(), plan.final_state().key());
        assert!(restored.plan.verify(&restored.goal));
    }

    #[test]
    fn binary_round_trip_restores_plan() {
        let (plan, goal) = solved();
        let bytes = PlanCheckpoint::capture(&plan, &goal).to_bytes().unwrap();

        let restored = PlanCheckpoint::from_bytes(&bytes).unwrap().restore().unwrap();

        assert_eq!(restored.plan.len(), plan.len());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let (plan, goal) = solved();
        let mut checkpoint = PlanCheckpoint::capture(&plan, &goal);
        checkpoint.version = CHECKPOINT_VERSION + 1;
        let json = checkpoint.to_json().unwrap();

        let result = PlanCheckpoint::from_json(&json);

        assert!(matches!(
            result,
            Err(CheckpointError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn tampered_actions_fail_validation() {
        let (plan, goal) = solved();
        let mut checkpoint = PlanCheckpoint::capture(&plan, &goal);
        checkpoint.actions.insert(0, Action::place(ObjectId(0), PoseId(2)));

        assert!(matches!(
            checkpoint.restore(),
            Err(CheckpointError::ValidationFailed(ReplayError::InfeasibleStep { step: 0, .. }))
        ));
    }

    #[test]
    fn place_outside_environment_fails_validation() {
        let (plan, goal) = solved();
        let mut checkpoint = PlanCheckpoint::capture(&plan, &goal);
        checkpoint.actions.insert(0, Action::place(ObjectId(0), PoseId(42)));
        checkpoint.actions.insert(0, Action::pick(ObjectId(0)));

        assert!(matches!(
            checkpoint.restore(),
            Err(CheckpointError::ValidationFailed(ReplayError::InfeasibleStep { step: 1, .. }))
        ));
    }

    #[test]
    fn truncated_plan_misses_goal() {
        let (plan, goal) = solved();
        let mut checkpoint = PlanCheckpoint::capture(&plan, &goal);
        checkpoint.actions.truncate(2);

        match checkpoint.restore() {
            Err(CheckpointError::ValidationFailed(reason)) => {
                assert_eq!(reason, ReplayError::GoalNotReached { actions: 2 });
            }
            other => panic!("Expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn garbage_input_fails_deserialization() {
        assert!(matches!(
            PlanCheckpoint::from_json("not json"),
            Err(CheckpointError::DeserializationFailed { format: "JSON", .. })
        ));
        assert!(matches!(
            PlanCheckpoint::from_bytes(&[1, 2, 3]),
            Err(CheckpointError::DeserializationFailed { format: "binary", .. })
        ));
    }
}
