//! Reconstructed plans.
//!
//! A plan is an immutable path through the state graph: the States from the
//! initial one to a goal-satisfying one, and the actions between them.

use super::state::State;
use crate::actions::Action;
use std::sync::Arc;

/// One action together with the States it connects.
#[derive(Clone, Copy, Debug)]
pub struct PlanStep<'a> {
    pub from: &'a State,
    pub action: &'a Action,
    pub to: &'a State,
}

/// Ordered States and the actions connecting them.
///
/// Always holds at least one State; `actions().len() == states().len() - 1`.
///
/// # Example
///
/// ```rust
/// use pickplace::core::{Environment, Object, ObjectId, Plan, PoseId, State};
/// use std::sync::Arc;
///
/// let env = Arc::new(Environment::new(["A", "B"]));
/// let root = Arc::new(State::initial(env, [Object::at(ObjectId(0), PoseId(0))], None).unwrap());
/// let picked = Arc::new(root.next_states().remove(0));
///
/// let plan = Plan::from_leaf(&picked);
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan.states().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Plan {
    states: Vec<Arc<State>>,
    actions: Vec<Action>,
}

impl Plan {
    /// Reconstruct the plan ending at `leaf` by walking its parents.
    pub fn from_leaf(leaf: &Arc<State>) -> Self {
        let (states, actions) = leaf.unravel();
        Self { states, actions }
    }

    pub fn states(&self) -> &[Arc<State>] {
        &self.states
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// True when the initial State already satisfied the goal.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn initial_state(&self) -> &Arc<State> {
        &self.states[0]
    }

    pub fn final_state(&self) -> &Arc<State> {
        &self.states[self.states.len() - 1]
    }

    pub fn steps(&self) -> impl Iterator<Item = PlanStep<'_>> {
        self.actions
            .iter()
            .enumerate()
            .map(move |(index, action)| PlanStep {
                from: &self.states[index],
                action,
                to: &self.states[index + 1],
            })
    }

    pub fn into_parts(self) -> (Vec<Arc<State>>, Vec<Action>) {
        (self.states, self.actions)
    }

    /// Replay the actions from the initial State.
    ///
    /// Returns true iff every action applies in turn, each result matches
    /// the recorded State, and the last State satisfies `goal`.
    pub fn verify(&self, goal: &State) -> bool {
        let mut current = Arc::clone(self.initial_state());
        for (action, expected) in self.actions.iter().zip(&self.states[1..]) {
            match action.apply(&current) {
                Some(next) if next.key() == expected.key() => current = Arc::new(next),
                _ => return false,
            }
        }
        current.satisfies_goal(goal)
    }
}
