//! Planning states.
//!
//! A State is one configuration of the world: where every object rests and
//! what the gripper holds. States are immutable once built. Each derived
//! State keeps a shared pointer to its parent and the action that produced
//! it, so a plan is recovered by walking back to the root.

use super::domain::{Environment, Object, ObjectId, PoseId};
use super::error::StateError;
use crate::actions::Action;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Canonical, order-independent form of a configuration.
///
/// Two States with equal keys describe the same world, regardless of how
/// they were reached. Used for duplicate detection and persistence.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct StateKey {
    /// Object/pose pairs sorted by object id. `None` means in hand.
    pub objects: Vec<(ObjectId, Option<PoseId>)>,
    pub holding: Option<ObjectId>,
}

/// One node of the planning graph.
///
/// # Example
///
/// ```rust
/// use pickplace::core::{Environment, Object, ObjectId, PoseId, State};
/// use std::sync::Arc;
///
/// let env = Arc::new(Environment::new(["A", "B"]));
/// let block = Object::at(ObjectId(0), PoseId(0));
/// let root = Arc::new(State::initial(env, [block], None).unwrap());
///
/// // Nothing is held, so the only move is to pick the block up.
/// let next = root.next_states();
/// assert_eq!(next.len(), 1);
/// assert_eq!(next[0].holding(), Some(ObjectId(0)));
/// assert_eq!(next[0].pose_of(ObjectId(0)), None);
/// ```
#[derive(Clone)]
pub struct State {
    env: Arc<Environment>,
    objects: BTreeMap<ObjectId, Option<PoseId>>,
    holding: Option<ObjectId>,
    parent: Option<Arc<State>>,
    prev_action: Option<Action>,
    is_goal: bool,
    depth: usize,
}

impl State {
    /// Build a fully specified root State.
    ///
    /// Every object must rest at a distinct pose of `env`, except the held
    /// object (if any), which must have no pose.
    pub fn initial<I>(
        env: Arc<Environment>,
        objects: I,
        holding: Option<ObjectId>,
    ) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = Object>,
    {
        let mut mapping = BTreeMap::new();
        let mut occupied: BTreeMap<PoseId, ObjectId> = BTreeMap::new();

        for object in objects {
            if mapping.contains_key(&object.id) {
                return Err(StateError::DuplicateObject(object.id));
            }
            match object.pose {
                Some(pose) => {
                    if !env.contains(pose) {
                        return Err(StateError::UnknownPose {
                            object: object.id,
                            pose,
                        });
                    }
                    if holding == Some(object.id) {
                        return Err(StateError::HeldObjectHasPose {
                            object: object.id,
                            pose,
                        });
                    }
                    if let Some(&first) = occupied.get(&pose) {
                        return Err(StateError::SharedPose {
                            pose,
                            first,
                            second: object.id,
                        });
                    }
                    occupied.insert(pose, object.id);
                }
                None if holding == Some(object.id) => {}
                None => return Err(StateError::UnplacedObject(object.id)),
            }
            mapping.insert(object.id, object.pose);
        }

        if let Some(held) = holding {
            if !mapping.contains_key(&held) {
                return Err(StateError::UnknownObject(held));
            }
        }

        Ok(Self {
            env,
            objects: mapping,
            holding,
            parent: None,
            prev_action: None,
            is_goal: false,
            depth: 0,
        })
    }

    /// Build a goal specification.
    ///
    /// Only the listed objects are constrained; any object left out may end
    /// up anywhere. `holding` is always constrained, `None` meaning the
    /// gripper must be empty.
    pub fn goal<I>(
        env: Arc<Environment>,
        constraints: I,
        holding: Option<ObjectId>,
    ) -> Result<Self, StateError>
    where
        I: IntoIterator<Item = (ObjectId, PoseId)>,
    {
        let mut mapping = BTreeMap::new();
        for (object, pose) in constraints {
            if !env.contains(pose) {
                return Err(StateError::UnknownPose { object, pose });
            }
            if mapping.insert(object, Some(pose)).is_some() {
                return Err(StateError::DuplicateObject(object));
            }
        }

        Ok(Self {
            env,
            objects: mapping,
            holding,
            parent: None,
            prev_action: None,
            is_goal: true,
            depth: 0,
        })
    }

    /// Object id to pose, ordered by id.
    pub fn objects(&self) -> &BTreeMap<ObjectId, Option<PoseId>> {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<Object> {
        self.objects.get(&id).map(|&pose| Object { id, pose })
    }

    /// Where `id` rests, or `None` if it is held or unknown.
    pub fn pose_of(&self, id: ObjectId) -> Option<PoseId> {
        self.objects.get(&id).copied().flatten()
    }

    pub fn holding(&self) -> Option<ObjectId> {
        self.holding
    }

    /// The object resting at `pose`, if any.
    pub fn occupant(&self, pose: PoseId) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|&(_, &at)| at == Some(pose))
            .map(|(&id, _)| id)
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    pub fn parent(&self) -> Option<&Arc<State>> {
        self.parent.as_ref()
    }

    pub fn prev_action(&self) -> Option<&Action> {
        self.prev_action.as_ref()
    }

    pub fn is_goal(&self) -> bool {
        self.is_goal
    }

    /// Number of actions between the root and this State.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            objects: self.objects.iter().map(|(&id, &pose)| (id, pose)).collect(),
            holding: self.holding,
        }
    }

    /// All States one legal action away.
    ///
    /// With an object in hand, PLACE is tried at every location in
    /// environment order; with an empty gripper, PICK is tried on every
    /// object in id order. Infeasible actions are skipped.
    pub fn next_states(self: &Arc<Self>) -> Vec<State> {
        match self.holding {
            Some(held) => self
                .env
                .locations()
                .iter()
                .filter_map(|pose| Action::place(held, pose.id()).apply(self))
                .collect(),
            None => self
                .objects
                .keys()
                .filter_map(|&id| Action::pick(id).apply(self))
                .collect(),
        }
    }

    /// Check this State against a goal specification.
    ///
    /// Every constrained object must sit at its goal pose and the holding
    /// status must match exactly. Objects the goal does not mention are
    /// ignored.
    pub fn satisfies_goal(&self, goal: &State) -> bool {
        goal.objects
            .iter()
            .all(|(id, pose)| self.objects.get(id) == Some(pose))
            && self.holding == goal.holding
    }

    /// Walk back to the root.
    ///
    /// Returns the States from root to `self` and the actions between them
    /// (one fewer than States).
    pub fn unravel(self: &Arc<Self>) -> (Vec<Arc<State>>, Vec<Action>) {
        let mut states = Vec::with_capacity(self.depth + 1);
        let mut actions = Vec::with_capacity(self.depth);

        let mut cursor = Some(Arc::clone(self));
        while let Some(state) = cursor {
            if let Some(action) = &state.prev_action {
                actions.push(*action);
            }
            cursor = state.parent.clone();
            states.push(state);
        }

        states.reverse();
        actions.reverse();
        (states, actions)
    }

    /// Copy of the configuration with no lineage, ready for effects.
    pub(crate) fn detached(&self) -> State {
        State {
            env: Arc::clone(&self.env),
            objects: self.objects.clone(),
            holding: self.holding,
            parent: None,
            prev_action: None,
            is_goal: false,
            depth: self.depth,
        }
    }

    /// Copy of the configuration as a fresh root (depth 0, no lineage).
    pub(crate) fn rooted(&self) -> State {
        State {
            depth: 0,
            ..self.detached()
        }
    }

    pub(crate) fn set_pose(&mut self, id: ObjectId, pose: Option<PoseId>) {
        self.objects.insert(id, pose);
    }

    pub(crate) fn set_holding(&mut self, holding: Option<ObjectId>) {
        self.holding = holding;
    }

    pub(crate) fn with_origin(mut self, parent: Arc<State>, action: Action) -> State {
        self.depth = parent.depth + 1;
        self.parent = Some(parent);
        self.prev_action = Some(action);
        self
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("objects", &self.objects)
            .field("holding", &self.holding)
            .field("prev_action", &self.prev_action)
            .field("depth", &self.depth)
            .field("is_goal", &self.is_goal)
            .finish()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State(objects={{")?;
        for (index, (id, pose)) in self.objects.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match (*pose).and_then(|pose| self.env.pose(pose)) {
                Some(pose) => write!(f, "{id}: {pose}")?,
                None => write!(f, "{id}: in hand")?,
            }
        }
        write!(f, "}}, holding=")?;
        match self.holding {
            Some(id) => write!(f, "{id})"),
            None => write!(f, "none)"),
        }
    }
}
