//! Builder for named planning problems.

use crate::actions::{Action, Effects};
use crate::builder::error::BuildError;
use crate::core::{Environment, Object, ObjectId, PoseId, State};
use crate::search::{PlanError, Planner, SearchOutcome};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// An initial State, a goal and the names behind their handles.
#[derive(Clone, Debug)]
pub struct Problem {
    environment: Arc<Environment>,
    initial: State,
    goal: State,
    object_names: BTreeMap<ObjectId, String>,
}

impl Problem {
    pub fn environment(&self) -> &Arc<Environment> {
        &self.environment
    }

    pub fn initial(&self) -> &State {
        &self.initial
    }

    pub fn goal(&self) -> &State {
        &self.goal
    }

    pub fn object_id(&self, name: &str) -> Option<ObjectId> {
        self.object_names
            .iter()
            .find(|(_, object)| object.as_str() == name)
            .map(|(&id, _)| id)
    }

    pub fn object_name(&self, id: ObjectId) -> Option<&str> {
        self.object_names.get(&id).map(String::as_str)
    }

    pub fn pose_id(&self, name: &str) -> Option<PoseId> {
        self.environment.pose_by_name(name).map(|pose| pose.id())
    }

    /// Run `planner` on this problem.
    pub fn solve(&self, planner: &Planner) -> Result<SearchOutcome, PlanError> {
        planner.search(&self.initial, &self.goal)
    }

    /// Render an action with object and location names.
    pub fn describe(&self, action: &Action) -> String {
        let object = match self.object_name(action.object()) {
            Some(name) => name.to_string(),
            None => action.object().to_string(),
        };
        match action.effects() {
            Effects::Pick { .. } => format!("PICK {object}"),
            Effects::Place { destination, .. } => {
                let location = match self.environment.pose(*destination) {
                    Some(pose) => pose.name().to_string(),
                    None => destination.to_string(),
                };
                format!("PLACE {object} at {location}")
            }
        }
    }
}

/// Fluent builder for [`Problem`].
///
/// Names are resolved to handles at build time: locations get ids in the
/// order they were added, objects likewise.
///
/// # Example
///
/// ```rust
/// use pickplace::builder::ProblemBuilder;
/// use pickplace::search::Planner;
///
/// let problem = ProblemBuilder::new()
///     .locations(["A", "B"])
///     .object("block", "A")
///     .goal("block", "B")
///     .build()
///     .unwrap();
///
/// let outcome = problem.solve(&Planner::unbounded()).unwrap();
/// let steps: Vec<String> = outcome.plan.actions().iter().map(|a| problem.describe(a)).collect();
/// assert_eq!(steps, vec!["PICK block", "PLACE block at B"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ProblemBuilder {
    locations: Vec<String>,
    objects: Vec<(String, Option<String>)>,
    goals: Vec<(String, String)>,
    goal_holding: Option<String>,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a location.
    pub fn location(mut self, name: impl Into<String>) -> Self {
        self.locations.push(name.into());
        self
    }

    /// Add several locations at once.
    pub fn locations<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.locations.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add an object resting at location `at`.
    pub fn object(mut self, name: impl Into<String>, at: impl Into<String>) -> Self {
        self.objects.push((name.into(), Some(at.into())));
        self
    }

    /// Add an object that starts in the gripper.
    pub fn holding(mut self, name: impl Into<String>) -> Self {
        self.objects.push((name.into(), None));
        self
    }

    /// Require object `name` to end at location `at`.
    pub fn goal(mut self, name: impl Into<String>, at: impl Into<String>) -> Self {
        self.goals.push((name.into(), at.into()));
        self
    }

    /// Require the gripper to end up holding `name`.
    pub fn goal_holding(mut self, name: impl Into<String>) -> Self {
        self.goal_holding = Some(name.into());
        self
    }

    /// Build the problem.
    /// Returns an error if names are missing, repeated or inconsistent.
    pub fn build(self) -> Result<Problem, BuildError> {
        if self.locations.is_empty() {
            return Err(BuildError::NoLocations);
        }
        let mut seen = HashSet::new();
        for name in &self.locations {
            if !seen.insert(name.as_str()) {
                return Err(BuildError::DuplicateLocation(name.clone()));
            }
        }
        let environment = Arc::new(Environment::new(self.locations));

        let pose = |name: &str| {
            environment
                .pose_by_name(name)
                .map(|pose| pose.id())
                .ok_or_else(|| BuildError::UnknownLocation(name.to_string()))
        };

        let mut object_names = BTreeMap::new();
        let mut objects = Vec::with_capacity(self.objects.len());
        let mut held = None;
        for (index, (name, at)) in self.objects.into_iter().enumerate() {
            if object_names.values().any(|existing| existing == &name) {
                return Err(BuildError::DuplicateObject(name));
            }
            let id = ObjectId(index as u32);
            let object = match at {
                Some(at) => Object::at(id, pose(at.as_str())?),
                None => {
                    if let Some(holder) = held.replace(name.clone()) {
                        return Err(BuildError::AlreadyHolding {
                            held: holder,
                            requested: name,
                        });
                    }
                    Object { id, pose: None }
                }
            };
            objects.push(object);
            object_names.insert(id, name);
        }

        let object = |name: &str| {
            object_names
                .iter()
                .find(|(_, existing)| existing.as_str() == name)
                .map(|(&id, _)| id)
                .ok_or_else(|| BuildError::UnknownObject(name.to_string()))
        };

        let holding = held.as_deref().map(&object).transpose()?;
        let initial = State::initial(Arc::clone(&environment), objects, holding)?;

        let constraints = self
            .goals
            .iter()
            .map(|(name, at)| -> Result<_, BuildError> {
                Ok((object(name.as_str())?, pose(at.as_str())?))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;
        let goal_holding = self.goal_holding.as_deref().map(&object).transpose()?;
        let goal = State::goal(Arc::clone(&environment), constraints, goal_holding)?;

        Ok(Problem {
            environment,
            initial,
            goal,
            object_names,
        })
    }
}
