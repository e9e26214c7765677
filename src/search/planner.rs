//! Breadth-first planner.

use crate::budget::{SearchBudget, SearchProgress};
use crate::core::{Plan, State, StateError, StateKey};
use crate::search::error::PlanError;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Counters collected during one search.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchStats {
    /// States dequeued and expanded
    pub expanded: usize,
    /// Successors produced by expansion, duplicates included
    pub generated: usize,
    /// Successors dropped because their configuration was already seen
    pub duplicates: usize,
    /// Distinct configurations seen
    pub distinct: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
    pub elapsed: Duration,
}

/// A plan together with the statistics of the search that found it.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub plan: Plan,
    pub stats: SearchStats,
}

/// Breadth-first search from an initial State to a goal specification.
///
/// The frontier is FIFO and successors are enqueued in the order
/// [`State::next_states`] produces them, so the returned plan is the first
/// shortest plan in that enumeration order. Configurations are
/// de-duplicated on enqueue, which bounds the search on every finite
/// domain.
///
/// # Example
///
/// ```rust
/// use pickplace::budget::BudgetBuilder;
/// use pickplace::core::{Environment, Object, ObjectId, PoseId, State};
/// use pickplace::search::Planner;
/// use std::sync::Arc;
///
/// let env = Arc::new(Environment::new(["A", "B"]));
/// let initial = State::initial(Arc::clone(&env), [Object::at(ObjectId(0), PoseId(0))], None).unwrap();
/// let goal = State::goal(env, [(ObjectId(0), PoseId(1))], None).unwrap();
///
/// let planner = Planner::new(BudgetBuilder::new().max_expansions(100).build());
/// let outcome = planner.search(&initial, &goal).unwrap();
///
/// assert_eq!(outcome.plan.len(), 2);
/// assert!(outcome.stats.expanded <= 100);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Planner {
    budget: SearchBudget,
}

impl Planner {
    pub fn new(budget: SearchBudget) -> Self {
        Self { budget }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    /// Find a shortest plan from `initial` to a State satisfying `goal`.
    ///
    /// `initial` is treated as the root: any lineage it carries is ignored.
    #[tracing::instrument(
        skip_all,
        fields(
            objects = initial.objects().len(),
            locations = initial.environment().len()
        )
    )]
    pub fn search(&self, initial: &State, goal: &State) -> Result<SearchOutcome, PlanError> {
        validate(initial, goal)?;
        debug!(budget = ?self.budget, "Starting search");

        let mut progress = SearchProgress::start();
        let mut stats = SearchStats::default();

        let root = Arc::new(initial.rooted());
        let mut visited: HashSet<StateKey> = HashSet::new();
        visited.insert(root.key());
        let mut frontier: VecDeque<Arc<State>> = VecDeque::new();
        frontier.push_back(root);
        stats.peak_frontier = 1;

        while let Some(state) = frontier.pop_front() {
            if state.satisfies_goal(goal) {
                stats.distinct = visited.len();
                stats.elapsed = progress.elapsed();
                let plan = Plan::from_leaf(&state);
                info!(
                    actions = plan.len(),
                    expanded = stats.expanded,
                    "Plan found"
                );
                return Ok(SearchOutcome { plan, stats });
            }

            progress.expanded = stats.expanded;
            if let Err(violation) = self.budget.check(&progress) {
                warn!(%violation, expanded = stats.expanded, "Search budget exceeded");
                return Err(violation.into());
            }

            stats.expanded += 1;
            for child in state.next_states() {
                stats.generated += 1;
                if visited.insert(child.key()) {
                    frontier.push_back(Arc::new(child));
                } else {
                    stats.duplicates += 1;
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
            trace!(
                depth = state.depth(),
                frontier = frontier.len(),
                "Expanded state"
            );
        }

        debug!(
            expanded = stats.expanded,
            distinct = visited.len(),
            "State space exhausted"
        );
        Err(PlanError::NoPlanFound {
            explored: stats.expanded,
        })
    }
}

/// Plan with no budget.
///
/// Returns the States from `initial` to the first goal-satisfying State and
/// the actions between them.
pub fn plan(initial: &State, goal: &State) -> Result<Plan, PlanError> {
    Planner::unbounded()
        .search(initial, goal)
        .map(|outcome| outcome.plan)
}

fn validate(initial: &State, goal: &State) -> Result<(), PlanError> {
    if !goal.is_goal() {
        return Err(PlanError::NotAGoal);
    }
    if !Arc::ptr_eq(initial.environment(), goal.environment()) {
        return Err(StateError::EnvironmentMismatch.into());
    }
    let unknown = goal
        .objects()
        .keys()
        .copied()
        .chain(goal.holding())
        .find(|id| !initial.objects().contains_key(id));
    if let Some(id) = unknown {
        return Err(StateError::UnknownObject(id).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Action;
    use crate::budget::BudgetBuilder;
    use crate::core::{Environment, Object, ObjectId, PoseId};

    fn env(names: &[&str]) -> Arc<Environment> {
        Arc::new(Environment::new(names.iter().copied()))
    }

    fn initial(env: &Arc<Environment>, objects: &[(u32, u32)]) -> State {
        let objects = objects
            .iter()
            .map(|&(id, pose)| Object::at(ObjectId(id), PoseId(pose)));
        State::initial(Arc::clone(env), objects, None).unwrap()
    }

    fn goal(env: &Arc<Environment>, constraints: &[(u32, u32)], holding: Option<u32>) -> State {
        let constraints = constraints
            .iter()
            .map(|&(id, pose)| (ObjectId(id), PoseId(pose)));
        State::goal(Arc::clone(env), constraints, holding.map(ObjectId)).unwrap()
    }

    #[test]
    fn satisfied_initial_returns_empty_plan() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0)]);

        let plan = plan(&start, &goal(&env, &[(0, 0)], None)).unwrap();

        assert!(plan.is_empty());
        assert_eq!(plan.states().len(), 1);
    }

    #[test]
    fn single_move_is_pick_then_place() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0)]);

        let plan = plan(&start, &goal(&env, &[(0, 1)], None)).unwrap();

        assert_eq!(
            plan.actions(),
            &[
                Action::pick(ObjectId(0)),
                Action::place(ObjectId(0), PoseId(1))
            ]
        );
    }

    #[test]
    fn holding_goal_stops_after_pick() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0), (1, 1)]);

        let plan = plan(&start, &goal(&env, &[], Some(1))).unwrap();

        assert_eq!(plan.actions(), &[Action::pick(ObjectId(1))]);
    }

    #[test]
    fn swap_needs_a_spare_location() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0), (1, 1)]);

        let result = plan(&start, &goal(&env, &[(0, 1), (1, 0)], None));

        assert!(matches!(result, Err(PlanError::NoPlanFound { .. })));
    }

    #[test]
    fn search_terminates_on_cyclic_graph() {
        let env = env(&["A", "B", "C"]);
        let start = initial(&env, &[(0, 0), (1, 1)]);

        // Both objects at the same place can never hold.
        let result = plan(&start, &goal(&env, &[(0, 2), (1, 2)], None));

        match result {
            Err(PlanError::NoPlanFound { explored }) => assert!(explored > 0),
            other => panic!("Expected NoPlanFound, got {:?}", other),
        }
    }

    #[test]
    fn expansion_budget_reports_exhaustion() {
        let env = env(&["A", "B", "C"]);
        let start = initial(&env, &[(0, 0), (1, 1)]);
        let planner = Planner::new(BudgetBuilder::new().max_expansions(2).build());

        let result = planner.search(&start, &goal(&env, &[(0, 1), (1, 0)], None));

        assert_eq!(
            result.unwrap_err(),
            PlanError::SearchExhausted {
                max: 2,
                expanded: 2
            }
        );
    }

    #[test]
    fn zero_budget_still_accepts_satisfied_initial() {
        let env = env(&["A"]);
        let start = initial(&env, &[(0, 0)]);
        let planner = Planner::new(BudgetBuilder::new().max_expansions(0).build());

        let outcome = planner.search(&start, &goal(&env, &[], None)).unwrap();

        assert!(outcome.plan.is_empty());
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn zero_timeout_reports_timed_out() {
        let env = env(&["A", "B", "C", "D"]);
        let start = initial(&env, &[(0, 0), (1, 1), (2, 2)]);
        let planner = Planner::new(BudgetBuilder::new().timeout(Duration::ZERO).build());

        let result = planner.search(&start, &goal(&env, &[(0, 1), (1, 2), (2, 0)], None));

        assert!(matches!(result, Err(PlanError::SearchTimedOut { .. })));
    }

    #[test]
    fn rejects_non_goal_specification() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0)]);
        let not_goal = initial(&env, &[(0, 1)]);

        assert_eq!(plan(&start, &not_goal).unwrap_err(), PlanError::NotAGoal);
    }

    #[test]
    fn rejects_goal_on_unknown_object() {
        let env = env(&["A", "B"]);
        let start = initial(&env, &[(0, 0)]);

        assert_eq!(
            plan(&start, &goal(&env, &[(5, 1)], None)).unwrap_err(),
            PlanError::InvalidProblem(StateError::UnknownObject(ObjectId(5)))
        );
        assert_eq!(
            plan(&start, &goal(&env, &[], Some(4))).unwrap_err(),
            PlanError::InvalidProblem(StateError::UnknownObject(ObjectId(4)))
        );
    }

    #[test]
    fn rejects_foreign_environment() {
        let start = initial(&env(&["A", "B"]), &[(0, 0)]);
        let other = env(&["X", "Y", "Z"]);

        assert_eq!(
            plan(&start, &goal(&other, &[(0, 2)], None)).unwrap_err(),
            PlanError::InvalidProblem(StateError::EnvironmentMismatch)
        );
    }

    #[test]
    fn rejects_environment_with_same_size() {
        let start = initial(&env(&["A", "B"]), &[(0, 0)]);
        let renamed = env(&["X", "Y"]);

        assert_eq!(
            plan(&start, &goal(&renamed, &[(0, 1)], None)).unwrap_err(),
            PlanError::InvalidProblem(StateError::EnvironmentMismatch)
        );
    }

    #[test]
    fn stats_count_duplicates() {
        let env = env(&["A", "B", "C"]);
        let start = initial(&env, &[(0, 0), (1, 1)]);

        let outcome = Planner::unbounded()
            .search(&start, &goal(&env, &[(0, 1), (1, 0)], None))
            .unwrap();

        // Every successor is either new or a duplicate; the root is the
        // only distinct configuration not produced by expansion.
        assert_eq!(
            outcome.stats.generated,
            outcome.stats.distinct - 1 + outcome.stats.duplicates
        );
        assert!(outcome.stats.duplicates > 0);
        assert!(outcome.stats.peak_frontier >= 1);
    }

    #[test]
    fn plan_ignores_lineage_of_initial() {
        let env = env(&["A", "B"]);
        let start = Arc::new(initial(&env, &[(0, 0)]));
        let picked = Action::pick(ObjectId(0)).apply(&start).unwrap();

        let plan = plan(&picked, &goal(&env, &[(0, 1)], None)).unwrap();

        assert_eq!(plan.len(), 1);
        assert!(plan.initial_state().parent().is_none());
    }
}
