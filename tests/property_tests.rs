//! Property-based tests for the planner.
//!
//! These tests use proptest to generate small random domains and check the
//! planner against exhaustive enumeration of the same state graph.

use pickplace::core::{Environment, Object, ObjectId, PoseId, State, StateKey};
use pickplace::search::PlanError;
use pickplace::plan;
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

#[derive(Clone, Debug)]
struct Scenario {
    initial: State,
    goal: State,
}

prop_compose! {
    fn arbitrary_scenario(max_locations: u32, max_objects: usize)
        (locations in 1..=max_locations)
        (
            placement in Just((0..locations).collect::<Vec<u32>>()).prop_shuffle(),
            objects in 0..=max_objects.min(locations as usize),
            goal_poses in prop::collection::vec(prop::option::of(0..locations), max_objects),
            goal_holding in prop::option::of(0..max_objects as u32),
        ) -> Scenario
    {
        let locations = placement.len() as u32;
        let env = Arc::new(Environment::new((0..locations).map(|i| format!("L{i}"))));
        let initial = State::initial(
            Arc::clone(&env),
            (0..objects).map(|i| Object::at(ObjectId(i as u32), PoseId(placement[i]))),
            None,
        )
        .unwrap();
        let constraints = goal_poses
            .iter()
            .take(objects)
            .enumerate()
            .filter_map(|(i, pose)| pose.map(|pose| (ObjectId(i as u32), PoseId(pose))));
        let holding = goal_holding
            .filter(|&held| (held as usize) < objects)
            .map(ObjectId);
        let goal = State::goal(env, constraints, holding).unwrap();
        Scenario { initial, goal }
    }
}

/// Every State reachable from `initial`, one per configuration.
fn reachable(initial: &State) -> Vec<Arc<State>> {
    let root = Arc::new(initial.clone());
    let mut seen: HashSet<StateKey> = HashSet::new();
    seen.insert(root.key());
    let mut queue = VecDeque::from([Arc::clone(&root)]);
    let mut all = vec![root];

    while let Some(state) = queue.pop_front() {
        for child in state.next_states() {
            if seen.insert(child.key()) {
                let child = Arc::new(child);
                queue.push_back(Arc::clone(&child));
                all.push(child);
            }
        }
    }
    all
}

/// Depth-limited search without duplicate detection.
fn reaches_goal_within(state: &Arc<State>, goal: &State, depth: usize) -> bool {
    if state.satisfies_goal(goal) {
        return true;
    }
    if depth == 0 {
        return false;
    }
    state
        .next_states()
        .into_iter()
        .any(|child| reaches_goal_within(&Arc::new(child), goal, depth - 1))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn plans_are_sound(scenario in arbitrary_scenario(4, 3)) {
        match plan(&scenario.initial, &scenario.goal) {
            Ok(plan) => {
                prop_assert_eq!(plan.states().len(), plan.len() + 1);
                prop_assert_eq!(plan.initial_state().key(), scenario.initial.key());
                prop_assert!(plan.final_state().satisfies_goal(&scenario.goal));
                prop_assert!(plan.verify(&scenario.goal));
            }
            Err(PlanError::NoPlanFound { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn plans_are_minimal(scenario in arbitrary_scenario(3, 2)) {
        if let Ok(plan) = plan(&scenario.initial, &scenario.goal) {
            if !plan.is_empty() {
                let root = Arc::new(scenario.initial.clone());
                prop_assert!(!reaches_goal_within(&root, &scenario.goal, plan.len() - 1));
            }
        }
    }

    #[test]
    fn no_plan_means_goal_unreachable(scenario in arbitrary_scenario(4, 3)) {
        let result = plan(&scenario.initial, &scenario.goal);
        let reachable_goal = reachable(&scenario.initial)
            .iter()
            .any(|state| state.satisfies_goal(&scenario.goal));

        prop_assert_eq!(result.is_ok(), reachable_goal);
    }

    #[test]
    fn reachable_states_keep_invariants(scenario in arbitrary_scenario(4, 3)) {
        let count = scenario.initial.objects().len();

        for state in reachable(&scenario.initial) {
            // Object count never changes.
            prop_assert_eq!(state.objects().len(), count);
            let ids: HashSet<_> = state.objects().keys().collect();
            let initial_ids: HashSet<_> = scenario.initial.objects().keys().collect();
            prop_assert_eq!(ids, initial_ids);

            // No two objects share a pose.
            let poses: Vec<PoseId> = state.objects().values().flatten().copied().collect();
            let distinct: HashSet<_> = poses.iter().collect();
            prop_assert_eq!(poses.len(), distinct.len());

            // At most one object is in hand, and it is the held one.
            let in_hand: Vec<ObjectId> = state
                .objects()
                .iter()
                .filter(|(_, pose)| pose.is_none())
                .map(|(&id, _)| id)
                .collect();
            prop_assert!(in_hand.len() <= 1);
            prop_assert_eq!(in_hand.first().copied(), state.holding());
        }
    }

    #[test]
    fn plan_depths_increase_by_one(scenario in arbitrary_scenario(4, 3)) {
        if let Ok(plan) = plan(&scenario.initial, &scenario.goal) {
            for (depth, state) in plan.states().iter().enumerate() {
                prop_assert_eq!(state.depth(), depth);
            }
        }
    }

    #[test]
    fn planning_is_deterministic(scenario in arbitrary_scenario(4, 3)) {
        let first = plan(&scenario.initial, &scenario.goal);
        let second = plan(&scenario.initial, &scenario.goal);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a.actions(), b.actions()),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "results differ between runs"),
        }
    }
}
