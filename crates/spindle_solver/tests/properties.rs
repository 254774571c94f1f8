//! Property tests for call-plan solving.
//!
//! Graphs are generated acyclic by only letting type `i` depend on types
//! with a larger index. Types flagged as given have no provider.

mod common;

use common::{catalog, ty};
use proptest::prelude::*;
use spindle_solver::prelude::*;
use spindle_types::prelude::*;

#[derive(Debug, Clone)]
struct Graph {
    given: Vec<bool>,
    edges: Vec<Vec<usize>>,
}

fn name(i: usize) -> String {
    format!("T{i}")
}

fn graph() -> impl Strategy<Value = Graph> {
    (1usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
        )
            .prop_map(move |(given, adjacency)| Graph {
                given,
                edges: adjacency
                    .into_iter()
                    .enumerate()
                    .map(|(i, row)| (i + 1..n).filter(|&j| row[j]).collect())
                    .collect(),
            })
    })
}

impl Graph {
    fn catalog(&self) -> spindle_catalog::ProviderCatalog {
        let mut fixture = catalog();
        for (i, deps) in self.edges.iter().enumerate() {
            if self.given[i] {
                continue;
            }
            let inputs: Vec<String> = deps.iter().map(|&j| name(j)).collect();
            let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();
            fixture = fixture.provides(&format!("New{}", name(i)), &inputs, &name(i));
        }
        fixture.build()
    }

    fn givens(&self) -> Vec<Type> {
        (0..self.given.len())
            .filter(|&i| self.given[i])
            .map(|i| ty(&name(i)))
            .collect()
    }
}

/// Type held by `slot`.
fn slot_type(plan: &Plan, given: &[Type], slot: usize) -> Type {
    match plan.source(slot) {
        SlotSource::Given(i) => given[i].clone(),
        SlotSource::Call(j) => plan.calls()[j].output.clone(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every argument refers to a given or an earlier call, and has the type
    /// the provider expects.
    #[test]
    fn no_forward_references(graph in graph()) {
        let catalog = graph.catalog();
        let given = graph.givens();

        let plan = solve(&catalog, &given, &ty(&name(0))).unwrap();

        for (k, call) in plan.calls().iter().enumerate() {
            let provider = catalog.get(&call.output).unwrap();
            prop_assert_eq!(call.args.len(), provider.inputs().len());
            for (arg, input) in call.args.iter().zip(provider.inputs()) {
                prop_assert!(*arg < given.len() + k);
                prop_assert_eq!(&slot_type(&plan, &given, *arg), input);
            }
        }
    }

    /// Each type is produced at most once, and only types needed are produced.
    #[test]
    fn outputs_are_unique(graph in graph()) {
        let catalog = graph.catalog();
        let given = graph.givens();

        let plan = solve(&catalog, &given, &ty(&name(0))).unwrap();

        let mut seen = Vec::new();
        for call in plan.calls() {
            prop_assert!(!seen.contains(&call.output));
            prop_assert!(!given.contains(&call.output));
            seen.push(call.output.clone());
        }
        prop_assert!(plan.len() <= graph.given.iter().filter(|g| !**g).count());
        if let Some(last) = plan.calls().last() {
            prop_assert_eq!(&last.output, &ty(&name(0)));
        }
    }

    /// Merging and solving twice yields identical plans.
    #[test]
    fn solving_is_deterministic(graph in graph()) {
        let given = graph.givens();

        let first = solve(&graph.catalog(), &given, &ty(&name(0))).unwrap();
        let second = solve(&graph.catalog(), &given, &ty(&name(0))).unwrap();

        prop_assert_eq!(first, second);
    }
}
