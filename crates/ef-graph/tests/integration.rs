//! Integration tests for ef-graph.

use chrono::{TimeZone, Utc};
use ef_core::TimeIndex;
use ef_graph::{EnergySystem, Flow, GraphError};

fn system(horizon: usize) -> EnergySystem {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    EnergySystem::new(TimeIndex::hourly(start, horizon))
}

#[test]
fn bidirectional_invariant_through_edit_sequence() {
    // Build: gas -> plant -> {grid, heat_net}, then rewire.
    let mut sys = system(24);
    let gas = sys.add_node("gas").unwrap();
    let plant = sys.add_node("plant").unwrap();
    let grid = sys.add_node("grid").unwrap();
    let heat_net = sys.add_node("heat_net").unwrap();

    let f_in = sys.connect(gas, plant, Flow::new()).unwrap();
    sys.connect(plant, grid, Flow::new()).unwrap();
    sys.connect(plant, heat_net, Flow::new()).unwrap();

    // Both sides see the same flow object.
    assert_eq!(sys.node(gas).unwrap().outputs().collect::<Vec<_>>(), [(plant, f_in)]);
    assert_eq!(sys.node(plant).unwrap().inputs().collect::<Vec<_>>(), [(gas, f_in)]);
    sys.check_consistency().unwrap();

    // Rewire: drop the heat connection, add a direct gas -> grid bypass.
    sys.disconnect(plant, heat_net).unwrap();
    sys.connect(gas, grid, Flow::new()).unwrap();

    assert!(!sys.node(heat_net).unwrap().has_input(plant));
    assert!(sys.node(grid).unwrap().has_input(gas));
    assert_eq!(sys.edge_count(), 3);
    sys.check_consistency().unwrap();
}

#[test]
fn self_loop_always_fails() {
    let mut sys = system(1);
    let a = sys.add_node("a").unwrap();
    let err = sys.connect(a, a, Flow::new()).unwrap_err();
    assert!(matches!(err, GraphError::SelfLoop { .. }));
    assert_eq!(sys.edge_count(), 0);
}

#[test]
fn duplicate_edge_requires_disconnect_first() {
    let mut sys = system(1);
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    sys.connect(a, b, Flow::new()).unwrap();

    let err = sys.connect(a, b, Flow::new()).unwrap_err();
    assert!(matches!(err, GraphError::DuplicateEdge { .. }));

    // The reverse direction is a distinct edge and is allowed.
    sys.connect(b, a, Flow::new()).unwrap();
    assert_eq!(sys.edge_count(), 2);

    sys.disconnect(a, b).unwrap();
    sys.connect(a, b, Flow::new()).unwrap();
    sys.check_consistency().unwrap();
}

#[test]
fn second_disconnect_fails_with_missing_edge() {
    let mut sys = system(1);
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    sys.connect(a, b, Flow::new()).unwrap();
    sys.disconnect(a, b).unwrap();

    let err = sys.disconnect(a, b).unwrap_err();
    assert!(matches!(err, GraphError::MissingEdge { .. }));
}

#[test]
fn disconnect_missing_edge_fails() {
    let mut sys = system(1);
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    let err = sys.disconnect(a, b).unwrap_err();
    assert!(matches!(err, GraphError::MissingEdge { .. }));
}

#[test]
fn remove_node_leaves_no_dangling_references() {
    // hub sits in the middle of everything, in both directions.
    let mut sys = system(4);
    let hub = sys.add_node("hub").unwrap();
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    let c = sys.add_node("c").unwrap();

    sys.connect(a, hub, Flow::new()).unwrap();
    sys.connect(b, hub, Flow::new()).unwrap();
    sys.connect(hub, c, Flow::new()).unwrap();
    sys.connect(hub, a, Flow::new()).unwrap();
    assert_eq!(sys.edge_count(), 4);

    sys.remove_node(hub).unwrap();

    assert!(sys.node(hub).is_none());
    assert_eq!(sys.edge_count(), 0);
    for id in [a, b, c] {
        let n = sys.node(id).unwrap();
        assert_eq!(n.in_degree(), 0);
        assert_eq!(n.out_degree(), 0);
    }
    sys.check_consistency().unwrap();

    // Operations against the removed node now fail cleanly.
    assert!(matches!(
        sys.connect(a, hub, Flow::new()).unwrap_err(),
        GraphError::UnknownNode { .. }
    ));
    assert!(matches!(
        sys.remove_node(hub).unwrap_err(),
        GraphError::UnknownNode { .. }
    ));
}

#[test]
fn removed_label_can_be_reused() {
    let mut sys = system(1);
    let old = sys.add_node("plant").unwrap();
    sys.remove_node(old).unwrap();
    let new = sys.add_node("plant").unwrap();
    assert_ne!(old, new);
    assert_eq!(sys.node_by_label("plant"), Some(new));
}

#[test]
fn flow_attributes_survive_the_round_trip() {
    let mut sys = system(3);
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    let flow = Flow::new()
        .with_nominal_capacity(100.0)
        .with_max(vec![0.9, 1.0, 0.8])
        .with_variable_costs(2.5)
        .with_investment();
    sys.connect(a, b, flow.clone()).unwrap();

    assert_eq!(sys.flow_between(a, b), Some(&flow));
    let returned = sys.disconnect(a, b).unwrap();
    assert_eq!(returned, flow);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Connect(u8, u8),
        Disconnect(u8, u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..5, 0u8..5).prop_map(|(a, b)| Op::Connect(a, b)),
            (0u8..5, 0u8..5).prop_map(|(a, b)| Op::Disconnect(a, b)),
        ]
    }

    proptest! {
        #[test]
        fn invariant_holds_under_any_op_sequence(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut sys = system(1);
            let nodes: Vec<_> = (0..5)
                .map(|i| sys.add_node(format!("n{i}")).unwrap())
                .collect();

            for op in ops {
                // Individual ops may fail (self-loop, duplicate, missing);
                // the invariant must hold regardless.
                let _ = match op {
                    Op::Connect(a, b) => sys
                        .connect(nodes[a as usize], nodes[b as usize], Flow::new())
                        .map(|_| ()),
                    Op::Disconnect(a, b) => sys
                        .disconnect(nodes[a as usize], nodes[b as usize])
                        .map(|_| ()),
                };

                sys.check_consistency().unwrap();
                for node in sys.nodes() {
                    for (succ, fid) in node.outputs() {
                        let mirror = sys.node(succ).unwrap().inputs().find(|(p, _)| *p == node.id());
                        prop_assert_eq!(mirror, Some((node.id(), fid)));
                    }
                }
            }
        }
    }
}
