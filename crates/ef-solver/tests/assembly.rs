//! Problem assembly and solution verification against a small CHP system.

use chrono::{TimeZone, Utc};
use ef_components::{Bus, FlowRef, Transformer, VariableDecl};
use ef_core::{NodeId, TimeIndex};
use ef_graph::{EnergySystem, Flow};
use ef_solver::{verify_solution, Problem, SolverError, SolvedValues, Violation};

fn system(horizon: usize) -> EnergySystem {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    EnergySystem::new(TimeIndex::hourly(start, horizon))
}

struct Chp {
    sys: EnergySystem,
    gas: NodeId,
    chp: NodeId,
    elec: NodeId,
    heat: NodeId,
}

/// gas -> chp -> {elec, heat}, factors 0.4 / 0.5 on the gas reference.
fn chp_system(horizon: usize) -> Chp {
    let mut sys = system(horizon);
    let gas = sys.add_node("gas").unwrap();
    let chp = sys.add_node("chp").unwrap();
    let elec = sys.add_node("elec").unwrap();
    let heat = sys.add_node("heat").unwrap();
    sys.connect(gas, chp, Flow::new()).unwrap();
    sys.connect(chp, elec, Flow::new()).unwrap();
    sys.connect(chp, heat, Flow::new()).unwrap();
    Chp {
        sys,
        gas,
        chp,
        elec,
        heat,
    }
}

fn chp_model(c: &Chp) -> Transformer {
    Transformer::new(
        "chp",
        vec![c.gas],
        vec![c.elec, c.heat],
        c.gas,
        [((c.gas, c.elec), 0.4), ((c.gas, c.heat), 0.5)],
    )
    .unwrap()
}

#[test]
fn assembly_is_deterministic_and_sorted() {
    let c = chp_system(24);
    let mut problem = Problem::new(&c.sys);
    problem.attach_model(c.chp, Box::new(chp_model(&c))).unwrap();

    let cs = problem.assemble().unwrap();
    assert_eq!(cs.horizon, 24);
    assert_eq!(cs.flow_vars.len(), 3);
    assert_eq!(cs.relations.len(), 2);

    let order: Vec<FlowRef> = cs.flow_vars.iter().map(|v| v.flow).collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);

    // Assembling again yields the identical set.
    let cs2 = problem.assemble().unwrap();
    assert_eq!(cs.relations, cs2.relations);
    assert_eq!(
        cs.flow_vars.iter().map(|v| v.flow).collect::<Vec<_>>(),
        cs2.flow_vars.iter().map(|v| v.flow).collect::<Vec<_>>()
    );
}

#[test]
fn duplicate_model_rejected() {
    let c = chp_system(2);
    let mut problem = Problem::new(&c.sys);
    problem.attach_model(c.chp, Box::new(chp_model(&c))).unwrap();
    let err = problem
        .attach_model(c.chp, Box::new(chp_model(&c)))
        .unwrap_err();
    assert!(matches!(err, SolverError::DuplicateModel { .. }));
}

#[test]
fn conversion_relations_hold_for_consistent_values() {
    // Solved gas = 100 must imply elec = 40 and heat = 50.
    let c = chp_system(1);
    let mut problem = Problem::new(&c.sys);
    problem.attach_model(c.chp, Box::new(chp_model(&c))).unwrap();
    let cs = problem.assemble().unwrap();

    let mut values = SolvedValues::new();
    values.insert_edge_series(c.gas, c.chp, vec![100.0]);
    values.insert_edge_series(c.chp, c.elec, vec![40.0]);
    values.insert_edge_series(c.chp, c.heat, vec![50.0]);

    let violations = verify_solution(&cs, &values, 1e-9).unwrap();
    assert!(violations.is_empty());
}

#[test]
fn conversion_relations_flag_inconsistent_values() {
    let c = chp_system(1);
    let mut problem = Problem::new(&c.sys);
    problem.attach_model(c.chp, Box::new(chp_model(&c))).unwrap();
    let cs = problem.assemble().unwrap();

    let mut values = SolvedValues::new();
    values.insert_edge_series(c.gas, c.chp, vec![100.0]);
    values.insert_edge_series(c.chp, c.elec, vec![41.0]);
    values.insert_edge_series(c.chp, c.heat, vec![50.0]);

    let violations = verify_solution(&cs, &values, 1e-9).unwrap();
    assert_eq!(violations.len(), 1);
    match &violations[0] {
        Violation::Relation { label, t, lhs, rhs } => {
            assert_eq!(label, "chp:gas->elec");
            assert_eq!(*t, 0);
            assert!((lhs - 40.0).abs() < 1e-12);
            assert!((rhs - 41.0).abs() < 1e-12);
        }
        other => panic!("expected a relation violation, got {other:?}"),
    }
}

#[test]
fn missing_value_is_an_error_not_a_violation() {
    let c = chp_system(1);
    let mut problem = Problem::new(&c.sys);
    problem.attach_model(c.chp, Box::new(chp_model(&c))).unwrap();
    let cs = problem.assemble().unwrap();

    let mut values = SolvedValues::new();
    values.insert_edge_series(c.gas, c.chp, vec![100.0]);
    values.insert_edge_series(c.chp, c.elec, vec![40.0]);
    // chp -> heat left out

    let err = verify_solution(&cs, &values, 1e-9).unwrap_err();
    assert!(matches!(err, SolverError::MissingValue { .. }));
}

#[test]
fn bounds_and_fixed_profiles_are_checked() {
    let mut sys = system(2);
    let a = sys.add_node("a").unwrap();
    let b = sys.add_node("b").unwrap();
    let c = sys.add_node("c").unwrap();
    sys.connect(a, b, Flow::new().with_nominal_capacity(100.0).with_max(0.9))
        .unwrap();
    sys.connect(b, c, Flow::new().with_nominal_capacity(10.0).with_fixed(vec![0.5, 1.0]))
        .unwrap();

    let problem = Problem::new(&sys);
    let cs = problem.assemble().unwrap();

    let mut values = SolvedValues::new();
    values.insert_edge_series(a, b, vec![95.0, 80.0]);
    values.insert_edge_series(b, c, vec![5.0, 7.0]);

    let violations = verify_solution(&cs, &values, 1e-9).unwrap();
    assert_eq!(violations.len(), 2);
    assert!(violations.iter().any(|v| matches!(
        v,
        Violation::Bounds { t: 0, value, .. } if *value == 95.0
    )));
    assert!(violations.iter().any(|v| matches!(
        v,
        Violation::Fixed { t: 1, expected, .. } if *expected == 10.0
    )));
}

#[test]
fn bus_balance_closes_the_loop() {
    // pv and grid feed a bus, demand draws from it.
    let mut sys = system(1);
    let pv = sys.add_node("pv").unwrap();
    let grid = sys.add_node("grid").unwrap();
    let bus = sys.add_node("el_bus").unwrap();
    let demand = sys.add_node("demand").unwrap();
    sys.connect(pv, bus, Flow::new()).unwrap();
    sys.connect(grid, bus, Flow::new()).unwrap();
    sys.connect(bus, demand, Flow::new()).unwrap();

    let mut problem = Problem::new(&sys);
    problem
        .attach_model(bus, Box::new(Bus::new("el_bus")))
        .unwrap();
    let cs = problem.assemble().unwrap();

    let mut values = SolvedValues::new();
    values.insert_edge_series(pv, bus, vec![30.0]);
    values.insert_edge_series(grid, bus, vec![20.0]);
    values.insert_edge_series(bus, demand, vec![50.0]);
    assert!(verify_solution(&cs, &values, 1e-9).unwrap().is_empty());

    // Losing 10 units on the bus is a balance violation.
    values.insert_edge_series(bus, demand, vec![40.0]);
    let violations = verify_solution(&cs, &values, 1e-9).unwrap();
    assert_eq!(violations.len(), 1);
    assert!(matches!(&violations[0], Violation::Relation { label, .. } if label == "el_bus:balance"));
}

#[test]
fn node_variable_declarations_are_collected() {
    struct WithInvest;
    impl ef_components::NodeModel for WithInvest {
        fn name(&self) -> &str {
            "with_invest"
        }
        fn variables(&self, _node: NodeId) -> Vec<VariableDecl> {
            vec![VariableDecl::non_negative("invest"), VariableDecl::binary("online")]
        }
    }

    let mut sys = system(1);
    let a = sys.add_node("a").unwrap();
    let mut problem = Problem::new(&sys);
    problem.attach_model(a, Box::new(WithInvest)).unwrap();

    let cs = problem.assemble().unwrap();
    let names: Vec<&str> = cs.node_vars.iter().map(|(_, d)| d.name.as_str()).collect();
    assert_eq!(names, ["invest", "online"]);
    assert!(cs.node_vars[1].1.binary);
}
