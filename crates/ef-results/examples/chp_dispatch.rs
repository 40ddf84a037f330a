//! End-to-end walk: build a CHP system, assemble the problem, stand in for
//! the external solver with a hand-written feasible solution, verify it,
//! and collect per-node tables.
//!
//! Run with `cargo run --example chp_dispatch`.

use chrono::{TimeZone, Utc};
use ef_components::{Bus, Sink, Source, Transformer};
use ef_core::TimeIndex;
use ef_graph::{EnergySystem, Flow};
use ef_results::collect;
use ef_solver::{verify_solution, Problem, Solution, SolutionStatus, SolvedValues};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut sys = EnergySystem::new(TimeIndex::hourly(start, 3));

    // gas -> chp -> {el_bus -> el_demand, th_bus -> th_demand}
    let gas = sys.add_node("gas")?;
    let chp = sys.add_node("chp")?;
    let el_bus = sys.add_node("el_bus")?;
    let th_bus = sys.add_node("th_bus")?;
    let el_demand = sys.add_node("el_demand")?;
    let th_demand = sys.add_node("th_demand")?;

    sys.connect(gas, chp, Flow::new().with_nominal_capacity(150.0))?;
    sys.connect(chp, el_bus, Flow::new())?;
    sys.connect(chp, th_bus, Flow::new())?;
    sys.connect(el_bus, el_demand, Flow::new())?;
    sys.connect(th_bus, th_demand, Flow::new())?;
    sys.check_consistency()?;

    let mut problem = Problem::new(&sys);
    problem.attach_model(gas, Box::new(Source::new("gas")))?;
    problem.attach_model(
        chp,
        Box::new(Transformer::new(
            "chp",
            vec![gas],
            vec![el_bus, th_bus],
            gas,
            [((gas, el_bus), 0.4), ((gas, th_bus), 0.5)],
        )?),
    )?;
    problem.attach_model(el_bus, Box::new(Bus::new("el_bus")))?;
    problem.attach_model(th_bus, Box::new(Bus::new("th_bus")))?;
    problem.attach_model(el_demand, Box::new(Sink::new("el_demand")))?;
    problem.attach_model(th_demand, Box::new(Sink::new("th_demand")))?;

    let constraints = problem.assemble()?;
    println!(
        "assembled: {} flow variables, {} relations, horizon {}",
        constraints.flow_vars.len(),
        constraints.relations.len(),
        constraints.horizon
    );

    // Stand-in for the external solver: dispatch the plant at 100/80/120
    // units of gas and route the converted energy to the demands.
    let fuel = [100.0, 80.0, 120.0];
    let electricity: Vec<f64> = fuel.iter().map(|g| g * 0.4).collect();
    let heat: Vec<f64> = fuel.iter().map(|g| g * 0.5).collect();

    let mut values = SolvedValues::new();
    values.insert_edge_series(gas, chp, fuel.to_vec());
    values.insert_edge_series(chp, el_bus, electricity.clone());
    values.insert_edge_series(chp, th_bus, heat.clone());
    values.insert_edge_series(el_bus, el_demand, electricity);
    values.insert_edge_series(th_bus, th_demand, heat);

    let solution = Solution {
        status: SolutionStatus::Optimal,
        objective: Some(0.0),
        values,
    };

    let violations = verify_solution(&constraints, &solution.values, 1e-9)?;
    println!(
        "solution status {}, {} violations",
        solution.status,
        violations.len()
    );

    let results = collect(&sys, &solution.values);
    println!("model {}", &results.model_id[..12]);
    for (label, table) in &results.tables {
        println!("== {label}");
        for (name, series) in table.inputs.columns() {
            println!("   in  {name}: {series:?}");
        }
        for (name, series) in table.outputs.columns() {
            println!("   out {name}: {series:?}");
        }
        for (name, series) in table.own.columns() {
            println!("   own {name}: {series:?}");
        }
    }
    for failure in &results.failures {
        println!("failed {}: {}", failure.node, failure.error);
    }

    Ok(())
}
