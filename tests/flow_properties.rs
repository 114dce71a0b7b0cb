use proptest::prelude::*;
use rstest::rstest;
use std::sync::Arc;
use supplyflow::{
    CoordinateRecord, EdgeRecord, FixedTravelTimes, FlowError, FlowOptimizer, FlowPlan,
    HaversineEstimator,
    MicroLpSolver, NetworkSnapshot, NodeRecord, ObjectiveWeighting, OptimizerConfig,
    QuantityKind, SolutionStatus, SupplyDemandRecord, Tier,
};

const EPS: f64 = 1e-6;

fn optimizer(weighting: ObjectiveWeighting) -> FlowOptimizer {
    FlowOptimizer::new(
        OptimizerConfig::default().with_weighting(weighting),
        Arc::new(MicroLpSolver::new()),
        Arc::new(HaversineEstimator::default()),
    )
}

/// Every flow respects capacity, every factory ships at most its supply,
/// warehouses conserve flow and stores receive exactly their demand
fn assert_feasible(snapshot: &NetworkSnapshot, plan: &FlowPlan) {
    let flows = &plan.assignment;
    for flow in flows.iter() {
        assert!(flow.flow >= -EPS, "negative flow {:?}", flow);
    }
    for edge in &snapshot.edges {
        let flow = flows.get(&edge.source, &edge.destination);
        assert!(
            flow <= edge.capacity + EPS,
            "{} -> {} carries {} over capacity {}",
            edge.source,
            edge.destination,
            flow,
            edge.capacity
        );
    }
    for record in &snapshot.supply_demand {
        if record.kind == QuantityKind::Supply {
            assert!(flows.outflow(&record.id) <= record.quantity + EPS);
        } else {
            assert!((flows.inflow(&record.id) - record.quantity).abs() < EPS);
        }
    }
    for node in snapshot.nodes.iter().filter(|n| n.tier == Tier::Warehouse) {
        assert!((flows.inflow(&node.id) - flows.outflow(&node.id)).abs() < EPS);
    }
}

#[tokio::test]
async fn sample_network_is_solved_to_optimality() {
    let snapshot = NetworkSnapshot::sample();
    let plan = optimizer(ObjectiveWeighting::CostOnly)
        .optimize(&snapshot)
        .await
        .unwrap();

    assert_eq!(plan.status, SolutionStatus::Optimal);
    assert_feasible(&snapshot, &plan);

    let recomputed: f64 = snapshot
        .edges
        .iter()
        .map(|e| plan.assignment.get(&e.source, &e.destination) * e.cost)
        .sum();
    assert!((plan.objective_value - recomputed).abs() < 1e-4);
    assert!((plan.assignment.total_cost() - recomputed).abs() < 1e-4);
}

#[tokio::test]
async fn product_objective_matches_flow_times_minutes_times_cost() {
    let snapshot = NetworkSnapshot::sample();
    let minutes = |e: &EdgeRecord| 5.0 + (e.source.len() + e.destination.len()) as f64 * e.cost;
    let times = snapshot
        .edges
        .iter()
        .fold(FixedTravelTimes::new(), |times, e| {
            times.with(e.source.clone(), e.destination.clone(), minutes(e))
        });
    let optimizer = FlowOptimizer::new(
        OptimizerConfig::default().with_weighting(ObjectiveWeighting::Product),
        Arc::new(MicroLpSolver::new()),
        Arc::new(times),
    );

    let plan = optimizer.optimize(&snapshot).await.unwrap();
    assert_eq!(plan.status, SolutionStatus::Optimal);
    assert_feasible(&snapshot, &plan);

    let recomputed: f64 = snapshot
        .edges
        .iter()
        .map(|e| plan.assignment.get(&e.source, &e.destination) * minutes(e) * e.cost)
        .sum();
    assert!(
        (plan.objective_value - recomputed).abs() < 1e-4,
        "objective {} vs recomputed {}",
        plan.objective_value,
        recomputed
    );
}

#[rstest]
#[case::product(ObjectiveWeighting::Product)]
#[case::linear(ObjectiveWeighting::Linear { cost: 1.0, time: 0.5 })]
#[case::cost_only(ObjectiveWeighting::CostOnly)]
#[tokio::test]
async fn every_weighting_yields_a_feasible_plan(#[case] weighting: ObjectiveWeighting) {
    let snapshot = NetworkSnapshot::sample();
    let plan = optimizer(weighting).optimize(&snapshot).await.unwrap();
    assert_feasible(&snapshot, &plan);
}

#[tokio::test]
async fn repeated_runs_agree() {
    let snapshot = NetworkSnapshot::sample();
    let optimizer = optimizer(ObjectiveWeighting::Product);
    let first = optimizer.optimize(&snapshot).await.unwrap();
    let second = optimizer.optimize(&snapshot).await.unwrap();

    assert!((first.objective_value - second.objective_value).abs() < 1e-6);
    assert_eq!(first.to_string(), second.to_string());
}

#[tokio::test]
async fn demand_above_supply_is_infeasible() {
    let mut snapshot = NetworkSnapshot::sample();
    for record in &mut snapshot.supply_demand {
        if record.id == "S3" {
            record.quantity = 75.0;
        }
    }

    let err = optimizer(ObjectiveWeighting::Product)
        .optimize(&snapshot)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(SolutionStatus::Infeasible));
}

#[tokio::test]
async fn store_without_incoming_edges_is_infeasible() {
    let mut snapshot = NetworkSnapshot::sample();
    snapshot.edges.retain(|e| e.destination != "S2");

    let err = optimizer(ObjectiveWeighting::Product)
        .optimize(&snapshot)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Model { .. }), "got {err}");
    assert_eq!(err.status(), Some(SolutionStatus::Infeasible));
}

#[tokio::test]
async fn capacity_bottleneck_is_infeasible() {
    let mut snapshot = NetworkSnapshot::sample();
    for edge in &mut snapshot.edges {
        if edge.destination == "S1" {
            edge.capacity = 10.0;
        }
    }

    let err = optimizer(ObjectiveWeighting::CostOnly)
        .optimize(&snapshot)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(SolutionStatus::Infeasible));
}

#[tokio::test]
async fn snapshot_file_drives_a_run() {
    let path = std::env::temp_dir().join(format!("supplyflow-{}.json", std::process::id()));
    let json = serde_json::to_string(&NetworkSnapshot::sample()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = NetworkSnapshot::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let plan = optimizer(ObjectiveWeighting::CostOnly)
        .optimize(&loaded)
        .await
        .unwrap();
    assert_feasible(&loaded, &plan);
}

/// Complete factory -> warehouse -> store network where every lane can
/// carry the whole supply, so any demand up to the supply is satisfiable
fn layered(supplies: &[f64], warehouses: usize, demand_shares: &[f64]) -> NetworkSnapshot {
    let total: f64 = supplies.iter().sum();
    let share_sum: f64 = demand_shares.iter().sum();
    let mut snapshot = NetworkSnapshot::default();

    let mut add = |id: String, tier: Tier, i: usize| {
        snapshot.coordinates.push(CoordinateRecord::new(
            id.clone(),
            40.0 + i as f64 * 0.05,
            -3.0 - i as f64 * 0.03,
        ));
        snapshot.nodes.push(NodeRecord::new(id, tier));
    };
    let factories: Vec<String> = (0..supplies.len()).map(|i| format!("F{i}")).collect();
    let hubs: Vec<String> = (0..warehouses).map(|i| format!("W{i}")).collect();
    let stores: Vec<String> = (0..demand_shares.len()).map(|i| format!("S{i}")).collect();
    let mut i = 0;
    let tiers = [
        (&factories, Tier::Factory),
        (&hubs, Tier::Warehouse),
        (&stores, Tier::Store),
    ];
    for (ids, tier) in tiers {
        for id in ids {
            add(id.clone(), tier, i);
            i += 1;
        }
    }

    for (k, f) in factories.iter().enumerate() {
        for (j, w) in hubs.iter().enumerate() {
            snapshot.edges.push(EdgeRecord::new(f, w, total, 1.0 + ((k + j) % 3) as f64));
        }
        snapshot.supply_demand.push(SupplyDemandRecord::supply(f, supplies[k]));
    }
    for (j, w) in hubs.iter().enumerate() {
        for (k, s) in stores.iter().enumerate() {
            snapshot.edges.push(EdgeRecord::new(w, s, total, 1.0 + ((j * 2 + k) % 4) as f64));
        }
    }
    for (k, s) in stores.iter().enumerate() {
        let demand = (total * 0.9 * demand_shares[k] / share_sum).floor();
        snapshot.supply_demand.push(SupplyDemandRecord::demand(s, demand));
    }
    snapshot
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn feasible_layered_networks_are_solved(
        supplies in prop::collection::vec(5.0f64..100.0, 1..=3),
        warehouses in 1usize..=3,
        shares in prop::collection::vec(1.0f64..10.0, 1..=4),
    ) {
        let snapshot = layered(&supplies, warehouses, &shares);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let plan = runtime
            .block_on(optimizer(ObjectiveWeighting::Product).optimize(&snapshot))
            .unwrap();

        prop_assert_eq!(plan.status, SolutionStatus::Optimal);
        assert_feasible(&snapshot, &plan);
    }
}
