// Output of a run: the per-edge flow assignment and the plan wrapping it.
//
// Stored flows are the solver's values; rounding happens only when
// displaying, so downstream computations (line thickness, totals) see the
// exact numbers.

use super::models::SolverStatistics;
use super::value_objects::{RouteKind, SolutionStatus};
use std::fmt;

/// Positive flow on one edge
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFlow {
    pub source: String,
    pub destination: String,
    pub route: Option<RouteKind>,
    pub flow: f64,
    /// Objective coefficient the edge was priced with
    pub unit_objective: f64,
}

/// Edges carrying strictly positive flow, in edge order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowAssignment {
    flows: Vec<EdgeFlow>,
    precision: usize,
}

impl FlowAssignment {
    pub fn new(flows: Vec<EdgeFlow>, precision: usize) -> Self {
        Self { flows, precision }
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeFlow> {
        self.flows.iter()
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Flow on `source -> destination`, zero when the edge carries nothing
    pub fn get(&self, source: &str, destination: &str) -> f64 {
        self.flows
            .iter()
            .find(|f| f.source == source && f.destination == destination)
            .map_or(0.0, |f| f.flow)
    }

    pub fn inflow(&self, node: &str) -> f64 {
        self.flows
            .iter()
            .filter(|f| f.destination == node)
            .map(|f| f.flow)
            .sum()
    }

    pub fn outflow(&self, node: &str) -> f64 {
        self.flows
            .iter()
            .filter(|f| f.source == node)
            .map(|f| f.flow)
            .sum()
    }

    pub fn total_flow(&self) -> f64 {
        self.flows.iter().map(|f| f.flow).sum()
    }

    pub fn max_flow(&self) -> Option<f64> {
        self.flows.iter().map(|f| f.flow).reduce(f64::max)
    }

    /// Objective recomputed from the stored flows
    pub fn total_cost(&self) -> f64 {
        self.flows.iter().map(|f| f.flow * f.unit_objective).sum()
    }

    /// Flow rounded to the display precision
    pub fn rounded(&self, flow: f64) -> f64 {
        let scale = 10f64.powi(self.precision as i32);
        (flow * scale).round() / scale
    }

    /// Line thickness per edge, scaled linearly from `min` to `max` by flow
    /// relative to the largest flow
    pub fn line_weights(&self, min: f64, max: f64) -> Vec<(&EdgeFlow, f64)> {
        let Some(largest) = self.max_flow() else {
            return Vec::new();
        };
        self.flows
            .iter()
            .map(|f| (f, min + (f.flow / largest) * (max - min)))
            .collect()
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct FlowPlan {
    pub status: SolutionStatus,
    pub objective_value: f64,
    pub assignment: FlowAssignment,
    pub statistics: SolverStatistics,
    pub solver: String,
}

impl fmt::Display for FlowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.assignment.precision();
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Total Cost: {}", self.objective_value)?;
        for edge in self.assignment.iter() {
            writeln!(
                f,
                "Flow from {} to {}: {:.*}",
                edge.source, edge.destination, precision, edge.flow
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: &str, destination: &str, flow: f64, unit_objective: f64) -> EdgeFlow {
        EdgeFlow {
            source: source.to_string(),
            destination: destination.to_string(),
            route: None,
            flow,
            unit_objective,
        }
    }

    fn assignment() -> FlowAssignment {
        FlowAssignment::new(
            vec![
                edge("F1", "W1", 40.0, 2.0),
                edge("W1", "S1", 30.0, 1.0),
                edge("W1", "S2", 10.004, 3.0),
            ],
            2,
        )
    }

    #[test]
    fn aggregates_by_node() {
        let a = assignment();
        assert_eq!(a.get("F1", "W1"), 40.0);
        assert_eq!(a.get("W1", "F1"), 0.0);
        assert_eq!(a.inflow("W1"), 40.0);
        assert!((a.outflow("W1") - 40.004).abs() < 1e-12);
        assert_eq!(a.max_flow(), Some(40.0));
        assert!((a.total_flow() - 80.004).abs() < 1e-9);
        assert!((a.total_cost() - (80.0 + 30.0 + 30.012)).abs() < 1e-9);
    }

    #[test]
    fn rounding_is_display_only() {
        let a = assignment();
        let last = a.iter().last().unwrap();
        assert_eq!(a.rounded(last.flow), 10.0);
        assert_eq!(last.flow, 10.004);
    }

    #[test]
    fn line_weights_span_the_range() {
        let a = assignment();
        let weights = a.line_weights(2.0, 6.0);
        assert_eq!(weights[0].1, 6.0);
        assert_eq!(weights[1].1, 5.0);
        assert!(FlowAssignment::default().line_weights(2.0, 6.0).is_empty());
    }

    #[test]
    fn plan_renders_report() {
        let plan = FlowPlan {
            status: SolutionStatus::Optimal,
            objective_value: 140.012,
            assignment: assignment(),
            statistics: SolverStatistics::default(),
            solver: "test".into(),
        };
        let report = plan.to_string();
        assert!(report.starts_with("Status: Optimal\nTotal Cost: 140.012\n"));
        assert!(report.contains("Flow from W1 to S2: 10.00\n"));
    }
}
