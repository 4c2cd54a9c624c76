pub mod frontier;
pub mod simulation;

pub use frontier::pareto_frontier;
pub use simulation::{
    simulate_portfolios, OptimizationInput, OptimizationOutput, Portfolio, WeightConstraints,
};
