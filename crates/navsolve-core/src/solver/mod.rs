pub mod config;
pub mod dispatch;
pub mod error;
pub mod evaluator;
pub mod ids;
pub mod model;
pub mod policy_iteration;
pub mod solution;
pub mod value_iteration;

#[cfg(test)]
mod tests;
