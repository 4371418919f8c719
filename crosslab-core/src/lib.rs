//! CrossLab Core: price series, crossover signals, and the execution simulator.
//!
//! This crate contains the sequential heart of the backtester:
//! - Domain types (price points, signals, positions, trade returns)
//! - Simple moving average indicator
//! - Moving-average crossover signal generator with an explicit tie-break policy
//! - Single-position execution simulator with a fixed stop-loss
//! - Price provider seam, gap fill policies, and series validation

pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: result types cross thread boundaries freely.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::PricePoint>();
        require_sync::<domain::PricePoint>();
        require_send::<domain::Signal>();
        require_sync::<domain::Signal>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();
        require_send::<domain::TradeReturn>();
        require_sync::<domain::TradeReturn>();

        require_send::<signals::MaCrossover>();
        require_sync::<signals::MaCrossover>();
        require_send::<engine::ExecutionConfig>();
        require_sync::<engine::ExecutionConfig>();
        require_send::<engine::SimulationOutput>();
        require_sync::<engine::SimulationOutput>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
    }

    /// The transition function sees only one point and the carried position:
    /// there is no way for a step to peek at later prices.
    #[test]
    fn step_has_no_lookahead_parameter() {
        fn _check(
            pos: domain::Position,
            price: &domain::PricePoint,
            signal: Option<domain::Signal>,
        ) -> (domain::Position, Option<domain::TradeReturn>) {
            engine::step(pos, 0, price, signal, 0.05)
        }
    }
}
