/// Module for the monte carlo hand strength estimator used on swap hold'em.
mod strength;
/// Export the estimator, its configuration, and the trait other estimators implement.
pub use self::strength::{
    DEFAULT_FLOP_SWAP, DEFAULT_ITERATIONS, DEFAULT_TURN_SWAP, MonteCarloStrength, StrengthConfig,
    StrengthError, StrengthEstimator, SwapPolicy, estimate_strength,
};
