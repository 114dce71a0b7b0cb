use crate::domain::{
    solver_service::{SolverError, SolverService},
    value_objects::SolverBackend,
};
use crate::solver::MicroLpSolver;
use std::sync::Arc;

/// Factory for creating solver instances based on configuration
pub struct SolverFactory;

impl SolverFactory {
    /// Create a solver for a specific backend
    ///
    /// Backends behind a disabled cargo feature fail with `SolverNotAvailable`.
    pub fn create_from_backend(
        backend: SolverBackend,
    ) -> Result<Arc<dyn SolverService>, SolverError> {
        match backend {
            SolverBackend::Auto => Ok(Self::default_solver()),
            SolverBackend::MicroLp => Ok(Arc::new(MicroLpSolver::new())),
            SolverBackend::Highs => Self::highs(),
            SolverBackend::CoinCbc => Self::coin_cbc(),
        }
    }

    /// HiGHS when compiled in, the pure-Rust simplex otherwise
    pub fn default_solver() -> Arc<dyn SolverService> {
        Self::highs().unwrap_or_else(|_| Arc::new(MicroLpSolver::new()))
    }

    #[cfg(feature = "highs")]
    fn highs() -> Result<Arc<dyn SolverService>, SolverError> {
        Ok(Arc::new(crate::solver::HighsSolver::new()))
    }

    #[cfg(not(feature = "highs"))]
    fn highs() -> Result<Arc<dyn SolverService>, SolverError> {
        Err(SolverError::SolverNotAvailable(
            "HiGHS support is not compiled in (enable the `highs` feature)".to_string(),
        ))
    }

    #[cfg(feature = "coin_cbc")]
    fn coin_cbc() -> Result<Arc<dyn SolverService>, SolverError> {
        Ok(Arc::new(crate::solver::CoinCbcSolver::new()))
    }

    #[cfg(not(feature = "coin_cbc"))]
    fn coin_cbc() -> Result<Arc<dyn SolverService>, SolverError> {
        Err(SolverError::SolverNotAvailable(
            "COIN-OR CBC support is not compiled in (enable the `coin_cbc` feature)".to_string(),
        ))
    }
}
