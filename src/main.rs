use std::sync::Arc;
use supplyflow::{init_logging, FlowOptimizer, HaversineEstimator, NetworkSnapshot};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Snapshot file from the first argument, the sample network otherwise
    let snapshot = match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading network snapshot");
            NetworkSnapshot::from_path(&path)?
        }
        None => {
            info!("no snapshot given, using the sample network");
            NetworkSnapshot::sample()
        }
    };

    let config = snapshot.config.clone().unwrap_or_default();
    let estimator = Arc::new(HaversineEstimator::default());
    let optimizer = FlowOptimizer::from_config(config, estimator)?;
    info!(
        backend = %optimizer.config().backend,
        weighting = ?optimizer.config().weighting,
        "optimizer ready"
    );

    match optimizer.optimize(&snapshot).await {
        Ok(plan) => {
            print!("{}", plan);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "optimization failed");
            if let Some(status) = err.status() {
                println!("Status: {}", status);
            }
            Err(err.into())
        }
    }
}
