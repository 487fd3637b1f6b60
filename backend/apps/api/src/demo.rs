//! Hash-then-verify pipeline
//!
//! Runs once at startup. Verification never begins before hashing has
//! produced a hash; a failure in either stage is logged and ends the flow
//! without affecting the listener.

use platform::password::{self, ClearTextPassword, Cost, HashedPassword, PasswordHashError};
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::DemoConfig;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("hashing stage failed: {0}")]
    Hash(#[source] PasswordHashError),

    #[error("verification stage failed: {0}")]
    Verify(#[source] PasswordHashError),
}

/// Outcome of a completed pipeline
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub hash: HashedPassword,
    /// Plaintext checked against its own hash
    pub matches: bool,
    /// Decoy checked against the same hash
    pub decoy_matches: bool,
}

/// An out-of-range `salt_rounds` fails here, as part of the hash stage
fn resolve_cost(config: &DemoConfig) -> Result<Cost, DemoError> {
    Cost::new(config.salt_rounds).map_err(DemoError::Hash)
}

pub async fn hash_stage(config: &DemoConfig) -> Result<HashedPassword, DemoError> {
    let cost = resolve_cost(config)?;
    let hashed = password::hash_async(ClearTextPassword::new(config.plaintext.as_str()), cost)
        .await
        .map_err(DemoError::Hash)?;
    tracing::info!(hash = %hashed, cost = %cost, "Password hashed");
    Ok(hashed)
}

pub async fn verify_stage(
    config: &DemoConfig,
    hashed: &HashedPassword,
) -> Result<(bool, bool), DemoError> {
    let matches = password::verify_async(
        ClearTextPassword::new(config.plaintext.as_str()),
        hashed.clone(),
    )
    .await
    .map_err(DemoError::Verify)?;
    tracing::info!(matches, "Plaintext checked against hash");

    let decoy_matches = password::verify_async(
        ClearTextPassword::new(config.decoy.as_str()),
        hashed.clone(),
    )
    .await
    .map_err(DemoError::Verify)?;
    tracing::info!(matches = decoy_matches, "Decoy checked against hash");

    Ok((matches, decoy_matches))
}

/// Hash, then verify against the fresh hash
pub async fn run(config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let hash = hash_stage(config).await?;
    let (matches, decoy_matches) = verify_stage(config, &hash).await?;

    Ok(DemoReport {
        hash,
        matches,
        decoy_matches,
    })
}

/// Same two stages on the calling thread
pub fn run_blocking(config: &DemoConfig) -> Result<DemoReport, DemoError> {
    let cost = resolve_cost(config)?;
    let hash = ClearTextPassword::new(config.plaintext.as_str())
        .hash(cost)
        .map_err(DemoError::Hash)?;
    tracing::info!(hash = %hash, cost = %cost, "Password hashed (blocking)");

    let matches = hash
        .verify(&ClearTextPassword::new(config.plaintext.as_str()))
        .map_err(DemoError::Verify)?;
    let decoy_matches = hash
        .verify(&ClearTextPassword::new(config.decoy.as_str()))
        .map_err(DemoError::Verify)?;
    tracing::info!(matches, decoy_matches, "Verification finished (blocking)");

    Ok(DemoReport {
        hash,
        matches,
        decoy_matches,
    })
}

/// Run the pipeline in the background; errors are logged and swallowed
pub fn spawn(config: DemoConfig) -> JoinHandle<Option<DemoReport>> {
    tokio::spawn(async move {
        match run(&config).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!(error = %e, "Password demo stopped");
                None
            }
        }
    })
}
