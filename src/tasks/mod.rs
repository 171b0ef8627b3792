//! Background scheduled tasks for the application.
//!
//! The only recurring job is the nightly commission maturation scan. Call
//! `spawn_all` once during startup to launch it.

use crate::services::MaturationService;

/// Spawn all background tasks.
///
/// Notes
/// - The maturation run is idempotent per commission (the status flip is
///   guarded), so overlapping or repeated runs cannot double-credit a wallet.
/// - This function detaches tasks via `tokio::spawn`; it does not block.
pub fn spawn_all(maturation_service: MaturationService) {
    // nightly commission maturation
    {
        let svc = maturation_service.clone();
        tokio::spawn(async move {
            loop {
                match svc.run().await {
                    Ok(report) if report.approved_count > 0 => log::info!(
                        "Nightly maturation approved {} commissions",
                        report.approved_count
                    ),
                    Ok(_) => {}
                    Err(e) => log::error!("Nightly maturation run failed: {e:?}"),
                }
                tokio::time::sleep(std::time::Duration::from_secs(24 * 3600)).await;
            }
        });
    }
}
