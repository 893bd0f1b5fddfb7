//! Up command.
//!
//! Installs and starts the cluster, then waits for Ctrl+C before tearing it
//! down again.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use testcluster::{ClusterLifecycleManager, CommandControl, ConfigLoader};
use tracing::warn;

use super::member_table;

pub async fn run(dir: &str, kill: bool) -> Result<()> {
    let config = ConfigLoader::new()
        .with_project_dir(dir)
        .load()
        .context("Failed to load cluster configuration")?;

    let mut manager = ClusterLifecycleManager::new(config.control());

    let spinner = create_spinner(&format!(
        "Installing {} core(s) and {} read replica(s) of {}...",
        config.core_count, config.read_replica_count, config.version
    ));
    manager
        .install_from(&config)
        .await
        .context("Failed to install cluster")?;
    spinner.finish_with_message(format!("✓ Installed at {}", config.path.display()));

    let spinner = create_spinner("Starting cluster...");
    let members = match manager.start().await {
        Ok(cluster) => cluster.members().clone(),
        Err(e) => {
            spinner.finish_with_message("✗ Start failed");
            // Whatever did come up must not outlive this process.
            if let Err(kill_err) = manager.kill().await {
                warn!(error = %kill_err, "failed to kill cluster after start failure");
            }
            return Err(e).context("Failed to start cluster");
        }
    };
    spinner.finish_with_message(format!("✓ {} member(s) started", members.len()));

    println!();
    println!("{}", member_table(&members));
    println!();
    println!("Cluster running. Press Ctrl+C to stop.");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    println!();
    teardown(&mut manager, kill).await?;
    println!("✓ Cluster {}", if kill { "killed" } else { "stopped" });

    Ok(())
}

async fn teardown(manager: &mut ClusterLifecycleManager<CommandControl>, kill: bool) -> Result<()> {
    if kill {
        return manager.kill().await.context("Failed to kill cluster");
    }

    if let Err(e) = manager.stop().await {
        warn!(error = %e, "graceful stop failed, killing cluster");
        manager.kill().await.context("Failed to kill cluster")?;
    }
    Ok(())
}

fn create_spinner(msg: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Valid template"),
    );
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
