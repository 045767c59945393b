//! CRD manifest generator
//!
//! Prints the Reservation CustomResourceDefinition as YAML so it can be
//! applied with `kubectl apply -f -` or committed alongside the manifests.

use crds::Reservation;
use kube::CustomResourceExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the manifest only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let crd = Reservation::crd();
    info!(
        "Generating CRD {}",
        crd.metadata.name.as_deref().unwrap_or("<unnamed>")
    );

    print!("{}", serde_yaml::to_string(&crd)?);
    Ok(())
}
