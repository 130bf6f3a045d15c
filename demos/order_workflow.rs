//! End-to-end order workflow example.
//!
//! Creates a file-backed ledger, registers a container and a transformer,
//! records a packing calculation for a new order and shows that the
//! calculation keeps its snapshot after the container is removed.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p packing-demos --example order_workflow
//! ```

use packing_core::{ContainerPayload, OrderCalculationPayload, OrderPayload, TransformerPayload};
use packing_sqlite::{CalculationStore, CrudRepository, Database, EntityStore, StoreConfig};

fn main() {
    // === Step 1: Boot against a scratch file ===
    let path = std::env::temp_dir().join("packing_demo_ledger.db");
    let _ = std::fs::remove_file(&path);
    let config = StoreConfig {
        database: path.clone(),
        ..StoreConfig::default()
    };
    let db = Database::boot(&config).unwrap();
    println!("Ledger at {} (host: {})", path.display(), db.guard().host_name());

    // === Step 2: Catalog ===
    let mut containers = EntityStore::new(db.containers());
    let container_id = containers
        .create(&ContainerPayload::new("40ft HC", 12.03, 2.35, 2.69).with_max_weight(26_500.0))
        .unwrap();
    let transformer_id = db
        .transformers()
        .create(&TransformerPayload::new("T-400", 1.2, 0.9, 1.4).with_weight(1_800.0))
        .unwrap();
    println!("Containers held by store: {}", containers.items().len());

    // === Step 3: Order and calculation ===
    let order_id = db
        .orders()
        .create(&OrderPayload::new("2026-03-01").with_order_number("PO-17"))
        .unwrap();

    let container = db.containers().get_by_id(container_id).unwrap().unwrap();
    let transformer = db.transformers().get_by_id(transformer_id).unwrap().unwrap();

    let mut calculations = CalculationStore::new(db.orders());
    calculations
        .create(
            &OrderCalculationPayload::from_sources(order_id, &container, &transformer)
                .with_stacking(true)
                .with_orientation("length-wise")
                .with_total_fit(36),
        )
        .unwrap();

    // === Step 4: Snapshot outlives its source ===
    containers.remove(container_id).unwrap();
    calculations.fetch(order_id).unwrap();
    for calc in calculations.items() {
        println!(
            "Calculation {}: {:?} {} x {} x {}, fit {:?}",
            calc.id,
            calc.container_name,
            calc.container_length,
            calc.container_width,
            calc.container_height,
            calc.total_fit
        );
    }
    println!("{}", serde_json::to_string_pretty(calculations.items()).unwrap());

    let status = db.status().unwrap();
    println!(
        "\nStatus: {} containers, {} transformers, {} orders, {} calculations",
        status.container_count,
        status.transformer_count,
        status.order_count,
        status.calculation_count
    );

    let _ = std::fs::remove_file(&path);
}
