//! Preview host example.
//!
//! Shows what callers see when the host has no embedded store: boot
//! succeeds, nothing is opened, and every operation fails with an
//! `Unavailable` error.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p packing-demos --example preview_host
//! ```

use packing_core::OrderPayload;
use packing_sqlite::{CrudRepository, Database, ErrorKind, Guard, HostMode, StoreConfig};

fn main() {
    let config = StoreConfig {
        host: HostMode::Preview,
        ..StoreConfig::default()
    };
    let db = Database::boot(&config).unwrap();
    println!("Host: {}", db.guard().host_name());
    println!("Available: {}", db.guard().is_available());

    let err = db.orders().list().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    println!("list() -> {err}");

    let err = db.orders().create(&OrderPayload::new("2026-03-01")).unwrap_err();
    println!("create() -> {err}");
    println!("Connection opened: {}", db.is_open());

    // The same check is available without a database.
    println!("Desktop guard ok: {}", Guard::desktop().ensure_available().is_ok());
}
