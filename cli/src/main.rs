use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use packing_core::{
    Container, ContainerPayload, Order, OrderCalculation, OrderCalculationPayload, OrderPayload,
    Transformer, TransformerPayload,
};
use packing_sqlite::{CrudRepository, Database, HostMode, StoreConfig};
use serde::Serialize;

/// CLI-side host selection with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliHostMode {
    Auto,
    Desktop,
    Preview,
}

impl From<CliHostMode> for HostMode {
    fn from(mode: CliHostMode) -> Self {
        match mode {
            CliHostMode::Auto => Self::Auto,
            CliHostMode::Desktop => Self::Desktop,
            CliHostMode::Preview => Self::Preview,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "packing")]
#[command(about = "Manage containers, transformers, orders and packing calculations")]
struct Cli {
    /// Database file path (overrides the config file).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Host capability to assume (overrides the config file).
    #[arg(long, global = true)]
    host: Option<CliHostMode>,
    /// Print records as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Log at info level (RUST_LOG takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the schema tables (runs on every start; safe to repeat).
    Init,
    /// Show table presence and row counts.
    Status,
    /// Drop all tables and recreate them empty.
    Reset,
    /// Manage containers.
    #[command(subcommand)]
    Container(ContainerCommand),
    /// Manage transformers.
    #[command(subcommand)]
    Transformer(TransformerCommand),
    /// Manage orders and their packing calculations.
    #[command(subcommand)]
    Order(OrderCommand),
}

#[derive(Debug, Subcommand)]
enum ContainerCommand {
    /// List containers, newest first.
    List,
    /// Show one container.
    Show { id: i64 },
    /// Add a container.
    Add(ContainerArgs),
    /// Replace a container's fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: ContainerArgs,
    },
    /// Remove a container. Calculations keep their snapshot.
    Remove { id: i64 },
}

#[derive(Debug, Args)]
struct ContainerArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    length: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long)]
    max_weight: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<ContainerArgs> for ContainerPayload {
    fn from(args: ContainerArgs) -> Self {
        Self {
            name: args.name,
            length: args.length,
            width: args.width,
            height: args.height,
            max_weight: args.max_weight,
            notes: args.notes,
        }
    }
}

#[derive(Debug, Subcommand)]
enum TransformerCommand {
    /// List transformers, newest first.
    List,
    /// Show one transformer.
    Show { id: i64 },
    /// Add a transformer.
    Add(TransformerArgs),
    /// Replace a transformer's fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: TransformerArgs,
    },
    /// Remove a transformer. Calculations keep their snapshot.
    Remove { id: i64 },
}

#[derive(Debug, Args)]
struct TransformerArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    length: f64,
    #[arg(long)]
    width: f64,
    #[arg(long)]
    height: f64,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    notes: Option<String>,
}

impl From<TransformerArgs> for TransformerPayload {
    fn from(args: TransformerArgs) -> Self {
        Self {
            name: args.name,
            length: args.length,
            width: args.width,
            height: args.height,
            weight: args.weight,
            notes: args.notes,
        }
    }
}

#[derive(Debug, Subcommand)]
enum OrderCommand {
    /// List orders, newest first.
    List,
    /// Show one order.
    Show { id: i64 },
    /// Add an order.
    Add(OrderArgs),
    /// Replace an order's fields.
    Update {
        id: i64,
        #[command(flatten)]
        fields: OrderArgs,
    },
    /// Remove an order and its calculations.
    Remove { id: i64 },
    /// List the calculations recorded for an order, newest first.
    Calculations { order_id: i64 },
    /// Record a packing calculation for an order.
    Calculate(CalculateArgs),
}

#[derive(Debug, Args)]
struct OrderArgs {
    /// Order date. `add` defaults to today, `update` keeps the stored date.
    #[arg(long)]
    date: Option<String>,
    /// External order number.
    #[arg(long)]
    number: Option<String>,
    #[arg(long)]
    notes: Option<String>,
}

impl OrderArgs {
    /// Builds the payload, filling a missing date from `fallback`.
    fn into_payload(self, fallback: impl FnOnce() -> String) -> OrderPayload {
        OrderPayload {
            order_number: self.number,
            order_date: self.date.unwrap_or_else(fallback),
            notes: self.notes,
        }
    }
}

#[derive(Debug, Args)]
struct CalculateArgs {
    order_id: i64,
    /// Snapshot this container's name, dimensions and weight limit.
    #[arg(long, conflicts_with = "container_dims")]
    container: Option<i64>,
    /// Container dimensions as LENGTH,WIDTH,HEIGHT.
    #[arg(long, value_parser = parse_dims, required_unless_present = "container")]
    container_dims: Option<[f64; 3]>,
    /// Snapshot this transformer's name, dimensions and weight.
    #[arg(long, conflicts_with = "transformer_dims")]
    transformer: Option<i64>,
    /// Transformer dimensions as LENGTH,WIDTH,HEIGHT.
    #[arg(long, value_parser = parse_dims, required_unless_present = "transformer")]
    transformer_dims: Option<[f64; 3]>,
    /// Allow stacking transformers.
    #[arg(long)]
    stacking: bool,
    #[arg(long)]
    orientation: Option<String>,
    /// Number of transformers that fit.
    #[arg(long)]
    total_fit: Option<i64>,
    #[arg(long)]
    notes: Option<String>,
}

/// Output settings shared by every command.
#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let output = Output { json: cli.json };
    let result = open_database(cli.config, cli.db, cli.host).and_then(|db| match cli.command {
        Command::Init => run_init(&db),
        Command::Status => run_status(&db, output),
        Command::Reset => run_reset(&db),
        Command::Container(cmd) => run_container(&db, cmd, output),
        Command::Transformer(cmd) => run_transformer(&db, cmd, output),
        Command::Order(cmd) => run_order(&db, cmd, output),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let level = if verbose { "info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install log subscriber: {err}");
    }
}

fn open_database(
    config_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
    host: Option<CliHostMode>,
) -> Result<Database, String> {
    let mut config = match &config_path {
        Some(path) => StoreConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(path) = db_path {
        config.database = path;
    }
    if let Some(host) = host {
        config.host = host.into();
    }

    tracing::debug!(database = %config.database.display(), host = ?config.host, "opening ledger");
    Database::boot(&config).map_err(|e| {
        format!(
            "Failed to open database '{}': {e}",
            config.database.display()
        )
    })
}

// ---------------------------------------------------------------------------
// schema commands
// ---------------------------------------------------------------------------

fn run_init(db: &Database) -> Result<(), String> {
    // Boot already applied the schema when the host allows it.
    db.initialize()
        .map_err(|e| format!("Schema init failed: {e}"))?;
    println!("Schema ready in '{}'.", location_label(db));
    Ok(())
}

fn run_status(db: &Database, output: Output) -> Result<(), String> {
    let status = db
        .status()
        .map_err(|e| format!("Failed to get status: {e}"))?;

    if output.json {
        let value = serde_json::json!({
            "tables_exist": status.tables_exist,
            "containers": status.container_count,
            "transformers": status.transformer_count,
            "orders": status.order_count,
            "calculations": status.calculation_count,
        });
        return print_json(&value);
    }

    println!("Database: {}", location_label(db));
    println!(
        "  Tables exist: {}",
        if status.tables_exist { "yes" } else { "no" }
    );
    println!("  Containers: {}", status.container_count);
    println!("  Transformers: {}", status.transformer_count);
    println!("  Orders: {}", status.order_count);
    println!("  Calculations: {}", status.calculation_count);
    Ok(())
}

fn run_reset(db: &Database) -> Result<(), String> {
    db.reset().map_err(|e| format!("Reset failed: {e}"))?;
    db.initialize()
        .map_err(|e| format!("Schema init failed: {e}"))?;
    println!("All tables dropped and recreated in '{}'.", location_label(db));
    Ok(())
}

// ---------------------------------------------------------------------------
// entity commands
// ---------------------------------------------------------------------------

fn run_container(db: &Database, cmd: ContainerCommand, output: Output) -> Result<(), String> {
    let repo = db.containers();
    match cmd {
        ContainerCommand::List => {
            let items = repo.list().map_err(|e| e.to_string())?;
            print_records(&items, output, format_container)
        }
        ContainerCommand::Show { id } => {
            let item = repo
                .get_by_id(id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("container", id))?;
            print_record(&item, output, format_container)
        }
        ContainerCommand::Add(args) => {
            let id = repo.create(&args.into()).map_err(|e| e.to_string())?;
            println!("Created container {id}.");
            Ok(())
        }
        ContainerCommand::Update { id, fields } => {
            let changed = repo
                .update(id, &fields.into())
                .map_err(|e| e.to_string())?;
            report_change(changed, "Updated", "container", id)
        }
        ContainerCommand::Remove { id } => {
            let removed = repo.remove(id).map_err(|e| e.to_string())?;
            report_change(removed, "Removed", "container", id)
        }
    }
}

fn run_transformer(db: &Database, cmd: TransformerCommand, output: Output) -> Result<(), String> {
    let repo = db.transformers();
    match cmd {
        TransformerCommand::List => {
            let items = repo.list().map_err(|e| e.to_string())?;
            print_records(&items, output, format_transformer)
        }
        TransformerCommand::Show { id } => {
            let item = repo
                .get_by_id(id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("transformer", id))?;
            print_record(&item, output, format_transformer)
        }
        TransformerCommand::Add(args) => {
            let id = repo.create(&args.into()).map_err(|e| e.to_string())?;
            println!("Created transformer {id}.");
            Ok(())
        }
        TransformerCommand::Update { id, fields } => {
            let changed = repo
                .update(id, &fields.into())
                .map_err(|e| e.to_string())?;
            report_change(changed, "Updated", "transformer", id)
        }
        TransformerCommand::Remove { id } => {
            let removed = repo.remove(id).map_err(|e| e.to_string())?;
            report_change(removed, "Removed", "transformer", id)
        }
    }
}

fn run_order(db: &Database, cmd: OrderCommand, output: Output) -> Result<(), String> {
    let repo = db.orders();
    match cmd {
        OrderCommand::List => {
            let items = repo.list().map_err(|e| e.to_string())?;
            print_records(&items, output, format_order)
        }
        OrderCommand::Show { id } => {
            let item = repo
                .get_by_id(id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("order", id))?;
            print_record(&item, output, format_order)
        }
        OrderCommand::Add(args) => {
            let id = repo
                .create(&args.into_payload(today))
                .map_err(|e| e.to_string())?;
            println!("Created order {id}.");
            Ok(())
        }
        OrderCommand::Update { id, fields } => {
            let stored = repo
                .get_by_id(id)
                .map_err(|e| e.to_string())?
                .ok_or_else(|| not_found("order", id))?;
            let changed = repo
                .update(id, &fields.into_payload(|| stored.order_date))
                .map_err(|e| e.to_string())?;
            report_change(changed, "Updated", "order", id)
        }
        OrderCommand::Remove { id } => {
            let removed = repo.remove(id).map_err(|e| e.to_string())?;
            report_change(removed, "Removed", "order", id)
        }
        OrderCommand::Calculations { order_id } => {
            let items = repo
                .list_calculations(order_id)
                .map_err(|e| e.to_string())?;
            print_records(&items, output, format_calculation)
        }
        OrderCommand::Calculate(args) => {
            let payload = build_calculation(db, args)?;
            let id = repo
                .create_calculation(&payload)
                .map_err(|e| e.to_string())?;
            println!("Recorded calculation {id} for order {}.", payload.order_id);
            Ok(())
        }
    }
}

/// Builds a calculation payload, snapshotting referenced records.
fn build_calculation(db: &Database, args: CalculateArgs) -> Result<OrderCalculationPayload, String> {
    let mut payload = OrderCalculationPayload::new(args.order_id, [0.0; 3], [0.0; 3]);

    if let Some(id) = args.container {
        let container = db
            .containers()
            .get_by_id(id)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| not_found("container", id))?;
        payload.container_id = Some(container.id);
        payload.container_name = Some(container.name);
        payload.container_max_weight = container.max_weight;
        [
            payload.container_length,
            payload.container_width,
            payload.container_height,
        ] = [container.length, container.width, container.height];
    } else if let Some([length, width, height]) = args.container_dims {
        payload.container_length = length;
        payload.container_width = width;
        payload.container_height = height;
    }

    if let Some(id) = args.transformer {
        let transformer = db
            .transformers()
            .get_by_id(id)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| not_found("transformer", id))?;
        payload.transformer_id = Some(transformer.id);
        payload.transformer_name = Some(transformer.name);
        payload.transformer_weight = transformer.weight;
        [
            payload.transformer_length,
            payload.transformer_width,
            payload.transformer_height,
        ] = [transformer.length, transformer.width, transformer.height];
    } else if let Some([length, width, height]) = args.transformer_dims {
        payload.transformer_length = length;
        payload.transformer_width = width;
        payload.transformer_height = height;
    }

    payload.stacking_enabled = args.stacking;
    payload.orientation = args.orientation;
    payload.total_fit = args.total_fit;
    payload.notes = args.notes;
    Ok(payload)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parses `LENGTH,WIDTH,HEIGHT`.
fn parse_dims(raw: &str) -> Result<[f64; 3], String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    let [length, width, height] = parts.as_slice() else {
        return Err(format!("expected LENGTH,WIDTH,HEIGHT, got '{raw}'"));
    };
    let parse = |s: &str| {
        s.parse::<f64>()
            .map_err(|err| format!("invalid dimension '{s}': {err}"))
    };
    Ok([parse(length)?, parse(width)?, parse(height)?])
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn not_found(entity: &str, id: i64) -> String {
    format!("no {entity} with id {id}")
}

fn report_change(changed: bool, verb: &str, entity: &str, id: i64) -> Result<(), String> {
    if !changed {
        return Err(not_found(entity, id));
    }
    println!("{verb} {entity} {id}.");
    Ok(())
}

fn location_label(db: &Database) -> String {
    match db.location() {
        packing_sqlite::DbLocation::File(path) => path.display().to_string(),
        packing_sqlite::DbLocation::Memory => ":memory:".to_string(),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|err| format!("Failed to serialize output: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn print_records<T: Serialize>(
    items: &[T],
    output: Output,
    format: fn(&T) -> String,
) -> Result<(), String> {
    if output.json {
        return print_json(items);
    }
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", format(item));
    }
    Ok(())
}

fn print_record<T: Serialize>(item: &T, output: Output, format: fn(&T) -> String) -> Result<(), String> {
    if output.json {
        return print_json(item);
    }
    println!("{}", format(item));
    Ok(())
}

fn optional<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

fn format_container(c: &Container) -> String {
    format!(
        "{:>4}  {:<24} {} x {} x {}  max {}  {}",
        c.id,
        c.name,
        c.length,
        c.width,
        c.height,
        optional(&c.max_weight),
        c.created_at
    )
}

fn format_transformer(t: &Transformer) -> String {
    format!(
        "{:>4}  {:<24} {} x {} x {}  weight {}  {}",
        t.id,
        t.name,
        t.length,
        t.width,
        t.height,
        optional(&t.weight),
        t.created_at
    )
}

fn format_order(o: &Order) -> String {
    format!(
        "{:>4}  {:<12} {:<16} {}",
        o.id,
        o.order_date,
        optional(&o.order_number),
        o.created_at
    )
}

fn format_calculation(c: &OrderCalculation) -> String {
    format!(
        "{:>4}  container {} ({} x {} x {})  transformer {} ({} x {} x {})  stacking {}  fit {}",
        c.id,
        optional(&c.container_name),
        c.container_length,
        c.container_width,
        c.container_height,
        optional(&c.transformer_name),
        c.transformer_length,
        c.transformer_width,
        c.transformer_height,
        if c.stacking_enabled { "yes" } else { "no" },
        optional(&c.total_fit)
    )
}
