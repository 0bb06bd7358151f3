use clap::{Parser, Subcommand};
use pb_editor::{DiagramController, EditorConfig, EditorResult};
use pb_project::{
    FileFormat, ProjectResult, Snapshot, dangling_connections, demo_snapshot,
    equipment_csv, equipment_rows, history_csv, history_rows, load_json, load_yaml, save_json,
    save_yaml,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(about = "Plantboard CLI - equipment status board for facility diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a saved diagram
    Validate {
        /// Path to the diagram file (.json, .yaml or .yml)
        path: PathBuf,
    },
    /// Show status counts and abnormal equipment
    Status {
        /// Path to the diagram file
        path: PathBuf,
    },
    /// Recalculate energization and report the result
    Energize {
        /// Path to the diagram file
        path: PathBuf,
        /// Write the recalculated flags back to the file
        #[arg(long)]
        write: bool,
    },
    /// Export the position change log as CSV
    ExportHistory {
        /// Path to the diagram file
        path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the equipment list as CSV
    ExportEquipment {
        /// Path to the diagram file
        path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the demo mechanical room diagram
    Demo {
        /// Output path (.json, .yaml or .yml)
        output: PathBuf,
    },
}

fn main() -> EditorResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => cmd_validate(&path)?,
        Commands::Status { path } => cmd_status(&path)?,
        Commands::Energize { path, write } => cmd_energize(&path, write)?,
        Commands::ExportHistory { path, output } => cmd_export_history(&path, output.as_deref())?,
        Commands::ExportEquipment { path, output } => {
            cmd_export_equipment(&path, output.as_deref())?
        }
        Commands::Demo { output } => cmd_demo(&output)?,
    }
    Ok(())
}

fn load(path: &Path) -> ProjectResult<Snapshot> {
    match FileFormat::from_path(path) {
        FileFormat::Json => load_json(path),
        FileFormat::Yaml => load_yaml(path),
    }
}

fn save(path: &Path, snapshot: &Snapshot) -> ProjectResult<()> {
    match FileFormat::from_path(path) {
        FileFormat::Json => save_json(path, snapshot),
        FileFormat::Yaml => save_yaml(path, snapshot),
    }
}

fn write_or_print(csv: String, rows: usize, output: Option<&Path>) -> ProjectResult<()> {
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", rows, path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> ProjectResult<()> {
    println!("Validating diagram: {}", path.display());
    let snapshot = load(path)?;
    let dangling = dangling_connections(&snapshot);
    for connection in &dangling {
        println!(
            "  warning: connection {} references missing equipment ({} -> {})",
            connection.id, connection.source_equipment_id, connection.target_equipment_id
        );
    }
    println!(
        "✓ Diagram is valid ({} equipment, {} connections, {} layers)",
        snapshot.equipment.len(),
        snapshot.connections.len(),
        snapshot.layers.len()
    );
    Ok(())
}

fn cmd_status(path: &Path) -> EditorResult<()> {
    let mut controller = DiagramController::new(EditorConfig::default())?;
    controller.load_snapshot(load(path)?);
    let counts = controller.status_counts();

    println!("Project: {}", controller.diagram().project_name);
    println!("  normal:   {}", counts.normal);
    println!("  abnormal: {}", counts.abnormal);
    println!("  warning:  {}", counts.warning);
    println!("  unknown:  {}", counts.unknown);

    let abnormal: Vec<_> = controller
        .diagram()
        .equipment
        .iter()
        .filter(|e| e.status() == pb_model::EquipmentStatus::Abnormal)
        .collect();
    if !abnormal.is_empty() {
        println!("Abnormal equipment:");
        for e in abnormal {
            println!(
                "  {} ({}) normal={} current={}",
                e.name, e.equipment_type, e.normal_position, e.current_position
            );
        }
    }
    Ok(())
}

fn cmd_energize(path: &Path, write: bool) -> ProjectResult<()> {
    let mut snapshot = load(path)?;
    let summary = pb_power::recalculate(&mut snapshot.equipment, &mut snapshot.connections);

    println!("Power sources:          {}", summary.sources);
    println!("Energized equipment:    {}", summary.energized_equipment);
    println!("Energized connections:  {}", summary.energized_connections);
    if summary.dangling_connections > 0 {
        println!("Dangling connections:   {}", summary.dangling_connections);
    }
    for e in snapshot.equipment.iter().filter(|e| e.should_flash_no_power()) {
        println!("  no power: {} ({})", e.name, e.equipment_type);
    }

    if write {
        save(path, &snapshot)?;
        tracing::info!(path = %path.display(), "energization written back");
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_export_history(path: &Path, output: Option<&Path>) -> ProjectResult<()> {
    let snapshot = load(path)?;
    let rows = history_rows(&snapshot.history);
    write_or_print(history_csv(&rows), rows.len(), output)
}

fn cmd_export_equipment(path: &Path, output: Option<&Path>) -> ProjectResult<()> {
    let snapshot = load(path)?;
    let rows = equipment_rows(&snapshot.equipment, &snapshot.layers);
    write_or_print(equipment_csv(&rows), rows.len(), output)
}

fn cmd_demo(output: &Path) -> ProjectResult<()> {
    let mut snapshot = demo_snapshot();
    pb_power::recalculate(&mut snapshot.equipment, &mut snapshot.connections);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    save(output, &snapshot)?;
    println!(
        "✓ Wrote demo diagram with {} equipment to {}",
        snapshot.equipment.len(),
        output.display()
    );
    Ok(())
}
