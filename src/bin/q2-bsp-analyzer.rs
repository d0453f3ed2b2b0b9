//! Quake 2 BSP analyzer CLI
//!
//! A command-line interface for inspecting Quake 2 `.bsp` map files.
//!
//! ## Commands
//!
//! - `info` - Display header, lump directory and a short summary
//! - `parse` - Print the full analysis record
//! - `validate` - Check a map (exit codes for scripting)
//! - `pairs` - Dump the raw entity key/value pairs
//! - `batch` - Analyze every map in a directory

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use q2_bsp_analyzer::entities::{entities_text, tokenize_entities};
use q2_bsp_analyzer::{analyze, AnalysisResult, BspHeader, LumpDirectory, LumpType};

/// Quake 2 BSP resource analyzer
#[derive(Parser)]
#[command(name = "q2-bsp-analyzer")]
#[command(about = "Quake 2 BSP resource and entity analyzer", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display map information
    Info {
        /// Path to the map file
        file: PathBuf,
    },
    /// Analyze a map file
    Parse {
        /// Path to the map file
        file: PathBuf,
        /// Output format: json, pretty
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
    /// Validate a map file
    Validate {
        /// Path to the map file
        file: PathBuf,
        /// Print every error and warning
        #[arg(long)]
        details: bool,
    },
    /// Dump entity key/value pairs
    Pairs {
        /// Path to the map file
        file: PathBuf,
    },
    /// Analyze multiple map files
    Batch {
        /// Directory containing map files
        directory: PathBuf,
        /// Output directory for JSON files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format for per-file results printed to stdout
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
        /// File extension to look for
        #[arg(long, default_value = "bsp")]
        extension: String,
        /// Generate summary report
        #[arg(long)]
        summary: bool,
        /// Continue on errors
        #[arg(long)]
        continue_on_error: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

// ============================================================================
// Serializable Output Structures
// ============================================================================

#[derive(Serialize)]
struct FileOutput<'a> {
    file: String,
    size: usize,
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
}

#[derive(Serialize, Default)]
struct BatchSummary {
    total_files: usize,
    successful: usize,
    failed: usize,
    with_errors: usize,
    with_warnings: usize,
    unique_textures: usize,
    unique_sounds: usize,
    unique_models: usize,
    total_spawn_points: u64,
    weapons: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    most_textures: Option<String>,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { file } => cmd_info(&file),
        Commands::Parse { file, output } => cmd_parse(&file, &output),
        Commands::Validate { file, details } => cmd_validate(&file, details),
        Commands::Pairs { file } => cmd_pairs(&file),
        Commands::Batch {
            directory,
            output,
            format,
            extension,
            summary,
            continue_on_error,
        } => cmd_batch(
            &directory,
            output.as_deref(),
            &format,
            &extension,
            summary,
            continue_on_error,
        ),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_map(file: &Path) -> q2_bsp_analyzer::Result<Vec<u8>> {
    debug!(path = %file.display(), "reading map");
    Ok(std::fs::read(file)?)
}

fn analyze_file(file: &Path) -> Result<(Vec<u8>, AnalysisResult), String> {
    let data = read_map(file).map_err(|e| format!("Error reading {}: {}", file.display(), e))?;
    let result = analyze(&data).map_err(|e| format!("Analysis failed: {}", e))?;
    Ok((data, result))
}

// ============================================================================
// Info Command Implementation
// ============================================================================

fn cmd_info(file: &Path) -> ExitCode {
    let (data, result) = match analyze_file(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // analyze() succeeded, so the header is readable
    let Ok(header) = BspHeader::parse(&data) else {
        return ExitCode::FAILURE;
    };
    let directory = LumpDirectory::parse(&data);

    print_info(&header, &directory, &result, &data);
    ExitCode::SUCCESS
}

#[allow(clippy::cast_precision_loss)]
fn print_info(header: &BspHeader, directory: &LumpDirectory, result: &AnalysisResult, data: &[u8]) {
    let file_size = data.len();
    println!("=== Map Information ===\n");

    println!("File:");
    println!(
        "  Size: {} bytes ({:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );
    println!("  Signature: {}", header.signature_string());
    println!("  Version: {}", header.version);
    println!(
        "  Name: {}",
        result.map_name.as_deref().unwrap_or("(not set)")
    );
    if let Some(version) = &result.map_version {
        println!("  Map Version: {}", version);
    }

    println!();

    println!("Lumps ({} of {}):", directory.len(), LumpType::ALL.len());
    for (lump_type, lump) in directory.iter() {
        let status = if lump.slice(data, lump_type).is_ok() {
            ""
        } else {
            "  [unusable]"
        };
        println!(
            "  {:<12} offset {:>9}  length {:>9}{}",
            lump_type.name(),
            lump.offset,
            lump.length,
            status
        );
    }

    println!();

    println!("Resources:");
    println!("  Textures: {}", result.textures.len());
    println!("  Skies: {}", result.skies.len());
    println!("  Sounds: {}", result.sounds.len());
    println!("  Models: {}", result.models.len());
    println!("  Other: {}", result.others.len());

    println!();

    let stats = &result.entity_stats;
    println!("Entities:");
    println!("  Weapons: {}", stats.total_weapons());
    println!("  Armor: {}", stats.total_armors());
    println!("  Items: {}", stats.total_items());
    println!("  Spawn Points: {}", stats.spawn_points.total());

    print_diagnostics(result);
}

fn print_diagnostics(result: &AnalysisResult) {
    if !result.errors.is_empty() {
        println!("\nErrors:");
        for error in &result.errors {
            println!("  - {}", error);
        }
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }
}

// ============================================================================
// Parse Command Implementation
// ============================================================================

fn cmd_parse(file: &Path, output: &OutputFormat) -> ExitCode {
    let (data, result) = match analyze_file(file) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Json => print_json(&FileOutput {
            file: file.display().to_string(),
            size: data.len(),
            analysis: &result,
        }),
        OutputFormat::Pretty => print_pretty(&result),
    }

    ExitCode::SUCCESS
}

fn print_json<T: Serialize>(output: &T) {
    match serde_json::to_string_pretty(output) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}

fn print_pretty(result: &AnalysisResult) {
    println!("=== Map ===");
    println!(
        "Name: {}",
        result.map_name.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Version: {}",
        result.map_version.as_deref().unwrap_or("(not set)")
    );
    println!();

    print_section("Textures", &result.textures);
    print_section("Skies", &result.skies);
    print_section("Sounds", &result.sounds);
    print_section("Models", &result.models);
    print_section("Other", &result.others);

    let stats = &result.entity_stats;
    println!("=== Entity Statistics ===");
    print_counts("Weapons", &stats.weapons);
    print_counts("Armor", &stats.armors);
    print_counts("Items", &stats.items);
    println!("Spawn Points:");
    println!("  deathmatch: {}", stats.spawn_points.deathmatch);
    println!("  start: {}", stats.spawn_points.start);
    println!("  coop: {}", stats.spawn_points.coop);
    println!("  intermission: {}", stats.spawn_points.intermission);

    print_diagnostics(result);
}

fn print_section<'a>(title: &str, entries: impl IntoIterator<Item = &'a String>) {
    let entries: Vec<&String> = entries.into_iter().collect();
    println!("=== {} ({}) ===", title, entries.len());
    for entry in entries {
        println!("  {}", entry);
    }
    println!();
}

fn print_counts(title: &str, counts: &BTreeMap<String, u32>) {
    println!("{}:", title);
    if counts.is_empty() {
        println!("  (none)");
    }
    for (classname, count) in counts {
        println!("  {}: {}", classname, count);
    }
}

// ============================================================================
// Validate Command Implementation
// ============================================================================

fn cmd_validate(file: &Path, details: bool) -> ExitCode {
    let result = match analyze_file(file) {
        Ok((_, r)) => r,
        Err(e) => {
            println!("{}: INVALID", file.display());
            if details {
                println!("  - {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let status = if result.is_clean() { "VALID" } else { "INVALID" };
    println!("{}: {}", file.display(), status);
    if details {
        print_diagnostics(&result);
    }

    if result.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ============================================================================
// Pairs Command Implementation
// ============================================================================

fn cmd_pairs(file: &Path) -> ExitCode {
    let data = match read_map(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error reading {}: {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = BspHeader::parse(&data) {
        eprintln!("Error parsing header: {}", e);
        return ExitCode::FAILURE;
    }

    let directory = LumpDirectory::parse(&data);
    let lump = match directory.lump_data(&data, LumpType::Entities) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let pairs = tokenize_entities(&entities_text(lump));
    for pair in &pairs {
        println!("{:?} {:?}", pair.key, pair.value);
    }
    eprintln!("{} pairs", pairs.len());

    ExitCode::SUCCESS
}

// ============================================================================
// Batch Command Implementation
// ============================================================================

fn cmd_batch(
    directory: &Path,
    output_dir: Option<&Path>,
    format: &OutputFormat,
    extension: &str,
    summary: bool,
    continue_on_error: bool,
) -> ExitCode {
    let maps = find_maps(directory, extension);

    if maps.is_empty() {
        eprintln!("No .{} files found in {}", extension, directory.display());
        return ExitCode::FAILURE;
    }

    info!(count = maps.len(), "found map files");
    eprintln!("Found {} map files", maps.len());

    if let Some(dir) = output_dir {
        if !dir.exists() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                eprintln!("Failed to create output directory: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut error_count = 0;
    let mut results: Vec<(PathBuf, AnalysisResult)> = Vec::new();

    for map in &maps {
        eprint!(
            "Processing {}... ",
            map.file_name().unwrap_or_default().to_string_lossy()
        );

        match process_map(map, output_dir, format) {
            Ok(result) => {
                eprintln!("OK");
                results.push((map.clone(), result));
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                error_count += 1;
                if !continue_on_error {
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    eprintln!(
        "\nProcessed: {} success, {} errors",
        results.len(),
        error_count
    );

    if summary {
        generate_summary(&results, error_count, output_dir);
    }

    if error_count > 0 && !continue_on_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn find_maps(directory: &Path, extension: &str) -> Vec<PathBuf> {
    let mut maps = Vec::new();

    if let Ok(entries) = std::fs::read_dir(directory) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
            {
                maps.push(path);
            }
        }
    }

    maps.sort();
    maps
}

fn process_map(
    map: &Path,
    output_dir: Option<&Path>,
    format: &OutputFormat,
) -> Result<AnalysisResult, String> {
    let (data, result) = analyze_file(map)?;
    let output = FileOutput {
        file: map.display().to_string(),
        size: data.len(),
        analysis: &result,
    };

    if let Some(dir) = output_dir {
        let output_file = dir
            .join(map.file_stem().unwrap_or_default())
            .with_extension("json");
        let content = serde_json::to_string_pretty(&output).map_err(|e| e.to_string())?;
        std::fs::write(&output_file, content).map_err(|e| e.to_string())?;
        debug!(path = %output_file.display(), "wrote analysis");
    } else if matches!(format, OutputFormat::Json) {
        let content = serde_json::to_string(&output).map_err(|e| e.to_string())?;
        println!("{}", content);
    } else {
        println!("{}: {} resources", map.display(), result.resource_count());
    }

    Ok(result)
}

fn generate_summary(
    results: &[(PathBuf, AnalysisResult)],
    failed: usize,
    output_dir: Option<&Path>,
) {
    let mut summary = BatchSummary {
        total_files: results.len() + failed,
        successful: results.len(),
        failed,
        ..BatchSummary::default()
    };

    let mut textures = std::collections::BTreeSet::new();
    let mut sounds = std::collections::BTreeSet::new();
    let mut models = std::collections::BTreeSet::new();
    let mut most_textures: Option<(&Path, usize)> = None;

    for (path, result) in results {
        if !result.is_clean() {
            summary.with_errors += 1;
        }
        if !result.warnings.is_empty() {
            summary.with_warnings += 1;
        }

        textures.extend(result.textures.iter());
        sounds.extend(result.sounds.iter());
        models.extend(result.models.iter());

        let stats = &result.entity_stats;
        summary.total_spawn_points += u64::from(stats.spawn_points.total());
        for (weapon, count) in &stats.weapons {
            *summary.weapons.entry(weapon.clone()).or_insert(0) += u64::from(*count);
        }

        if most_textures.is_none_or(|(_, n)| result.textures.len() > n) {
            most_textures = Some((path.as_path(), result.textures.len()));
        }
    }

    summary.unique_textures = textures.len();
    summary.unique_sounds = sounds.len();
    summary.unique_models = models.len();
    summary.most_textures =
        most_textures.map(|(path, n)| format!("{} ({} textures)", path.display(), n));

    println!("\n=== Batch Summary ===");
    println!("Files processed: {}", summary.total_files);
    println!("Successful: {}", summary.successful);
    println!("Failed: {}", summary.failed);
    println!("With errors: {}", summary.with_errors);
    println!("With warnings: {}", summary.with_warnings);
    println!("Unique textures: {}", summary.unique_textures);
    println!("Unique sounds: {}", summary.unique_sounds);
    println!("Unique models: {}", summary.unique_models);
    println!("Spawn points: {}", summary.total_spawn_points);
    if let Some(most) = &summary.most_textures {
        println!("Most textures: {}", most);
    }

    if !summary.weapons.is_empty() {
        println!("\nWeapons:");
        let mut weapons: Vec<_> = summary.weapons.iter().collect();
        weapons.sort_by(|a, b| b.1.cmp(a.1));
        for (weapon, count) in weapons {
            println!("  {}: {}", weapon, count);
        }
    }

    if let Some(dir) = output_dir {
        let summary_file = dir.join("summary.json");
        if let Ok(json) = serde_json::to_string_pretty(&summary) {
            if std::fs::write(&summary_file, json).is_ok() {
                println!("\nSummary written to: {}", summary_file.display());
            }
        }
    }
}
