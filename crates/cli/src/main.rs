//! smithy-zod-gen CLI
//!
//! Command-line interface for generating zod schemas and TypeScript service
//! contracts from Smithy JSON AST models.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use smithy_zod_gen_common::CodegenConfig;
use smithy_zod_gen_generator::{FsSink, OutputLayout, SchemaGenerator};
use smithy_zod_gen_parser::SmithyParser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "smithy-zod-gen")]
#[command(version, about = "Generate zod schemas and TypeScript service contracts from Smithy models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a Smithy model and summarize its shapes
    #[command(after_help = "EXAMPLES:\n  \
        smithy-zod-gen parse --spec s3.json")]
    Parse {
        /// Path to the Smithy JSON AST file
        #[arg(short, long)]
        spec: PathBuf,

        /// Codegen configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate schema and service files from a Smithy model
    #[command(after_help = "EXAMPLES:\n  \
        # Generate with the default layout\n  \
        smithy-zod-gen generate --spec s3.json\n\n  \
        # Override output directories\n  \
        smithy-zod-gen generate \\\n    \
        --spec s3.json \\\n    \
        --primary-dir ./out/s3 \\\n    \
        --shared-dir ./out/shared\n\n  \
        # Show what would be written\n  \
        smithy-zod-gen generate --spec s3.json --dry-run")]
    Generate {
        /// Path to the Smithy JSON AST file
        #[arg(short, long)]
        spec: PathBuf,

        /// Codegen configuration file (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Namespace that gets the primary file-group
        #[arg(long)]
        primary_namespace: Option<String>,

        /// Output directory of the primary namespace
        #[arg(long)]
        primary_dir: Option<PathBuf>,

        /// Output directory of the other namespaces
        #[arg(long)]
        shared_dir: Option<PathBuf>,

        /// Generate without writing files
        #[arg(long)]
        dry_run: bool,
    },
}

/// Options of the generate command
struct GenerateOptions<'a> {
    spec: &'a Path,
    config: Option<&'a Path>,
    primary_namespace: Option<&'a str>,
    primary_dir: Option<&'a Path>,
    shared_dir: Option<&'a Path>,
    dry_run: bool,
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { spec, config } => {
            parse_command(spec.as_path(), config.as_deref(), cli.verbose)?;
        }
        Commands::Generate {
            spec,
            config,
            primary_namespace,
            primary_dir,
            shared_dir,
            dry_run,
        } => {
            generate_command(GenerateOptions {
                spec: spec.as_path(),
                config: config.as_deref(),
                primary_namespace: primary_namespace.as_deref(),
                primary_dir: primary_dir.as_deref(),
                shared_dir: shared_dir.as_deref(),
                dry_run,
                verbose: cli.verbose,
            })?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` applies unless `--verbose` is given
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn load_config(path: Option<&Path>) -> Result<CodegenConfig> {
    match path {
        Some(path) => CodegenConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CodegenConfig::default()),
    }
}

fn load_model(spec_path: &Path, config: &CodegenConfig) -> Result<SmithyParser> {
    let parser = SmithyParser::from_file(spec_path).context("Failed to load Smithy model")?;
    Ok(parser.without_ignored_prefixes(&config.ignored_shape_prefixes))
}

fn parse_command(spec_path: &Path, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    println!("{} Parsing model: {}", "→".cyan(), spec_path.display());

    let config = load_config(config_path)?;
    let parser = load_model(spec_path, &config)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    println!("\n{}", "Model:".bold());
    println!("  Smithy version: {}", parser.model().smithy.yellow());
    println!("  Shapes: {}", parser.model().shapes.len());

    println!("\n{}", "Shapes by kind:".bold());
    for (kind, count) in parser.shape_counts() {
        println!("  • {:<10} {}", kind.cyan(), count);
    }

    let unsupported = parser.unsupported_shapes();
    if !unsupported.is_empty() {
        println!(
            "\n{} {} shape(s) of unsupported kinds will be skipped",
            "⚠".yellow(),
            unsupported.len()
        );
        if verbose {
            for id in unsupported {
                println!("  • {}", id);
            }
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut CodegenConfig, options: &GenerateOptions<'_>) {
    if let Some(namespace) = options.primary_namespace {
        config.primary_namespace = namespace.to_string();
    }
    if let Some(dir) = options.primary_dir {
        config.output.primary_dir = dir.to_path_buf();
    }
    if let Some(dir) = options.shared_dir {
        config.output.shared_dir = dir.to_path_buf();
    }
}

fn generate_command(options: GenerateOptions<'_>) -> Result<()> {
    println!(
        "{} Generating schemas from: {}",
        "→".cyan(),
        options.spec.display()
    );

    let mut config = load_config(options.config)?;
    apply_overrides(&mut config, &options);

    if options.verbose {
        println!("  Primary namespace: {}", config.primary_namespace);
        println!("  Primary dir: {}", config.output.primary_dir.display());
        println!("  Shared dir: {}", config.output.shared_dir.display());
    }

    println!("{} Loading model...", "→".cyan());
    let model = load_model(options.spec, &config)?.into_model();
    println!("{} Loaded {} shapes", "✓".green(), model.shapes.len());

    println!("{} Generating files...", "→".cyan());
    let layout = OutputLayout::from_config(&config.output);
    let generator = SchemaGenerator::new(model, config).context("Failed to create generator")?;
    let generated = generator.generate().context("Failed to generate schemas")?;

    if options.dry_run {
        println!("\n{}", "✓ Dry run complete!".green().bold());
        println!("\n{}", "Files that would be written:".bold());
        for (file_key, contents) in generated.files() {
            let path = layout
                .path_for(file_key)
                .with_context(|| format!("No output path for {}", file_key))?;
            println!("  📄 {} ({} bytes)", path.display(), contents.len());
        }
        return Ok(());
    }

    let written = generated
        .write(&layout, &mut FsSink)
        .context("Failed to write generated files")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }

    Ok(())
}
