//! unelements CLI - filter, clean and render extracted document elements

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unelements::batch::{collect_inputs, process_path_with};
use unelements::model::{COMMON_METADATA_FIELDS, UNCATEGORIZED_LABEL};
use unelements::script::DEFAULT_SCRIPT_NAME;
use unelements::{
    decode_embedded, emit, load_file, CategorySelection, MetadataSelection, RenderConfig,
    TerminalAction,
};

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "unelements")]
#[command(version)]
#[command(about = "Filter, clean and render Unstructured element JSON", long_about = None)]
struct Cli {
    /// Input element file (.json)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the batch script for these settings instead of rendering
    #[arg(long)]
    show_script: bool,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an element file as annotated blocks or plain text
    Render {
        /// Input element file (.json)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Emit a standalone Python batch script for these settings
    Script {
        /// Output file or directory (stdout if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Read the embedded settings back and verify them
        #[arg(long)]
        check: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Render a .json file or every .json file in a directory
    Batch {
        /// Input .json file or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Directory for <name>_output.txt files
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Reuse the settings embedded in a previously emitted script
        #[arg(long, value_name = "SCRIPT")]
        from_script: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show element counts per category and the metadata keys present
    Info {
        /// Input element file (.json)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Flags shared by every command that renders or emits.
#[derive(Args, Clone, Debug, Default)]
struct ConfigArgs {
    /// Categories to keep, repeatable or comma separated (default: all)
    #[arg(
        short = 'c',
        long = "category",
        value_name = "LABEL",
        value_delimiter = ',',
        env = "UNELEMENTS_CATEGORIES"
    )]
    categories: Vec<String>,

    /// Keep no categories (overrides --category)
    #[arg(long)]
    no_categories: bool,

    /// Metadata fields to show, repeatable or comma separated
    #[arg(
        short = 'm',
        long = "metadata",
        value_name = "FIELD",
        value_delimiter = ',',
        env = "UNELEMENTS_METADATA"
    )]
    metadata: Vec<String>,

    /// Keep text exactly as loaded
    #[arg(long)]
    no_clean: bool,

    /// Render text only, without category headers or metadata
    #[arg(long)]
    text_only: bool,

    /// JSON settings file; flags given on the command line override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ConfigArgs {
    fn to_render_config(&self) -> CliResult<RenderConfig> {
        let base = match &self.config {
            Some(path) => RenderConfig::from_json(&fs::read_to_string(path)?)?,
            None => RenderConfig::new(),
        };
        self.apply(base)
    }

    fn apply(&self, mut config: RenderConfig) -> CliResult<RenderConfig> {
        if self.no_categories {
            config = config.with_categories(CategorySelection::none());
        } else if !self.categories.is_empty() {
            config = config.with_categories(CategorySelection::parse(&self.categories)?);
        }

        if !self.metadata.is_empty() {
            let fields = self
                .metadata
                .iter()
                .map(|f| f.trim())
                .filter(|f| !f.is_empty())
                .map(str::to_string);
            config = config.with_metadata(MetadataSelection::new(fields));
        }

        if self.no_clean {
            config = config.with_cleaning(false);
        }
        if self.text_only {
            config = config.with_text_only(true);
        }
        log::debug!("Resolved settings: {:?}", config);
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            config,
        }) => cmd_render(&input, output.as_deref(), &config),
        Some(Commands::Script {
            output,
            check,
            config,
        }) => cmd_script(output.as_deref(), check, &config),
        Some(Commands::Batch {
            input,
            output_dir,
            from_script,
            config,
        }) => cmd_batch(&input, &output_dir, from_script.as_deref(), &config),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render (or show the script for) the input
            if let Some(input) = cli.input {
                cmd_default(&input, cli.show_script, &cli.config)
            } else {
                println!("{}", "Usage: unelements <FILE> [OPTIONS]".yellow());
                println!("       unelements --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_default(input: &Path, show_script: bool, args: &ConfigArgs) -> CliResult {
    let config = args.to_render_config()?;
    let action = if show_script {
        TerminalAction::EmitScript
    } else {
        TerminalAction::Render
    };

    let data = fs::read(input)?;
    let output = unelements::run(&data, &config, action)?;
    println!("{}", output);

    Ok(())
}

fn cmd_render(input: &Path, output: Option<&Path>, args: &ConfigArgs) -> CliResult {
    let config = args.to_render_config()?;
    let text = unelements::render_file(input, &config)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_script(output: Option<&Path>, check: bool, args: &ConfigArgs) -> CliResult {
    let config = args.to_render_config()?;
    let script = emit(&config)?;

    if check {
        let embedded = decode_embedded(&script)?.to_render_config()?;
        if embedded != config {
            return Err("embedded settings do not match the requested settings".into());
        }
        eprintln!("{}", "Embedded settings verified".green());
    }

    match output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(DEFAULT_SCRIPT_NAME)
            } else {
                path.to_path_buf()
            };
            fs::write(&path, &script)?;
            println!("{} {}", "Saved to".green(), path.display());
        }
        None => print!("{}", script),
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output_dir: &Path,
    from_script: Option<&Path>,
    args: &ConfigArgs,
) -> CliResult {
    let config = match from_script {
        Some(path) => {
            let embedded = decode_embedded(&fs::read_to_string(path)?)?;
            args.apply(embedded.to_render_config()?)?
        }
        None => args.to_render_config()?,
    };

    let total = collect_inputs(input)?.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = process_path_with(input, output_dir, &config, |file, outcome| {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Err(e) = outcome {
            pb.println(format!("{} {}: {}", "Failed".red(), name, e));
        }
        pb.set_message(name);
        pb.inc(1);
    })?;
    pb.finish_with_message("Done!");

    if !report.written.is_empty() {
        println!("\n{}", "Output files:".green().bold());
        let last = report.written.len() - 1;
        for (i, path) in report.written.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path.display());
        }
    }

    if report.is_success() {
        println!(
            "\n{} {} files processed",
            "Done!".green().bold(),
            report.total()
        );
        Ok(())
    } else {
        Err(format!("{} of {} files failed", report.failed.len(), report.total()).into())
    }
}

fn cmd_info(input: &Path) -> CliResult {
    let elements = load_file(input)?;

    println!("{}", "Element Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Elements".bold(), elements.len());

    let with_text = elements.iter().filter(|e| e.has_text()).count();
    println!("{}: {}", "With text".bold(), with_text);

    println!();
    println!("{}", "Categories".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (category, count) in elements.category_counts() {
        let label = category.map_or(UNCATEGORIZED_LABEL, |c| c.as_str());
        println!("{}: {}", label.bold(), count);
    }

    println!();
    println!("{}", "Metadata Keys".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let keys = elements.metadata_keys();
    if keys.is_empty() {
        println!("{}", "(none)".dimmed());
    }
    for key in &keys {
        if COMMON_METADATA_FIELDS.contains(&key.as_str()) {
            println!("  {}", key.green());
        } else {
            println!("  {}", key);
        }
    }

    let suggested: Vec<&str> = COMMON_METADATA_FIELDS
        .iter()
        .copied()
        .filter(|field| keys.iter().any(|k| k == field))
        .collect();
    if !suggested.is_empty() {
        println!();
        println!("{}: -m {}", "Suggested".bold(), suggested.join(","));
    }

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "unelements".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Element filtering, cleaning and rendering tool");
    println!();
    println!("License: MIT");
}
