use chrono::Datelike;
use clap::{Parser, Subcommand};
use folio::logging::{LogConfig, init_logging};
use folio::{config, generate, metadata, output, tags};
use std::io::IsTerminal;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio page builder: project and artwork carousels with a lightbox")]
#[command(long_about = "\
Portfolio page builder: project and artwork carousels with a lightbox

One metadata document drives the whole page. Coding projects become cards
in one carousel, artwork in another, and a segmented control switches which
tag category the project cards show.

Source structure:

  site/
  ├── config.toml          # Optional, overrides stock defaults
  ├── metadata.json        # {\"coding\": [...], \"art\": [...]}
  └── assets/              # Copied to the output root
      └── art/
          └── dusk.png     # Bare art file names resolve here

Field aliases (first present wins):
  Project name:  project_name → title
  Art title:     title → name
  Art image:     image → file → src

Run 'folio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Source directory holding metadata.json
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render index.html and copy assets to the output directory
    Build {
        /// Viewport width to lay the carousels out for (default: config)
        #[arg(long)]
        width: Option<u32>,
        /// Tag category to select instead of the default
        #[arg(long)]
        category: Option<String>,
    },
    /// Validate the source directory and list its content
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose).with_ansi(std::io::stderr().is_terminal());
    init_logging(&log_config);

    match cli.command {
        Command::Build { width, category } => {
            let config = config::load_config(&cli.source)?;
            let options = generate::BuildOptions {
                width,
                category,
                year: chrono::Local::now().year(),
            };
            println!(
                "==> Building {} → {}",
                cli.source.display(),
                cli.output.display()
            );
            let report = generate::build(&cli.source, &cli.output, &config, &options)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            let path = cli.source.join(generate::METADATA_FILE);
            println!("==> Checking {}", path.display());
            let doc = metadata::load_metadata(&path, &config.paths.art_base)?;
            if doc.is_empty() {
                tracing::warn!("metadata has no coding or art entries");
            }
            let default = tags::default_category(&doc.categories(), &config.categories.default);
            let missing = generate::missing_local_images(&doc, &cli.source);
            for image in &missing {
                tracing::warn!(image = %image, "art image not found");
            }
            output::print_check_output(&doc, default.as_deref(), &missing);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
