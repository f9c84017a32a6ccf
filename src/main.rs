use clap::{Parser, Subcommand};
use sitemark::{config, generate, image_sitemap, output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sitemark")]
#[command(about = "Category pages, tag stubs and an image sitemap for static blogs")]
#[command(long_about = "\
Category pages, tag stubs and an image sitemap for static blogs

Reads posts and pages (files with YAML front matter) from the source
directory and writes derived artifacts.

Source structure:

  site/
  ├── config.toml                      # Site config (optional)
  ├── _posts/
  │   └── 2024-03-01-hello-world.md    # Post (date + slug in the name)
  ├── _site_tags/                      # Tag stubs, created as needed
  ├── about.md                         # Page
  └── assets/img/cat.png               # Static file (no front matter)

Artifacts:

  _site/sitemap-images.xml             # Images per post/page
  _site/categories/<name>/index.html   # One listing page per category
  _site_tags/<tag>.md                  # Stub for each new tag

Run 'sitemark gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site source directory
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "_site", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the posts and pages found in the source directory
    Scan {
        /// Print the scanned site as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the image sitemap to stdout without writing anything
    Images {
        /// Print the collected records as JSON instead of XML
        #[arg(long)]
        json: bool,
    },
    /// Scan the source and write all enabled artifacts
    Build,
    /// Validate config and front matter without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Scan { json } => {
            let site = load_site(&cli.source, &cli.output)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&site)?);
            } else {
                output::print_scan_output(&site, &cli.source);
            }
        }
        Command::Images { json } => {
            let site = load_site(&cli.source, &cli.output)?;
            let (sitemap, xml) = image_sitemap::build(&site);
            if json {
                println!("{}", serde_json::to_string_pretty(&sitemap)?);
            } else {
                println!("{}", xml);
            }
        }
        Command::Build => {
            println!("==> Scanning {}", cli.source.display());
            let site = load_site(&cli.source, &cli.output)?;
            println!(
                "==> Generating \u{2192} {} ({} posts, {} pages)",
                cli.output.display(),
                site.posts.len(),
                site.pages.len()
            );
            let report = generate::generate(&site, &cli.source, &cli.output)?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = load_site(&cli.source, &cli.output)?;
            output::print_scan_output(&site, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Scan the source, skipping the output directory if it sits inside it.
fn load_site(source: &Path, output: &Path) -> Result<scan::Site, scan::ScanError> {
    scan::scan_excluding(source, &[output])
}
