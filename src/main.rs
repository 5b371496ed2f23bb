use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thumb_gal::config::{self, GalleryConfig};
use thumb_gal::extensions::ExtensionSet;
use thumb_gal::process::{self, ProcessConfig, ProcessError};
use thumb_gal::types::Manifest;
use thumb_gal::{generate, output, scan, storage};

/// Shared flag for commands that pick files by extension.
#[derive(clap::Args, Clone)]
struct FilterArgs {
    /// Extension to include (repeatable; replaces the configured list)
    #[arg(long = "ext", value_name = "EXT")]
    extensions: Vec<String>,
}

#[derive(clap::Args, Clone)]
struct BuildArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Output subfolder name and gallery title
    #[arg(long)]
    label: Option<String>,

    /// Size of resized copies, in percent of the original
    #[arg(long)]
    percent: Option<u32>,

    /// Longest edge of thumbnails, in pixels
    #[arg(long)]
    thumbnail_edge: Option<u32>,

    /// File name of the gallery page
    #[arg(long)]
    html_filename: Option<String>,
}

#[derive(Parser)]
#[command(name = "thumb-gal")]
#[command(about = "Batch-resize photos, make thumbnails, and write an HTML gallery")]
#[command(long_about = "\
Batch-resize photos, make thumbnails, and write an HTML gallery

Every file below the source folder whose extension matches is decoded,
scaled, and written twice into <output>/<label>/: once resized by a
percentage and once as a small thumbnail. A gallery page links each
thumbnail to its resized copy.

  photos/                       dist/gallery/
  ├── a.jpg            →        ├── a_resized.jpg
  ├── notes.txt                 ├── a_thumbnail.jpg
  └── trips/                    ├── c_resized.JPG
      └── c.JPG                 ├── c_thumbnail.JPG
                                ├── manifest.json
                                └── index.html

Outputs that already exist are kept, so re-running only fills the gaps.
Files that are not images are reported and skipped.

Run 'thumb-gal gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Folder to search for images
    #[arg(long, default_value = "photos", global = true)]
    source: PathBuf,

    /// Folder the gallery subfolder is created in
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Config file (defaults apply when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the files a build would pick up
    Scan(FilterArgs),
    /// Run the full pipeline: scan → process → generate
    Build(BuildArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan(filter) => {
            let mut gallery_config = config::load_config(cli.config.as_deref())?;
            apply_filter(&mut gallery_config, &filter);
            let extensions = ExtensionSet::normalize(&gallery_config.extensions);
            let result = scan::scan(&cli.source, &extensions)?;
            output::print_scan_output(&result, &cli.source, &extensions);
        }
        Command::Build(args) => {
            let mut gallery_config = config::load_config(cli.config.as_deref())?;
            apply_build_args(&mut gallery_config, &args);
            gallery_config.validate()?;
            let extensions = ExtensionSet::normalize(&gallery_config.extensions);

            println!("==> Stage 1: Scanning {}", cli.source.display());
            let mut scanned = scan::scan(&cli.source, &extensions)?;
            let destination = storage::storage_location(&cli.output, &gallery_config.label)?;
            let ignored = scanned.exclude_dir(&destination);
            output::print_scan_output(&scanned, &cli.source, &extensions);
            if ignored > 0 {
                println!(
                    "    ({} files inside {} ignored)",
                    ignored,
                    destination.display()
                );
            }

            println!("==> Stage 2: Processing images → {}", destination.display());
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let outcome = process::process(
                &scanned.files,
                &destination,
                &ProcessConfig::from_gallery_config(&gallery_config),
                Some(tx),
            );
            printer
                .join()
                .map_err(|_| "progress printer thread panicked")?;

            let result = match outcome {
                Ok(result) => result,
                Err(ProcessError::Aborted { source, partial }) => {
                    write_manifest(&partial, &destination)?;
                    eprintln!(
                        "Partial manifest ({} images) written to {}",
                        partial.len(),
                        destination.display()
                    );
                    return Err(ProcessError::Aborted { source, partial }.into());
                }
                Err(err) => return Err(err.into()),
            };
            write_manifest(&result.manifest, &destination)?;
            output::print_summary(&result.summary);

            println!("==> Stage 3: Generating HTML");
            let document = generate::build(&result.manifest, &gallery_config.label, &destination);
            let html_path =
                generate::write(&document, &destination, &gallery_config.html_filename)?;
            println!(
                "{}",
                output::format_generate_output(&html_path, result.manifest.len())
            );

            println!("==> Build complete: {}", destination.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn apply_filter(gallery_config: &mut GalleryConfig, filter: &FilterArgs) {
    if !filter.extensions.is_empty() {
        gallery_config.extensions = filter.extensions.clone();
    }
}

/// Command-line flags take precedence over the config file.
fn apply_build_args(gallery_config: &mut GalleryConfig, args: &BuildArgs) {
    apply_filter(gallery_config, &args.filter);
    if let Some(label) = &args.label {
        gallery_config.label = label.clone();
    }
    if let Some(percent) = args.percent {
        gallery_config.resize_percent = percent;
    }
    if let Some(edge) = args.thumbnail_edge {
        gallery_config.thumbnail_edge = edge;
    }
    if let Some(filename) = &args.html_filename {
        gallery_config.html_filename = filename.clone();
    }
}

fn write_manifest(manifest: &Manifest, destination: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(destination.join("manifest.json"), json)?;
    Ok(())
}
