use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use imagepicker::cli::{
    run_album_add, run_album_list, run_album_remove, run_pick, run_picked, run_status,
    PickAction, PickedOptions,
};
use imagepicker::logging::{init_logging, LOG_ENV};
use imagepicker::tui::run_tui;
use imagepicker::PickerConfig;

#[derive(Parser)]
#[command(name = "imagepicker")]
#[command(version, about = "Browse an image tree and sort pictures into albums")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory to browse, or with --legacy a saved picked list
    /// (launches the interactive session if no subcommand)
    input: Option<PathBuf>,

    /// Album registry file (defaults to .imagepicker.json in the input directory)
    #[arg(long)]
    albums: Option<PathBuf>,

    /// Pick into a single flat list instead of albums
    #[arg(long)]
    legacy: bool,

    /// Where --legacy saves the picked list
    #[arg(long, requires = "legacy")]
    picked: Option<PathBuf>,
}

/// Library selection shared by the scripting commands
#[derive(Args)]
struct LibraryArgs {
    /// Path to the image directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Album registry file (defaults to .imagepicker.json in the input directory)
    #[arg(long)]
    albums: Option<PathBuf>,
}

impl LibraryArgs {
    fn config(&self) -> PickerConfig {
        PickerConfig::with_default_registry(self.input.clone(), self.albums.clone())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage albums
    Album {
        #[command(subcommand)]
        command: AlbumCommands,
    },
    /// Put files into an album
    Pick {
        /// Album name
        album: String,
        /// Files to pick (relative to the input directory)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Take files out of an album
    Unpick {
        /// Album name
        album: String,
        /// Files to unpick (relative to the input directory)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Flip album membership of files
    Toggle {
        /// Album name
        album: String,
        /// Files to toggle (relative to the input directory)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Show image and album counts
    Status {
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Edit or show a flat picked list
    Picked {
        /// Picked-list file
        list: PathBuf,
        /// Entries to add
        #[arg(short, long)]
        add: Vec<PathBuf>,
        /// Entries to remove
        #[arg(short, long)]
        remove: Vec<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AlbumCommands {
    /// Register an album, creating its directory
    Add {
        /// Album name
        name: String,
        /// Album directory (relative to the input directory, or absolute)
        dir: PathBuf,
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// Forget an album (its directory is kept)
    Remove {
        /// Album name
        name: String,
        #[command(flatten)]
        library: LibraryArgs,
    },
    /// List albums with their sizes
    List {
        #[command(flatten)]
        library: LibraryArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logging - guard must be held for logs to flush
    let _guard = init_logging().ok();
    let verbose = std::env::var(LOG_ENV).is_ok();
    let start = Instant::now();

    let cli = Cli::parse();

    let result = run_command(cli);

    if verbose {
        let elapsed = start.elapsed();
        eprintln!("Completed in {:.2?}", elapsed);
    }

    result
}

fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Album { command }) => run_album_command(command)?,
        Some(Commands::Pick {
            album,
            files,
            library,
        }) => report_membership(&library, &album, &files, PickAction::Pick)?,
        Some(Commands::Unpick {
            album,
            files,
            library,
        }) => report_membership(&library, &album, &files, PickAction::Unpick)?,
        Some(Commands::Toggle {
            album,
            files,
            library,
        }) => report_membership(&library, &album, &files, PickAction::Toggle)?,
        Some(Commands::Status { library }) => {
            let report = run_status(&library.config())?;
            println!("Library: {}", report.input_root.display());
            if let Some(registry) = &report.registry_file {
                println!("  Registry: {}", registry.display());
            }
            println!("  Images: {}", report.images);
            if report.albums.is_empty() {
                println!("  Albums: none");
            } else {
                println!("  Albums: {}", report.albums.len());
                for album in &report.albums {
                    println!("    {}: {} picked", album.name, album.markers);
                    if album.entries != album.markers {
                        println!(
                            "      ({} other entries in {})",
                            album.entries - album.markers,
                            album.dir.display()
                        );
                    }
                }
            }
        }
        Some(Commands::Picked { list, add, remove }) => {
            let picked = run_picked(&list, PickedOptions { add, remove })?;
            for path in &picked {
                println!("{}", path.display());
            }
            println!("{} picked", picked.len());
        }
        None => {
            // Launch the interactive session
            let input = cli.input.unwrap_or_else(|| PathBuf::from("."));
            let config = if cli.legacy {
                PickerConfig::with_default_picked(input, cli.picked)?
            } else {
                PickerConfig::with_default_registry(input, cli.albums)
            };
            run_tui(&config)?;
        }
    }

    Ok(())
}

fn run_album_command(command: AlbumCommands) -> Result<()> {
    match command {
        AlbumCommands::Add { name, dir, library } => {
            let resolved = run_album_add(&library.config(), &name, &dir)?;
            println!("Added album {} at {}", name, resolved.display());
        }
        AlbumCommands::Remove { name, library } => {
            run_album_remove(&library.config(), &name)?;
            println!("Removed album {} (directory kept)", name);
        }
        AlbumCommands::List { library } => {
            let albums = run_album_list(&library.config())?;
            for album in &albums {
                println!("{}: {} ({} picked)", album.name, album.dir.display(), album.markers);
            }
            println!("{} albums", albums.len());
        }
    }
    Ok(())
}

fn report_membership(
    library: &LibraryArgs,
    album: &str,
    files: &[PathBuf],
    action: PickAction,
) -> Result<()> {
    let files: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
    let results = run_pick(&library.config(), album, &files, action)?;
    for (file, picked) in files.iter().zip(results) {
        let state = if picked { "picked" } else { "not picked" };
        println!("{}: {} in {}", file.display(), state, album);
    }
    Ok(())
}
