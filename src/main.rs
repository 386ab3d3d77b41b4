use clap::{ArgAction, Parser, Subcommand};
use seaf::cli::{
    collect_files, create_archive, extract_archive, inspect_archive, CreateOptions,
    ExtractOptions,
};
use seaf::header::CompressionMethod;
use seaf::pipeline::{generate_salt, DEFAULT_LEVEL, DEFAULT_SALT_LEN};
use seaf::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Version info from build.rs
const VERSION: &str = env!("SEAF_VERSION");
const PROFILE: &str = env!("SEAF_PROFILE");
const GIT_HASH: &str = env!("SEAF_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "seaf")]
#[command(author, about = "Secure encrypted archiver: compress and encrypt files into one container", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress and encrypt files into a new archive
    #[command(alias = "c")]
    Create {
        /// Password for encryption
        #[arg(long, required = true)]
        password: String,

        /// Salt in hexadecimal
        #[arg(long, required_unless_present = "generate_salt", conflicts_with = "generate_salt")]
        salt: Option<String>,

        /// Generate a random salt and print it
        #[arg(long)]
        generate_salt: bool,

        /// Length of the generated salt in bytes
        #[arg(long, default_value_t = DEFAULT_SALT_LEN)]
        salt_length: usize,

        /// Compression level (0 = store with deflate; zstd treats 0 as 1; 9 = best)
        #[arg(long, default_value_t = DEFAULT_LEVEL, allow_negative_numbers = true)]
        level: i32,

        /// Compression algorithm
        #[arg(long, default_value = "deflate", value_parser = parse_compression)]
        compression: CompressionMethod,

        /// Output archive (overwritten if it exists)
        #[arg(short, long, default_value = "archive.seaf")]
        output: PathBuf,

        /// Print per-file size and entropy statistics
        #[arg(long)]
        stats: bool,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        /// Files to archive
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Decrypt and extract every file of an archive
    #[command(alias = "x")]
    Extract {
        /// Password used at creation
        #[arg(long, required = true)]
        password: String,

        /// Salt used at creation, in hexadecimal
        #[arg(long, required = true)]
        salt: String,

        /// Directory to write files into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Archive to extract
        #[arg(default_value = "archive.seaf")]
        archive: PathBuf,
    },

    /// Show the header and entry listing of an archive
    #[command(alias = "i")]
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Archive to inspect
        file: PathBuf,
    },

    /// Print a fresh random salt
    Salt {
        /// Salt length in bytes
        #[arg(long, default_value_t = DEFAULT_SALT_LEN)]
        length: usize,
    },
}

fn parse_compression(s: &str) -> std::result::Result<CompressionMethod, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Create {
            password,
            salt,
            generate_salt: _,
            salt_length,
            level,
            compression,
            output,
            stats,
            json,
            files,
        } => {
            let salt_hex = match salt {
                Some(salt) => salt,
                None => {
                    let salt = generate_salt(salt_length)?;
                    println!("Generated salt (hex): {}", salt);
                    salt
                }
            };

            let files = collect_files(&files)?;
            let options = CreateOptions {
                password,
                salt_hex,
                level,
                method: compression,
            };
            let report = create_archive(&output, &files, &options)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if stats {
                print!("{}", report.render());
            }
            println!(
                "Archived {} files into {}",
                report.entries.len(),
                output.display()
            );
            Ok(())
        }

        Commands::Extract {
            password,
            salt,
            output_dir,
            archive,
        } => {
            let options = ExtractOptions {
                password,
                salt_hex: salt,
                output_dir,
            };
            let written = extract_archive(&archive, &options)?;
            for path in &written {
                println!("Extracted {}", path.display());
            }
            println!("Extracted {} files from {}", written.len(), archive.display());
            Ok(())
        }

        Commands::Info { json, file } => {
            let listing = inspect_archive(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", listing.render(&file));
            }
            Ok(())
        }

        Commands::Salt { length } => {
            println!("{}", generate_salt(length)?);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Handle --version flag
    if cli.version {
        println!("seaf {}", get_version());
        return ExitCode::SUCCESS;
    }

    // Show help when no command provided
    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            if let Err(e) = Cli::command().print_help() {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
            println!();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(cli.verbose);

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
