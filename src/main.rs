use clap::{ArgAction, Parser, Subcommand};
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use stegseal::cli::{
    default_output_path, hide_message, reveal_message, reveal_to_file, show_info, show_info_json,
    HideOptions, RevealOptions,
};
use stegseal::header::{ColorMode, OutputFormat};
use stegseal::StegError;

/// Version info from build.rs
const VERSION: &str = env!("STEGSEAL_VERSION");
const BUILD: &str = env!("STEGSEAL_BUILD");
const PROFILE: &str = env!("STEGSEAL_PROFILE");
const GIT_HASH: &str = env!("STEGSEAL_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} build {} ({})", PROFILE, VERSION, BUILD, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "stegseal")]
#[command(author, about = "Hide encrypted messages in image pixels", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a message and hide it in an image
    #[command(alias = "h")]
    Hide {
        /// Passphrase used to derive the encryption key
        #[arg(long, required = true)]
        password: String,

        /// Message text to hide
        #[arg(long, short, conflicts_with = "message_file", required_unless_present = "message_file")]
        message: Option<String>,

        /// Read the message from a UTF-8 text file
        #[arg(long)]
        message_file: Option<PathBuf>,

        /// Carrier image
        input: PathBuf,

        /// Output image (defaults to <input>.stego.png)
        output: Option<PathBuf>,

        /// Output format (png or bmp)
        #[arg(long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// Channel layout (rgb or rgba); detected from the input when omitted
        #[arg(long, value_parser = parse_color)]
        color: Option<ColorMode>,
    },

    /// Extract and decrypt a hidden message
    #[command(alias = "r")]
    Reveal {
        /// Passphrase the message was hidden with
        #[arg(long, required = true)]
        password: String,

        /// Image holding the message
        input: PathBuf,

        /// Write the message to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Channel layout (rgb or rgba); detected from the image when omitted
        #[arg(long, value_parser = parse_color)]
        color: Option<ColorMode>,
    },

    /// Show carrier capacity of an image
    #[command(alias = "i")]
    Info {
        /// Image to inspect
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Channel layout (rgb or rgba); detected from the image when omitted
        #[arg(long, value_parser = parse_color)]
        color: Option<ColorMode>,
    },
}

fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_color(s: &str) -> Result<ColorMode, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if cli.version {
        println!("stegseal {}", get_version());
        return ExitCode::SUCCESS;
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            use clap::CommandFactory;
            Cli::command().print_help().unwrap();
            println!();
            return ExitCode::SUCCESS;
        }
    };

    let result = match command {
        Commands::Hide {
            password,
            message,
            message_file,
            input,
            output,
            format,
            color,
        } => {
            let text = match (message, message_file) {
                (Some(text), _) => Ok(text),
                (None, Some(path)) => std::fs::read_to_string(&path).map_err(StegError::from),
                (None, None) => Err(StegError::MalformedInput("no message given".into())),
            };

            text.and_then(|text| {
                let output = output
                    .unwrap_or_else(|| default_output_path(&input, format.unwrap_or_default()));
                let options = HideOptions {
                    password,
                    format,
                    color,
                };
                hide_message(&input, &output, &text, &options).map(|_| {
                    println!("Hidden {} bytes in {}", text.len(), output.display());
                })
            })
        }

        Commands::Reveal {
            password,
            input,
            output,
            color,
        } => {
            let options = RevealOptions { password, color };
            match output {
                Some(path) => reveal_to_file(&input, &path, &options).map(|written| {
                    println!("Revealed {} bytes to {}", written, path.display());
                }),
                None => reveal_message(&input, &options).map(|message| {
                    println!("{}", message);
                }),
            }
        }

        Commands::Info { file, json, color } => {
            let report = if json {
                show_info_json(&file, color).map(|s| format!("{}\n", s))
            } else {
                show_info(&file, color)
            };
            report.map(|info| print!("{}", info))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
