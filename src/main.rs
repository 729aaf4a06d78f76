use clap::{Args, Parser, Subcommand};
use coltrans::alphabet::AlphabetPreset;
use coltrans::cli::{decrypt_file, encrypt_file, show_info, write_profile, CipherOptions};
use coltrans::profile::CipherAlgorithm;
use coltrans::transpose::PadPolicy;
use std::path::PathBuf;
use std::process::ExitCode;

/// Version info from build.rs
const VERSION: &str = env!("COLTRANS_VERSION");
const PROFILE: &str = env!("COLTRANS_PROFILE");
const GIT_HASH: &str = env!("COLTRANS_GIT_HASH");

fn get_version() -> &'static str {
    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} {} ({})", PROFILE, VERSION, GIT_HASH))
}

#[derive(Parser)]
#[command(name = "coltrans")]
#[command(about = "Columnar transposition and classical substitution ciphers", long_about = None)]
struct Cli {
    /// Print version
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct CipherArgs {
    /// JSON cipher profile; other flags override its fields
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Cipher algorithm (columnar, caesar, scramble)
    #[arg(long, value_parser = parse_cipher)]
    cipher: Option<CipherAlgorithm>,

    /// Transposition key, Caesar shift, or scramble passphrase
    #[arg(long)]
    key: Option<String>,

    /// Comma separated alphabet presets (lower, upper, numbers, symbols, punctuation, whitespace)
    #[arg(long, value_parser = parse_alphabet)]
    alphabet: Option<PresetList>,

    /// Read columns in descending key order
    #[arg(long)]
    descending: bool,

    /// Lowercase the key and strip whitespace before deriving columns
    #[arg(long)]
    strict: bool,

    /// Empty cell policy (none, random)
    #[arg(long, value_parser = parse_pad)]
    pad: Option<PadPolicy>,

    /// Seed for random padding
    #[arg(long)]
    seed: Option<u64>,
}

/// Comma separated preset list, parsed as a single argument
#[derive(Clone)]
struct PresetList(Vec<AlphabetPreset>);

impl From<CipherArgs> for CipherOptions {
    fn from(args: CipherArgs) -> Self {
        Self {
            profile: args.profile,
            cipher: args.cipher,
            key: args.key,
            alphabet: args.alphabet.map(|list| list.0),
            descending: args.descending,
            strict: args.strict,
            padding: args.pad,
            seed: args.seed,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a text file
    #[command(alias = "e")]
    Encrypt {
        #[command(flatten)]
        options: CipherArgs,

        /// Plaintext input file
        input: PathBuf,

        /// Ciphertext output file
        output: PathBuf,
    },

    /// Decrypt a text file
    #[command(alias = "d")]
    Decrypt {
        #[command(flatten)]
        options: CipherArgs,

        /// Ciphertext input file
        input: PathBuf,

        /// Plaintext output file
        output: PathBuf,
    },

    /// Write a cipher profile
    #[command(alias = "p")]
    Profile {
        #[command(flatten)]
        options: CipherArgs,

        /// Profile output file
        output: PathBuf,
    },

    /// Show information about a cipher profile
    #[command(alias = "i")]
    Info {
        /// Profile to inspect
        file: PathBuf,
    },
}

fn parse_cipher(s: &str) -> Result<CipherAlgorithm, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn parse_alphabet(s: &str) -> Result<PresetList, String> {
    AlphabetPreset::parse_list(s)
        .map(PresetList)
        .map_err(|e| format!("{}", e))
}

fn parse_pad(s: &str) -> Result<PadPolicy, String> {
    s.parse().map_err(|e| format!("{}", e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("coltrans {}", get_version());
        return ExitCode::SUCCESS;
    }

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

    let result = match command {
        Commands::Encrypt {
            options,
            input,
            output,
        } => encrypt_file(&input, &output, &options.into()).map(|count| {
            println!("Encrypted {} symbols to {}", count, output.display());
        }),

        Commands::Decrypt {
            options,
            input,
            output,
        } => decrypt_file(&input, &output, &options.into()).map(|count| {
            println!("Decrypted {} symbols to {}", count, output.display());
        }),

        Commands::Profile { options, output } => {
            write_profile(&output, &options.into()).map(|fingerprint| {
                println!("Wrote profile {} ({})", output.display(), fingerprint);
            })
        }

        Commands::Info { file } => show_info(&file).map(|info| print!("{}", info)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
