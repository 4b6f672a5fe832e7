use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use classmatch::commands::{
    best_match_command, classify_command, init_config_command, match_command, signature_command,
    MatchOverrides,
};
use classmatch::logging::init_tracing;
use classmatch_core::obfuscation::ClassifierKind;

/// Class correspondence across two versions of an application package.
///
/// This CLI is a thin wrapper around `classmatch-core` (exposed in code as
/// `classmatch_core`). Inputs are class dumps produced by a bytecode parser, one per
/// version, in JSON or YAML.
#[derive(Parser, Debug)]
#[command(
    name = "classmatch",
    version,
    about = "Match classes across two versions of an obfuscated application package",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, default_value_t = false, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find ranked candidates in the new version for every class of the old version.
    ///
    /// Output is a JSON object mapping each old class to `{ new class: rank }`, best first.
    Match {
        /// Class dump of the old version.
        old: PathBuf,

        /// Class dump of the new version.
        new: PathBuf,

        /// Match configuration (JSON or YAML). Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the matches here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Override the configured classifier (score, set-membership, always, never).
        #[arg(long)]
        classifier: Option<ClassifierKind>,

        /// Override the maximum number of candidates per class.
        #[arg(long)]
        max_candidates: Option<usize>,

        /// Skip package scoping; compare every class against every class.
        #[arg(long, default_value_t = false)]
        no_package_matching: bool,

        /// Skip exact-name matching.
        #[arg(long, default_value_t = false)]
        no_name_matching: bool,
    },

    /// Report whether class or package names look obfuscated.
    Classify {
        /// Class names (Java or descriptor form) or, with --package, package prefixes.
        #[arg(required = true)]
        names: Vec<String>,

        /// Treat the names as package prefixes such as `Lcom/app`.
        #[arg(long, default_value_t = false)]
        package: bool,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        classifier: Option<ClassifierKind>,

        /// Old version dump (needed by the set-membership classifier).
        #[arg(long, requires = "new")]
        old: Option<PathBuf>,

        /// New version dump (needed by the set-membership classifier).
        #[arg(long, requires = "old")]
        new: Option<PathBuf>,

        /// Emit JSON instead of tab-separated text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print class signatures of one dump as JSON.
    Signature {
        /// Class dump to fingerprint.
        dump: PathBuf,

        /// Only this class (Java or descriptor form).
        #[arg(long)]
        class: Option<String>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show the best candidate of one class from a saved match result.
    BestMatch {
        /// JSON written by `match`.
        matches: PathBuf,

        /// Old class name (Java or descriptor form).
        class: String,

        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the default match configuration.
    InitConfig {
        /// Destination; `.json`, `.yaml` or `.yml`.
        #[arg(default_value = "classmatch.json")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Command::Match {
            old,
            new,
            config,
            output,
            classifier,
            max_candidates,
            no_package_matching,
            no_name_matching,
        } => {
            let overrides =
                MatchOverrides { classifier, max_candidates, no_package_matching, no_name_matching };
            match_command(&old, &new, config.as_deref(), output.as_deref(), &overrides)?
        }
        Command::Classify { names, package, config, classifier, old, new, json } => {
            let versions = match (&old, &new) {
                (Some(old), Some(new)) => Some((old.as_path(), new.as_path())),
                (None, None) => None,
                _ => return Err(anyhow!("--old and --new must be given together")),
            };
            classify_command(&names, package, config.as_deref(), classifier, versions, json)?
        }
        Command::Signature { dump, class, config, output } => {
            signature_command(&dump, class.as_deref(), config.as_deref(), output.as_deref())?
        }
        Command::BestMatch { matches, class, json } => best_match_command(&matches, &class, json)?,
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
