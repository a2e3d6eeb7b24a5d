//! `idreg` - encode, decode and compare identity records by hand

mod commands;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use idreg_codec::{CodecConfig, IdentityCodec, SupportedFieldDecoder, ZeroBitmapPolicy};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("idreg")
        .version(idreg_codec::VERSION)
        .about("Canonical identity-record codec")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML codec configuration"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging (overridden by RUST_LOG)"),
        )
        .subcommand(
            Command::new("encode")
                .about("Encode a JSON identity record; prints hex record and hash")
                .arg(
                    Arg::new("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file (stdin when omitted)"),
                ),
        )
        .subcommand(
            Command::new("decode")
                .about("Decode a hex record into JSON")
                .arg(Arg::new("hex").required(true)),
        )
        .subcommand(
            Command::new("hash")
                .about("Hash a hex record")
                .arg(Arg::new("hex").required(true)),
        )
        .subcommand(
            Command::new("diff")
                .about("Compare two JSON identity records")
                .arg(
                    Arg::new("original")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("current")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("fields")
                .about("Decode a registrar supported-fields bitmask")
                .arg(
                    Arg::new("bitmap")
                        .required(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("literal-zero")
                        .long("literal-zero")
                        .action(ArgAction::SetTrue)
                        .help("Treat 0 as no fields instead of all fields"),
                ),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> Result<CodecConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => CodecConfig::load(path).context("loading --config"),
        None => Ok(CodecConfig::default()),
    }
}

fn run(matches: &ArgMatches) -> Result<String> {
    let config = load_config(matches)?;
    let codec = IdentityCodec::new(config);

    match matches.subcommand() {
        Some(("encode", args)) => {
            let file = args.get_one::<PathBuf>("file");
            let fields = commands::read_fields(file.map(PathBuf::as_path))?;
            commands::encode(&codec, &fields)
        }
        Some(("decode", args)) => {
            let hex = args.get_one::<String>("hex").context("missing hex")?;
            commands::decode(&codec, hex)
        }
        Some(("hash", args)) => {
            let hex = args.get_one::<String>("hex").context("missing hex")?;
            commands::hash(hex)
        }
        Some(("diff", args)) => {
            let path = |name: &str| args.get_one::<PathBuf>(name).map(PathBuf::as_path);
            let original = commands::read_fields(path("original"))?;
            let current = commands::read_fields(path("current"))?;
            commands::diff_records(&codec, &original, &current)
        }
        Some(("fields", args)) => {
            let bitmap = *args.get_one::<u64>("bitmap").context("missing bitmap")?;
            let policy = if args.get_flag("literal-zero") {
                ZeroBitmapPolicy::Literal
            } else {
                config.zero_bitmap
            };
            Ok(commands::fields(&SupportedFieldDecoder::new(policy), bitmap))
        }
        _ => anyhow::bail!("no subcommand given"),
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let output = run(&matches)?;
    println!("{output}");
    Ok(())
}
