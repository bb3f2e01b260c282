//! Command-line interface for physmac
//! Expands physics notation macros in math markup and inspects the registered notation.
//!
//! Usage:
//!   physmac expand `<EXPR>` | --file `<path>`   - Print the expansion of an expression
//!   physmac list [--json]                     - List registered macro names
//!   physmac tokens `<EXPR>`                     - Dump the token stream as JSON
//!
//! Settings come from the built-in defaults, then `.physmac.toml` in the
//! working directory when present, then the file given with `--config <path>`.
//! Logging goes to stderr and is filtered with `RUST_LOG`.

use clap::{Arg, ArgAction, ArgMatches, Command};
use physmac::config::{Loader, PROJECT_FILE};
use physmac::{Expander, MacroRegistry, PhysmacConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("physmac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expand physics notation macros in math markup")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the default configuration"),
        )
        .subcommand(
            Command::new("expand")
                .about("Print the expansion of an expression")
                .arg(
                    Arg::new("expr")
                        .help("Math markup to expand")
                        .required_unless_present("file")
                        .conflicts_with("file")
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('f')
                        .help("Read the markup from a file"),
                ),
        )
        .subcommand(
            Command::new("list")
                .about("List registered macro names")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the names as a JSON array"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the token stream of an expression as JSON")
                .arg(
                    Arg::new("expr")
                        .help("Math markup to tokenize")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let config = load_config(&matches);

    match matches.subcommand() {
        Some(("expand", expand_matches)) => handle_expand_command(expand_matches, &config),
        Some(("list", list_matches)) => {
            handle_list_command(&config, list_matches.get_flag("json"));
        }
        Some(("tokens", tokens_matches)) => {
            let expr = required(tokens_matches, "expr");
            handle_tokens_command(&expr);
        }
        _ => unreachable!(),
    }
}

fn required(matches: &ArgMatches, name: &str) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_else(|| {
        eprintln!("Error: missing <{}>", name);
        std::process::exit(2);
    })
}

fn load_config(matches: &ArgMatches) -> PhysmacConfig {
    let mut loader = Loader::new().with_optional_file(PROJECT_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Error loading configuration: {}", e);
        std::process::exit(1);
    })
}

/// Handle the expand command
fn handle_expand_command(matches: &ArgMatches, config: &PhysmacConfig) {
    let source = match matches.get_one::<String>("file") {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }),
        None => required(matches, "expr"),
    };

    let registry = MacroRegistry::with_physics_config(&config.notation);
    let expander = Expander::from_config(&registry, &config.expansion);
    match expander.expand(source.trim_end_matches('\n')) {
        Ok(output) => println!("{}", output),
        Err(diagnostic) => {
            eprintln!("Error: {}", diagnostic);
            std::process::exit(1);
        }
    }
}

/// Handle the list command
fn handle_list_command(config: &PhysmacConfig, json: bool) {
    let names = MacroRegistry::with_physics_config(&config.notation).names();
    if json {
        match serde_json::to_string_pretty(&names) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing names: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }
    for name in names {
        println!("{}", name);
    }
}

/// Handle the tokens command
fn handle_tokens_command(expr: &str) {
    let tokens = physmac::token::tokenize(expr);
    match serde_json::to_string_pretty(&tokens) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing tokens: {}", e);
            std::process::exit(1);
        }
    }
}
