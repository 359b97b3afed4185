//! Command-line definition

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// Build the `cogen` command
pub(crate) fn command() -> Command {
    Command::new("cogen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate a Solidity contract project from a description")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("generate")
                .about("Ask the model for a contract and scaffold a project around it")
                .arg(
                    Arg::new("description")
                        .required(true)
                        .help("What the contract should do, e.g. \"ERC721 collection with a mint cap\""),
                )
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .short('o')
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory the project directory is created in"),
                )
                .arg(
                    Arg::new("verbose")
                        .long("verbose")
                        .short('v')
                        .action(ArgAction::SetTrue)
                        .help("Debug logging; print failing stage and error kind"),
                )
                .arg(
                    Arg::new("api-key")
                        .long("api-key")
                        .help("Provider API key (default: $COGEN_API_KEY, then $OPENAI_API_KEY)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Configuration file (default: ./cogen.toml if present)"),
                )
                .arg(
                    Arg::new("model")
                        .long("model")
                        .help("Model name, overrides configuration and $COGEN_MODEL"),
                )
                .arg(
                    Arg::new("no-tests")
                        .long("no-tests")
                        .action(ArgAction::SetTrue)
                        .help("Do not write a test stub"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the result as JSON"),
                ),
        )
}

/// Arguments of `cogen generate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GenerateArgs {
    pub(crate) description: String,
    pub(crate) output_dir: PathBuf,
    pub(crate) verbose: bool,
    pub(crate) api_key: Option<String>,
    pub(crate) config: Option<PathBuf>,
    pub(crate) model: Option<String>,
    pub(crate) no_tests: bool,
    pub(crate) json: bool,
}

impl GenerateArgs {
    pub(crate) fn from_matches(args: &ArgMatches) -> Self {
        Self {
            description: args.get_one::<String>("description").cloned().unwrap_or_default(),
            output_dir: args
                .get_one::<PathBuf>("output-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            verbose: args.get_flag("verbose"),
            api_key: args.get_one::<String>("api-key").cloned(),
            config: args.get_one::<PathBuf>("config").cloned(),
            model: args.get_one::<String>("model").cloned(),
            no_tests: args.get_flag("no-tests"),
            json: args.get_flag("json"),
        }
    }
}
