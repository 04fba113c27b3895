use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shelf",
    about = "Shelf: file repository with audio metadata queries",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the attributes extracted from local files
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the config file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct InspectArgs {
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::parse_from(["shelf", "serve", "--config", "shelf.toml", "--bind", "0.0.0.0:9000"]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.config, Some(PathBuf::from("shelf.toml")));
                assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parse_inspect() {
        let cli = Cli::parse_from(["shelf", "-v", "inspect", "a.wav", "b.mp3", "--format", "json"]);
        assert!(cli.verbose);
        match cli.command {
            Command::Inspect(args) => {
                assert_eq!(args.paths.len(), 2);
                assert_eq!(args.format, OutputFormat::Json);
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn inspect_requires_paths() {
        assert!(Cli::try_parse_from(["shelf", "inspect"]).is_err());
    }
}
