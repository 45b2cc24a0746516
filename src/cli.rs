use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Build Dash docsets for the LLVM and Clang documentation.
#[derive(Debug, Parser)]
#[command(name = "llvm-docsets", version, about)]
pub struct Cli {
    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Configuration file (toml, yaml or json).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Fetch, extract and document every package, then archive all docsets.
    Build,
    /// Remove every docset bundle and the build directory.
    Clean,
    /// Download and verify the source tarballs.
    Fetch,
    /// Build one documentation docset from already generated HTML.
    Docset {
        /// Package to build the docset for (llvm or clang).
        #[arg(short, long)]
        package: String,
        /// Directory of generated HTML; moved into the bundle.
        #[arg(long, value_name = "DIR")]
        html: PathBuf,
        /// Don't archive the finished bundle.
        #[arg(long)]
        no_archive: bool,
    },
    /// Archive every finished docset bundle.
    Compress,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["llvm-docsets", "build"], Command::Build)]
    #[case(&["llvm-docsets", "-q", "clean"], Command::Clean)]
    #[case(
        &["llvm-docsets", "docset", "-p", "clang", "--html", "out/html"],
        Command::Docset { package: "clang".to_string(), html: PathBuf::from("out/html"), no_archive: false }
    )]
    fn test_parse(#[case] args: &[&str], #[case] expected: Command) {
        assert_eq!(Cli::try_parse_from(args).unwrap().command, expected);
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["llvm-docsets", "compress", "-vv", "--config", "docsets.toml"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("docsets.toml")));
        assert!(Cli::try_parse_from(["llvm-docsets", "-v", "-q", "build"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
