//! wordtally command-line entry point

use clap::Parser;
use wordtally_cli::{commands::Commands, CliResult};

/// Count words, vowel-initial words and consonant-final words in text files
#[derive(Debug, Parser)]
#[command(name = "wordtally", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_flags() {
        let cli = Cli::try_parse_from([
            "wordtally", "process", "-i", "a.txt", "-i", "b.txt", "-m", "distributed", "-w", "3",
            "-c", "512", "-k", "2", "-f", "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Process(args) => {
                assert_eq!(args.input, ["a.txt", "b.txt"]);
                assert_eq!(args.workers, Some(3));
                assert_eq!(args.chunk_size, Some(512));
                assert_eq!(args.queue_capacity, Some(2));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_process_requires_input() {
        assert!(Cli::try_parse_from(["wordtally", "process"]).is_err());
    }
}
