//! Command line interface for generating a command line completion script.

use super::build;
use clap::{self, Arg, ArgMatches, Command};
use clap_complete::Shell;
use std::io;

/// Creates a subcommand for generating a completion script.
pub fn create_completions_subcommand() -> Command<'static> {
    Command::new("completions")
        .about("Generate tab-completion script for your shell")
        .hide(true)
        .arg(
            Arg::new("shell")
                .value_name("SHELL")
                .required(true)
                .possible_values(["bash", "zsh", "fish", "elvish", "powershell"])
                .help("The shell to generate the script for"),
        )
        .after_help(
            r#"DISCUSSION
    The script is output on `stdout`, allowing one to re-direct the
    output to the file of their choosing. For example, for Bash:

        $ mkdir -p ~/.local/share/bash-completion/completions
        $ pogit completions bash > ~/.local/share/bash-completion/completions/pogit

    and for Zsh, with `~/.zfunc` added to `$fpath` in `.zshrc`:

        $ pogit completions zsh > ~/.zfunc/_pogit"#,
        )
}

/// Runs the actions for the `completions` subcommand using the given arguments.
pub fn run_completions_subcommand(arguments: &ArgMatches) {
    let shell: Shell = super::utils::get_value_from_required_parseable_argument(arguments, "shell");
    clap_complete::generate(
        shell,
        &mut build::build(),
        clap::crate_name!(),
        &mut io::stdout(),
    );
}
