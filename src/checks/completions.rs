use std::io;

use anyhow::Result;
use clap::{ArgMatches, Command};
use clap_complete::{generate, Shell};

/// Generate shell completions for the specified shell
pub fn execute(matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    let shell_str = matches
        .get_one::<String>("shell")
        .map(String::as_str)
        .unwrap_or_default();
    let shell = match shell_str.parse::<Shell>() {
        Ok(shell) => shell,
        Err(_) => {
            eprintln!("Unsupported shell: {}", shell_str);
            eprintln!("Supported shells: bash, zsh, fish, powershell, elvish");
            std::process::exit(1);
        }
    };

    generate(shell, cli, "argus", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_shells_parse() {
        for name in ["bash", "zsh", "fish", "powershell", "elvish"] {
            assert!(name.parse::<Shell>().is_ok(), "{} should parse", name);
        }
        assert!("csh".parse::<Shell>().is_err());
    }
}
