use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

#[derive(Debug, clap::Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Completion script for `rolodex` in the requested shell's syntax.
pub fn render(args: CompletionsArgs) -> Result<String> {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();
    let mut buf = Vec::new();
    generate(args.shell, &mut cmd, name, &mut buf);
    Ok(String::from_utf8(buf)?)
}
