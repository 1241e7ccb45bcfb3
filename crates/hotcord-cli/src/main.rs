use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod dispatch;

const LONG_ABOUT: &str = "\
Unpacks Discord and adds CSS/JavaScript hot-reloading.

Discord has to be open for this to work. When this tool is ran,
Discord will close and then be relaunched when the tool completes.
CSS files must have the \".css\" extension, and JavaScript files must
have the \".js\" extension.";

#[derive(Parser, Debug)]
#[command(name = "hotcord")]
#[command(about = "Adds CSS/JavaScript hot-reloading to Discord", long_about = LONG_ABOUT)]
struct Cli {
    /// Location of the CSS file or directory to watch
    #[arg(long, value_name = "file_or_dir")]
    css: Option<PathBuf>,
    /// Location of the JavaScript file or directory to watch
    #[arg(long, value_name = "file_or_dir")]
    js: Option<PathBuf>,
    /// Reverts any changes made to Discord (does not delete CSS)
    #[arg(long)]
    revert: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    dispatch::run(cli.css, cli.js, cli.revert)
}

#[cfg(test)]
mod tests;
