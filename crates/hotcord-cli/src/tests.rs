use clap::Parser;

use super::*;

#[test]
fn parses_without_arguments() {
    let cli = Cli::try_parse_from(["hotcord"]).expect("must parse");
    assert!(cli.css.is_none());
    assert!(cli.js.is_none());
    assert!(!cli.revert);
}

#[test]
fn parses_css_and_js_paths() {
    let cli = Cli::try_parse_from(["hotcord", "--css", "themes/dark.css", "--js", "tweaks.js"])
        .expect("must parse");
    assert_eq!(cli.css.as_deref(), Some(std::path::Path::new("themes/dark.css")));
    assert_eq!(cli.js.as_deref(), Some(std::path::Path::new("tweaks.js")));
}

#[test]
fn parses_revert_flag() {
    let cli = Cli::try_parse_from(["hotcord", "--revert"]).expect("must parse");
    assert!(cli.revert);
}

#[test]
fn rejects_unknown_flags() {
    assert!(Cli::try_parse_from(["hotcord", "--nope"]).is_err());
}
