use std::path::Path;

use super::*;

fn record(pid: u32, exe: &str) -> ProcessRecord {
    ProcessRecord {
        pid,
        exe: Path::new(exe).to_path_buf(),
    }
}

#[test]
fn grouping_collapses_same_install_into_one_entry() {
    let installs = group_installations(vec![
        record(100, "/opt/discord-canary/DiscordCanary"),
        record(200, "/opt/discord-canary/DiscordCanary"),
    ]);

    assert_eq!(installs.len(), 1);
    let install = &installs["DiscordCanary"];
    assert_eq!(install.install_dir(), Path::new("/opt/discord-canary"));
    assert_eq!(install.executable(), "DiscordCanary");
    assert_eq!(install.pids(), &[100, 200]);
}

#[test]
fn grouping_keeps_distinct_executables_separate() {
    let installs = group_installations(vec![
        record(100, "/opt/discord/Discord"),
        record(200, "/opt/discord-canary/DiscordCanary"),
    ]);

    assert_eq!(installs.len(), 2);
    assert!(installs.contains_key("Discord"));
    assert!(installs.contains_key("DiscordCanary"));
}

#[test]
fn grouping_rejects_helpers_and_foreign_executables() {
    let installs = group_installations(vec![
        record(100, "/opt/discord/Discord"),
        record(101, "/opt/discord/Discord Helper"),
        record(102, "/usr/bin/firefox"),
        record(103, "/usr/bin/discord-wrapper"),
    ]);

    assert_eq!(installs.len(), 1);
    assert!(installs.contains_key("Discord"));
}

#[test]
fn grouping_ignores_same_name_under_different_directory() {
    // Two install dirs sharing an executable name cannot share one entry;
    // the first discovered directory keeps the slot.
    let installs = group_installations(vec![
        record(100, "/opt/discord/Discord"),
        record(200, "/home/demo/other/Discord"),
    ]);

    assert_eq!(installs.len(), 1);
    let install = &installs["Discord"];
    assert_eq!(install.install_dir(), Path::new("/opt/discord"));
    assert_eq!(install.pids(), &[100]);
}

#[test]
fn selection_accepts_in_range_numbers() {
    assert_eq!(parse_selection("0", 3).expect("must parse"), 0);
    assert_eq!(parse_selection(" 2 \n", 3).expect("must parse"), 2);
}

#[test]
fn selection_rejects_non_numeric_input() {
    let err = parse_selection("first", 3).expect_err("must reject");
    assert!(err.to_string().contains("must be a number"));
    assert!(parse_selection("-1", 3).is_err());
    assert!(parse_selection("", 3).is_err());
}

#[test]
fn selection_rejects_out_of_range_index() {
    let err = parse_selection("3", 3).expect_err("must reject");
    assert!(err.to_string().contains("out of range"));
}
