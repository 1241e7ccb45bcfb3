use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use hotcord_core::{host_resolver, Installation, ModuleLayout};
use hotcord_patcher::{
    apply, reload_hook, revert, user_home, write_injection_script, AsarCommand, InjectionConfig,
    PatchOutcome, RevertOutcome,
};

pub fn run(css: Option<PathBuf>, js: Option<PathBuf>, revert_requested: bool) -> Result<()> {
    let installs = hotcord_process::discover()?;
    let mut install = select_installation(installs)?;
    println!(
        "Found {} under {}",
        install.executable(),
        install.install_dir().display()
    );

    let resolver = host_resolver()?;
    let layout = resolver.resolve(&install)?;
    println!("Resources under {}", layout.resources_dir().display());

    let config = InjectionConfig::resolve(css, js, &layout)?;

    // Kill the running processes before touching any file.
    hotcord_process::terminate(&mut install);

    if revert_requested {
        report_revert(revert(layout.modules_dir())?);
        return hotcord_process::launch(&install);
    }

    match patch(&layout, &config) {
        Ok(PatchOutcome::Patched) => {
            println!("\nDone!\n");
            println!(
                "You may now edit your {} file (CSS) or {} file (JS),",
                config.css().display(),
                config.js().display()
            );
            println!("which will be reloaded whenever it's saved.");
            println!("\nRelaunching Discord now...");
            hotcord_process::launch(&install)
        }
        Ok(PatchOutcome::AnchorMissing) => {
            eprintln!("warning: nothing was done.");
            eprintln!("note: blur event was not found for the injection point.");
            report_revert(revert(layout.modules_dir())?);
            hotcord_process::launch(&install)
        }
        Ok(PatchOutcome::Declined) => {
            println!("Exiting.");
            hotcord_process::launch(&install)
        }
        Err(err) => {
            // The installation must never be left terminated.
            if let Err(launch_err) = hotcord_process::launch(&install) {
                eprintln!("error: {launch_err:#}");
            }
            Err(err)
        }
    }
}

fn patch(layout: &ModuleLayout, config: &InjectionConfig) -> Result<PatchOutcome> {
    config.ensure_placeholders()?;
    let injection_file = write_injection_script(&user_home()?, config)?;
    let hook = reload_hook(&injection_file);
    apply(&AsarCommand, layout, &hook, &mut prompt_consent)
}

fn select_installation(installs: BTreeMap<String, Installation>) -> Result<Installation> {
    let mut ordered: Vec<Installation> = installs.into_values().collect();
    if ordered.len() == 1 {
        return Ok(ordered.remove(0));
    }

    for (index, install) in ordered.iter().enumerate() {
        println!("{index}: Found {}", install.executable());
    }
    loop {
        let raw = read_prompt("Discord executable to use (number): ")?;
        match hotcord_process::parse_selection(&raw, ordered.len()) {
            Ok(index) => return Ok(ordered.remove(index)),
            Err(err) => println!("{err}"),
        }
    }
}

fn report_revert(outcome: RevertOutcome) {
    match outcome {
        RevertOutcome::Reverted => println!("Reverted changes, no more CSS hot-reload :("),
        RevertOutcome::NothingToRevert => println!("No changes to revert."),
    }
}

fn read_prompt(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    let read = io::stdin()
        .read_line(&mut line)
        .context("failed to read input")?;
    if read == 0 {
        bail!("stdin closed while awaiting input");
    }
    Ok(line)
}

fn prompt_consent(prompt: &str) -> Result<bool> {
    let answer = read_prompt(&format!("{prompt} (Y/n): "))?;
    Ok(!answer.trim().to_lowercase().starts_with('n'))
}
