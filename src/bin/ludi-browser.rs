//! Deus Ludi game browser: list, describe and launch the games in a directory

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use deusludi::browser::GameCatalog;

const DEFAULT_DIR: &str = "thagames";
const USAGE: &str = "usage: ludi-browser [DIR] [--details N] [--launch N]";

#[derive(Debug, Default)]
struct Args {
    dir: Option<PathBuf>,
    details: Option<usize>,
    launch: Option<usize>,
}

fn parse_index(flag: &str, value: Option<String>) -> anyhow::Result<usize> {
    let value = value.with_context(|| format!("{flag} needs a game number"))?;
    let number: usize = value
        .parse()
        .with_context(|| format!("invalid game number `{value}`"))?;
    if number == 0 {
        bail!("game numbers start at 1");
    }
    Ok(number - 1)
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--details" => parsed.details = Some(parse_index("--details", args.next())?),
            "--launch" => parsed.launch = Some(parse_index("--launch", args.next())?),
            "-h" | "--help" => bail!(USAGE),
            _ if parsed.dir.is_none() => parsed.dir = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument `{arg}`\n{USAGE}"),
        }
    }
    Ok(parsed)
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DIR));
    let catalog = GameCatalog::scan(&dir)?;

    if catalog.is_empty() {
        println!("No games found in {}", dir.display());
        return Ok(ExitCode::SUCCESS);
    }

    println!("Found {} game(s) in {}", catalog.len(), dir.display());
    for (i, entry) in catalog.entries().iter().enumerate() {
        println!("  {}. {}", i + 1, entry.name);
    }

    if let Some(index) = args.details {
        let entry = catalog
            .get(index)
            .with_context(|| format!("no game number {}", index + 1))?;
        println!();
        print!("{}", entry.details());
    }

    if let Some(index) = args.launch {
        let entry = catalog
            .get(index)
            .with_context(|| format!("no game number {}", index + 1))?;
        let runner = std::env::current_exe()?.with_file_name("deusludi");
        let status = entry.launch(&runner)?;
        if !status.success() {
            eprintln!("Failed to launch game '{}': {}", entry.name, status);
            return Ok(ExitCode::FAILURE);
        }
        println!("Game '{}' finished", entry.name);
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_numbers_are_one_based() {
        let parsed = args(&["games", "--details", "2", "--launch", "1"]).unwrap();
        assert_eq!(parsed.dir, Some(PathBuf::from("games")));
        assert_eq!(parsed.details, Some(1));
        assert_eq!(parsed.launch, Some(0));
    }

    #[test]
    fn test_zero_and_missing_numbers_rejected() {
        assert!(args(&["--details", "0"]).is_err());
        assert!(args(&["--launch"]).is_err());
        assert!(args(&["a", "b"]).is_err());
    }
}
