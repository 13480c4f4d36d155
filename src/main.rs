//! Deus Ludi entry point: load a game file and run it

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use deusludi::prelude::*;

const DEFAULT_GAME: &str = "./thagames/mygame.ludi.json";
const USAGE: &str = "usage: deusludi [--headless FRAMES] [GAME_FILE]";

#[derive(Debug, PartialEq)]
struct Args {
    game_file: PathBuf,
    headless: Option<u64>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut game_file = None;
    let mut headless = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--headless" => {
                let frames = args.next().context("--headless needs a frame count")?;
                headless = Some(
                    frames
                        .parse()
                        .with_context(|| format!("invalid frame count `{frames}`"))?,
                );
            }
            "-h" | "--help" => bail!(USAGE),
            _ if game_file.is_none() => game_file = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument `{arg}`\n{USAGE}"),
        }
    }

    Ok(Args {
        game_file: game_file.unwrap_or_else(|| PathBuf::from(DEFAULT_GAME)),
        headless,
    })
}

/// Link a behavior that refreshes and draws the rectangle onto every
/// rectangle object of every scene
fn link_draw_behaviors(game: &mut Game) -> usize {
    let mut linked = 0;
    for scene in game.scenes_mut() {
        let ids: Vec<ObjectId> = scene
            .objects()
            .iter()
            .filter(|o| o.object_type() == ObjectType::Rectangle)
            .map(GameObject::id)
            .collect();

        for id in ids {
            let result = scene.link_behavior(id, |object, ctx| {
                object.update_rect();
                object.draw(ctx.canvas);
                Ok(())
            });
            match result {
                Ok(()) => linked += 1,
                Err(e) => log::warn!("Could not link draw behavior: {e}"),
            }
        }
    }
    linked
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut game = match load_game(&args.game_file) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to load {}: {}", args.game_file.display(), e);
            return ExitCode::from(e.kind().exit_code());
        }
    };

    let linked = link_draw_behaviors(&mut game);
    log::info!("Linked draw behavior to {} rectangle(s)", linked);

    let config = EngineConfig::default().with_title(format!("Deus Ludi - {}", game.name));
    let mut registry = GameRegistry::new();
    registry.register(game);

    let mut engine = Engine::new(config, registry);
    let result = match args.headless {
        Some(frames) => engine.run_headless(frames).map(|(_, report)| {
            log::info!(
                "Headless run finished: {} behavior call(s), {} failed",
                report.invoked,
                report.failed
            );
        }),
        None => {
            return match engine.run() {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    log::error!("Engine error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Engine error: {e}");
            ExitCode::from(e.kind().exit_code())
        }
    }
}
