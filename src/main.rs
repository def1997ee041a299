//! Bomb Arena - headless native driver
//!
//! Plays one round with a simple autopilot at a fixed 60 Hz and logs the
//! result. Run with `RUST_LOG=info` (or `debug` for audio cues and screen
//! changes). An optional argument names a settings JSON file; `--mute`
//! silences the audio cues.

fn main() {
    use bomb_arena::audio::LogAudio;
    use bomb_arena::consts::{ROUND_TIME, SIM_DT};
    use bomb_arena::sim::{Direction, TickInput};
    use bomb_arena::{Game, MenuAction, Screen};
    use rand::Rng;

    env_logger::init();
    log::info!("Bomb Arena (headless) starting...");

    let args = parse_args(std::env::args().skip(1));
    let settings = load_settings(args.settings_path);
    let mut audio = LogAudio::new();
    audio.set_muted(args.mute);
    let mut game = Game::new(800, 600, settings, Box::new(audio));
    game.handle_action(MenuAction::StartGame);
    if game.screen() != Screen::Playing {
        log::error!("Round did not start");
        return;
    }

    let mut rng = rand::rng();
    let mut heading = Direction::Right;
    let max_frames = (ROUND_TIME / SIM_DT) as u32 + 60;

    for frame in 0..max_frames {
        if game.screen() != Screen::Playing {
            break;
        }

        let mut input = TickInput::default();
        if frame % 45 == 0 {
            let next = Direction::random(&mut rng);
            input = input.release(heading).press(next);
            heading = next;
        }
        input.place_bomb = frame % 150 == 75 && rng.random_bool(0.7);

        game.update(SIM_DT, &input);
    }

    match (game.last_outcome(), game.round()) {
        (Some(outcome), Some(round)) => {
            log::info!(
                "{} - final score {}, {:.1}s left, high score {}",
                game.title().unwrap_or(outcome.as_str()),
                round.score,
                round.time_remaining,
                game.high_scores.best().unwrap_or(0)
            );
        }
        _ => log::warn!("Round still running after {max_frames} frames"),
    }
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    settings_path: Option<String>,
    mute: bool,
}

fn parse_args(args: impl Iterator<Item = String>) -> Args {
    let mut parsed = Args::default();
    for arg in args {
        match arg.as_str() {
            "--mute" => parsed.mute = true,
            flag if flag.starts_with("--") => log::warn!("Ignoring unknown flag {flag}"),
            _ if parsed.settings_path.is_none() => parsed.settings_path = Some(arg),
            _ => log::warn!("Ignoring extra argument {arg}"),
        }
    }
    parsed
}

fn load_settings(path: Option<String>) -> bomb_arena::Settings {
    use bomb_arena::Settings;

    let Some(path) = path else {
        return Settings::default();
    };
    let json = match std::fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read {path}: {e}; using default settings");
            return Settings::default();
        }
    };
    match Settings::from_json(&json) {
        Ok(settings) => {
            log::info!("Loaded settings from {path}");
            settings
        }
        Err(e) => {
            log::warn!("{e}; using default settings");
            Settings::default()
        }
    }
}
