//! Hot Typing entry point
//!
//! No window here: this runs a headless autopilot game (typing steadily,
//! dodging the enemy) and prints the final snapshot as JSON. Useful for
//! checking word lists and settings. `RUST_LOG=debug` shows every event.

use hot_typing::consts::SIM_DT;
use hot_typing::{Direction, Game, GameInput, Settings, Snapshot};

/// Frame length the autopilot runs at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between autopilot keystrokes
const KEY_INTERVAL: f32 = 0.2;
/// Give up after this much game time
const MAX_GAME_SECS: f32 = 300.0;
/// Enemy distance at which the autopilot starts dodging
const DODGE_DISTANCE: f32 = 150.0;

/// Held movement keys, so only changes are sent as input
#[derive(Default)]
struct Steering {
    held: [bool; 4],
}

impl Steering {
    const DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn update(&mut self, game: &mut Game, snap: &Snapshot) {
        let mut want = [false; 4];
        if let Some(enemy) = snap.enemy {
            let away = snap.player.pos - enemy.pos;
            if away.length() < DODGE_DISTANCE {
                want = [away.y < 0.0, away.y > 0.0, away.x < 0.0, away.x > 0.0];
            }
        }

        for (i, direction) in Self::DIRECTIONS.into_iter().enumerate() {
            if want[i] != self.held[i] {
                game.push_input(GameInput::Move {
                    direction,
                    pressed: want[i],
                });
                self.held[i] = want[i];
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Hot Typing (headless) starting...");

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hot_typing.json".to_string());
    let settings = Settings::load(&settings_path);
    let mut game = Game::from_settings(&settings);

    game.push_input(GameInput::Start);
    let mut snap = game.frame(SIM_DT);
    let mut steering = Steering::default();
    let mut since_key = 0.0;
    let mut elapsed = 0.0;

    while !snap.phase.is_finished() && elapsed < MAX_GAME_SECS {
        steering.update(&mut game, &snap);

        since_key += FRAME_DT;
        if since_key >= KEY_INTERVAL {
            since_key = 0.0;
            if let Some(next) = snap.target_word.chars().nth(snap.typed.chars().count()) {
                game.push_input(GameInput::Char(next));
            }
        }

        snap = game.frame(FRAME_DT);
        elapsed += FRAME_DT;
        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    log::info!(
        "Finished: {:?}, score {}, {}/{} words, health {}",
        snap.phase,
        snap.score,
        snap.words_correct,
        snap.target_word_count,
        snap.health
    );
    match serde_json::to_string_pretty(&snap) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
