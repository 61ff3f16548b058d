//! Room Crawler headless runner
//!
//! Drives a session with a simple autopilot and prints a JSON summary.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use glam::Vec2;
    use serde::Serialize;

    use room_crawler::sim::{Direction, GameEvent, GameState, Side};
    use room_crawler::view::{FrameView, HudView};
    use room_crawler::{Presenter, Session, Tuning};

    /// Simulated display refresh (ms per frame)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(author, version, about)]
    struct Cli {
        /// Run seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Display frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// JSON file with tuning overrides
        #[arg(long)]
        tuning: Option<PathBuf>,
    }

    /// Logs events and keeps the latest HUD
    #[derive(Default)]
    struct LogPresenter {
        frames: u64,
        hud: Option<HudView>,
    }

    impl Presenter for LogPresenter {
        fn present(&mut self, view: &FrameView) {
            self.frames += 1;
            self.hud = Some(view.hud.clone());
        }

        fn notify(&mut self, event: &GameEvent) {
            match event {
                GameEvent::LevelUp { level, score } => {
                    log::info!("Reached level {} with score {}", level, score)
                }
                GameEvent::GameOver { score } => log::info!("Final score {}", score),
                GameEvent::ItemCollected { kind } => log::info!("Picked up {}", kind.name()),
                other => log::trace!("{:?}", other),
            }
        }
    }

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        frames: u64,
        ticks: u64,
        score: u64,
        level: u32,
        rooms_cleared: u32,
        game_over: bool,
        items: String,
    }

    fn arrow(dir: Direction) -> &'static str {
        match dir {
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
        }
    }

    fn wasd(dir: Direction) -> &'static str {
        match dir {
            Direction::Up => "w",
            Direction::Down => "s",
            Direction::Left => "a",
            Direction::Right => "d",
        }
    }

    /// Where to walk next: an open door, preferring one that leads somewhere
    /// not yet cleared
    fn exit_target(state: &GameState) -> Option<Vec2> {
        let room = state.room();
        let (x, y) = state.current_cell;
        let leads_to_fight = |side: Side| {
            let (dx, dy) = side.offset();
            state
                .dungeon
                .room_at(x as i32 + dx, y as i32 + dy)
                .and_then(|id| state.dungeon.room(id))
                .is_some_and(|r| !r.cleared)
        };

        let open: Vec<Side> = room
            .doors
            .iter()
            .filter(|(_, d)| d.is_open())
            .map(|(s, _)| s)
            .collect();
        let side = open
            .iter()
            .copied()
            .find(|&s| leads_to_fight(s))
            .or_else(|| open.get((state.time_ticks / 600) as usize % open.len().max(1)).copied())?;

        let c = room.center();
        Some(match side {
            Side::Top => Vec2::new(c.x, 0.0),
            Side::Right => Vec2::new(room.width, c.y),
            Side::Bottom => Vec2::new(c.x, room.height),
            Side::Left => Vec2::new(0.0, c.y),
        })
    }

    /// Press keys for this frame: shoot at the nearest enemy, or head for a door
    fn autopilot(session: &mut Session) {
        for dir in Direction::ALL {
            session.key_up(wasd(dir));
            session.key_up(arrow(dir));
        }

        let state = &session.state;
        let pos = state.player.pos();
        let nearest = state
            .room()
            .enemies
            .iter()
            .map(|e| e.body.pos)
            .min_by(|a, b| a.distance(pos).total_cmp(&b.distance(pos)));

        if let Some(enemy) = nearest {
            if let Some(dir) = Direction::from_velocity(enemy - pos) {
                session.key_down(arrow(dir));
            }
            return;
        }

        if let Some(target) = exit_target(state) {
            let delta = target - pos;
            if delta.x.abs() > 4.0 {
                let dir = if delta.x > 0.0 { Direction::Right } else { Direction::Left };
                session.key_down(wasd(dir));
            }
            if delta.y.abs() > 4.0 {
                let dir = if delta.y > 0.0 { Direction::Down } else { Direction::Up };
                session.key_down(wasd(dir));
            }
        }
    }

    pub fn run() {
        let cli = Cli::parse();
        let seed = cli.seed;
        let tuning = cli
            .tuning
            .as_ref()
            .map(Tuning::load_or_default)
            .unwrap_or_default();

        let mut session = Session::new(seed, tuning);
        let mut presenter = LogPresenter::default();

        for _ in 0..cli.frames {
            autopilot(&mut session);
            session.frame(FRAME_MS, &mut presenter);
            if !session.is_running() {
                break;
            }
        }

        let state = &session.state;
        let summary = Summary {
            seed,
            frames: presenter.frames,
            ticks: state.time_ticks,
            score: state.score,
            level: state.level,
            rooms_cleared: state.rooms_cleared,
            game_over: state.is_game_over(),
            items: presenter.hud.map(|h| h.items).unwrap_or_else(|| "None".to_string()),
        };

        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Room Crawler (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library and drive `Session::frame` themselves
}
