//! Arcade Cores headless demo
//!
//! Runs both games with a simple bot at the controls and records best scores.
//! The browser build uses `web.rs` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;

    use arcade_cores::consts::PONG_STEP_MS;
    use arcade_cores::persistence::FileStore;
    use arcade_cores::sim::collision::{hits_obstacle, hits_wall};
    use arcade_cores::sim::{Direction, PaddleMove, PongState, Side, SnakeState};
    use arcade_cores::{PongSession, Settings, SnakeSession, SeededSource};

    #[derive(Parser)]
    #[command(name = "arcade-cores", about = "Headless attract-mode run of the arcade cores")]
    struct Cli {
        /// Enable debug logging
        #[arg(short, long)]
        verbose: bool,

        /// RNG seed for the Snake run (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pong ticks to simulate
        #[arg(long, default_value = "3000")]
        pong_ticks: u64,

        /// Upper bound on Snake ticks
        #[arg(long, default_value = "5000")]
        snake_ticks: u64,

        /// High-score file
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        let filter = if cli.verbose { "debug" } else { "info" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

        let settings = match &cli.settings {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        let scores_path = cli
            .scores
            .unwrap_or_else(|| std::env::temp_dir().join("arcade-scores.json"));
        let seed = cli.seed.unwrap_or_else(|| SeededSource::from_entropy().seed());
        log::info!("Arcade Cores (native) starting, scores in {}", scores_path.display());

        let mut pong = PongSession::new(settings.pong.clone(), FileStore::new(&scores_path));
        for _ in 0..cli.pong_ticks {
            drive_paddles(&mut pong);
            pong.update(PONG_STEP_MS);
        }
        let state = pong.state();
        log::info!(
            "Pong: {} - {} after {} ticks (level {}, best total {})",
            state.left_score,
            state.right_score,
            state.ticks,
            state.speed_level + 1,
            pong.best_total()
        );

        let mut snake = SnakeSession::new(
            settings.snake.clone(),
            settings.progression.clone(),
            FileStore::new(&scores_path),
            seed,
        );
        let mut clock_ms = 0.0;
        let mut ticks = 0;
        while ticks < cli.snake_ticks && !snake.state().is_over() {
            if let Some(direction) = choose_direction(snake.state()) {
                snake.set_direction(direction);
            }
            clock_ms += snake.tick_interval_ms();
            let report = snake.tick(clock_ms);
            if let Some(kind) = report.ate {
                log::debug!("Snake ate: {} (combo {})", kind.event_label(), report.combo);
            }
            for event in &report.progress {
                log::debug!("Snake progression: {:?}", event);
            }
            ticks += 1;
        }
        let state = snake.state();
        log::info!(
            "Snake: score {} (level {}, length {}, board {}x{}) after {} ticks, best {}",
            state.score,
            state.level,
            state.len(),
            state.cols,
            state.rows,
            ticks,
            snake.best_score()
        );

        Ok(())
    }

    /// Each paddle chases the nearest ball heading its way
    fn drive_paddles(pong: &mut PongSession<FileStore>) {
        for side in [Side::Left, Side::Right] {
            let movement = paddle_intent(pong.state(), side);
            pong.set_move(side, movement);
        }
    }

    fn paddle_intent(state: &PongState, side: Side) -> PaddleMove {
        let (paddle_y, incoming) = match side {
            Side::Left => (state.left_y, -1.0),
            Side::Right => (state.right_y, 1.0),
        };
        let target = state
            .balls
            .iter()
            .filter(|ball| ball.vel.x * incoming > 0.0)
            .min_by(|a, b| {
                let da = if incoming < 0.0 { a.pos.x } else { state.width - a.pos.x };
                let db = if incoming < 0.0 { b.pos.x } else { state.width - b.pos.x };
                da.total_cmp(&db)
            });

        let Some(ball) = target else {
            return PaddleMove::Still;
        };
        let center = paddle_y + state.paddle_height / 2.0;
        let ball_center = ball.pos.y + state.ball_size / 2.0;
        if ball_center < center - 8.0 {
            PaddleMove::Up
        } else if ball_center > center + 8.0 {
            PaddleMove::Down
        } else {
            PaddleMove::Still
        }
    }

    /// Greedy: step toward the food, never into a wall or obstacle if avoidable
    fn choose_direction(state: &SnakeState) -> Option<Direction> {
        let head = state.head();
        let safe = |direction: Direction| {
            let cell = head.step(direction);
            direction != state.direction.opposite()
                && !hits_wall(cell, state.cols, state.rows)
                && !hits_obstacle(cell, &state.obstacles)
        };

        let mut preferred = Vec::with_capacity(4);
        if let Some(food) = state.food {
            if food.pos.x > head.x {
                preferred.push(Direction::Right);
            } else if food.pos.x < head.x {
                preferred.push(Direction::Left);
            }
            if food.pos.y > head.y {
                preferred.push(Direction::Down);
            } else if food.pos.y < head.y {
                preferred.push(Direction::Up);
            }
        }
        preferred.push(state.direction);
        preferred.extend([Direction::Up, Direction::Right, Direction::Down, Direction::Left]);

        preferred.into_iter().find(|d| safe(*d))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
