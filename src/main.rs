//! Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use crossterm::event::KeyCode;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::{GameConfig, LogConfig};
use domain::cell::Direction;
use domain::constants::TICK_INTERVAL;
use sim::event::GameEvent;
use sim::game::GameState;
use sim::ticker::Ticker;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::menu::{Menu, MenuItem};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
const MESSAGE_TIME: Duration = Duration::from_secs(2);

fn main() -> Result<()> {
    let (config, config_err) = match GameConfig::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (GameConfig::default(), Some(e)),
    };

    if let Err(e) = init_tracing(&config.log) {
        eprintln!("Warning: logging disabled: {e:#}");
    }
    if let Some(e) = config_err {
        warn!(error = %e, "config.toml ignored, using defaults");
        eprintln!("Warning: {e}");
    }
    info!(source = ?config.source, "starting");

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        let _ = renderer.cleanup();
        return Err(anyhow!(e).context("terminal init failed"));
    }

    let mut shell = Shell::new(Instant::now());
    let result = game_loop(&mut shell, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    result?;

    info!(score = shell.game.score(), high_score = shell.game.high_score(), "exiting");
    println!();
    println!("Thanks for playing Snake!");
    println!("Score: {}   High Score: {}", shell.game.score(), shell.game.high_score());
    Ok(())
}

/// Log to a file: the terminal belongs to the renderer.
/// `RUST_LOG` overrides the configured level. No file configured, no logging.
fn init_tracing(cfg: &LogConfig) -> Result<()> {
    let Some(path) = &cfg.file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("tracing init: {e}"))
}

fn game_loop(shell: &mut Shell, renderer: &mut Renderer, config: &GameConfig) -> Result<()> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    if gp.connected {
        info!("gamepad connected");
    }

    loop {
        kb.drain_events().context("reading terminal input")?;
        gp.update();

        if kb.ctrl_c_pressed() {
            info!("quit via ctrl-c");
            break;
        }

        let now = Instant::now();
        if shell.handle_input(&kb, &gp, now) == Flow::Quit {
            break;
        }

        if shell.ticker.poll(now) {
            let events = shell.game.tick();
            shell.apply_events(&events, now);
        }
        shell.expire_message(now);

        renderer
            .render(&shell.game, &shell.menu, shell.message())
            .context("drawing frame")?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_MENU: &[KeyCode] = &[KeyCode::Char('m'), KeyCode::Char('M'), KeyCode::F(10), KeyCode::Esc];
const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];

fn turn_for_key(code: KeyCode) -> Option<Direction> {
    if KEYS_UP.contains(&code) {
        Some(Direction::Up)
    } else if KEYS_DOWN.contains(&code) {
        Some(Direction::Down)
    } else if KEYS_LEFT.contains(&code) {
        Some(Direction::Left)
    } else if KEYS_RIGHT.contains(&code) {
        Some(Direction::Right)
    } else {
        None
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Flow {
    Continue,
    Quit,
}

/// Everything the loop owns besides the terminal and input devices.
struct Shell {
    game: GameState,
    ticker: Ticker,
    menu: Menu,
    message: Option<(String, Instant)>,
}

impl Shell {
    fn new(now: Instant) -> Self {
        Shell {
            game: GameState::new(),
            ticker: Ticker::new(TICK_INTERVAL, now),
            menu: Menu::new(),
            message: None,
        }
    }

    fn handle_input(&mut self, kb: &InputState, gp: &GamepadState, now: Instant) -> Flow {
        if self.menu.is_open() {
            return self.handle_menu(kb, gp, now);
        }

        if kb.any_pressed(KEYS_MENU) || gp.menu_pressed() {
            debug!(was_running = self.ticker.is_running(), "menu opened");
            self.menu.open();
            self.ticker.stop();
            return Flow::Continue;
        }
        if kb.any_pressed(KEYS_RESTART) || gp.restart_pressed() {
            self.restart(now);
            return Flow::Continue;
        }

        for code in kb.presses() {
            if let Some(dir) = turn_for_key(code) {
                self.game.set_direction(dir);
            }
        }
        if let Some(dir) = gp.turn_pressed() {
            self.game.set_direction(dir);
        }
        Flow::Continue
    }

    fn handle_menu(&mut self, kb: &InputState, gp: &GamepadState, now: Instant) -> Flow {
        if kb.any_pressed(KEYS_CONFIRM) || gp.confirm_pressed() {
            let item = self.menu.select();
            info!(?item, "menu action");
            return match item {
                MenuItem::Restart => {
                    self.restart(now);
                    Flow::Continue
                }
                MenuItem::Quit => Flow::Quit,
            };
        }
        if kb.any_pressed(KEYS_MENU) || gp.cancel_pressed() || gp.menu_pressed() {
            debug!("menu closed");
            self.menu.close();
            if self.game.is_alive() {
                self.ticker.start(now);
            }
            return Flow::Continue;
        }

        let up = kb.any_pressed(KEYS_UP) || gp.turn_pressed() == Some(Direction::Up);
        let down = kb.any_pressed(KEYS_DOWN) || gp.turn_pressed() == Some(Direction::Down);
        if up {
            self.menu.up();
        } else if down {
            self.menu.down();
        }
        Flow::Continue
    }

    fn restart(&mut self, now: Instant) {
        self.menu.close();
        let event = self.game.restart();
        self.ticker.restart(now);
        self.apply_events(&[event], now);
    }

    fn apply_events(&mut self, events: &[GameEvent], now: Instant) {
        for event in events {
            match *event {
                GameEvent::FoodEaten { at, score } => {
                    debug!(x = at.x, y = at.y, score, "food eaten");
                }
                GameEvent::HighScore { score } => {
                    info!(score, "new high score");
                    self.set_message("New high score!", now);
                }
                GameEvent::Crashed { score, .. } => {
                    self.ticker.stop();
                    self.set_message(&format!("Crashed with {} points", score), now);
                }
                GameEvent::Restarted => {
                    self.message = None;
                }
            }
        }
    }

    fn set_message(&mut self, text: &str, now: Instant) {
        self.message = Some((text.to_string(), now + MESSAGE_TIME));
    }

    fn expire_message(&mut self, now: Instant) {
        if matches!(&self.message, Some((_, until)) if now >= *until) {
            self.message = None;
        }
    }

    fn message(&self) -> &str {
        self.message.as_ref().map_or("", |(text, _)| text.as_str())
    }
}
