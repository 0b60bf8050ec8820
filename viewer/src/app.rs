use crate::settings::Settings;
use crate::tui;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use sim::{World, WorldConfig};
use std::io;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Driver state: the world plus the pause and quit flags the keyboard controls
pub struct App {
    world: World,
    paused: bool,
    quit: bool,
}

impl App {
    pub fn new(world: World) -> Self {
        Self {
            world,
            paused: false,
            quit: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Advance one frame: a single tick, or nothing while paused
    pub fn update(&mut self) {
        if !self.paused {
            self.world.tick();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _)
            | (KeyCode::Char('q'), _)
            | (KeyCode::Char('Q'), _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            (KeyCode::Char(' '), _) => {
                self.paused = !self.paused;
                tracing::debug!(paused = self.paused, "toggled pause");
            }
            (KeyCode::Char('r') | KeyCode::Char('R'), _) => {
                self.world.reset();
            }
            _ => {}
        }
    }
}

/// Open the terminal UI and drive the world until the user quits
pub async fn run(settings: &Settings) -> Result<()> {
    let config = WorldConfig::default();
    let world = match settings.seed {
        Some(seed) => World::with_seed(config, seed)?,
        None => World::new(config)?,
    };
    let mut app = App::new(world);

    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to build terminal backend")?;
    terminal.hide_cursor().ok();

    let result = run_event_loop(&mut app, &mut terminal, settings.frame_interval()).await;

    terminal.show_cursor().ok();
    if let Err(err) = disable_raw_mode() {
        tracing::error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
        tracing::error!(?err, "failed to leave alternate screen");
    }

    let stats = app.world().stats();
    tracing::info!(
        generation = stats.generation,
        prey = stats.prey,
        predators = stats.predators,
        max_prey = stats.max_prey,
        max_predators = stats.max_predators,
        "Viewer closed"
    );

    result
}

/// One tick then one render per frame, never overlapping
async fn run_event_loop<B: Backend>(
    app: &mut App,
    terminal: &mut Terminal<B>,
    frame_interval: Duration,
) -> Result<()> {
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        frames.tick().await;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        if app.should_quit() {
            break;
        }

        app.update();
        terminal.draw(|frame| tui::draw(frame, app))?;
    }

    Ok(())
}
