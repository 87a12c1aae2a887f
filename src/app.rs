//! Terminal shell: level menu, rounds and end screen
//!
//! Owns the terminal for the lifetime of the process and always restores it,
//! whether the session ends normally or with an error.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    style::ResetColor,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use glam::Vec2;

use casse_brique::GameConfig;
use casse_brique::input::{HeldKeys, InputEvent, Key};
use casse_brique::level::{CATALOGUE, LevelChoice, choice_for_key};
use casse_brique::renderer::{
    Canvas, TerminalPresenter, colors, draw_end_screen, draw_menu, draw_round, translate_event,
};
use casse_brique::sim::{DrawSource, RoundPhase, RoundState, seeded_draws, tick};

const MIN_COLS: u16 = 60;
const MIN_ROWS: u16 = 20;

/// Startup settings from the command line
pub struct Options {
    pub config: GameConfig,
    pub seed: u64,
    pub levels: Option<PathBuf>,
}

pub fn run(options: Options) -> Result<()> {
    let mut out = io::stdout();

    terminal::enable_raw_mode().context("could not switch the terminal to raw mode")?;
    // Key release events when the terminal can report them
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);

    let res = setup(&mut out, enhanced)
        .context("could not prepare the terminal")
        .and_then(|()| session(&options, enhanced));

    // restore
    if enhanced {
        let _ = execute!(out, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(
        out,
        EnableLineWrap,
        cursor::Show,
        LeaveAlternateScreen,
        ResetColor
    );
    let _ = terminal::disable_raw_mode();

    res
}

fn setup(out: &mut Stdout, enhanced: bool) -> io::Result<()> {
    execute!(
        out,
        EnterAlternateScreen,
        cursor::Hide,
        DisableLineWrap,
        terminal::Clear(terminal::ClearType::All)
    )?;
    if enhanced {
        execute!(
            out,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

/// Menu, round, end screen, repeated until the player quits
fn session(options: &Options, release_events: bool) -> Result<()> {
    let (cols, rows) = terminal::size().context("could not read the terminal size")?;
    if cols < MIN_COLS || rows < MIN_ROWS {
        bail!("terminal too small ({cols}x{rows}), need at least {MIN_COLS}x{MIN_ROWS}");
    }

    let config = &options.config;
    let mut screen = Screen::new(cols, rows, config);
    let mut draws = seeded_draws(options.seed);

    loop {
        let Some(choice) = menu(&mut screen, config)? else {
            return Ok(());
        };
        log::info!("Selected {}", choice.label());
        let bricks = choice.load(options.levels.as_deref(), config)?;

        let state = play_round(
            &mut screen,
            RoundState::new(config.clone(), bricks),
            &mut draws,
            release_events,
        )?;
        log::info!(
            "{} finished {:?} with {} bricks left",
            choice.label(),
            state.phase,
            state.bricks_left()
        );
        if state.phase == RoundPhase::Aborted {
            return Ok(());
        }
        if !end_screen(&mut screen, config, state.phase, state.score)? {
            return Ok(());
        }
    }
}

/// Canvas plus presenter, sized to the terminal
struct Screen {
    presenter: TerminalPresenter<Stdout>,
    canvas: Canvas,
    world: Vec2,
}

impl Screen {
    fn new(cols: u16, rows: u16, config: &GameConfig) -> Self {
        let presenter = TerminalPresenter::new(io::stdout(), cols, rows);
        let world = Vec2::new(config.screen_width, config.screen_height);
        let (w, h) = presenter.canvas_size();
        Self {
            presenter,
            canvas: Canvas::new(w, h, world),
            world,
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.presenter.resize(cols, rows);
        let (w, h) = self.presenter.canvas_size();
        self.canvas = Canvas::new(w, h, self.world);
    }

    fn show(&mut self, draw: impl FnOnce(&mut Canvas)) -> io::Result<()> {
        self.canvas.clear(colors::BACKGROUND);
        draw(&mut self.canvas);
        self.presenter.present(&self.canvas)
    }
}

/// Wait for a level choice; `None` when the player quits
fn menu(screen: &mut Screen, config: &GameConfig) -> Result<Option<&'static LevelChoice>> {
    screen.show(|c| draw_menu(c, config, &CATALOGUE))?;
    loop {
        let ev = event::read()?;
        if let Event::Resize(cols, rows) = ev {
            screen.resize(cols, rows);
            screen.show(|c| draw_menu(c, config, &CATALOGUE))?;
            continue;
        }
        match translate_event(&ev) {
            Some(InputEvent::Quit) => return Ok(None),
            Some(InputEvent::KeyDown(Key::Digit(key))) => {
                if let Some(choice) = choice_for_key(key) {
                    return Ok(Some(choice));
                }
            }
            _ => {}
        }
    }
}

/// Run one round at the configured frame rate until it is over
fn play_round(
    screen: &mut Screen,
    mut state: RoundState,
    draws: &mut impl DrawSource,
    release_events: bool,
) -> Result<RoundState> {
    let budget = state.config.frame_budget();
    let mut keys = if release_events {
        HeldKeys::with_release_events()
    } else {
        HeldKeys::default()
    };

    while !state.phase.is_over() {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            if let Event::Resize(cols, rows) = ev {
                screen.resize(cols, rows);
            } else if let Some(input) = translate_event(&ev) {
                keys.apply(input, Instant::now());
            }
        }

        tick(&mut state, &keys.tick_input(Instant::now()), draws);
        screen.show(|c| draw_round(c, &state))?;

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }

    Ok(state)
}

/// Show the result; `true` to play again, `false` to quit
fn end_screen(screen: &mut Screen, config: &GameConfig, phase: RoundPhase, score: i64) -> Result<bool> {
    screen.show(|c| draw_end_screen(c, config, phase, score))?;
    loop {
        let ev = event::read()?;
        if let Event::Resize(cols, rows) = ev {
            screen.resize(cols, rows);
            screen.show(|c| draw_end_screen(c, config, phase, score))?;
            continue;
        }
        match translate_event(&ev) {
            Some(InputEvent::Quit) => return Ok(false),
            Some(InputEvent::KeyDown(Key::Confirm)) => return Ok(true),
            _ => {}
        }
    }
}
