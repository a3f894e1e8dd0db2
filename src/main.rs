pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use mindgym::{
    app_dirs::AppDirs,
    arcade::ActiveGame,
    config::{Config, ConfigStore, FileConfigStore},
    games::{QuizAction, Token},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    scoreboard::Scoreboard,
    GameKind, HostEvent, Phase,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    path::PathBuf,
    sync::{
        mpsc::{self, Receiver, Sender},
        Mutex,
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// cognitive mini-games in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Six short brain-training games (attention, memory, hemispheric coordination, reading speed, logic and critical thinking) with a per-run scoreboard."
)]
pub struct Cli {
    /// jump straight into one game instead of the menu
    #[clap(short = 'g', long, value_enum)]
    game: Option<GameKind>,

    /// seed the random source so every round is reproducible
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// config file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write the effective config to the config file and exit
    #[clap(long)]
    save_config: bool,

    /// file to write logs to (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    fn effective_config(&self, store: &FileConfigStore) -> Config {
        let mut config = store.load();
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Playing,
    Results,
}

pub struct App {
    pub config: Config,
    pub state: AppState,
    pub menu_index: usize,
    pub game: Option<ActiveGame>,
    /// Highlighted cell on grid games.
    pub cursor: usize,
    pub scoreboard: Scoreboard,
    pub last_result: Option<(GameKind, u32)>,
    host_tx: Sender<HostEvent>,
    host_rx: Receiver<HostEvent>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (host_tx, host_rx) = mpsc::channel();
        Self {
            config,
            state: AppState::Menu,
            menu_index: 0,
            game: None,
            cursor: 0,
            scoreboard: Scoreboard::new(),
            last_result: None,
            host_tx,
            host_rx,
        }
    }

    pub fn selected_kind(&self) -> GameKind {
        GameKind::ALL[self.menu_index % GameKind::ALL.len()]
    }

    pub fn open(&mut self, kind: GameKind) {
        if let Some(previous) = self.game.take() {
            // a finished session has already reported; this only releases it
            if previous.phase() != Phase::Finished {
                previous.close();
            }
        }
        self.drain_host_events();
        self.game = Some(ActiveGame::launch(kind, &self.config, self.host_tx.clone()));
        self.cursor = 0;
        self.state = AppState::Playing;
    }

    pub fn close_game(&mut self) {
        if let Some(game) = self.game.take() {
            game.close();
        }
        self.drain_host_events();
        self.state = AppState::Menu;
    }

    pub fn on_tick(&mut self, elapsed_ms: u32) {
        if let Some(game) = self.game.as_mut() {
            game.advance(elapsed_ms);
        }
        self.drain_host_events();
    }

    fn drain_host_events(&mut self) {
        while let Ok(event) = self.host_rx.try_recv() {
            match event {
                HostEvent::Completed { kind, score } => {
                    self.scoreboard.record(kind, score);
                    self.last_result = Some((kind, score));
                    self.state = AppState::Results;
                    info!(%kind, score, "result recorded");
                }
                HostEvent::Closed(kind) => {
                    info!(%kind, "game closed");
                    self.state = AppState::Menu;
                }
            }
        }
    }

    fn move_menu(&mut self, down: bool) {
        let len = GameKind::ALL.len();
        self.menu_index = if down {
            (self.menu_index + 1) % len
        } else {
            (self.menu_index + len - 1) % len
        };
    }

    fn move_cursor(&mut self, code: KeyCode, columns: usize, len: usize) {
        if len == 0 || columns == 0 {
            return;
        }
        let cursor = self.cursor.min(len - 1);
        self.cursor = match code {
            KeyCode::Left if cursor % columns > 0 => cursor - 1,
            KeyCode::Right if cursor % columns + 1 < columns && cursor + 1 < len => cursor + 1,
            KeyCode::Up if cursor >= columns => cursor - columns,
            KeyCode::Down if cursor + columns < len => cursor + columns,
            _ => cursor,
        };
    }

    /// Route a key to whatever the current screen does with it.
    pub fn on_key(&mut self, key: KeyEvent) {
        match self.state {
            AppState::Menu => match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.move_menu(false),
                KeyCode::Down | KeyCode::Char('j') => self.move_menu(true),
                KeyCode::Enter | KeyCode::Char(' ') => self.open(self.selected_kind()),
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Enter | KeyCode::Char('r') => {
                    if let Some((kind, _)) = self.last_result {
                        self.open(kind);
                    }
                }
                KeyCode::Esc | KeyCode::Char('m') | KeyCode::Backspace => {
                    self.game = None;
                    self.state = AppState::Menu;
                }
                _ => {}
            },
            AppState::Playing => self.on_game_key(key),
        }
        self.drain_host_events();
    }

    fn on_game_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.close_game();
            return;
        }
        let Some(game) = self.game.as_mut() else {
            self.state = AppState::Menu;
            return;
        };

        if game.phase() == Phase::Idle {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                game.start();
            }
            return;
        }

        let confirm = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        let digit = match key.code {
            KeyCode::Char(c) => c.to_digit(10).map(|d| d as usize),
            _ => None,
        };

        // (columns, cells) of the grid the cursor walks over
        let mut grid = None;
        match game {
            ActiveGame::Attention(s) => {
                if let Some(round) = s.round() {
                    grid = Some((ui::SHAPE_COLUMNS, round.cells.len()));
                }
                if confirm {
                    s.submit_action(self.cursor);
                }
            }
            ActiveGame::Memory(s) => {
                if let Some(deck) = s.round() {
                    grid = Some((ui::CARD_COLUMNS, deck.cards.len()));
                }
                if confirm {
                    s.submit_action(self.cursor);
                }
            }
            ActiveGame::Reading(s) => {
                let picked = s.round().and_then(|t| {
                    grid = Some((t.side, t.numbers.len()));
                    t.numbers.get(self.cursor).copied()
                });
                if let (true, Some(number)) = (confirm, picked) {
                    s.submit_action(number);
                }
            }
            ActiveGame::Hemispheres(s) => match key.code {
                KeyCode::Char('y') | KeyCode::Left => {
                    s.submit_action(true);
                }
                KeyCode::Char('n') | KeyCode::Right => {
                    s.submit_action(false);
                }
                _ => {}
            },
            ActiveGame::Logic(s) => {
                if key.code == KeyCode::Char('f') {
                    s.finish();
                } else if let Some(n) = digit.filter(|&n| n > 0) {
                    let pick: Option<Token> =
                        s.round().and_then(|p| p.options.get(n - 1).copied());
                    if let Some(token) = pick {
                        s.submit_action(token);
                    }
                }
            }
            ActiveGame::Thinking(s) => {
                if confirm {
                    s.submit_action(QuizAction::Continue);
                } else if let Some(n) = digit.filter(|&n| n > 0) {
                    s.submit_action(QuizAction::Answer(n - 1));
                }
            }
        }

        if let Some((columns, len)) = grid {
            self.move_cursor(key.code, columns, len);
            // grids grow on level up; keep the cursor on the board
            self.cursor = self.cursor.min(len.saturating_sub(1));
        }
    }
}

fn init_logging(path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let Some(path) = path.or_else(AppDirs::log_path) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let store = cli.config_store();
    let config = cli.effective_config(&store);

    if cli.save_config {
        store.save(&config)?;
        println!("{}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    info!(seed = ?config.seed, "starting mindgym");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    if let Some(kind) = cli.game {
        app.open(kind);
    }
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            GameEvent::Tick => app.on_tick(runner.tick_ms()),
            GameEvent::Resize => {}
            GameEvent::Key(key) => {
                let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c');
                let quit = app.state == AppState::Menu
                    && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'));
                if ctrl_c || quit {
                    break;
                }
                app.on_key(key);
            }
        }
    }

    if let Some(game) = app.game.take() {
        if game.phase() != Phase::Finished {
            game.close();
        }
    }
    Ok(())
}
