use std::mem;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::characters::{self, Character};
use crate::difficulty::Difficulty;
use crate::input::{Direction, HeldKeys};
use crate::scores::{ScoreEntry, ScoreError, ScoreRepository, MAX_NAME_LEN, TOP_SCORES};
use crate::session::{Rules, SessionContext, TickOutcome};

/// Player intent, decoded from a key press for the current screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Confirm,
    Back,
    Pause,
    Letter(char),
    Backspace,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Play,
    Scores,
    Quit,
}

impl MenuItem {
    pub fn all() -> &'static [MenuItem] {
        &[MenuItem::Play, MenuItem::Scores, MenuItem::Quit]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Play => "Play",
            MenuItem::Scores => "Scoreboard",
            MenuItem::Quit => "Quit",
        }
    }

    fn index(&self) -> usize {
        match self {
            MenuItem::Play => 0,
            MenuItem::Scores => 1,
            MenuItem::Quit => 2,
        }
    }

    fn step(&self, down: bool) -> Self {
        let items = Self::all();
        let n = items.len();
        let idx = if down { self.index() + 1 } else { self.index() + n - 1 };
        items[idx % n]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PauseItem {
    Resume,
    Quit,
}

impl PauseItem {
    pub fn label(&self) -> &'static str {
        match self {
            PauseItem::Resume => "Resume",
            PauseItem::Quit => "Quit game",
        }
    }

    fn toggle(&self) -> Self {
        match self {
            PauseItem::Resume => PauseItem::Quit,
            PauseItem::Quit => PauseItem::Resume,
        }
    }
}

pub struct GameOver {
    pub difficulty: Difficulty,
    pub character: Character,
    pub elapsed: Duration,
    pub name: String,
    /// Feedback from the last submit attempt.
    pub message: Option<String>,
}

pub struct Scoreboard {
    pub difficulty: Difficulty,
    pub entries: Vec<ScoreEntry>,
    pub error: Option<String>,
}

pub enum Screen {
    Menu { cursor: MenuItem },
    CharacterSelect { cursor: usize },
    DifficultySelect { character: Character, cursor: Difficulty },
    Tutorial { character: Character, difficulty: Difficulty },
    Playing(SessionContext),
    Paused { session: SessionContext, cursor: PauseItem },
    GameOver(GameOver),
    Scoreboard(Scoreboard),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Menu,
    CharacterSelect,
    DifficultySelect,
    Tutorial,
    Playing,
    Paused,
    GameOver,
    Scoreboard,
}

impl Screen {
    fn menu() -> Self {
        Screen::Menu {
            cursor: MenuItem::Play,
        }
    }

    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Menu { .. } => ScreenKind::Menu,
            Screen::CharacterSelect { .. } => ScreenKind::CharacterSelect,
            Screen::DifficultySelect { .. } => ScreenKind::DifficultySelect,
            Screen::Tutorial { .. } => ScreenKind::Tutorial,
            Screen::Playing(_) => ScreenKind::Playing,
            Screen::Paused { .. } => ScreenKind::Paused,
            Screen::GameOver(_) => ScreenKind::GameOver,
            Screen::Scoreboard(_) => ScreenKind::Scoreboard,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub rules: Rules,
    scores: Box<dyn ScoreRepository>,
    rng: StdRng,
    held: HeldKeys,
    tick: u64,
}

impl App {
    pub fn new(scores: Box<dyn ScoreRepository>, rules: Rules, rng: StdRng, held: HeldKeys) -> Self {
        Self {
            should_quit: false,
            screen: Screen::menu(),
            rules,
            scores,
            rng,
            held,
            tick: 0,
        }
    }

    pub fn on_tick(&mut self, dt: Duration) {
        let held = self.held.sample(self.tick);
        self.tick += 1;

        let Screen::Playing(session) = &mut self.screen else {
            return;
        };
        if session.tick(dt, held) == TickOutcome::Hit {
            let over = GameOver {
                difficulty: session.difficulty,
                character: session.character,
                elapsed: session.clock.elapsed(),
                name: String::new(),
                message: None,
            };
            info!(
                tier = over.difficulty.tag(),
                seconds = over.elapsed.as_secs(),
                "session over"
            );
            self.held.clear();
            self.set_screen(ScreenKind::Playing, Screen::GameOver(over));
        }
    }

    pub fn on_focus_lost(&mut self) {
        self.held.clear();
        if matches!(self.screen, Screen::Playing(_)) {
            self.apply(Command::Pause);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.apply(Command::Quit);
            return;
        }

        // Arrows steer the avatar while playing; everywhere else they navigate
        if matches!(self.screen, Screen::Playing(_)) {
            if let Some(dir) = Direction::from_key(key.code) {
                match key.kind {
                    KeyEventKind::Release => self.held.release(dir),
                    _ => self.held.press(dir, self.tick),
                }
                return;
            }
        }

        if key.kind == KeyEventKind::Release {
            return;
        }
        if let Some(cmd) = self.command_for(key) {
            self.apply(cmd);
        }
    }

    fn command_for(&self, key: KeyEvent) -> Option<Command> {
        if let Some(dir) = Direction::from_key(key.code) {
            return Some(Command::Move(dir));
        }
        let entering_name = matches!(self.screen, Screen::GameOver(_));
        match key.code {
            KeyCode::Enter => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Back),
            KeyCode::Backspace => Some(Command::Backspace),
            KeyCode::Char(c) if entering_name => Some(Command::Letter(c)),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
            KeyCode::Char(' ') => Some(Command::Confirm),
            _ => None,
        }
    }

    /// Run one state transition.
    pub fn apply(&mut self, cmd: Command) {
        if cmd == Command::Quit {
            info!(from = ?self.screen.kind(), "quit requested");
            self.should_quit = true;
            return;
        }

        let current = mem::replace(&mut self.screen, Screen::menu());
        let from = current.kind();
        let next = match current {
            Screen::Menu { cursor } => self.on_menu(cursor, cmd),
            Screen::CharacterSelect { cursor } => match cmd {
                Command::Move(dir) => Screen::CharacterSelect {
                    cursor: characters::move_cursor(cursor, dir),
                },
                Command::Confirm => Screen::DifficultySelect {
                    character: Character::from_index(cursor).unwrap_or_default(),
                    cursor: Difficulty::Easy,
                },
                Command::Back => Screen::menu(),
                _ => Screen::CharacterSelect { cursor },
            },
            Screen::DifficultySelect { character, cursor } => match cmd {
                Command::Move(Direction::Up | Direction::Left) => Screen::DifficultySelect {
                    character,
                    cursor: cursor.prev(),
                },
                Command::Move(Direction::Down | Direction::Right) => Screen::DifficultySelect {
                    character,
                    cursor: cursor.next(),
                },
                Command::Confirm => Screen::Tutorial {
                    character,
                    difficulty: cursor,
                },
                Command::Back => Screen::CharacterSelect {
                    cursor: character.index(),
                },
                _ => Screen::DifficultySelect { character, cursor },
            },
            Screen::Tutorial {
                character,
                difficulty,
            } => match cmd {
                Command::Confirm => self.start_session(character, difficulty),
                Command::Back => Screen::DifficultySelect {
                    character,
                    cursor: difficulty,
                },
                _ => Screen::Tutorial {
                    character,
                    difficulty,
                },
            },
            Screen::Playing(session) => match cmd {
                Command::Back | Command::Pause => {
                    self.held.clear();
                    Screen::Paused {
                        session,
                        cursor: PauseItem::Resume,
                    }
                }
                _ => Screen::Playing(session),
            },
            Screen::Paused { session, cursor } => match cmd {
                Command::Back | Command::Pause => Screen::Playing(session),
                Command::Move(Direction::Up | Direction::Down) => Screen::Paused {
                    session,
                    cursor: cursor.toggle(),
                },
                Command::Confirm => match cursor {
                    PauseItem::Resume => Screen::Playing(session),
                    PauseItem::Quit => {
                        self.should_quit = true;
                        Screen::Paused { session, cursor }
                    }
                },
                _ => Screen::Paused { session, cursor },
            },
            Screen::GameOver(over) => self.on_game_over(over, cmd),
            Screen::Scoreboard(board) => match cmd {
                Command::Move(Direction::Left | Direction::Up) => {
                    self.load_scoreboard(board.difficulty.prev())
                }
                Command::Move(Direction::Right | Direction::Down) => {
                    self.load_scoreboard(board.difficulty.next())
                }
                Command::Confirm | Command::Back => Screen::menu(),
                _ => Screen::Scoreboard(board),
            },
        };
        self.set_screen(from, next);
    }

    fn set_screen(&mut self, from: ScreenKind, next: Screen) {
        let to = next.kind();
        if from != to {
            debug!(?from, ?to, "screen transition");
        }
        self.screen = next;
    }

    fn on_menu(&mut self, cursor: MenuItem, cmd: Command) -> Screen {
        match cmd {
            Command::Move(Direction::Up) => Screen::Menu {
                cursor: cursor.step(false),
            },
            Command::Move(Direction::Down) => Screen::Menu {
                cursor: cursor.step(true),
            },
            Command::Confirm => match cursor {
                MenuItem::Play => Screen::CharacterSelect {
                    cursor: Character::default().index(),
                },
                MenuItem::Scores => self.load_scoreboard(Difficulty::Easy),
                MenuItem::Quit => {
                    self.should_quit = true;
                    Screen::Menu { cursor }
                }
            },
            _ => Screen::Menu { cursor },
        }
    }

    fn start_session(&mut self, character: Character, difficulty: Difficulty) -> Screen {
        let session = SessionContext::start(difficulty, character, self.rules, &mut self.rng);
        info!(
            tier = difficulty.tag(),
            balls = session.balls.len(),
            character = character.name(),
            "session started"
        );
        self.held.clear();
        Screen::Playing(session)
    }

    fn load_scoreboard(&mut self, difficulty: Difficulty) -> Screen {
        let (entries, error) = match self.scores.top_scores(difficulty, TOP_SCORES) {
            Ok(entries) => (entries, None),
            Err(e) => {
                warn!(tier = difficulty.tag(), error = %e, "cannot load scores");
                (Vec::new(), Some(e.to_string()))
            }
        };
        Screen::Scoreboard(Scoreboard {
            difficulty,
            entries,
            error,
        })
    }

    fn on_game_over(&mut self, mut over: GameOver, cmd: Command) -> Screen {
        match cmd {
            Command::Letter(c) => {
                if c.is_ascii_alphabetic() && over.name.chars().count() < MAX_NAME_LEN {
                    over.name.push(c);
                }
            }
            Command::Backspace => {
                over.name.pop();
            }
            Command::Back => return Screen::menu(),
            Command::Confirm => {
                if over.name.trim().is_empty() {
                    over.message = Some("Type a name first, or press Esc to skip".to_string());
                    return Screen::GameOver(over);
                }
                let seconds = i64::try_from(over.elapsed.as_secs()).unwrap_or(i64::MAX);
                match self.scores.insert(&over.name, seconds, over.difficulty) {
                    Ok(()) => return Screen::menu(),
                    Err(e @ ScoreError::Unavailable(_)) => {
                        warn!(error = %e, "score not saved");
                        over.message = Some(format!("{e}. Enter to retry, Esc to skip"));
                    }
                    Err(e @ ScoreError::Validation(_)) => {
                        over.message = Some(e.to_string());
                    }
                }
            }
            _ => {}
        }
        Screen::GameOver(over)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Ball;
    use crate::scores::testing::MemoryScores;
    use rand::SeedableRng;
    use std::rc::Rc;

    const TICK: Duration = Duration::from_millis(16);

    // Shares the in-memory store with the app so tests can inspect it
    struct Shared(Rc<MemoryScores>);

    impl ScoreRepository for Shared {
        fn ensure_store(&self) -> Result<(), ScoreError> {
            self.0.ensure_store()
        }
        fn top_scores(&self, d: Difficulty, limit: usize) -> Result<Vec<ScoreEntry>, ScoreError> {
            self.0.top_scores(d, limit)
        }
        fn insert(&self, name: &str, seconds: i64, d: Difficulty) -> Result<(), ScoreError> {
            self.0.insert(name, seconds, d)
        }
    }

    fn app_with(store: Rc<MemoryScores>) -> App {
        App::new(
            Box::new(Shared(store)),
            Rules::default(),
            StdRng::seed_from_u64(1),
            HeldKeys::new(Some(0)),
        )
    }

    fn app() -> App {
        app_with(Rc::new(MemoryScores::default()))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session(app: &mut App) -> &mut SessionContext {
        match &mut app.screen {
            Screen::Playing(s) => s,
            _ => panic!("not playing"),
        }
    }

    /// Menu -> character -> Easy -> tutorial -> playing, with balls parked
    /// well away from the player.
    fn start_easy(app: &mut App) {
        for _ in 0..4 {
            app.apply(Command::Confirm);
        }
        let s = session(app);
        assert_eq!(s.difficulty, Difficulty::Easy);
        assert_eq!(s.balls.len(), 3);
        for ball in s.balls.active_mut() {
            *ball = Ball { x: 60, y: 60, dx: 3, dy: 3 };
        }
    }

    fn play_until_game_over(app: &mut App) {
        start_easy(app);
        session(app).balls.active_mut()[0] = Ball { x: 397, y: 297, dx: 3, dy: 3 };
        app.on_tick(TICK);
        assert_eq!(app.screen.kind(), ScreenKind::GameOver);
    }

    const COMMANDS: [Command; 9] = [
        Command::Move(Direction::Up),
        Command::Move(Direction::Down),
        Command::Move(Direction::Left),
        Command::Move(Direction::Right),
        Command::Confirm,
        Command::Back,
        Command::Pause,
        Command::Letter('a'),
        Command::Backspace,
    ];

    #[test]
    fn test_menu_reaches_only_character_select_and_scoreboard() {
        for start in MenuItem::all() {
            for cmd in COMMANDS {
                let mut app = app();
                app.screen = Screen::Menu { cursor: *start };
                app.apply(cmd);
                let kind = app.screen.kind();
                assert!(
                    matches!(
                        kind,
                        ScreenKind::Menu | ScreenKind::CharacterSelect | ScreenKind::Scoreboard
                    ),
                    "{cmd:?} from {start:?} reached {kind:?}"
                );
            }
        }
    }

    #[test]
    fn test_playing_only_entered_via_tutorial_or_resume() {
        let cmds = [
            Command::Move(Direction::Down),
            Command::Confirm,
            Command::Back,
            Command::Pause,
        ];
        let mut reached_playing = false;
        let mut reached_tutorial = false;
        for seq in 0..cmds.len().pow(6) {
            let mut app = app();
            let mut code = seq;
            for _ in 0..6 {
                let cmd = cmds[code % cmds.len()];
                code /= cmds.len();
                let before = app.screen.kind();
                app.apply(cmd);
                let after = app.screen.kind();
                if before == after {
                    continue;
                }
                match after {
                    ScreenKind::Playing => {
                        reached_playing = true;
                        assert!(matches!(before, ScreenKind::Tutorial | ScreenKind::Paused));
                    }
                    ScreenKind::Tutorial => {
                        reached_tutorial = true;
                        assert_eq!(before, ScreenKind::DifficultySelect);
                    }
                    ScreenKind::Paused => assert_eq!(before, ScreenKind::Playing),
                    _ => {}
                }
            }
        }
        assert!(reached_playing && reached_tutorial);
    }

    #[test]
    fn test_back_edges() {
        let mut app = app();
        app.apply(Command::Confirm);
        app.apply(Command::Confirm);
        app.apply(Command::Move(Direction::Down));
        app.apply(Command::Confirm);
        assert!(matches!(
            app.screen,
            Screen::Tutorial {
                difficulty: Difficulty::Medium,
                ..
            }
        ));
        app.apply(Command::Back);
        assert!(matches!(
            app.screen,
            Screen::DifficultySelect {
                cursor: Difficulty::Medium,
                ..
            }
        ));
        app.apply(Command::Back);
        assert_eq!(app.screen.kind(), ScreenKind::CharacterSelect);
        app.apply(Command::Back);
        assert_eq!(app.screen.kind(), ScreenKind::Menu);
    }

    #[test]
    fn test_character_choice_reaches_session() {
        let mut app = app();
        app.apply(Command::Confirm);
        app.apply(Command::Move(Direction::Right));
        app.apply(Command::Confirm);
        app.apply(Command::Confirm);
        app.apply(Command::Confirm);
        assert_eq!(session(&mut app).character.name(), "Raze");
    }

    #[test]
    fn test_one_tick_moves_player_along_held_keys() {
        let mut app = app();
        start_easy(&mut app);
        app.on_key(press(KeyCode::Right));
        app.on_key(press(KeyCode::Up));
        app.on_tick(TICK);

        let s = session(&mut app);
        assert_eq!((s.player.x, s.player.y), (380, 270));
        assert_eq!(s.clock.elapsed(), TICK);

        // The hold window is zero ticks, so nothing moves next tick
        app.on_tick(TICK);
        let s = session(&mut app);
        assert_eq!((s.player.x, s.player.y), (380, 270));
    }

    #[test]
    fn test_collision_ends_session_with_elapsed_ticks() {
        let mut app = app();
        start_easy(&mut app);
        for _ in 0..9 {
            app.on_tick(TICK);
            for ball in session(&mut app).balls.active_mut() {
                *ball = Ball { x: 60, y: 60, dx: 3, dy: 3 };
            }
        }
        // Lands on the player's centre after this tick's step
        session(&mut app).balls.active_mut()[2] = Ball { x: 397, y: 297, dx: 3, dy: 3 };
        app.on_tick(TICK);

        match &app.screen {
            Screen::GameOver(over) => {
                assert_eq!(over.elapsed, TICK * 10);
                assert_eq!(over.difficulty, Difficulty::Easy);
            }
            _ => panic!("expected game over"),
        }
    }

    #[test]
    fn test_pause_freezes_clock_and_balls() {
        let mut app = app();
        start_easy(&mut app);
        app.on_key(press(KeyCode::Esc));
        app.on_tick(TICK);
        app.on_tick(TICK);

        let Screen::Paused { session, .. } = &app.screen else {
            panic!("expected pause");
        };
        assert_eq!(session.clock.elapsed(), Duration::ZERO);
        assert_eq!(session.balls.active()[0], Ball { x: 60, y: 60, dx: 3, dy: 3 });

        app.on_key(press(KeyCode::Esc));
        assert_eq!(app.screen.kind(), ScreenKind::Playing);
        app.on_tick(TICK);
        assert_eq!(session_clock(&mut app), TICK);
    }

    fn session_clock(app: &mut App) -> Duration {
        session(app).clock.elapsed()
    }

    #[test]
    fn test_quit_from_pause_menu() {
        let mut app = app();
        start_easy(&mut app);
        app.apply(Command::Pause);
        app.apply(Command::Move(Direction::Down));
        app.apply(Command::Confirm);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let mut app = app();
        play_until_game_over(&mut app);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    const ALL_SCREENS: [ScreenKind; 8] = [
        ScreenKind::Menu,
        ScreenKind::CharacterSelect,
        ScreenKind::DifficultySelect,
        ScreenKind::Tutorial,
        ScreenKind::Playing,
        ScreenKind::Paused,
        ScreenKind::GameOver,
        ScreenKind::Scoreboard,
    ];

    fn app_on(kind: ScreenKind) -> App {
        let mut app = app();
        match kind {
            ScreenKind::Menu => {}
            ScreenKind::CharacterSelect => app.apply(Command::Confirm),
            ScreenKind::DifficultySelect => {
                app.apply(Command::Confirm);
                app.apply(Command::Confirm);
            }
            ScreenKind::Tutorial => {
                for _ in 0..3 {
                    app.apply(Command::Confirm);
                }
            }
            ScreenKind::Playing => start_easy(&mut app),
            ScreenKind::Paused => {
                start_easy(&mut app);
                app.apply(Command::Pause);
            }
            ScreenKind::GameOver => play_until_game_over(&mut app),
            ScreenKind::Scoreboard => {
                app.apply(Command::Move(Direction::Down));
                app.apply(Command::Confirm);
            }
        }
        assert_eq!(app.screen.kind(), kind);
        app
    }

    #[test]
    fn test_quit_keys_work_on_every_screen() {
        for kind in ALL_SCREENS {
            let mut app = app_on(kind);
            app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
            assert!(app.should_quit, "Ctrl+C ignored on {kind:?}");

            // q is a letter of the name on the game-over screen
            let mut app = app_on(kind);
            app.on_key(press(KeyCode::Char('q')));
            assert_eq!(app.should_quit, kind != ScreenKind::GameOver, "q on {kind:?}");
        }
    }

    #[test]
    fn test_focus_loss_pauses_and_releases_keys() {
        let mut app = App::new(
            Box::new(Shared(Rc::new(MemoryScores::default()))),
            Rules::default(),
            StdRng::seed_from_u64(1),
            HeldKeys::new(None),
        );
        start_easy(&mut app);
        app.on_key(press(KeyCode::Left));
        app.on_focus_lost();
        assert_eq!(app.screen.kind(), ScreenKind::Paused);

        // No release was ever reported, yet the key no longer counts as held
        app.apply(Command::Back);
        app.on_tick(TICK);
        let s = session(&mut app);
        assert_eq!((s.player.x, s.player.y), (375, 275));
        assert_eq!(s.clock.elapsed(), TICK);
    }

    #[test]
    fn test_focus_loss_leaves_other_screens_alone() {
        for kind in [ScreenKind::Menu, ScreenKind::Paused, ScreenKind::GameOver, ScreenKind::Scoreboard] {
            let mut app = app_on(kind);
            app.on_focus_lost();
            assert_eq!(app.screen.kind(), kind);
            assert!(!app.should_quit);
        }
    }

    #[test]
    fn test_name_entry_submits_score() {
        let store = Rc::new(MemoryScores::default());
        let mut app = app_with(store.clone());
        play_until_game_over(&mut app);

        for code in [KeyCode::Char('z'), KeyCode::Char('o'), KeyCode::Char('9'), KeyCode::Char('q')] {
            app.on_key(press(code));
        }
        assert!(!app.should_quit, "q is a letter while typing a name");
        app.on_key(press(KeyCode::Backspace));
        app.on_key(press(KeyCode::Char('e')));
        app.on_key(press(KeyCode::Enter));

        assert_eq!(app.screen.kind(), ScreenKind::Menu);
        let saved = store.entries.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name, "zoe");
        assert_eq!(saved[0].seconds, 0);
        assert_eq!(saved[0].difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_name_is_capped() {
        let mut app = app();
        play_until_game_over(&mut app);
        for _ in 0..60 {
            app.apply(Command::Letter('a'));
        }
        let Screen::GameOver(over) = &app.screen else {
            panic!("expected game over");
        };
        assert_eq!(over.name.len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_empty_name_is_reprompted() {
        let store = Rc::new(MemoryScores::default());
        let mut app = app_with(store.clone());
        play_until_game_over(&mut app);
        app.apply(Command::Confirm);

        let Screen::GameOver(over) = &app.screen else {
            panic!("expected game over");
        };
        assert!(over.message.is_some());
        assert!(store.entries.borrow().is_empty());
    }

    #[test]
    fn test_skip_saves_nothing() {
        let store = Rc::new(MemoryScores::default());
        let mut app = app_with(store.clone());
        play_until_game_over(&mut app);
        app.apply(Command::Letter('x'));
        app.apply(Command::Back);
        assert_eq!(app.screen.kind(), ScreenKind::Menu);
        assert!(store.entries.borrow().is_empty());
    }

    #[test]
    fn test_unavailable_store_keeps_game_over_for_retry() {
        let store = Rc::new(MemoryScores::default());
        let mut app = app_with(store.clone());
        play_until_game_over(&mut app);
        app.apply(Command::Letter('a'));

        store.offline.set(true);
        app.apply(Command::Confirm);
        let Screen::GameOver(over) = &app.screen else {
            panic!("expected game over");
        };
        assert_eq!(over.name, "a");
        assert!(over.message.as_deref().unwrap_or("").contains("unavailable"));

        store.offline.set(false);
        app.apply(Command::Confirm);
        assert_eq!(app.screen.kind(), ScreenKind::Menu);
        assert_eq!(store.entries.borrow().len(), 1);
    }

    #[test]
    fn test_scoreboard_switches_tiers() {
        let store = Rc::new(MemoryScores::default());
        store.insert("ana", 12, Difficulty::Easy).unwrap();
        store.insert("bob", 30, Difficulty::Medium).unwrap();
        let mut app = app_with(store);

        app.apply(Command::Move(Direction::Down));
        app.apply(Command::Confirm);
        let Screen::Scoreboard(board) = &app.screen else {
            panic!("expected scoreboard");
        };
        assert_eq!(board.difficulty, Difficulty::Easy);
        assert_eq!(board.entries[0].name, "ana");

        app.apply(Command::Move(Direction::Right));
        let Screen::Scoreboard(board) = &app.screen else {
            panic!("expected scoreboard");
        };
        assert_eq!(board.entries[0].name, "bob");

        app.apply(Command::Back);
        assert_eq!(app.screen.kind(), ScreenKind::Menu);
    }

    #[test]
    fn test_scoreboard_reports_unavailable_store() {
        let store = Rc::new(MemoryScores::default());
        store.offline.set(true);
        let mut app = app_with(store);
        app.apply(Command::Move(Direction::Down));
        app.apply(Command::Confirm);

        let Screen::Scoreboard(board) = &app.screen else {
            panic!("expected scoreboard");
        };
        assert!(board.entries.is_empty());
        assert!(board.error.is_some());
    }
}
