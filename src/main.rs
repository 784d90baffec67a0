mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use wordtype::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    lang::Language,
    logging::init_logging,
    runtime::{CrosstermEventSource, HostEvent, Runner},
    Key, SessionState, Transition,
};

const POLL_INTERVAL_MS: u64 = 250;

/// word-by-word typing practice in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in a session [default: from config, else 15]
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// custom words to type, separated by whitespace
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// word list to pull words from [default: from config, else english]
    #[clap(short = 'l', long, value_enum)]
    supported_language: Option<SupportedLanguage>,

    /// pick words at random instead of in list order
    #[clap(long)]
    random_words: bool,

    /// write the resolved settings back to the config file
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SupportedLanguage {
    English,
    Classic,
}

impl SupportedLanguage {
    fn from_config(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// CLI flags layered over the stored config
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub number_of_words: usize,
    pub language: SupportedLanguage,
    pub random_words: bool,
    pub prompt: Option<String>,
}

impl Settings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            number_of_words: cli.number_of_words.unwrap_or(config.number_of_words),
            language: cli
                .supported_language
                .or_else(|| SupportedLanguage::from_config(&config.supported_language))
                .unwrap_or(SupportedLanguage::English),
            random_words: cli.random_words || config.random_words,
            prompt: cli.prompt.clone(),
        }
    }

    /// Word list for a fresh session. A custom prompt always yields the same words.
    fn generate_words(&self) -> Result<Vec<String>, Box<dyn Error>> {
        if let Some(ref prompt) = self.prompt {
            return Ok(prompt.split_whitespace().map(str::to_string).collect());
        }

        let language = Language::load(&self.language.to_string())?;
        Ok(if self.random_words {
            language.random(self.number_of_words)
        } else {
            language.first(self.number_of_words)
        })
    }
}

impl From<&Settings> for Config {
    fn from(s: &Settings) -> Self {
        Self {
            number_of_words: s.number_of_words,
            supported_language: s.language.to_string(),
            random_words: s.random_words,
        }
    }
}

/// What the host loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Idle,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub session: SessionState,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self, Box<dyn Error>> {
        let session = SessionState::new(settings.generate_words()?)?;
        Ok(Self { settings, session })
    }

    /// Same words, all input cleared
    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn new_words(&mut self) -> Result<(), Box<dyn Error>> {
        self.session = SessionState::new(self.settings.generate_words()?)?;
        tracing::info!(words = self.session.len(), "new session");
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Result<Flow, Box<dyn Error>> {
        if key.kind == KeyEventKind::Release {
            return Ok(Flow::Idle);
        }

        match key.code {
            KeyCode::Esc => Ok(Flow::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Ok(Flow::Quit)
            }
            KeyCode::Left => {
                self.restart();
                Ok(Flow::Redraw)
            }
            KeyCode::Right => {
                self.new_words()?;
                Ok(Flow::Redraw)
            }
            _ => match self.session.step(Key::from(key)) {
                Transition::Ignored => Ok(Flow::Idle),
                _ => {
                    if self.session.is_complete() {
                        tracing::debug!("session complete");
                    }
                    Ok(Flow::Redraw)
                }
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = AppDirs::log_dir().and_then(|dir| init_logging(&dir));

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let settings = Settings::resolve(&cli, &store.load());
    if cli.save_config {
        store.save(&Config::from(&settings))?;
    }

    let mut app = match App::new(settings) {
        Ok(app) => app,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, err.to_string()).exit();
        }
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        tracing::error!(%err, "session aborted");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(POLL_INTERVAL_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        let flow = match runner.step() {
            HostEvent::Key(key) => app.on_key(key)?,
            HostEvent::Resize => Flow::Redraw,
            HostEvent::Tick => Flow::Idle,
            HostEvent::Closed => Flow::Quit,
        };

        match flow {
            Flow::Redraw => {
                terminal.draw(|f| ui(app, f))?;
            }
            Flow::Idle => {}
            Flow::Quit => break,
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_prompt(prompt: &str) -> Settings {
        Settings {
            number_of_words: 15,
            language: SupportedLanguage::English,
            random_words: false,
            prompt: Some(prompt.to_string()),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wordtype"]);

        assert_eq!(cli.number_of_words, None);
        assert_eq!(cli.prompt, None);
        assert_eq!(cli.supported_language, None);
        assert!(!cli.random_words);
        assert!(!cli.save_config);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["wordtype", "-w", "5", "-l", "classic", "--random-words"]);

        assert_eq!(cli.number_of_words, Some(5));
        assert_eq!(cli.supported_language, Some(SupportedLanguage::Classic));
        assert!(cli.random_words);
    }

    #[test]
    fn test_supported_language_display() {
        assert_eq!(SupportedLanguage::English.to_string(), "english");
        assert_eq!(SupportedLanguage::Classic.to_string(), "classic");
        assert_eq!(
            SupportedLanguage::from_config("Classic"),
            Some(SupportedLanguage::Classic)
        );
        assert_eq!(SupportedLanguage::from_config("nope"), None);
    }

    #[test]
    fn test_settings_resolve_prefers_cli() {
        let config = Config {
            number_of_words: 30,
            supported_language: "classic".into(),
            random_words: false,
        };

        let from_config = Settings::resolve(&Cli::parse_from(["wordtype"]), &config);
        assert_eq!(from_config.number_of_words, 30);
        assert_eq!(from_config.language, SupportedLanguage::Classic);

        let cli = Cli::parse_from(["wordtype", "-w", "3", "-l", "english"]);
        let overridden = Settings::resolve(&cli, &config);
        assert_eq!(overridden.number_of_words, 3);
        assert_eq!(overridden.language, SupportedLanguage::English);
    }

    #[test]
    fn test_settings_roundtrip_into_config() {
        let settings = Settings::resolve(&Cli::parse_from(["wordtype", "-w", "7"]), &Config::default());
        let config = Config::from(&settings);

        assert_eq!(config.number_of_words, 7);
        assert_eq!(config.supported_language, "english");
    }

    #[test]
    fn test_app_new_with_prompt_splits_words() {
        let app = App::new(settings_with_prompt("  cat dog\tbird ")).unwrap();
        let targets: Vec<&str> = app.session.words().iter().map(|w| w.target()).collect();

        assert_eq!(targets, vec!["cat", "dog", "bird"]);
    }

    #[test]
    fn test_app_new_with_empty_prompt_fails() {
        assert!(App::new(settings_with_prompt("   ")).is_err());
    }

    #[test]
    fn test_app_new_from_language() {
        let settings = Settings {
            number_of_words: 4,
            language: SupportedLanguage::Classic,
            random_words: false,
            prompt: None,
        };
        let app = App::new(settings).unwrap();
        let targets: Vec<&str> = app.session.words().iter().map(|w| w.target()).collect();

        assert_eq!(targets, vec!["hello", "world", "how", "are"]);
    }

    #[test]
    fn test_on_key_typing_flow() {
        let mut app = App::new(settings_with_prompt("hi yo")).unwrap();

        assert_eq!(app.on_key(press(KeyCode::Char('h'))).unwrap(), Flow::Redraw);
        assert_eq!(app.on_key(press(KeyCode::Char(' '))).unwrap(), Flow::Redraw);
        assert_eq!(app.session.cursor(), 1);
        assert!(app.session.is_word_wrong(0));

        assert_eq!(app.on_key(press(KeyCode::Enter)).unwrap(), Flow::Idle);
        assert_eq!(app.on_key(press(KeyCode::Backspace)).unwrap(), Flow::Redraw);
        assert_eq!(app.session.cursor(), 0);
        assert_eq!(app.session.words()[0].typed(), "h");
    }

    #[test]
    fn test_on_key_quit() {
        let mut app = App::new(settings_with_prompt("hi")).unwrap();

        assert_eq!(app.on_key(press(KeyCode::Esc)).unwrap(), Flow::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.on_key(ctrl_c).unwrap(), Flow::Quit);
        assert_eq!(app.session.words()[0].typed(), "");
    }

    #[test]
    fn test_on_key_restart_and_new_words() {
        let mut app = App::new(settings_with_prompt("ab cd")).unwrap();
        for c in "ab c".chars() {
            app.on_key(press(KeyCode::Char(c))).unwrap();
        }

        assert_eq!(app.on_key(press(KeyCode::Left)).unwrap(), Flow::Redraw);
        assert_eq!(app.session.cursor(), 0);
        assert_eq!(app.session.words()[0].typed(), "");

        app.on_key(press(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.on_key(press(KeyCode::Right)).unwrap(), Flow::Redraw);
        assert_eq!(app.session.words()[0].typed(), "");
        assert_eq!(app.session.len(), 2);
    }

    #[test]
    fn test_on_key_release_is_idle() {
        let mut app = App::new(settings_with_prompt("hi")).unwrap();
        let mut ev = press(KeyCode::Char('h'));
        ev.kind = KeyEventKind::Release;

        assert_eq!(app.on_key(ev).unwrap(), Flow::Idle);
        assert_eq!(app.session.words()[0].typed(), "");
    }

    #[test]
    fn test_ui_renders_words() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = App::new(settings_with_prompt("test words")).unwrap();
        app.on_key(press(KeyCode::Char('t'))).unwrap();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("t|est words"));
        assert!(content.contains("(esc) quit"));
        assert!(!content.contains("session complete"));
    }

    #[test]
    fn test_ui_renders_completion() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut app = App::new(settings_with_prompt("ok")).unwrap();
        for c in "ok ".chars() {
            app.on_key(press(KeyCode::Char(c))).unwrap();
        }

        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(content.contains("session complete"));
    }

    #[test]
    fn test_ui_tiny_terminal_does_not_panic() {
        use ratatui::{backend::TestBackend, Terminal};

        let app = App::new(settings_with_prompt("a fairly long list of words to wrap")).unwrap();
        let backend = TestBackend::new(8, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();
    }

    #[test]
    fn test_ui_huge_prompt_in_narrow_terminal_does_not_panic() {
        use ratatui::{backend::TestBackend, Terminal};

        let prompt = vec!["ab"; 22_000].join(" ");
        let app = App::new(settings_with_prompt(&prompt)).unwrap();
        let backend = TestBackend::new(10, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(&app, f)).unwrap();
    }
}
