use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::info;
use typer::{
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    summary::Summary,
    text::{self, TextOptions, TextSource},
    ui::TypingView,
    Control, Phase, Session, TypingEvent, TICK_RATE_MS,
};

/// minimal typing speed test with a live wpm graph
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// text to type instead of random words
    text: Option<String>,

    /// read the text to type from a file
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// number of random words to generate
    #[clap(short = 'n', long)]
    words: Option<usize>,

    /// cut the text after this many words
    #[clap(short = 'l', long)]
    length: Option<usize>,

    /// drop words shorter than this
    #[clap(long)]
    min_word_length: Option<usize>,

    /// strip everything but letters, numbers and spaces
    #[clap(long)]
    alphanumeric: bool,

    /// maximum width of the typing area
    #[clap(short = 'w', long)]
    width: Option<u16>,

    /// path to a config file
    #[clap(long)]
    config: Option<PathBuf>,

    /// write logs to this file (or set TYPER_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn source(&self, config: &Config) -> TextSource {
        if let Some(path) = &self.file {
            TextSource::File(path.clone())
        } else if let Some(text) = &self.text {
            TextSource::Literal(text.clone())
        } else {
            TextSource::Random {
                words: self.words.unwrap_or(config.default_words),
            }
        }
    }

    fn text_options(&self) -> TextOptions {
        TextOptions {
            max_words: self.length,
            min_word_length: self.min_word_length,
            alphanumeric_only: self.alphanumeric,
        }
    }

    fn load_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(width) = self.width {
            config.max_width = width;
        }
        config
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let env_log = std::env::var(logging::LOG_ENV).ok();
    let log_path = logging::resolve_log_path(cli.log_file.as_deref(), env_log.as_deref());
    logging::init(log_path.as_deref())?;

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config = cli.load_config();
    let raw = cli.source(&config).load()?;
    let prompt = text::prepare(&raw, &cli.text_options())?;
    let mut session = Session::new(&prompt, config.viewport())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut session, &config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result?;

    if session.phase() == Phase::Completed {
        let ended = session.finished_at().unwrap_or_else(Instant::now);
        println!("{}", Summary::from_session(&session, ended));
    }

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    if let Ok(size) = terminal.size() {
        session.handle_event(TypingEvent::Resize {
            width: size.width,
            height: size.height,
        });
    }
    draw(terminal, session, config)?;

    loop {
        let Some(event) = runner.step().to_typing_event() else {
            continue;
        };

        if session.handle_event(event) == Control::Finish {
            info!(phase = %session.phase(), "leaving event loop");
            break;
        }

        draw(terminal, session, config)?;
    }

    Ok(())
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    config: &Config,
) -> io::Result<()> {
    let viewport = session.viewport();
    let frame = session.frame(Instant::now());
    terminal.draw(|f| f.render_widget(TypingView::new(&frame, config, viewport), f.area()))?;
    Ok(())
}
