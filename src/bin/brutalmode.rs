// Brutalmode Demo Host
// Terminal key loop that runs every keystroke through the difficulty overlay

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use brutalmode_core::settings::default_settings_content;
use brutalmode_core::{
    EditorHost, HostError, HostFlags, Key, KeyOutcome, Mode, ModeState, QuitReason, Settings,
};

/// Difficulty-mode overlay for a modal editor's keystrokes
#[derive(Parser, Debug)]
#[command(name = "brutalmode")]
#[command(version)]
#[command(about = "Try out the brutalmode keystroke overlay in a terminal", long_about = None)]
struct Args {
    /// Difficulty tier: disabled, lenient, strict, stricter, randomized
    /// (or none, easy, hard, harder, hardest)
    #[arg(short, long, value_name = "MODE", default_value = "disabled")]
    mode: Mode,

    /// TOML settings file (default: ~/.config/brutalmode/settings.toml)
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,

    /// Fixed seed for the randomized keymap
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Pretend no human is attached (lifts every restriction)
    #[arg(long)]
    headless: bool,

    /// Pretend another program drives the editor (lifts every restriction)
    #[arg(long)]
    embedded: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate settings and exit
    #[arg(long)]
    check_config: bool,

    /// Print a default settings file and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Stand-in editor: prints what it is asked to do
struct TerminalEditor {
    raw: bool,
}

impl TerminalEditor {
    fn line(&self, text: &str) {
        let mut stdout = io::stdout();
        let ending = if self.raw { "\r\n" } else { "\n" };
        for line in text.lines() {
            let _ = write!(stdout, "{line}{ending}");
        }
        let _ = stdout.flush();
    }
}

impl EditorHost for TerminalEditor {
    fn run_command(&mut self, command: &str) -> Result<(), HostError> {
        log::info!("Editor command: {}", command);
        self.line(&format!(":{command}"));
        Ok(())
    }

    fn show_message(&mut self, text: &str) {
        self.line(text);
    }
}

/// Decode a crossterm key event into a logical key
fn translate(event: KeyEvent) -> Option<Key> {
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);

    let key = match event.code {
        KeyCode::Char(c) if ctrl && c.is_ascii_alphabetic() => {
            Key::ctrl(c.to_ascii_uppercase() as u8)
        }
        KeyCode::Char(c) if c.is_ascii() => Key::from(c),
        KeyCode::Esc => Key::ESC,
        KeyCode::Enter => Key::from(b'\r'),
        KeyCode::Tab => Key::from(b'\t'),
        KeyCode::Backspace => Key::from(0x7f_u8),
        KeyCode::Up if shift => Key::SHIFT_UP,
        KeyCode::Down if shift => Key::SHIFT_DOWN,
        KeyCode::Left if shift => Key::SHIFT_LEFT,
        KeyCode::Right if shift => Key::SHIFT_RIGHT,
        KeyCode::Home if shift => Key::SHIFT_HOME,
        KeyCode::End if shift => Key::SHIFT_END,
        KeyCode::Up => Key::UP,
        KeyCode::Down => Key::DOWN,
        KeyCode::Left => Key::LEFT,
        KeyCode::Right => Key::RIGHT,
        KeyCode::Home => Key::HOME,
        KeyCode::End => Key::END,
        KeyCode::PageUp => Key::PAGE_UP,
        KeyCode::PageDown => Key::PAGE_DOWN,
        _ => return None,
    };
    Some(key)
}

/// Why the demo loop ended
enum Exit {
    Gesture(QuitReason),
    Command(String),
    Eject,
}

/// Main application state
struct Application {
    state: ModeState,
    editor: TerminalEditor,
    flags: HostFlags,
    /// Ex command being typed after ':'
    command_line: Option<String>,
}

impl Application {
    fn new(args: &Args, mut settings: Settings) -> Self {
        if args.seed.is_some() {
            settings.set_keymap_seed(args.seed);
        }
        Self {
            state: ModeState::new(args.mode, &settings),
            editor: TerminalEditor { raw: false },
            flags: HostFlags {
                headless: args.headless,
                embedded: args.embedded,
            },
            command_line: None,
        }
    }

    fn start(&mut self) -> anyhow::Result<()> {
        self.state.show_banner(&mut self.editor);
        self.state
            .activate(&mut self.editor)
            .context("Failed to activate mode")?;
        if let Some(seed) = self.state.keymap_seed() {
            log::info!("Randomized keymap seed: {}", seed);
        }
        self.editor
            .line("Type away. F12 always exits; ':q' quits if the mode allows it.");
        Ok(())
    }

    /// Run the key loop until something ends the session
    fn run(&mut self) -> anyhow::Result<Exit> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        self.editor.raw = true;

        let result = self.run_main_loop();

        self.editor.raw = false;
        disable_raw_mode().context("Failed to restore terminal")?;
        result
    }

    fn run_main_loop(&mut self) -> anyhow::Result<Exit> {
        loop {
            if !event::poll(Duration::from_millis(200))? {
                if let Some(reason) = self.state.poll_idle(Instant::now()) {
                    return Ok(Exit::Gesture(reason));
                }
                continue;
            }

            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind == KeyEventKind::Release {
                continue;
            }

            // Emergency eject key: immediate stop for recovery.
            if key_event.code == KeyCode::F(12) {
                return Ok(Exit::Eject);
            }

            let Some(key) = translate(key_event) else {
                continue;
            };

            match self.state.process_key(key, Instant::now(), self.flags) {
                KeyOutcome::QuitRequested(reason) => return Ok(Exit::Gesture(reason)),
                KeyOutcome::Blocked => self.editor.line(&format!("[blocked] {key}")),
                KeyOutcome::Forward(dispatched) => {
                    if let Some(exit) = self.dispatch(key, dispatched) {
                        return Ok(exit);
                    }
                }
            }
        }
    }

    /// Minimal editor: echo the key and understand ':q', ':q!', ':quit', ':quit!'
    fn dispatch(&mut self, typed: Key, key: Key) -> Option<Exit> {
        if typed == key {
            self.editor.line(&format!("{key}"));
        } else {
            self.editor.line(&format!("{typed} -> {key}"));
        }

        if let Some(mut command) = self.command_line.take() {
            match key {
                Key::ESC => {}
                k if k == Key::from(b'\r') => return self.execute(&command),
                k => {
                    if let Some(c) = k.printable() {
                        command.push(c);
                    }
                    self.command_line = Some(command);
                }
            }
        } else if key == Key::from(':') {
            self.command_line = Some(String::new());
        }
        None
    }

    fn execute(&mut self, command: &str) -> Option<Exit> {
        let force = command.ends_with('!');
        match command.trim_end_matches('!') {
            "q" | "quit" | "qa" | "wq" | "x" => {
                if self.state.quit_should_be_blocked(force, self.flags) {
                    self.editor
                        .line(&format!("E: quitting is not allowed in {} mode", self.state.mode()));
                    None
                } else {
                    Some(Exit::Command(command.to_string()))
                }
            }
            other => {
                self.editor.line(&format!("E492: Not an editor command: {other}"));
                None
            }
        }
    }
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("Failed to load default settings")?,
    };
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.print_default_config {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;
    if args.check_config {
        match settings.source_path() {
            Some(path) => println!("Configuration is valid: {}", path.display()),
            None => println!("No settings file found; using defaults"),
        }
        return Ok(());
    }

    let mut app = Application::new(&args, settings);
    app.start()?;

    match app.run()? {
        Exit::Gesture(reason) => println!("Quit requested: {reason}"),
        Exit::Command(command) => println!("Quit via :{command}"),
        Exit::Eject => println!("Emergency eject key pressed."),
    }
    Ok(())
}
