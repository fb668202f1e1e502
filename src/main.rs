use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::Backend, backend::TermionBackend, Terminal};
use std::io::{self, Cursor, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver};
use termion::raw::IntoRawMode;
use termion::screen::IntoAlternateScreen;
use tracing::{info, warn};

use hexquill::buffer::Source;
use hexquill::config::Config;
use hexquill::editor::command::Action;
use hexquill::editor::handle::WindowHandle;
use hexquill::file::loader::{open_source, read_stdin};
use hexquill::file::saver::save_window;
use hexquill::input::{Dispatch, InputHandler};
use hexquill::theme::get_builtin_theme;
use hexquill::ui::{hex_view, Message, Status, CHROME_ROWS, UI};

/// HexQuill - A terminal-based binary editor
#[derive(Parser)]
#[command(name = "hexquill")]
#[command(version)]
#[command(about = "A terminal-based binary editor with vim-style keybindings", long_about = None)]
struct Cli {
    /// File to edit (omit to read from stdin if piped, or start empty if interactive)
    file: Option<String>,

    /// Maximum bytes per row (default: from config, 16)
    #[arg(short, long)]
    width: Option<usize>,

    /// Theme name (default: from config, default-dark)
    #[arg(short, long)]
    theme: Option<String>,
}

/// Set up a panic hook that restores the terminal before displaying panic information.
///
/// This ensures that panics are visible even when the terminal is in raw mode with alternate screen.
fn setup_panic_hook() {
    use std::panic;

    // Take the default panic hook so we can call it after restoration
    let default_panic = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Use stderr to avoid interfering with stdout pipes
        let _ = write!(io::stderr(), "{}", termion::screen::ToMainScreen);
        let _ = write!(io::stderr(), "{}", termion::cursor::Show);
        let _ = io::stderr().flush();

        default_panic(panic_info);
    }));
}

fn main() -> Result<()> {
    setup_panic_hook();

    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(width) = cli.width {
        config.bytes_per_row = width.max(1);
    }
    hexquill::logging::init(&config);

    // Read piped input BEFORE terminal setup
    let (source, filename, stdin_was_piped): (Box<dyn Source>, Option<String>, bool) =
        if let Some(path) = cli.file {
            (open_source(&path)?, Some(path), false)
        } else if !io::stdin().is_terminal() {
            (Box::new(read_stdin()?), None, true)
        } else {
            (Box::new(Cursor::new(Vec::new())), None, false)
        };

    let (redraw_tx, redraw_rx) = mpsc::channel();
    let name = filename.clone().unwrap_or_else(|| "[No Name]".to_string());
    let window = WindowHandle::open(source, name, config.window.clone(), redraw_tx)
        .context("Failed to open window")?;
    info!(window = window.name(), "editor started");

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = match get_builtin_theme(theme_name) {
        Some(theme) => theme,
        None => {
            warn!("Theme '{}' not found, using default-dark", theme_name);
            get_builtin_theme("default-dark").context("Missing default theme")?
        }
    };
    let ui = UI::new(theme, config.show_ascii);

    let mut input_handler = if stdin_was_piped {
        InputHandler::new_with_tty()
            .context("Failed to open /dev/tty for keyboard input when stdin was piped")?
    } else {
        InputHandler::new()
    };

    // Setup terminal
    let stdout = io::stdout()
        .into_raw_mode()
        .context("Failed to enable raw mode")?;
    let stdout = stdout
        .into_alternate_screen()
        .context("Failed to enter alternate screen")?;

    let backend = TermionBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut status = Status {
        filename,
        ..Status::default()
    };

    let result = run_event_loop(
        &mut terminal,
        &ui,
        &mut input_handler,
        &window,
        &redraw_rx,
        &mut status,
        &config,
    );

    // Termion restores the screen through Drop guards; show the cursor first
    show_cursor(terminal.backend_mut())?;
    drop(terminal);

    let closed = window.close();
    result?;
    closed.context("Window stopped with an error")?;
    Ok(())
}

fn show_cursor<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{}", termion::cursor::Show)?;
    out.flush()
}

fn run_event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    ui: &UI,
    input_handler: &mut InputHandler,
    window: &WindowHandle,
    redraw: &Receiver<()>,
    status: &mut Status,
    config: &Config,
) -> Result<()> {
    loop {
        // Fit the window to the terminal before every frame
        let size = terminal.size()?;
        let width = hex_view::bytes_per_row(size.width, config.bytes_per_row);
        let height = size.height.saturating_sub(CHROME_ROWS).max(1);
        window.set_size(width, i64::from(height))?;

        let state = window.state()?;
        status.mode = input_handler.mode();
        status.prompt = input_handler.prompt_line();
        ui.render(terminal, &state, status)?;

        let Some(key) = input_handler.next_key()? else {
            break;
        };

        match input_handler.handle_key(key) {
            Dispatch::None => {}
            Dispatch::Quit => break,
            Dispatch::SaveAndQuit => match status.filename.clone() {
                Some(path) => {
                    save_window(window, &path, config.create_backup)?;
                    break;
                }
                None => status.message = Some(Message::error("No file name")),
            },
            Dispatch::Command(command) => {
                status.message = None;
                let searching = matches!(
                    command.action,
                    Action::Search { .. } | Action::SearchNext | Action::SearchPrevious
                );

                window.send(command)?;
                redraw
                    .recv()
                    .context("Window stopped processing commands")?;

                let after = window.state()?;
                input_handler.after_command(&after);
                if searching && after.cursor == state.cursor {
                    status.message = Some(Message::error("Pattern not found"));
                }
            }
        }
    }

    Ok(())
}
