//! jte entrypoint: argument parsing, logging, terminal session, main loop.
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Result;
use clap::Parser;
use core_actions::Editor;
use core_input::{EventSource, TerminalInput};
use core_render::{FrameInput, compose_frame, writer::paint};
use core_terminal::TerminalSession;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "jte.log";

#[derive(Parser, Debug)]
#[command(name = "jte", version, about = "Modal terminal text editor")]
struct Args {
    /// File to open at startup. A scratch buffer is used when omitted.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `jte.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            core_terminal::restore();
            error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

fn render<W: Write>(editor: &Editor, out: &mut W) -> Result<()> {
    let (width, height) = editor.size();
    let frame = compose_frame(&FrameInput {
        model: &editor.model,
        pending: editor.dispatcher().pending(),
        repeat: editor.dispatcher().repeat(),
        width,
        height,
    });
    paint(&frame, out)
}

/// Read, dispatch, apply, render until a quit action or the source runs dry.
fn run<S: EventSource, W: Write>(editor: &mut Editor, input: &mut S, out: &mut W) -> Result<()> {
    render(editor, out)?;
    while let Some(event) = input.next_event()? {
        let result = editor.handle_event(event);
        if result.quit {
            info!(target: "runtime", "quit_requested");
            break;
        }
        if result.dirty {
            render(editor, out)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let config = core_config::load_from(args.config.clone())?;
    let size = core_terminal::size()?;
    let mut editor = Editor::open(config, args.path.as_deref(), size)?;
    info!(
        target: "runtime",
        path = ?args.path,
        width = size.0,
        height = size.1,
        "bootstrap_complete"
    );

    let mut session = TerminalSession::start()?;
    session.set_title("jte")?;
    let mut input = TerminalInput::new();
    let result = run(&mut editor, &mut input, &mut stdout());
    session.finish()?;

    if let Err(e) = &result {
        error!(target: "runtime", error = %e, "main_loop_failed");
    }
    info!(target: "runtime", "shutdown");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use core_events::{InputEvent, Key, parse_keys};
    use core_input::ScriptedInput;
    use pretty_assertions::assert_eq;

    fn editor(path: Option<&Path>) -> Editor {
        Editor::open(Config::default(), path, (40, 10)).unwrap()
    }

    #[test]
    fn args_accept_path_and_config() {
        let args = Args::try_parse_from(["jte", "notes.txt", "--config", "my.toml"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn loop_stops_on_quit_and_leaves_rest_unread() {
        let mut e = editor(None);
        let mut input = ScriptedInput::from_keys(parse_keys("ihi<Esc><C-c>jj"));
        let mut out = Vec::new();
        run(&mut e, &mut input, &mut out).unwrap();
        assert_eq!(input.remaining(), 2);
        assert!(!out.is_empty());
    }

    #[test]
    fn loop_ends_when_input_is_exhausted() {
        let mut e = editor(None);
        let mut input = ScriptedInput::new([InputEvent::Resize(30, 8), InputEvent::Key(Key::char('v'))]);
        run(&mut e, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(e.size(), (30, 8));
        assert_eq!(e.model.panes.pane_count(), 2);
    }

    #[test]
    fn opens_and_writes_file_through_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "one\n").unwrap();
        let mut e = editor(Some(&path));
        let mut input = ScriptedInput::from_keys(parse_keys("iX<Esc>:w<CR>:q<CR>"));
        run(&mut e, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Xone\n");
    }
}
