//! Line-driven gesture editor: each stdin line is one gesture event.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::str::FromStr;
use std::sync::Arc;

use gitclock_layout::{GestureSession, ScreenGeometryPublisher, WidgetId};
use tracing::{info, warn};

use crate::device::{format_placements, render};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    Edit,
    Grab(WidgetId),
    Pan(f64, f64),
    Pinch(f64),
    Release,
    Save,
    Cancel,
    Show,
    Quit,
}

impl FromStr for EditCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or("empty command")?;
        let args: Vec<&str> = words.collect();
        let number = |i: usize| -> Result<f64, String> {
            let raw = args.get(i).ok_or(format!("{verb}: missing argument"))?;
            raw.parse::<f64>()
                .map_err(|_| format!("{verb}: not a number: {raw}"))
        };

        match verb.to_ascii_lowercase().as_str() {
            "edit" => Ok(Self::Edit),
            "grab" => {
                let name = args.first().ok_or("grab: missing widget")?;
                name.parse().map(Self::Grab).map_err(|e| e.to_string())
            }
            "pan" => Ok(Self::Pan(number(0)?, number(1)?)),
            "pinch" => Ok(Self::Pinch(number(0)?)),
            "release" => Ok(Self::Release),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// A gesture session driven one text command at a time.
///
/// `serve` feeds it stdin lines on the device's own store; `edit` runs it
/// over a whole input stream.
pub struct Editor {
    session: GestureSession,
    geometry: Arc<ScreenGeometryPublisher>,
}

impl Editor {
    pub fn new(session: GestureSession, geometry: Arc<ScreenGeometryPublisher>) -> Self {
        Self { session, geometry }
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_editing()
    }

    /// Apply one input line. Breaks on `quit`; otherwise yields the text to
    /// print, empty for blank lines and comments.
    pub fn handle_line(&mut self, line: &str) -> ControlFlow<(), String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return ControlFlow::Continue(String::new());
        }
        let command = match line.parse::<EditCommand>() {
            Ok(command) => command,
            Err(e) => return ControlFlow::Continue(format!("error: {e}\n")),
        };
        if command == EditCommand::Quit {
            return ControlFlow::Break(());
        }

        let mut out = match apply(&mut self.session, command) {
            Ok(Some(message)) => format!("{message}\n"),
            Ok(None) => String::new(),
            Err(e) => format!("error: {e}\n"),
        };
        if command == EditCommand::Show {
            let screen = self.geometry.current();
            out.push_str(&format_placements(&render(&self.session.store().snapshot(), screen)));
        }
        ControlFlow::Continue(out)
    }

    /// Discard an unfinished session. Returns an error line if that failed.
    pub fn finish(&mut self) -> Option<String> {
        if !self.session.is_editing() {
            return None;
        }
        warn!("input ended while editing, discarding unsaved edits");
        self.session.cancel().err().map(|e| format!("error: {e}\n"))
    }
}

/// Run commands from `input` until EOF or `quit`.
///
/// Leaving while still editing discards the session's edits.
pub fn run<R: BufRead, W: Write>(editor: &mut Editor, input: R, mut output: W) -> std::io::Result<()> {
    for line in input.lines() {
        match editor.handle_line(&line?) {
            ControlFlow::Continue(text) => output.write_all(text.as_bytes())?,
            ControlFlow::Break(()) => break,
        }
    }
    if let Some(text) = editor.finish() {
        output.write_all(text.as_bytes())?;
    }
    Ok(())
}

fn apply(
    session: &mut GestureSession,
    command: EditCommand,
) -> Result<Option<String>, gitclock_layout::SessionError> {
    let message = match command {
        EditCommand::Edit => {
            if !session.is_editing() && session.store().reload_if_changed() {
                info!("picked up layout changes from another writer");
            }
            session.enter_edit()?;
            Some("editing".to_string())
        }
        EditCommand::Grab(id) => {
            session.begin_gesture(id)?;
            Some(format!("grabbed {id}"))
        }
        EditCommand::Pan(dx, dy) => {
            let layout = session.update_gesture(dx, dy, 1.0)?;
            Some(format!("x={:.1} y={:.1}", layout.x, layout.y))
        }
        EditCommand::Pinch(zoom) => {
            let layout = session.update_gesture(0.0, 0.0, zoom)?;
            Some(format!("scale={:.2}", layout.scale))
        }
        EditCommand::Release => {
            let layout = session.end_gesture()?;
            Some(format!(
                "released at x={:.1} y={:.1} scale={:.2}",
                layout.x, layout.y, layout.scale
            ))
        }
        EditCommand::Save => {
            session.save()?;
            Some("saved".to_string())
        }
        EditCommand::Cancel => {
            session.cancel()?;
            Some("discarded".to_string())
        }
        EditCommand::Show | EditCommand::Quit => None,
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use gitclock_layout::{Layout, LayoutMap, LayoutStore, ScaleLimits};
    use gitclock_platform::{FilePreferences, MemoryPreferences};

    use super::*;

    fn editor_on(store: Arc<LayoutStore>) -> Editor {
        let session = GestureSession::new(store, ScaleLimits::default());
        Editor::new(session, Arc::new(ScreenGeometryPublisher::default()))
    }

    fn editor() -> (Arc<LayoutStore>, Editor) {
        let store = Arc::new(LayoutStore::open(Arc::new(MemoryPreferences::new())));
        (store.clone(), editor_on(store))
    }

    fn drive(editor: &mut Editor, script: &str) -> String {
        let mut out = Vec::new();
        run(editor, Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("pan 3 -4".parse::<EditCommand>(), Ok(EditCommand::Pan(3.0, -4.0)));
        assert_eq!("GRAB clock".parse::<EditCommand>(), Ok(EditCommand::Grab(WidgetId::Clock)));
        assert_eq!("pinch 1.5".parse::<EditCommand>(), Ok(EditCommand::Pinch(1.5)));
        assert!("pan 3".parse::<EditCommand>().is_err());
        assert!("grab WEATHER".parse::<EditCommand>().is_err());
        assert!("jump".parse::<EditCommand>().is_err());
    }

    #[test]
    fn scripted_drag_is_saved() {
        let (store, mut editor) = editor();
        let out = drive(
            &mut editor,
            "edit\ngrab BATTERY\npan 10 5\npan 10 5\npinch 2\nrelease\nsave\n",
        );
        assert!(out.contains("saved"), "{out}");
        assert_eq!(store.committed().resolve(WidgetId::Battery), Layout::new(20.0, 10.0, 2.0));
    }

    #[test]
    fn eof_while_editing_discards() {
        let (store, mut editor) = editor();
        drive(&mut editor, "edit\ngrab CLOCK\npan 100 100\n");
        assert!(!editor.is_editing());
        assert_eq!(store.get(WidgetId::Clock), WidgetId::Clock.default_layout());
    }

    #[test]
    fn errors_do_not_stop_the_script() {
        let (_, mut editor) = editor();
        let out = drive(&mut editor, "pan 1 1\nbogus\n# comment\nedit\nshow\nquit\nsave\n");
        assert!(out.contains("error: edit mode is not active"), "{out}");
        assert!(out.contains("error: unknown command: bogus"), "{out}");
        assert!(out.contains("COMMIT_BOARD"), "{out}");
        assert!(!out.contains("saved"), "{out}");
    }

    #[test]
    fn line_at_a_time_matches_the_stream_runner() {
        let (store, mut editor) = editor();
        assert_eq!(editor.handle_line("  "), ControlFlow::Continue(String::new()));
        assert_eq!(editor.handle_line("edit"), ControlFlow::Continue("editing\n".into()));
        assert!(editor.is_editing());
        assert_eq!(editor.handle_line("quit"), ControlFlow::Break(()));

        assert_eq!(editor.finish(), None);
        assert!(!editor.is_editing());
        assert!(store.committed().is_empty());
    }

    #[test]
    fn native_save_keeps_bridge_commits_on_the_same_store() {
        let (store, mut editor) = editor();
        for line in ["edit", "grab CLOCK", "pan 5 6", "release"] {
            assert!(editor.handle_line(line).is_continue());
        }

        let remote: LayoutMap = [(WidgetId::Battery, Layout::new(33.0, 44.0, 1.0))]
            .into_iter()
            .collect();
        store.commit_entries(&remote).unwrap();
        assert_eq!(store.get(WidgetId::Battery), Layout::new(33.0, 44.0, 1.0));

        assert_eq!(editor.handle_line("save"), ControlFlow::Continue("saved\n".into()));
        let committed = store.committed();
        assert_eq!(committed.resolve(WidgetId::Battery), Layout::new(33.0, 44.0, 1.0));
        assert_eq!(committed.resolve(WidgetId::Clock).x, 5.0);
    }

    #[test]
    fn entering_edit_picks_up_another_writers_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mine = Arc::new(LayoutStore::open(Arc::new(FilePreferences::open(&path))));
        let other = LayoutStore::open(Arc::new(FilePreferences::open(&path)));

        let remote: LayoutMap = [(WidgetId::Stats, Layout::new(0.0, -90.0, 1.0))]
            .into_iter()
            .collect();
        other.commit_entries(&remote).unwrap();

        let mut editor = editor_on(mine.clone());
        assert_eq!(editor.handle_line("edit"), ControlFlow::Continue("editing\n".into()));
        assert_eq!(mine.get(WidgetId::Stats), Layout::new(0.0, -90.0, 1.0));
    }
}
