// Brutalmode Startup Banner

use std::time::Duration;

use crate::quit::{EscapePolicy, QuitSequenceDetector};
use crate::Mode;

const LOGO: &str = "\
██████╗ ██████╗ ██╗   ██╗████████╗ █████╗ ██╗     ██╗   ██╗██╗███╗   ███╗
██╔══██╗██╔══██╗██║   ██║╚══██╔══╝██╔══██╗██║     ██║   ██║██║████╗ ████║
██████╔╝██████╔╝██║   ██║   ██║   ███████║██║     ██║   ██║██║██╔████╔██║
██╔══██╗██╔══██╗██║   ██║   ██║   ██╔══██║██║     ╚██╗ ██╔╝██║██║╚██╔╝██║
██████╔╝██║  ██║╚██████╔╝   ██║   ██║  ██║███████╗ ╚████╔╝ ██║██║ ╚═╝ ██║
╚═════╝ ╚═╝  ╚═╝ ╚═════╝    ╚═╝   ╚═╝  ╚═╝╚══════╝  ╚═══╝  ╚═╝╚═╝     ╚═╝
";

const RULE: &str = "═══════════════════════════════════════════════════════════════════════════";

/// Width of the title line, matching the rule
const TITLE_WIDTH: usize = 75;

/// Startup banner for a mode. `None` when the mode is disabled.
///
/// The lenient banner describes the gestures as `gestures` and `phrase`
/// are actually configured.
pub fn banner(mode: Mode, gestures: &QuitSequenceDetector, phrase: &str) -> Option<String> {
    let lenient;
    let (title, body) = match mode {
        Mode::Disabled => return None,
        Mode::Lenient => {
            lenient = lenient_body(gestures, phrase);
            ("[ EASY MODE ]", lenient.as_str())
        }
        Mode::Strict => (
            "[ HARD MODE ]",
            "\
Restrictions:
  • Arrow keys disabled
  • Use h/j/k/l for navigation
",
        ),
        Mode::Stricter => (
            "[ HARDER MODE ]",
            "\
Restrictions:
  • Arrow keys disabled
  • Standard quit commands disabled
  • Exit commands blocked
",
        ),
        Mode::Randomized => (
            "[ HARDEST MODE ]",
            "\
Restrictions:
  • All keybindings randomized within logical groups
  • Arrow keys disabled
  • Copy/paste/yank operations remapped
  • Undo operation remapped
  • Visual mode keys remapped
  • Standard quit commands disabled

  Good luck! Figure out the new mappings yourself.
",
        ),
    };

    Some(format!(
        "\n{LOGO}\n{RULE}\n{title:^width$}\n{RULE}\n\n{body}\n{RULE}\n",
        width = TITLE_WIDTH
    ))
}

fn lenient_body(gestures: &QuitSequenceDetector, phrase: &str) -> String {
    let ctrl = format!(
        "Press Ctrl+X, Ctrl+C or Ctrl+Q {} in a row to force quit",
        times(gestures.ctrl().threshold() as usize)
    );
    let escape = match gestures.escape().policy() {
        EscapePolicy::Window { presses, window } => format!(
            "Press Esc {} within {} to force quit",
            times(presses),
            seconds(window)
        ),
        EscapePolicy::Hold { threshold, .. } => {
            format!("Hold Esc for more than {} to force quit", seconds(threshold))
        }
    };

    format!(
        "\
Enabled features:
  • Arrow keys enabled for navigation
  • Shift+Arrow starts a selection
  • {ctrl}
  • {escape}
  • Easter egg: type '{phrase}' in INSERT mode to force quit!
  • You can use :quit! and :q! to force quit without saving

Modified keybindings (Windows-style):
  • Ctrl+Z  →  Undo (u)
  • Ctrl+C  →  Copy/Yank (use in visual mode)
  • Ctrl+X  →  Cut (use in visual mode)
  • Ctrl+V  →  Paste (use \"+p or \"*p for clipboard)

Tip: Select text in visual mode (v), then Ctrl+C to copy,
     or Ctrl+X to cut. Use Ctrl+V or \"*p to paste.
"
    )
}

fn times(n: usize) -> String {
    match n {
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{n} times"),
    }
}

fn seconds(d: Duration) -> String {
    let ms = d.as_millis();
    match ms {
        1000 => "1 second".to_string(),
        ms if ms % 1000 == 0 => format!("{} seconds", ms / 1000),
        ms => format!("{:.1} seconds", ms as f64 / 1000.0),
    }
}
