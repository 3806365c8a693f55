//! Terminal rendering of notifications.

use std::io::{self, Write};
use std::time::Duration;

use park_core::notify::{FADE_OUT, ToastPhase, ToastSlot, VISIBLE_FOR};
use park_core::{Notification, NotificationKind};

/// Moves the cursor up to the toast line and clears it.
const ERASE_PREVIOUS_LINE: &str = "\x1b[1A\r\x1b[2K";

fn label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "success",
        NotificationKind::Error => "error",
        NotificationKind::Info => "info",
    }
}

/// One line for `notification`: bold white on the kind's background colour
/// when `ansi` is set, a bracketed kind prefix otherwise.
pub fn render(
    notification: &Notification,
    ansi: bool,
) -> String {
    if ansi {
        banner(notification, "1")
    } else {
        format!("[{}] {}", label(notification.kind), notification.message)
    }
}

/// The toast as it looks after being on screen for `elapsed`: bold while
/// visible, faint while fading out, gone once removed.
pub fn render_at(
    notification: &Notification,
    elapsed: Duration,
    ansi: bool,
) -> Option<String> {
    match Notification::phase_at(elapsed) {
        ToastPhase::Visible => Some(render(notification, ansi)),
        ToastPhase::FadingOut if ansi => Some(banner(notification, "2")),
        ToastPhase::FadingOut => Some(render(notification, ansi)),
        ToastPhase::Removed => None,
    }
}

fn banner(
    notification: &Notification,
    weight: &str,
) -> String {
    let (r, g, b) = notification.kind.rgb();
    format!(
        "\x1b[{weight};38;2;255;255;255;48;2;{r};{g};{b}m {} \x1b[0m",
        notification.message
    )
}

/// Puts `notification` in the slot, replacing the previous toast, and
/// writes it to `out`.
pub fn show<W: Write>(
    slot: &mut ToastSlot,
    notification: Notification,
    out: &mut W,
    ansi: bool,
) -> io::Result<()> {
    writeln!(out, "{}", render(&notification, ansi))?;
    if let Some(previous) = slot.show(notification) {
        tracing::trace!(message = %previous.message, "replaced toast");
    }
    Ok(())
}

/// Takes the shown toast out of the slot and, on a terminal, redraws it
/// through its fade-out and then erases it. Piped output is left as is.
pub async fn linger<W: Write>(
    slot: &mut ToastSlot,
    out: &mut W,
    ansi: bool,
) -> io::Result<()> {
    linger_for(slot, out, ansi, VISIBLE_FOR, FADE_OUT).await
}

async fn linger_for<W: Write>(
    slot: &mut ToastSlot,
    out: &mut W,
    ansi: bool,
    visible: Duration,
    fade: Duration,
) -> io::Result<()> {
    let Some(current) = slot.dismiss() else {
        return Ok(());
    };
    if !ansi {
        return Ok(());
    }

    tokio::time::sleep(visible).await;
    redraw(out, render_at(&current, VISIBLE_FOR, ansi))?;
    tokio::time::sleep(fade).await;
    redraw(out, render_at(&current, VISIBLE_FOR + FADE_OUT, ansi))
}

fn redraw<W: Write>(
    out: &mut W,
    line: Option<String>,
) -> io::Result<()> {
    write!(out, "{ERASE_PREVIOUS_LINE}")?;
    if let Some(line) = line {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
