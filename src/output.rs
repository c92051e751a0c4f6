use console::{Term, style};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Render the `ERROR` label, colored only when writing to a terminal.
///
/// The caller already knows whether its stream is a terminal, so styling is
/// forced rather than left to console's stdout check.
fn error_label(is_tty: bool) -> String {
    if is_tty {
        style("ERROR").bold().red().force_styling(true).to_string()
    } else {
        "ERROR".to_string()
    }
}

fn warn_label(is_tty: bool) -> String {
    if is_tty {
        style("WARN").bold().yellow().force_styling(true).to_string()
    } else {
        "WARN".to_string()
    }
}

pub fn err_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{}: {msg}", error_label(is_tty));
}

pub fn warn_to_with_tty(w: &mut dyn Write, msg: &str, is_tty: bool) {
    let _ = writeln!(w, "{}: {msg}", warn_label(is_tty));
}

/// Progress line on stdout, silenced by `--quiet`.
pub fn say(msg: &str) {
    if !is_quiet() {
        let _ = writeln!(io::stdout(), "{msg}");
    }
}

/// Extra progress line, only shown with `--verbose`.
pub fn say_verbose(msg: &str) {
    if is_verbose() && !is_quiet() {
        let _ = writeln!(io::stdout(), "{msg}");
    }
}

pub fn warn(msg: &str) {
    warn_to_with_tty(&mut io::stderr(), msg, Term::stderr().is_term());
}

/// Fatal error line on stderr. Always printed, even when quiet.
pub fn err(msg: &str) {
    err_to_with_tty(&mut io::stderr(), msg, Term::stderr().is_term());
}
