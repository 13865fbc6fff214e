use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

static VERBOSE: AtomicBool = AtomicBool::new(false);
static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Activate buffering. While active, warnings are stored instead of printed,
/// so they can follow a report written to stdout.
pub fn activate() {
    if let Ok(mut guard) = BUFFER.lock() {
        *guard = Some(Vec::new());
    }
}

/// Deactivate buffering and return all collected messages.
pub fn drain() -> Vec<String> {
    BUFFER
        .lock()
        .ok()
        .and_then(|mut guard| guard.take())
        .unwrap_or_default()
}

/// Deactivate buffering and print whatever was collected.
pub fn flush() {
    for msg in drain() {
        eprintln!("{}", msg);
    }
}

/// Write a warning. Stored while buffering is active, printed otherwise.
pub fn warn(msg: String) {
    let mut guard = match BUFFER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Write a message only when `--verbose` is on. Goes through the same buffer as warnings.
pub fn verbose(msg: String) {
    if is_verbose() {
        warn(msg);
    }
}

/// Works like `eprintln!` but routes through the diagnostics buffer.
#[macro_export]
macro_rules! warn_eprintln {
    ($($arg:tt)*) => {
        $crate::diagnostics::warn(format!($($arg)*))
    };
}

/// Like [`warn_eprintln!`], but silent unless verbose output is enabled.
#[macro_export]
macro_rules! verbose_eprintln {
    ($($arg:tt)*) => {
        $crate::diagnostics::verbose(format!($($arg)*))
    };
}
