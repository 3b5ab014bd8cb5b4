// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Interrupt handling.
//
// Ctrl-C during the animation must not kill the process outright: the
// screen is saved and the cursor hidden, and a dead process leaves both that
// way. Instead SIGINT/SIGTERM set a flag. The animation polls it between
// frames and inside every sleep, then unwinds through its normal exit path.
//
// The handler is installed without SA_RESTART on purpose. A blocking
// `read()` waiting for a keypress then fails with EINTR, which the keypress
// reader reports as an interrupt rather than quietly resuming the wait.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Flag shared with the signal handler. Set once, on first install.
static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

// ─── CancelToken ─────────────────────────────────────────────────────────────

/// Cooperative cancellation flag.
///
/// Cheap to clone; all clones observe the same flag. Tokens from
/// [`CancelToken::new`] are only cancelled explicitly, tokens from
/// [`install_interrupt_handler`] are also cancelled by SIGINT/SIGTERM.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

// ─── Signal Handler ──────────────────────────────────────────────────────────

/// Route SIGINT and SIGTERM to a [`CancelToken`].
///
/// Idempotent: every call returns a token tied to the same process-wide
/// flag. On non-unix platforms the returned token is never cancelled by a
/// signal.
#[must_use]
pub fn install_interrupt_handler() -> CancelToken {
    let flag = INTERRUPT_FLAG.get_or_init(|| {
        install_handlers();
        Arc::new(AtomicBool::new(false))
    });
    CancelToken {
        flag: Arc::clone(flag),
    }
}

#[cfg(unix)]
fn install_handlers() {
    for sig in [libc::SIGINT, libc::SIGTERM] {
        unsafe {
            let mut sa: libc::sigaction = std::mem::zeroed();
            sa.sa_sigaction = interrupt_handler as *const () as usize;
            sa.sa_flags = 0;
            libc::sigemptyset(&raw mut sa.sa_mask);
            libc::sigaction(sig, &raw const sa, std::ptr::null_mut());
        }
    }
}

/// Only touches an atomic, which is async-signal-safe.
#[cfg(unix)]
extern "C" fn interrupt_handler(_sig: libc::c_int) {
    if let Some(flag) = INTERRUPT_FLAG.get() {
        flag.store(true, Ordering::Relaxed);
    }
}

#[cfg(not(unix))]
fn install_handlers() {
    // No-op on non-unix platforms.
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_token_is_not_cancelled() {
        assert!(!CancelToken::new().is_cancelled());
    }

    #[test]
    fn cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn independent_tokens_do_not_share_state() {
        let a = CancelToken::new();
        let b = CancelToken::new();
        a.cancel();
        assert!(!b.is_cancelled());
    }

    #[test]
    fn installed_tokens_share_one_flag() {
        let a = install_interrupt_handler();
        let b = install_interrupt_handler();
        assert!(Arc::ptr_eq(&a.flag, &b.flag));
    }
}
