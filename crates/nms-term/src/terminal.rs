// SPDX-License-Identifier: MIT
//
// Terminal control — capability probing, raw-mode keypress reads, and
// panic-safe restore.
//
// Unsafe: the POSIX terminal calls (termios get/set/flush, the window size
// ioctl, isatty, poll, single-byte read and write) are all FFI. Each unsafe
// block wraps one call.
#![allow(unsafe_code)]
//
// The effect never stays in raw mode. It spends its life writing frames in
// the terminal's normal mode and only drops into raw mode for the instant it
// takes to read one keypress. `RawMode` is an RAII guard around exactly that
// window: whatever happens during the read, dropping the guard puts the
// original termios back.
//
// Piped input is the common case (`ls | nms`), and then stdin is the pipe,
// not the keyboard. Keypresses are read from the controlling terminal
// (`/dev/tty`) instead. With no terminal at all the reader degrades to a
// line-buffered read of stdin and finally to `KeyRead::Unavailable`, and the
// caller decides what to do about it.
//
// On Windows the same guard shape wraps crossterm's console mode switch,
// and the console is asked for VT processing once so the escape sequences
// render instead of printing as text.
//
// The panic hook writes a pre-built restore sequence directly to fd 1,
// bypassing Rust's stdout lock, so a panic mid-frame still leaves the user
// with a visible cursor and their original screen.

#[cfg(unix)]
use std::fs::File;
use std::io;
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;
#[cfg(windows)]
use std::time::Duration;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Window size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

impl Size {
    /// What a terminal that won't say is assumed to be.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

// ─── Queries ────────────────────────────────────────────────────────────────

/// Window size of the terminal on stdout (`TIOCGWINSZ`).
///
/// `None` when stdout is redirected or reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };
    (rc == 0 && ws.ws_col != 0 && ws.ws_row != 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

#[cfg(unix)]
fn fd_is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Whether stdin is a terminal (as opposed to a pipe or file).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    fd_is_tty(libc::STDIN_FILENO)
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    use std::io::IsTerminal;
    io::stdin().is_terminal()
}

// ─── Capabilities ───────────────────────────────────────────────────────────

/// Operating system family, which decides the keypress primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// termios, ioctl, poll.
    Posix,
    /// Console API, through crossterm.
    Windows,
    /// Nothing known; line-buffered reads only.
    Unknown,
}

impl Platform {
    /// The platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(unix) {
            Self::Posix
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unknown
        }
    }

    /// Whether raw single-keypress reads are available.
    #[must_use]
    pub const fn supports_raw_mode(self) -> bool {
        matches!(self, Self::Posix | Self::Windows)
    }
}

/// What the terminal can do, probed once at startup.
///
/// Passed into [`Terminal::new`] rather than re-queried: the answers don't
/// change during one run, and tests can hand in whatever they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub platform: Platform,
    /// Current size, or [`Size::FALLBACK`].
    pub size: Size,
    pub stdin_tty: bool,
}

impl Capabilities {
    /// Probe the running process's terminal.
    #[must_use]
    pub fn probe() -> Self {
        Self {
            platform: Platform::current(),
            size: get_size().unwrap_or(Size::FALLBACK),
            stdin_tty: is_tty(),
        }
    }
}

// ─── Keypress Reads ─────────────────────────────────────────────────────────

/// Ctrl-C as delivered in raw mode (ISIG off, so no signal is raised).
#[cfg(any(unix, windows))]
const CTRL_C: u8 = 0x03;

/// Outcome of a blocking single-keypress read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRead {
    /// A key arrived. The value is the first byte of its encoding.
    Key(u8),
    /// The user asked to stop (Ctrl-C in raw mode, or a signal during the read).
    Interrupt,
    /// No keyboard to read from. The caller picks a fallback.
    Unavailable,
}

/// Source of blocking keypresses.
///
/// [`Terminal`] is the real implementation. The animation engine only sees
/// this trait, so tests can script keypresses.
pub trait KeySource {
    /// Block until one keypress arrives (or the read cannot happen).
    fn read_key(&mut self) -> KeyRead;
}

/// Map the result of a one-byte `read()` to a [`KeyRead`].
#[cfg(unix)]
fn classify_read(n: isize, byte: u8, err: Option<io::ErrorKind>) -> KeyRead {
    match n {
        1 if byte == CTRL_C => KeyRead::Interrupt,
        1 => KeyRead::Key(byte),
        0 => KeyRead::Unavailable,
        _ if err == Some(io::ErrorKind::Interrupted) => KeyRead::Interrupt,
        _ => KeyRead::Unavailable,
    }
}

/// One blocking `read()` of a single byte.
#[cfg(unix)]
fn read_byte(fd: RawFd) -> KeyRead {
    let mut byte = 0u8;
    let n = unsafe { libc::read(fd, (&raw mut byte).cast::<libc::c_void>(), 1) };
    let err = (n < 0).then(|| io::Error::last_os_error().kind());
    classify_read(n, byte, err)
}

/// Line-buffered fallback: consume stdin up to a newline.
///
/// Reports the first byte of the line; EOF before any byte means there is
/// nobody to press a key.
#[cfg(unix)]
fn read_line_fallback() -> KeyRead {
    let mut first = None;
    loop {
        match read_byte(libc::STDIN_FILENO) {
            KeyRead::Key(b) => {
                first.get_or_insert(b);
                if b == b'\n' {
                    break;
                }
            }
            KeyRead::Interrupt => return KeyRead::Interrupt,
            KeyRead::Unavailable => break,
        }
    }
    first.map_or(KeyRead::Unavailable, KeyRead::Key)
}

/// Map one console event to a [`KeyRead`]. `None` for anything that is not
/// a key press (releases, resizes, focus changes).
#[cfg(windows)]
fn classify_event(event: crossterm::event::Event) -> Option<KeyRead> {
    use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let byte = match key.code {
        KeyCode::Char('c' | 'C') if ctrl => CTRL_C,
        KeyCode::Char(c) => {
            let mut utf8 = [0u8; 4];
            c.encode_utf8(&mut utf8).as_bytes()[0]
        }
        KeyCode::Enter => b'\r',
        KeyCode::Tab => b'\t',
        KeyCode::Backspace => 0x08,
        KeyCode::Esc => 0x1b,
        _ => 0,
    };
    Some(if byte == CTRL_C {
        KeyRead::Interrupt
    } else {
        KeyRead::Key(byte)
    })
}

#[cfg(not(unix))]
fn read_line_fallback() -> KeyRead {
    use std::io::BufRead;

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => KeyRead::Unavailable,
        Ok(_) => KeyRead::Key(line.bytes().next().unwrap_or(b'\n')),
    }
}

// ─── Panic Restore ──────────────────────────────────────────────────────────

/// The termios a live [`RawMode`] replaced. The panic hook can't see the
/// guard, so the guard parks a copy here.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<(RawFd, libc::termios)>> = Mutex::new(None);

#[cfg(unix)]
fn restore_saved_termios() {
    let saved = TERMIOS_BACKUP.lock().ok().and_then(|slot| *slot);
    if let Some((fd, termios)) = saved {
        unsafe {
            libc::tcsetattr(fd, libc::TCSANOW, &raw const termios);
        }
    }
}

/// Written on panic: plain rendition, visible cursor, original screen back.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?47l";

static PANIC_HOOK: Once = Once::new();

/// Chain a hook in front of the current one that puts the terminal back
/// before the panic message prints. Installed once per process.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            write_emergency_restore();
            #[cfg(unix)]
            restore_saved_termios();
            #[cfg(windows)]
            let _ = crossterm::terminal::disable_raw_mode();
            previous(info);
        }));
    });
}

/// Raw `write(2)` to fd 1. Going through `io::stdout()` could deadlock when
/// the panic happened with the stdout lock held, i.e. mid-frame.
#[cfg(unix)]
fn write_emergency_restore() {
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast(),
            EMERGENCY_RESTORE.len(),
        );
    }
}

#[cfg(not(unix))]
fn write_emergency_restore() {
    use std::io::Write;
    let mut out = io::stdout();
    let _ = out.write_all(EMERGENCY_RESTORE).and_then(|()| out.flush());
}

// ─── Raw Mode Guard ─────────────────────────────────────────────────────────

/// Raw mode on one fd for as long as the guard lives.
#[cfg(unix)]
struct RawMode {
    fd: RawFd,
    original: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    /// Switch `fd` to raw mode: no echo, no line buffering, no signal keys
    /// (Ctrl-C arrives as `0x03`), `read` returns after one byte.
    fn enable(fd: RawFd) -> io::Result<Self> {
        if !fd_is_tty(fd) {
            return Err(io::ErrorKind::Unsupported.into());
        }

        let mut original = std::mem::MaybeUninit::<libc::termios>::uninit();
        if unsafe { libc::tcgetattr(fd, original.as_mut_ptr()) } != 0 {
            return Err(io::Error::last_os_error());
        }
        // tcgetattr succeeded, so every field is filled in.
        let original = unsafe { original.assume_init() };

        let mut tio = original;
        unsafe { libc::cfmakeraw(&raw mut tio) };
        tio.c_cc[libc::VMIN] = 1;
        tio.c_cc[libc::VTIME] = 0;

        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw const tio) } != 0 {
            return Err(io::Error::last_os_error());
        }
        if let Ok(mut slot) = TERMIOS_BACKUP.lock() {
            *slot = Some((fd, original));
        }
        Ok(Self { fd, original })
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        unsafe {
            libc::tcsetattr(self.fd, libc::TCSADRAIN, &raw const self.original);
        }
        if let Ok(mut slot) = TERMIOS_BACKUP.lock() {
            slot.take();
        }
    }
}

/// Console raw mode for as long as the guard lives: no line input, no
/// echo, Ctrl-C delivered as a key event.
#[cfg(windows)]
struct RawMode;

#[cfg(windows)]
impl RawMode {
    fn enable() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

#[cfg(windows)]
impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

// ─── Terminal ───────────────────────────────────────────────────────────────

/// Keyboard side of the terminal.
///
/// Output goes wherever the caller points it (normally stdout); this handle
/// owns keypress reads and input probing, and installs the panic hook that
/// restores the screen.
pub struct Terminal {
    caps: Capabilities,

    /// Controlling terminal, opened when stdin is not a TTY.
    #[cfg(unix)]
    tty: Option<File>,
}

impl Terminal {
    /// Create a terminal handle from probed capabilities and install the
    /// panic hook. When stdin is not a tty, keypresses come from `/dev/tty`
    /// if one can be opened.
    ///
    /// # Errors
    ///
    /// None today on any platform.
    pub fn new(caps: Capabilities) -> io::Result<Self> {
        install_panic_hook();

        // Turns on ENABLE_VIRTUAL_TERMINAL_PROCESSING where the console
        // allows it; older consoles keep printing escapes verbatim.
        #[cfg(windows)]
        let _ = crossterm::ansi_support::supports_ansi();

        #[cfg(unix)]
        let tty = if caps.stdin_tty {
            None
        } else {
            File::open("/dev/tty").ok()
        };

        Ok(Self {
            caps,
            #[cfg(unix)]
            tty,
        })
    }

    /// The fd keypresses come from, if there is a keyboard at all.
    #[cfg(unix)]
    fn key_fd(&self) -> Option<RawFd> {
        if self.caps.stdin_tty {
            Some(libc::STDIN_FILENO)
        } else {
            self.tty.as_ref().map(AsRawFd::as_raw_fd)
        }
    }

    /// Non-blocking check for pending input.
    ///
    /// Without a keyboard there is nothing to wait for, so input counts as
    /// available and pollers don't stall.
    #[cfg(unix)]
    #[must_use]
    pub fn has_input(&self) -> bool {
        let Some(fd) = self.key_fd() else {
            return true;
        };
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&raw mut pfd, 1, 0) };
        ready > 0 && pfd.revents & libc::POLLIN != 0
    }

    #[cfg(windows)]
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.caps.stdin_tty || crossterm::event::poll(Duration::ZERO).unwrap_or(false)
    }

    #[cfg(not(any(unix, windows)))]
    #[must_use]
    pub fn has_input(&self) -> bool {
        !self.caps.stdin_tty
    }

    /// Discard any keypresses typed ahead of the next read.
    #[cfg(unix)]
    pub fn clear_input(&self) {
        if let Some(fd) = self.key_fd() {
            unsafe {
                let _ = libc::tcflush(fd, libc::TCIFLUSH);
            }
        }
    }

    #[cfg(windows)]
    pub fn clear_input(&self) {
        while crossterm::event::poll(Duration::ZERO).unwrap_or(false) {
            if crossterm::event::read().is_err() {
                break;
            }
        }
    }

    #[cfg(not(any(unix, windows)))]
    pub fn clear_input(&self) {}
}

impl KeySource for Terminal {
    #[cfg(unix)]
    fn read_key(&mut self) -> KeyRead {
        if !self.caps.platform.supports_raw_mode() {
            return read_line_fallback();
        }
        let Some(fd) = self.key_fd() else {
            return read_line_fallback();
        };
        let Ok(raw) = RawMode::enable(fd) else {
            return read_line_fallback();
        };
        let key = read_byte(fd);
        drop(raw);
        key
    }

    #[cfg(windows)]
    fn read_key(&mut self) -> KeyRead {
        if !self.caps.platform.supports_raw_mode() {
            return read_line_fallback();
        }
        let Ok(raw) = RawMode::enable() else {
            return read_line_fallback();
        };
        let key = loop {
            match crossterm::event::read() {
                Ok(event) => {
                    if let Some(key) = classify_event(event) {
                        break key;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => break KeyRead::Interrupt,
                Err(_) => break KeyRead::Unavailable,
            }
        };
        drop(raw);
        key
    }

    #[cfg(not(any(unix, windows)))]
    fn read_key(&mut self) -> KeyRead {
        read_line_fallback()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
