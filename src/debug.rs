//! Debug console output that can be switched off entirely.
//!
//! Firmware code prints through [`DebugOutput`] with the [`debug_print!`] and
//! [`debug_println!`] macros. When debug output is disabled the console is
//! dropped at construction and no call ever reaches it.

use core::fmt::Arguments;

/// Sink for debug text, e.g. the serial console.
pub trait Console {
    fn print(&mut self, args: Arguments<'_>);

    fn println(&mut self, args: Arguments<'_>) {
        self.print(format_args!("{}\n", args));
    }
}

/// Console forwarding each call to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogConsole;

impl Console for LogConsole {
    fn print(&mut self, args: Arguments<'_>) {
        log::debug!("{}", args);
    }

    fn println(&mut self, args: Arguments<'_>) {
        log::debug!("{}", args);
    }
}

pub struct DebugOutput<C: Console> {
    console: Option<C>,
}

impl<C: Console> DebugOutput<C> {
    pub fn new(enabled: bool, console: C) -> Self {
        Self {
            console: enabled.then_some(console),
        }
    }

    pub fn disabled() -> Self {
        Self { console: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.console.is_some()
    }

    #[inline]
    pub fn print(&mut self, args: Arguments<'_>) {
        if let Some(console) = self.console.as_mut() {
            console.print(args);
        }
    }

    #[inline]
    pub fn println(&mut self, args: Arguments<'_>) {
        if let Some(console) = self.console.as_mut() {
            console.println(args);
        }
    }

    /// Give back the console, if output was enabled.
    pub fn into_inner(self) -> Option<C> {
        self.console
    }
}

#[macro_export]
macro_rules! debug_print {
    ($out:expr, $($arg:tt)*) => {
        $out.print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_println {
    ($out:expr) => {
        $out.println(format_args!(""))
    };
    ($out:expr, $($arg:tt)*) => {
        $out.println(format_args!($($arg)*))
    };
}
