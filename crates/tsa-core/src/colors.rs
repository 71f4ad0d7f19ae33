//! Terminal colors for formatted output.
//!
//! With the `std` feature (default) styling goes through the `colored` crate,
//! which honors `NO_COLOR`, `CLICOLOR_FORCE` and TTY detection. Without `std`
//! every helper returns the input unchanged.

extern crate alloc;
use alloc::string::String;

#[derive(Clone, Copy)]
enum Hue {
    Plain,
    Green,
    Red,
    Yellow,
    Cyan,
}

#[cfg(feature = "std")]
fn paint(s: &str, hue: Hue, strong: bool, faint: bool) -> String {
    use colored::Colorize;

    let mut styled = match hue {
        Hue::Plain => s.normal(),
        Hue::Green => s.green(),
        Hue::Red => s.red(),
        Hue::Yellow => s.yellow(),
        Hue::Cyan => s.cyan(),
    };
    if strong {
        styled = styled.bold();
    }
    if faint {
        styled = styled.dimmed();
    }
    styled.to_string()
}

#[cfg(not(feature = "std"))]
fn paint(s: &str, _hue: Hue, _strong: bool, _faint: bool) -> String {
    String::from(s)
}

pub fn green(s: &str) -> String {
    paint(s, Hue::Green, false, false)
}

pub fn red(s: &str) -> String {
    paint(s, Hue::Red, false, false)
}

pub fn yellow(s: &str) -> String {
    paint(s, Hue::Yellow, false, false)
}

pub fn bold(s: &str) -> String {
    paint(s, Hue::Plain, true, false)
}

pub fn dim(s: &str) -> String {
    paint(s, Hue::Plain, false, true)
}

pub fn bold_green(s: &str) -> String {
    paint(s, Hue::Green, true, false)
}

pub fn bold_red(s: &str) -> String {
    paint(s, Hue::Red, true, false)
}

pub fn bold_yellow(s: &str) -> String {
    paint(s, Hue::Yellow, true, false)
}

pub fn bold_cyan(s: &str) -> String {
    paint(s, Hue::Cyan, true, false)
}
