//! Display styles and explicitly formatted values.

use std::borrow::Cow;
use std::fmt::{self, Alignment, Debug, Display, Write};
use serde::{Deserialize, Serialize};

use super::color_escapes_enabled;

/// Foreground colors available to log arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl From<Color> for colored::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Red => colored::Color::Red,
            Color::Green => colored::Color::Green,
            Color::Yellow => colored::Color::Yellow,
            Color::Blue => colored::Color::Blue,
            Color::Magenta => colored::Color::Magenta,
            Color::Cyan => colored::Color::Cyan,
        }
    }
}

/// A rendering style for one logged value.
///
/// The default value carries no attributes and renders text unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct Format {
    pub color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underlined: bool,
}

impl Format {
    /// A format with only a foreground color.
    pub const fn color(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
            dim: false,
            italic: false,
            underlined: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn dimmed(mut self) -> Self {
        self.dim = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underlined(mut self) -> Self {
        self.underlined = true;
        self
    }

    /// True when the format has no attributes at all.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Wrap `text` in the escape sequences for this format.
    ///
    /// Escapes are always written; whether an output wants them is decided by
    /// the formatter, never by terminal detection.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }

        let mut set = Vec::new();
        let mut reset = Vec::new();
        if let Some(color) = self.color {
            set.push(colored::Color::from(color).to_fg_str());
            reset.push(Cow::Borrowed("39"));
        }
        for (enabled, on, off) in [
            (self.bold, "1", "22"),
            (self.dim, "2", "22"),
            (self.italic, "3", "23"),
            (self.underlined, "4", "24"),
        ] {
            if enabled {
                set.push(Cow::Borrowed(on));
                reset.push(Cow::Borrowed(off));
            }
        }

        format!("\x1b[{}m{text}\x1b[{}m", set.join(";"), reset.join(";"))
    }

    /// Attach this format to a value, overriding any type-based style.
    pub fn apply<T>(self, value: T) -> Formatted<T> {
        Formatted {
            value,
            format: self,
        }
    }
}

/// A value paired with an explicit format.
///
/// Renders styled only while a formatter has color escapes switched on for the
/// current thread; otherwise it renders exactly like the inner value.
#[derive(Clone, Copy)]
pub struct Formatted<T> {
    value: T,
    format: Format,
}

impl<T> Formatted<T> {
    pub fn get_ref(&self) -> &T {
        &self.value
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Display> Display for Formatted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_display(f, &self.value, active(Some(self.format)))
    }
}

impl<T: Debug> Debug for Formatted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_debug(f, &self.value, active(Some(self.format)))
    }
}

/// Drop the format unless escapes are on and the format does something.
pub(crate) fn active(format: Option<Format>) -> Option<Format> {
    format.filter(|format| !format.is_plain() && color_escapes_enabled())
}

pub(crate) fn write_display<T: Display + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    value: &T,
    format: Option<Format>,
) -> fmt::Result {
    let Some(format) = format else {
        return Display::fmt(value, f);
    };
    let precision = f.precision();
    write_painted(f, format, |width| match (width, precision) {
        (None, None) => value.to_string(),
        (None, Some(p)) => format!("{value:.p$}"),
        (Some(w), None) => format!("{value:w$}"),
        (Some(w), Some(p)) => format!("{value:w$.p$}"),
    })
}

pub(crate) fn write_debug<T: Debug + ?Sized>(
    f: &mut fmt::Formatter<'_>,
    value: &T,
    format: Option<Format>,
) -> fmt::Result {
    let Some(format) = format else {
        return Debug::fmt(value, f);
    };
    let precision = f.precision();
    let alternate = f.alternate();
    write_painted(f, format, |width| match (width, precision, alternate) {
        (None, None, false) => format!("{value:?}"),
        (None, None, true) => format!("{value:#?}"),
        (None, Some(p), false) => format!("{value:.p$?}"),
        (None, Some(p), true) => format!("{value:#.p$?}"),
        (Some(w), None, false) => format!("{value:w$?}"),
        (Some(w), None, true) => format!("{value:#w$?}"),
        (Some(w), Some(p), false) => format!("{value:w$.p$?}"),
        (Some(w), Some(p), true) => format!("{value:#w$.p$?}"),
    })
}

/// Paint the value and pad around the escapes, so a styled argument takes
/// the same columns as its plain rendering.
///
/// `render(None)` is the unpadded text; `render(Some(width))` is the value's
/// own padded rendering. It tells whether the value honours width at all and
/// which side it pads on by default.
fn write_painted(
    f: &mut fmt::Formatter<'_>,
    format: Format,
    render: impl Fn(Option<usize>) -> String,
) -> fmt::Result {
    let text = render(None);
    let Some(width) = f.width() else {
        return f.write_str(&format.paint(&text));
    };
    let padded = render(Some(width));
    let padding = padded.chars().count().saturating_sub(text.chars().count());
    if padding == 0 {
        return f.write_str(&format.paint(&text));
    }

    let (before, after) = match f.align() {
        Some(Alignment::Left) => (0, padding),
        Some(Alignment::Right) => (padding, 0),
        Some(Alignment::Center) => (padding / 2, padding - padding / 2),
        None if padded.starts_with(&text) => (0, padding),
        None => (padding, 0),
    };

    let fill = f.fill();
    for _ in 0..before {
        f.write_char(fill)?;
    }
    f.write_str(&format.paint(&text))?;
    for _ in 0..after {
        f.write_char(fill)?;
    }
    Ok(())
}
