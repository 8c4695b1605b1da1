//! Text surface style state.
//!
//! `StyleState` is a plain value: menu handlers mutate exactly one axis and
//! the renderer receives the whole value on every frame. Nothing here is
//! global and nothing here is undoable.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    TimesNewRoman,
    Helvetica,
    Courier,
    Arial,
    ArialBlack,
    Century,
}

impl FontFamily {
    pub const ALL: [FontFamily; 6] = [
        FontFamily::TimesNewRoman,
        FontFamily::Helvetica,
        FontFamily::Courier,
        FontFamily::Arial,
        FontFamily::ArialBlack,
        FontFamily::Century,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Courier => "Courier",
            FontFamily::Arial => "Arial",
            FontFamily::ArialBlack => "Arial Black",
            FontFamily::Century => "Century",
        }
    }

    /// Case-insensitive lookup by display label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Weight / slant. Mutually exclusive: the latest selection wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Plain,
    Bold,
    Italic,
}

impl FontWeight {
    pub const ALL: [FontWeight; 3] = [FontWeight::Bold, FontWeight::Plain, FontWeight::Italic];

    pub fn label(self) -> &'static str {
        match self {
            FontWeight::Plain => "Plain",
            FontWeight::Bold => "Bold",
            FontWeight::Italic => "Italic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|w| w.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// Point size restricted to the enumerated menu set (10..=28, step 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontSize(u8);

impl FontSize {
    pub const ALL: [FontSize; 10] = [
        FontSize(10),
        FontSize(12),
        FontSize(14),
        FontSize(16),
        FontSize(18),
        FontSize(20),
        FontSize(22),
        FontSize(24),
        FontSize(26),
        FontSize(28),
    ];

    pub fn new(points: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.0 == points)
    }

    pub fn points(self) -> u8 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        FontSize(12)
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named swatches offered by the color chooser.
pub const PALETTE: &[(&str, Rgb)] = &[
    ("Black", Rgb::new(0x00, 0x00, 0x00)),
    ("White", Rgb::new(0xff, 0xff, 0xff)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Light Gray", Rgb::new(0xc0, 0xc0, 0xc0)),
    ("Dark Gray", Rgb::new(0x40, 0x40, 0x40)),
    ("Red", Rgb::new(0xff, 0x00, 0x00)),
    ("Orange", Rgb::new(0xff, 0xc8, 0x00)),
    ("Yellow", Rgb::new(0xff, 0xff, 0x00)),
    ("Green", Rgb::new(0x00, 0xff, 0x00)),
    ("Cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("Blue", Rgb::new(0x00, 0x00, 0xff)),
    ("Magenta", Rgb::new(0xff, 0x00, 0xff)),
    ("Pink", Rgb::new(0xff, 0xaf, 0xaf)),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    Foreground,
    Background,
}

impl ColorTarget {
    pub fn label(self) -> &'static str {
        match self {
            ColorTarget::Foreground => "Foreground",
            ColorTarget::Background => "Background",
        }
    }
}

/// Complete style applied to the text surface. `None` colors mean "terminal default".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleState {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: FontSize,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            family: FontFamily::Courier,
            weight: FontWeight::Plain,
            size: FontSize::default(),
            foreground: None,
            background: None,
        }
    }
}

impl StyleState {
    /// Each setter touches one axis and reports whether anything changed.
    pub fn set_family(&mut self, family: FontFamily) -> bool {
        std::mem::replace(&mut self.family, family) != family
    }

    pub fn set_weight(&mut self, weight: FontWeight) -> bool {
        std::mem::replace(&mut self.weight, weight) != weight
    }

    pub fn set_size(&mut self, size: FontSize) -> bool {
        std::mem::replace(&mut self.size, size) != size
    }

    pub fn set_color(&mut self, target: ColorTarget, color: Option<Rgb>) -> bool {
        let slot = match target {
            ColorTarget::Foreground => &mut self.foreground,
            ColorTarget::Background => &mut self.background,
        };
        std::mem::replace(slot, color) != color
    }

    pub fn color(&self, target: ColorTarget) -> Option<Rgb> {
        match target {
            ColorTarget::Foreground => self.foreground,
            ColorTarget::Background => self.background,
        }
    }

    /// Short human description, e.g. `Courier 12pt Plain`.
    pub fn describe(&self) -> String {
        format!(
            "{} {}pt {}",
            self.family.label(),
            self.size,
            self.weight.label()
        )
    }
}
