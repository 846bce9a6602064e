use palette::Srgb;

use crate::color;

// ---------------------------------------------------------------------------
// Line styles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl Dash {
    /// On/off lengths in units of the line width; empty for a solid line.
    pub fn pattern(self) -> &'static [f64] {
        match self {
            Dash::Solid => &[],
            Dash::Dashed => &[3.7, 1.6],
            Dash::DashDot => &[6.4, 1.6, 1.0, 1.6],
            Dash::Dotted => &[1.0, 1.65],
        }
    }
}

/// Which query a column times: a direct operation or a two-level tree
/// whose bottom level covers `2^bits` elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Direct,
    Nested(u8),
}

// ---------------------------------------------------------------------------
// Series descriptors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct SeriesSpec {
    /// Exact CSV header name.
    pub column: &'static str,
    /// `#rrggbb`
    pub color: &'static str,
    pub dash: Dash,
    pub block: Block,
    /// Disabled descriptors are known columns that are never drawn.
    pub enabled: bool,
}

impl SeriesSpec {
    const fn new(column: &'static str, color: &'static str, dash: Dash, block: Block) -> Self {
        Self {
            column,
            color,
            dash,
            block,
            enabled: true,
        }
    }

    const fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Legend text: the column name with its TeX markup rendered.
    pub fn label(&self) -> String {
        display_label(self.column)
    }

    pub fn rgb(&self) -> Srgb<u8> {
        color::parse_hex(self.color).unwrap_or(color::FALLBACK)
    }
}

const BLACK: &str = "#000000";
const GREY: &str = "#999999";
const RED: &str = "#ff0000";
const DARK_RED: &str = "#990000";
const GREEN: &str = "#00ff00";
const BLUE: &str = "#0000ff";

use Block::{Direct, Nested};
use Dash::{DashDot, Dashed, Dotted, Solid};

/// Every benchmark column the tool knows about, in legend order.
#[rustfmt::skip]
pub const SERIES: &[SeriesSpec] = &[
    SeriesSpec::new("fixed[F]",          BLACK,    Solid,   Direct),
    SeriesSpec::new("fixed[$\\ell$]",    GREY,     Solid,   Direct),
    SeriesSpec::new("byte[F]",           RED,      Solid,   Direct),
    SeriesSpec::new("byte[$\\ell$]",     DARK_RED, Solid,   Direct),
    SeriesSpec::new("bit[F]",            GREEN,    Solid,   Direct),
    SeriesSpec::new("bit[$\\ell$]",      BLUE,     Solid,   Direct),

    SeriesSpec::new("fixed[$12$]fixed",  BLACK,    Dashed,  Nested(12)),
    SeriesSpec::new("byte[$12$]byte",    GREY,     Dashed,  Nested(12)),
    SeriesSpec::new("bit[$12$]bit",      RED,      Dashed,  Nested(12)),
    SeriesSpec::new("fixed[$12$]byte",   DARK_RED, Dashed,  Nested(12)),
    SeriesSpec::new("fixed[$12$]bit",    GREEN,    Dashed,  Nested(12)),
    SeriesSpec::new("byte[$12$]bit",     BLUE,     Dashed,  Nested(12)),

    SeriesSpec::new("fixed[$14$]fixed",  BLACK,    Dotted,  Nested(14)).disabled(),
    SeriesSpec::new("byte[$14$]byte",    GREY,     Dotted,  Nested(14)).disabled(),
    SeriesSpec::new("bit[$14$]bit",      RED,      Dotted,  Nested(14)).disabled(),
    SeriesSpec::new("fixed[$14$]byte",   DARK_RED, Dotted,  Nested(14)).disabled(),
    SeriesSpec::new("fixed[$14$]bit",    GREEN,    Dotted,  Nested(14)).disabled(),
    SeriesSpec::new("byte[$14$]bit",     BLUE,     Dotted,  Nested(14)).disabled(),

    SeriesSpec::new("fixed[$16$]fixed",  BLACK,    DashDot, Nested(16)),
    SeriesSpec::new("byte[$16$]byte",    GREY,     DashDot, Nested(16)),
    SeriesSpec::new("bit[$16$]bit",      RED,      DashDot, Nested(16)),
    SeriesSpec::new("fixed[$16$]byte",   DARK_RED, DashDot, Nested(16)),
    SeriesSpec::new("fixed[$16$]bit",    GREEN,    DashDot, Nested(16)),
    SeriesSpec::new("byte[$16$]bit",     BLUE,     DashDot, Nested(16)),

    SeriesSpec::new("fixed[$18$]fixed",  BLACK,    Dotted,  Nested(18)).disabled(),
    SeriesSpec::new("byte[$18$]byte",    GREY,     Dotted,  Nested(18)).disabled(),
    SeriesSpec::new("bit[$18$]bit",      RED,      Dotted,  Nested(18)).disabled(),
    SeriesSpec::new("fixed[$18$]byte",   DARK_RED, Dotted,  Nested(18)).disabled(),
    SeriesSpec::new("fixed[$18$]bit",    GREEN,    Dotted,  Nested(18)).disabled(),
    SeriesSpec::new("byte[$18$]bit",     BLUE,     Dotted,  Nested(18)).disabled(),

    SeriesSpec::new("fixed[$20$]fixed",  BLACK,    Dotted,  Nested(20)),
    SeriesSpec::new("byte[$20$]byte",    GREY,     Dotted,  Nested(20)),
    SeriesSpec::new("bit[$20$]bit",      RED,      Dotted,  Nested(20)),
    SeriesSpec::new("fixed[$20$]byte",   DARK_RED, Dotted,  Nested(20)),
    SeriesSpec::new("fixed[$20$]bit",    GREEN,    Dotted,  Nested(20)),
    SeriesSpec::new("byte[$20$]bit",     BLUE,     Dotted,  Nested(20)),
];

/// Descriptors that are drawn, in legend order.
pub fn enabled() -> impl Iterator<Item = &'static SeriesSpec> {
    SERIES.iter().filter(|s| s.enabled)
}

/// Find the descriptor for a header name, enabled or not.
pub fn lookup(column: &str) -> Option<&'static SeriesSpec> {
    SERIES.iter().find(|s| s.column == column)
}

/// Render the TeX math used in column names: `$\ell$` → `ℓ`, `$12$` → `12`.
pub fn display_label(column: &str) -> String {
    column.replace("\\ell", "ℓ").replace('$', "")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn twenty_four_series_are_drawn() {
        assert_eq!(SERIES.len(), 36);
        assert_eq!(enabled().count(), 24);
        assert!(enabled().all(|s| !matches!(s.block, Nested(14) | Nested(18))));
    }

    #[test]
    fn column_names_are_unique() {
        let names: BTreeSet<_> = SERIES.iter().map(|s| s.column).collect();
        assert_eq!(names.len(), SERIES.len());
    }

    #[test]
    fn labels_render_tex_markup() {
        assert_eq!(display_label("fixed[$\\ell$]"), "fixed[ℓ]");
        assert_eq!(display_label("fixed[$12$]byte"), "fixed[12]byte");
        assert_eq!(display_label("bit[F]"), "bit[F]");
        assert_eq!(lookup("byte[$\\ell$]").unwrap().label(), "byte[ℓ]");
    }

    #[test]
    fn each_block_group_cycles_the_same_colors() {
        let direct: Vec<_> = SERIES.iter().filter(|s| s.block == Direct).map(|s| s.color).collect();
        assert_eq!(direct, [BLACK, GREY, RED, DARK_RED, GREEN, BLUE]);
        for bits in [12, 14, 16, 18, 20] {
            let group: Vec<_> = SERIES
                .iter()
                .filter(|s| s.block == Nested(bits))
                .collect();
            assert_eq!(group.len(), 6);
            assert!(group.iter().map(|s| s.color).eq(direct.iter().copied()));
            assert!(group.iter().all(|s| s.dash == group[0].dash));
        }
    }

    #[test]
    fn styles_follow_block_size() {
        assert_eq!(lookup("bit[F]").unwrap().dash, Solid);
        assert_eq!(lookup("bit[$12$]bit").unwrap().dash, Dashed);
        assert_eq!(lookup("bit[$16$]bit").unwrap().dash, DashDot);
        assert_eq!(lookup("bit[$20$]bit").unwrap().dash, Dotted);
        assert!(!lookup("bit[$18$]bit").unwrap().enabled);
    }

    #[test]
    fn every_color_parses() {
        for s in SERIES {
            assert!(color::parse_hex(s.color).is_some(), "{}", s.color);
        }
        assert_eq!(lookup("byte[$\\ell$]").unwrap().rgb(), Srgb::new(0x99, 0, 0));
    }
}
