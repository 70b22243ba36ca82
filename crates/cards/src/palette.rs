//! The fixed set of fill colors offered by the form and the color filter.
//! The store itself accepts any non-empty color token.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

pub static CARD_COLORS: [PaletteColor; 10] = [
    PaletteColor { name: "Red", value: "#FF6B6B" },
    PaletteColor { name: "Orange", value: "#FFA94D" },
    PaletteColor { name: "Yellow", value: "#FFD43B" },
    PaletteColor { name: "Green", value: "#69DB7C" },
    PaletteColor { name: "Teal", value: "#38D9A9" },
    PaletteColor { name: "Cyan", value: "#4DABF7" },
    PaletteColor { name: "Blue", value: "#748FFC" },
    PaletteColor { name: "Indigo", value: "#9775FA" },
    PaletteColor { name: "Pink", value: "#F783AC" },
    PaletteColor { name: "Gray", value: "#CED4DA" },
];

/// Color preselected on a fresh create form.
pub fn default_color() -> &'static PaletteColor {
    &CARD_COLORS[0]
}

pub fn find_by_value(value: &str) -> Option<&'static PaletteColor> {
    CARD_COLORS.iter().find(|c| c.value == value)
}

/// Display name for a stored color, `Unknown` when it is off-palette.
pub fn display_name(value: &str) -> &'static str {
    find_by_value(value).map(|c| c.name).unwrap_or("Unknown")
}
