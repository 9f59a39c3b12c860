//! Named color palettes for particle types

use crate::particle::ParticleType;

/// An ordered set of colors assigned to types by index
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    pub id: String,
    pub name: String,
    pub description: String,
    pub colors: Vec<String>,
}

impl ColorPalette {
    fn from_hex(id: &str, name: &str, description: &str, colors: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            colors: colors.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn catppuccin_hex(color: &catppuccin::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.rgb.r, color.rgb.g, color.rgb.b)
}

/// Mocha accents, one per default type and then some
fn catppuccin_mocha() -> ColorPalette {
    let c = &catppuccin::PALETTE.mocha.colors;
    ColorPalette {
        id: "catppuccin".to_string(),
        name: "Catppuccin".to_string(),
        description: "Mocha accents".to_string(),
        colors: [&c.blue, &c.red, &c.green, &c.peach, &c.mauve, &c.teal, &c.yellow, &c.pink]
            .into_iter()
            .map(catppuccin_hex)
            .collect(),
    }
}

/// Every built-in palette, in cycling order
pub fn color_palettes() -> Vec<ColorPalette> {
    vec![
        ColorPalette::from_hex(
            "default",
            "Classic",
            "The starting particle colors",
            &["#3b82f6", "#ef4444", "#10b981", "#f59e0b"],
        ),
        ColorPalette::from_hex(
            "neon",
            "Neon",
            "Bright, saturated colors",
            &["#ff00ff", "#00ffff", "#ffff00", "#00ff00"],
        ),
        ColorPalette::from_hex(
            "pastel",
            "Pastel",
            "Soft colors",
            &["#ffd6e0", "#ffefcf", "#d1f0e0", "#c4d7f2"],
        ),
        ColorPalette::from_hex(
            "earthy",
            "Earthy",
            "Natural tones",
            &["#8b4513", "#556b2f", "#cd853f", "#a0522d"],
        ),
        ColorPalette::from_hex(
            "monochrome",
            "Monochrome",
            "Shades of gray",
            &["#d4d4d8", "#a1a1aa", "#71717a", "#52525b"],
        ),
        catppuccin_mocha(),
    ]
}

/// Recolor `types` with the palette `palette_id`, cycling through its colors.
///
/// Unknown ids return the types unchanged.
pub fn apply_palette(types: &[ParticleType], palette_id: &str) -> Vec<ParticleType> {
    let Some(palette) = color_palettes().into_iter().find(|p| p.id == palette_id) else {
        log::warn!("Unknown color palette '{palette_id}'");
        return types.to_vec();
    };
    if palette.colors.is_empty() {
        return types.to_vec();
    }

    types
        .iter()
        .enumerate()
        .map(|(i, t)| ParticleType {
            color: palette.colors[i % palette.colors.len()].clone(),
            ..t.clone()
        })
        .collect()
}
