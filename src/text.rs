use pumpkin_util::text::TextComponent;
use pumpkin_util::text::color::{NamedColor, RGBColor};

use crate::colors::{self, Color, LegacyColor, Segment};

fn named(color: LegacyColor) -> NamedColor {
    match color {
        LegacyColor::Black => NamedColor::Black,
        LegacyColor::DarkBlue => NamedColor::DarkBlue,
        LegacyColor::DarkGreen => NamedColor::DarkGreen,
        LegacyColor::DarkAqua => NamedColor::DarkAqua,
        LegacyColor::DarkRed => NamedColor::DarkRed,
        LegacyColor::DarkPurple => NamedColor::DarkPurple,
        LegacyColor::Gold => NamedColor::Gold,
        LegacyColor::Gray => NamedColor::Gray,
        LegacyColor::DarkGray => NamedColor::DarkGray,
        LegacyColor::Blue => NamedColor::Blue,
        LegacyColor::Green => NamedColor::Green,
        LegacyColor::Aqua => NamedColor::Aqua,
        LegacyColor::Red => NamedColor::Red,
        LegacyColor::LightPurple => NamedColor::LightPurple,
        LegacyColor::Yellow => NamedColor::Yellow,
        LegacyColor::White => NamedColor::White,
    }
}

fn component(segment: Segment) -> TextComponent {
    let style = segment.style;
    let mut part = TextComponent::text(segment.text);
    part = match style.color {
        Some(Color::Legacy(color)) => part.color_named(named(color)),
        Some(Color::Rgb(r, g, b)) => part.color_rgb(RGBColor::new(r, g, b)),
        None => part,
    };
    if style.bold {
        part = part.bold();
    }
    if style.italic {
        part = part.italic();
    }
    if style.underlined {
        part = part.underlined();
    }
    if style.strikethrough {
        part = part.strikethrough();
    }
    if style.obfuscated {
        part = part.obfuscated();
    }
    part
}

/// Builds a chat component from already translated `§` text.
pub fn from_formatted(formatted: &str) -> TextComponent {
    colors::parse(formatted)
        .into_iter()
        .fold(TextComponent::text(""), |root, segment| {
            root.add_child(component(segment))
        })
}

/// Translates `&` codes in a template and builds a chat component.
pub fn from_template(template: &str) -> TextComponent {
    from_formatted(&colors::translate(template))
}
