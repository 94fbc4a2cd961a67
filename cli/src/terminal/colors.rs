use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 0, g: 190, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 135, b: 215 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const WARNING: Color = Color::Yellow;

pub const IPV4_ADDR: Color = Color::TrueColor { r: 95, g: 215, b: 255 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 0, g: 135, b: 175 };
pub const IPV6_ADDR: Color = Color::TrueColor { r: 135, g: 175, b: 255 };
pub const IPV6_PREFIX: Color = Color::TrueColor { r: 95, g: 95, b: 215 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 255, g: 215, b: 95 };
