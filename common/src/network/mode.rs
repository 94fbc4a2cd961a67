//! Link-mode capability catalog.
//!
//! The kernel reports supported, advertised and peer-advertised link modes as
//! bitmaps. Each byte of a bitmap is a *segment*; bit `b` of segment `s`
//! corresponds to entry `b` of row `s` in [`MODE_CATALOG`].

use std::fmt;

/// A single physical-layer mode or feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeDescriptor {
    pub name: &'static str,
    pub variant: &'static str,
    pub feature: bool,
    pub full_duplex: bool,
}

impl ModeDescriptor {
    const fn half(name: &'static str, variant: &'static str) -> Self {
        Self { name, variant, feature: false, full_duplex: false }
    }

    const fn full(name: &'static str, variant: &'static str) -> Self {
        Self { name, variant, feature: false, full_duplex: true }
    }

    const fn feature(name: &'static str) -> Self {
        Self { name, variant: "", feature: true, full_duplex: false }
    }
}

impl fmt::Display for ModeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.feature {
            return f.write_str(self.name);
        }
        let duplex = if self.full_duplex { "Full" } else { "Half" };
        write!(f, "{} base {} {}", self.name, self.variant, duplex)
    }
}

use ModeDescriptor as M;

/// Rows are indexed by segment, entries by bit position.
pub static MODE_CATALOG: &[&[ModeDescriptor]] = &[
    &[
        M::half("10", "T"),
        M::full("10", "T"),
        M::half("100", "T"),
        M::full("100", "T"),
        M::half("1000", "T"),
        M::full("1000", "T"),
        M::feature("Autoneg"),
        M::feature("TP"),
    ],
    &[
        M::feature("AUI"),
        M::feature("MII"),
        M::feature("FIBRE"),
        M::feature("BNC"),
        M::full("10000", "T"),
        M::feature("Pause"),
        M::feature("Asym_Pause"),
        M::full("2500", "X"),
    ],
    &[
        M::feature("Backplane"),
        M::full("1000", "KX"),
        M::full("10000", "KX4"),
        M::full("10000", "KR"),
        M::full("10000", "R_FEC"),
        M::full("20000", "MLD2"),
        M::full("20000", "KR2"),
        M::full("40000", "KR4"),
    ],
    &[
        M::full("40000", "CR4"),
        M::full("40000", "SR4"),
        M::full("40000", "LR4"),
        M::full("56000", "KR4"),
        M::full("56000", "CR4"),
        M::full("56000", "SR4"),
        M::full("56000", "LR4"),
        M::full("25000", "CR"),
    ],
    &[
        M::full("25000", "KR"),
        M::full("25000", "SR"),
        M::full("50000", "CR2"),
        M::full("50000", "KR2"),
        M::full("100000", "KR4"),
        M::full("100000", "SR4"),
        M::full("100000", "CR4"),
        M::full("100000", "LR4_ER4"),
    ],
    &[
        M::full("50000", "SR2"),
        M::full("1000", "X"),
        M::full("10000", "CR"),
        M::full("10000", "SR"),
        M::full("10000", "LR"),
        M::full("10000", "LRM"),
        M::full("10000", "ER"),
        M::full("2500", "T"),
    ],
    &[M::full("5000", "T")],
];

/// Decodes a capability bitmap into descriptors, ordered by segment then bit.
///
/// Bits without a catalog entry are dropped silently.
pub fn decode(bitmap: &[u8]) -> Vec<ModeDescriptor> {
    bitmap
        .iter()
        .zip(MODE_CATALOG.iter())
        .flat_map(|(&bits, row)| {
            row.iter()
                .enumerate()
                .filter(move |(bit, _)| bits & (1 << bit) != 0)
                .map(|(_, mode)| *mode)
        })
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
