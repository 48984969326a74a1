//! Default totem upgrade chains
//!
//! Twenty totem families, each a fixed three-tier chain (I -> II -> III).
//! Type ids are not contiguous per family; the table is the authority and
//! lookups are exact-match only.

use serde::{Deserialize, Serialize};

use crate::items::TypeId;

/// One link of an upgrade chain: dropping two `source` items yields one
/// `upgraded` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub source: TypeId,
    pub upgraded: TypeId,
}

/// Totem families as (name, [tier I, tier II, tier III]) type ids
pub const FAMILIES: &[(&str, [TypeId; 3])] = &[
    ("Aegis", [319, 318, 947]),
    ("Assault", [321, 320, 957]),
    ("Warrior", [323, 322, 985]),
    ("Agile", [993, 324, 992]),
    ("Sturdy", [995, 994, 325]),
    ("Physical RES", [369, 965, 966]),
    ("Marathon", [370, 952, 953]),
    ("Electric RES", [431, 430, 951]),
    ("Efficiency", [975, 432, 974]),
    ("Gun Control", [978, 977, 976]),
    ("Ninja", [436, 435, 964]),
    ("Fire RES", [956, 954, 955]),
    ("Recovery", [960, 958, 959]),
    ("HP", [963, 961, 962]),
    ("Poison RES", [969, 967, 968]),
    ("Space RES", [972, 970, 971]),
    ("Headshot", [981, 979, 980]),
    ("Sniper", [984, 982, 983]),
    ("Berserk", [988, 986, 987]),
    ("Perception", [991, 989, 990]),
];

const TIER_NUMERALS: [&str; 3] = ["I", "II", "III"];

/// The built-in chain table: two links per family (I -> II, II -> III)
pub fn default_chain_links() -> Vec<ChainLink> {
    FAMILIES
        .iter()
        .flat_map(|(_, tiers)| {
            [
                ChainLink { source: tiers[0], upgraded: tiers[1] },
                ChainLink { source: tiers[1], upgraded: tiers[2] },
            ]
        })
        .collect()
}

/// Display name for a totem type id, e.g. "Aegis Totem II"
pub fn totem_name(type_id: TypeId) -> Option<String> {
    FAMILIES.iter().find_map(|(family, tiers)| {
        tiers
            .iter()
            .position(|t| *t == type_id)
            .map(|tier| format!("{} Totem {}", family, TIER_NUMERALS[tier]))
    })
}
