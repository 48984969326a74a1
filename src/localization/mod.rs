//! Localized notification text
//!
//! Messages are looked up by key with `{0}`-style substitution. Missing
//! translations fall back to English; a key missing there too is returned
//! verbatim so the player at least sees something attributable.

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    ChineseSimplified,
    Japanese,
    French,
}

/// Message keys
pub mod keys {
    pub const SAME_TOTEM_CANNOT_COMBINE: &str = "TotemCombination_SameTotem_CannotCombine";
    pub const TOTEM_CANNOT_UPGRADE: &str = "TotemCombination_Totem_CannotUpgrade";
    pub const TOTEM_UPGRADED: &str = "TotemCombination_Totem_Upgraded";
    pub const TARGET_OCCUPIED_CANNOT_SPLIT: &str = "UI_Inventory_TargetOccupiedCannotSplit";
    pub const COMBINE_IN_PROGRESS: &str = "TotemCombination_Combine_InProgress";
    pub const COMBINE_ITEMS_LOST: &str = "TotemCombination_Combine_ItemsLost";
}

use keys::*;

fn table(language: Language) -> &'static [(&'static str, &'static str)] {
    match language {
        Language::English => &[
            (SAME_TOTEM_CANNOT_COMBINE, "Cannot combine the same item."),
            (TOTEM_CANNOT_UPGRADE, "Totem cannot be upgraded further."),
            (TOTEM_UPGRADED, "Upgraded Totem -> {0}"),
            (
                TARGET_OCCUPIED_CANNOT_SPLIT,
                "Target slot is occupied, cannot split.",
            ),
            (
                COMBINE_IN_PROGRESS,
                "A combination is already in progress for that slot.",
            ),
            (
                COMBINE_ITEMS_LOST,
                "Combination failed, the totems were lost.",
            ),
        ],
        Language::ChineseSimplified => &[
            (SAME_TOTEM_CANNOT_COMBINE, "无法组合相同的物品。"),
            (TOTEM_CANNOT_UPGRADE, "图腾无法进一步升级。"),
            (TOTEM_UPGRADED, "图腾已升级 -> {0}"),
            (TARGET_OCCUPIED_CANNOT_SPLIT, "目标格已被占用，无法拆分。"),
        ],
        Language::Japanese => &[
            (
                SAME_TOTEM_CANNOT_COMBINE,
                "同じアイテムを組み合わせることはできません。",
            ),
            (
                TOTEM_CANNOT_UPGRADE,
                "トーテムはこれ以上アップグレードできません。",
            ),
            (TOTEM_UPGRADED, "トーテムをアップグレード -> {0}"),
        ],
        Language::French => &[
            (SAME_TOTEM_CANNOT_COMBINE, "Impossible de combiner le même objet."),
            (
                TOTEM_CANNOT_UPGRADE,
                "Le totem ne peut pas être amélioré davantage.",
            ),
            (TOTEM_UPGRADED, "Totem amélioré -> {0}"),
        ],
    }
}

/// Message lookup for one active language
#[derive(Debug, Clone, Copy, Default)]
pub struct Localization {
    language: Language,
}

impl Localization {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Translated text for a key, falling back to English, then the key
    pub fn text(&self, key: &str) -> String {
        self.raw(key).unwrap_or_else(|| {
            log::warn!("missing translation for key: {}", key);
            key.to_string()
        })
    }

    /// Translated text with positional `{0}`, `{1}`, ... substitution
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        let mut text = self.text(key);
        for (i, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", i), arg);
        }
        text
    }

    fn raw(&self, key: &str) -> Option<String> {
        lookup(table(self.language), key)
            .or_else(|| lookup(table(Language::English), key))
            .map(str::to_string)
    }
}

fn lookup(entries: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    entries
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, text)| *text)
}
