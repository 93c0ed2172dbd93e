//! Core enumerations shared by the fortune and drops calculations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A farmable crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Crop {
    Cactus,
    Carrot,
    CocoaBeans,
    Melon,
    Mushroom,
    NetherWart,
    Potato,
    Pumpkin,
    SugarCane,
    Wheat,
    Seeds,
}

impl Crop {
    /// Every crop, in table order
    pub const ALL: [Crop; 11] = [
        Crop::Cactus,
        Crop::Carrot,
        Crop::CocoaBeans,
        Crop::Melon,
        Crop::Mushroom,
        Crop::NetherWart,
        Crop::Potato,
        Crop::Pumpkin,
        Crop::SugarCane,
        Crop::Wheat,
        Crop::Seeds,
    ];

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Crop::Cactus => "Cactus",
            Crop::Carrot => "Carrot",
            Crop::CocoaBeans => "Cocoa Beans",
            Crop::Melon => "Melon",
            Crop::Mushroom => "Mushroom",
            Crop::NetherWart => "Nether Wart",
            Crop::Potato => "Potato",
            Crop::Pumpkin => "Pumpkin",
            Crop::SugarCane => "Sugar Cane",
            Crop::Wheat => "Wheat",
            Crop::Seeds => "Seeds",
        }
    }

    /// Resolve a crop from a display name, snake_case id or game item id.
    ///
    /// Matching ignores case, spaces and underscores.
    pub fn from_name(name: &str) -> Option<Crop> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "cactus" => Some(Crop::Cactus),
            "carrot" | "carrotitem" => Some(Crop::Carrot),
            "cocoa" | "cocoabeans" | "cocoabean" | "inksack:3" => Some(Crop::CocoaBeans),
            "melon" | "melonslice" => Some(Crop::Melon),
            "mushroom" | "mushroomcollection" | "redmushroom" | "brownmushroom" => {
                Some(Crop::Mushroom)
            }
            "netherwart" | "netherstalk" | "netherwarts" => Some(Crop::NetherWart),
            "potato" | "potatoitem" => Some(Crop::Potato),
            "pumpkin" => Some(Crop::Pumpkin),
            "sugarcane" | "cane" => Some(Crop::SugarCane),
            "wheat" => Some(Crop::Wheat),
            "seeds" | "wheatseeds" => Some(Crop::Seeds),
            _ => None,
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Item rarity tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Divine,
    Special,
    VerySpecial,
}

impl Rarity {
    /// Get all rarities in ascending order
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
            Rarity::Mythic,
            Rarity::Divine,
            Rarity::Special,
            Rarity::VerySpecial,
        ]
    }

    /// One tier below, saturating at Common
    pub fn previous(&self) -> Rarity {
        let all = Rarity::all();
        let index = *self as usize;
        all[index.saturating_sub(1)]
    }

    /// One tier above, saturating at Very Special
    pub fn next(&self) -> Rarity {
        let all = Rarity::all();
        let index = (*self as usize + 1).min(all.len() - 1);
        all[index]
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase().replace(' ', "_");
        match key.as_str() {
            "COMMON" => Ok(Rarity::Common),
            "UNCOMMON" => Ok(Rarity::Uncommon),
            "RARE" => Ok(Rarity::Rare),
            "EPIC" => Ok(Rarity::Epic),
            "LEGENDARY" => Ok(Rarity::Legendary),
            "MYTHIC" => Ok(Rarity::Mythic),
            "DIVINE" => Ok(Rarity::Divine),
            "SPECIAL" => Ok(Rarity::Special),
            "VERY_SPECIAL" => Ok(Rarity::VerySpecial),
            _ => Err(format!("unknown rarity '{}'", s)),
        }
    }
}

/// Tool category, used to select ability parsing behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Counter-based hoes whose lore reports an ability fortune bonus
    MathematicalHoe,
    Axe,
    Dicer,
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_from_name_variants() {
        assert_eq!(Crop::from_name("Nether Wart"), Some(Crop::NetherWart));
        assert_eq!(Crop::from_name("NETHER_STALK"), Some(Crop::NetherWart));
        assert_eq!(Crop::from_name("cocoa_beans"), Some(Crop::CocoaBeans));
        assert_eq!(Crop::from_name("INK_SACK:3"), Some(Crop::CocoaBeans));
        assert_eq!(Crop::from_name("sugar cane"), Some(Crop::SugarCane));
        assert_eq!(Crop::from_name("dirt"), None);
    }

    #[test]
    fn test_crop_display_round_trip() {
        for crop in Crop::ALL {
            assert_eq!(Crop::from_name(crop.display_name()), Some(crop));
        }
    }

    #[test]
    fn test_rarity_neighbours() {
        assert_eq!(Rarity::Legendary.previous(), Rarity::Epic);
        assert_eq!(Rarity::Common.previous(), Rarity::Common);
        assert_eq!(Rarity::Mythic.next(), Rarity::Divine);
        assert_eq!(Rarity::VerySpecial.next(), Rarity::VerySpecial);
    }

    #[test]
    fn test_rarity_from_str() {
        assert_eq!("legendary".parse::<Rarity>(), Ok(Rarity::Legendary));
        assert_eq!("VERY SPECIAL".parse::<Rarity>(), Ok(Rarity::VerySpecial));
        assert!("shiny".parse::<Rarity>().is_err());
    }
}
