//! Fortune aggregation for farming tools
//!
//! Fortune is rebuilt from scratch on every call: the sources are applied in
//! priority order to a fresh accumulator and the total is the sum of the
//! resulting breakdown. Changing a modifier means building a new snapshot and
//! computing again.

mod ability;
mod source;

pub use ability::{extract_ability_fortune, extract_ability_fortune_line};
pub use source::{
    default_sources, AbilitySource, EnchantmentSource, FarmingForDummiesSource, FortuneAccumulator,
    FortuneContext, FortuneSource, MilestoneSource, RarityStatSource, ReforgeSource,
    ToolBonusSource,
};

use crate::breakdown::Breakdown;
use crate::config::{GameTables, ReforgeDefinition, ToolDefinition};
use crate::error::FarmingError;
use crate::item::{ItemSnapshot, PlayerOptions};
use crate::types::{Crop, Rarity, ToolType};
use serde::Serialize;
use tracing::warn;

/// Total fortune and its attribution
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FortuneResult {
    total: f64,
    breakdown: Breakdown,
}

impl FortuneResult {
    /// Build a result whose total is the sum of the breakdown
    pub fn from_breakdown(breakdown: Breakdown) -> Self {
        FortuneResult {
            total: breakdown.total(),
            breakdown,
        }
    }

    /// Total fortune
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Contribution per source label, in evaluation order
    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    /// Contribution of a single label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.breakdown.get(label)
    }
}

/// Compute fortune for an item using the built-in sources
pub fn compute_fortune(
    item: &ItemSnapshot,
    tool: &ToolDefinition,
    tables: &GameTables,
    player: &PlayerOptions,
) -> FortuneResult {
    compute_fortune_with_sources(item, tool, tables, player, &default_sources())
}

/// Compute fortune from a custom set of sources, applied by priority
pub fn compute_fortune_with_sources(
    item: &ItemSnapshot,
    tool: &ToolDefinition,
    tables: &GameTables,
    player: &PlayerOptions,
    sources: &[&dyn FortuneSource],
) -> FortuneResult {
    let ctx = FortuneContext {
        item,
        tool,
        tables,
        player,
    };

    let mut sorted: Vec<&dyn FortuneSource> = sources.to_vec();
    sorted.sort_by_key(|s| s.priority());

    let mut acc = FortuneAccumulator::new();
    for source in sorted {
        source.apply(&ctx, &mut acc);
    }

    FortuneResult::from_breakdown(acc.into_breakdown())
}

/// Look up the item's tool definition and compute its fortune
pub fn compute_item_fortune(
    item: &ItemSnapshot,
    tables: &GameTables,
    player: &PlayerOptions,
) -> Result<FortuneResult, FarmingError> {
    let tool = lookup_tool(item, tables)?;
    Ok(compute_fortune(item, tool, tables, player))
}

fn lookup_tool<'t>(
    item: &ItemSnapshot,
    tables: &'t GameTables,
) -> Result<&'t ToolDefinition, FarmingError> {
    tables.tool(&item.skyblock_id).ok_or_else(|| {
        warn!(item = %item.skyblock_id, "item is not a known farming tool");
        FarmingError::UnknownTool(item.skyblock_id.clone())
    })
}

/// A classified farming tool with its fortune already computed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmingTool {
    item: ItemSnapshot,
    definition: ToolDefinition,
    fortune: FortuneResult,
}

impl FarmingTool {
    /// Classify an item and compute its fortune
    pub fn new(
        item: ItemSnapshot,
        tables: &GameTables,
        player: &PlayerOptions,
    ) -> Result<Self, FarmingError> {
        let definition = lookup_tool(&item, tables)?.clone();
        let fortune = compute_fortune(&item, &definition, tables, player);
        Ok(FarmingTool {
            item,
            definition,
            fortune,
        })
    }

    /// A new tool identical to this one but with a different reforge
    pub fn with_reforge(
        &self,
        reforge_id: &str,
        tables: &GameTables,
        player: &PlayerOptions,
    ) -> FarmingTool {
        let item = self.item.clone().with_reforge(reforge_id);
        let fortune = compute_fortune(&item, &self.definition, tables, player);
        FarmingTool {
            item,
            definition: self.definition.clone(),
            fortune,
        }
    }

    /// The snapshot this tool was built from
    pub fn item(&self) -> &ItemSnapshot {
        &self.item
    }

    /// Static definition of the tool
    pub fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    pub fn crop(&self) -> Crop {
        self.definition.crop
    }

    pub fn tool_type(&self) -> ToolType {
        self.definition.tool_type
    }

    pub fn rarity(&self) -> Rarity {
        self.item.rarity
    }

    pub fn is_recombobulated(&self) -> bool {
        self.item.is_recombobulated()
    }

    /// Applied reforge, if the id resolves
    pub fn reforge<'t>(&self, tables: &'t GameTables) -> Option<&'t ReforgeDefinition> {
        self.item.reforge_id().and_then(|id| tables.reforge(id))
    }

    /// Total fortune
    pub fn fortune(&self) -> f64 {
        self.fortune.total()
    }

    /// Full fortune result
    pub fn fortune_result(&self) -> &FortuneResult {
        &self.fortune
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> &'static GameTables {
        GameTables::bundled()
    }

    fn mythic_wheat_hoe() -> ItemSnapshot {
        ItemSnapshot::new("THEORETICAL_HOE_WHEAT_3", Rarity::Mythic)
            .with_reforge("bountiful")
            .with_attribute("farming_for_dummies_count", "5")
            .with_lore_line("§7You have §6+30⁘ §7from Logarithmic Counter")
            .with_enchantment("harvesting", 6)
            .with_enchantment("turbo_wheat", 5)
            .with_enchantment("cultivating", 10)
            .with_enchantment("dedication", 4)
    }

    const FLAT_DEDICATION_ENCHANTMENTS: &str = r#"
[[enchantments]]
id = "harvesting"
name = "Harvesting"
fortune = [12.5, 25, 37.5, 50, 62.5, 75]

[[enchantments]]
id = "dedication"
name = "Dedication"
fortune = [1, 2, 3, 4]
multiplied_fortune = [0.5, 0.75, 1.0, 2.0]

[turbo]
fortune_per_level = 5
"#;

    const UNNAMED_REFORGES: &str = r#"
[[reforges]]
id = "rooted"

[reforges.tiers]
legendary = 5
mythic = 7
"#;

    fn custom_tables() -> GameTables {
        GameTables::from_toml_strs(
            include_str!("../../config/crops.toml"),
            include_str!("../../config/tools.toml"),
            UNNAMED_REFORGES,
            FLAT_DEDICATION_ENCHANTMENTS,
        )
        .unwrap()
    }

    #[test]
    fn test_milestone_dedication_replaces_flat_entry() {
        let tables = custom_tables();
        let item = ItemSnapshot::new("THEORETICAL_HOE_WHEAT_3", Rarity::Mythic)
            .with_enchantment("dedication", 4)
            .with_enchantment("harvesting", 6);

        let player = PlayerOptions::new().with_milestone(Crop::Wheat, 10);
        let result = compute_item_fortune(&item, &tables, &player).unwrap();
        let entries: Vec<(&str, f64)> = result.breakdown().iter().collect();
        assert_eq!(
            entries,
            vec![
                ("Tool Bonus", 50.0),
                ("Tool Stats", 30.0),
                ("Dedication", 20.0),
                ("Harvesting", 75.0),
            ]
        );
        assert!((result.total() - 175.0).abs() < f64::EPSILON);

        let result = compute_item_fortune(&item, &tables, &PlayerOptions::new()).unwrap();
        assert_eq!(result.get("Dedication"), Some(4.0));
        assert!((result.total() - 159.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unnamed_reforge_uses_fallback_label() {
        let tables = custom_tables();
        let item =
            ItemSnapshot::new("THEORETICAL_HOE_WHEAT_3", Rarity::Mythic).with_reforge("rooted");

        let result = compute_item_fortune(&item, &tables, &PlayerOptions::new()).unwrap();
        let labels: Vec<&str> = result.breakdown().labels().collect();
        assert_eq!(labels, vec!["Tool Bonus", "Tool Stats", "Reforge"]);
        assert_eq!(result.get("Reforge"), Some(7.0));
        assert!((result.total() - 87.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_breakdown_order_and_values() {
        let player = PlayerOptions::new().with_milestone(Crop::Wheat, 46);
        let result = compute_item_fortune(&mythic_wheat_hoe(), tables(), &player).unwrap();

        let entries: Vec<(&str, f64)> = result.breakdown().iter().collect();
        assert_eq!(
            entries,
            vec![
                ("Tool Bonus", 50.0),
                ("Tool Stats", 30.0),
                ("Bountiful", 10.0),
                ("Farming for Dummies", 5.0),
                ("Tool Ability", 30.0),
                ("Harvesting", 75.0),
                ("Turbo", 25.0),
                ("Cultivating", 20.0),
                ("Dedication", 92.0),
            ]
        );
        assert!((result.total() - 337.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_matches_breakdown() {
        let result =
            compute_item_fortune(&mythic_wheat_hoe(), tables(), &PlayerOptions::new()).unwrap();
        let sum: f64 = result.breakdown().iter().map(|(_, v)| v).sum();
        assert_eq!(result.total(), sum);
    }

    #[test]
    fn test_unknown_tool_fails() {
        let item = ItemSnapshot::new("DIAMOND_HOE", Rarity::Common);
        let result = compute_item_fortune(&item, tables(), &PlayerOptions::new());
        assert!(matches!(result, Err(FarmingError::UnknownTool(ref id)) if id == "DIAMOND_HOE"));
        assert!(FarmingTool::new(item, tables(), &PlayerOptions::new()).is_err());
    }

    #[test]
    fn test_with_reforge_rebuilds() {
        let player = PlayerOptions::new();
        let tool = FarmingTool::new(mythic_wheat_hoe(), tables(), &player).unwrap();
        let blessed = tool.with_reforge("blessed", tables(), &player);

        assert_eq!(blessed.fortune_result().get("Bountiful"), None);
        assert_eq!(blessed.fortune_result().get("Blessed"), Some(20.0));
        assert!((blessed.fortune() - tool.fortune() - 10.0).abs() < f64::EPSILON);
        assert_eq!(tool.fortune_result().get("Bountiful"), Some(10.0));
        assert_eq!(blessed.reforge(tables()).map(|r| r.display_name()), Some("Blessed"));
    }

    #[test]
    fn test_custom_sources_are_sorted_by_priority() {
        let item = mythic_wheat_hoe();
        let tool = tables().tool(&item.skyblock_id).unwrap();
        let sources: [&dyn FortuneSource; 2] = [&ReforgeSource, &ToolBonusSource];
        let player = PlayerOptions::new();
        let result = compute_fortune_with_sources(&item, tool, tables(), &player, &sources);
        let labels: Vec<&str> = result.breakdown().labels().collect();
        assert_eq!(labels, vec!["Tool Bonus", "Bountiful"]);
    }

    #[test]
    fn test_farming_tool_accessors() {
        let item = mythic_wheat_hoe().recombobulated();
        let tool = FarmingTool::new(item, tables(), &PlayerOptions::new()).unwrap();
        assert_eq!(tool.crop(), Crop::Wheat);
        assert_eq!(tool.tool_type(), ToolType::MathematicalHoe);
        assert_eq!(tool.rarity(), Rarity::Mythic);
        assert!(tool.is_recombobulated());
        assert_eq!(tool.fortune_result().get("Tool Stats"), Some(20.0));
    }
}
