//! FortuneSource - Trait and implementations for fortune providers

use super::ability::extract_ability_fortune;
use crate::breakdown::Breakdown;
use crate::config::{GameTables, ToolDefinition, DEDICATION};
use crate::item::{ItemSnapshot, PlayerOptions};
use crate::types::ToolType;
use tracing::{debug, trace};

/// Inputs every source reads from
#[derive(Debug, Clone, Copy)]
pub struct FortuneContext<'a> {
    pub item: &'a ItemSnapshot,
    pub tool: &'a ToolDefinition,
    pub tables: &'a GameTables,
    pub player: &'a PlayerOptions,
}

/// Collects labeled contributions while sources are applied
#[derive(Debug, Clone, Default)]
pub struct FortuneAccumulator {
    breakdown: Breakdown,
}

impl FortuneAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        FortuneAccumulator::default()
    }

    /// Record a contribution. Non-positive values are dropped; an existing
    /// label is overwritten.
    pub fn contribute(&mut self, label: impl Into<String>, value: f64) {
        if value > 0.0 && value.is_finite() {
            self.breakdown.set(label, value);
        }
    }

    /// Finish accumulating
    pub fn into_breakdown(self) -> Breakdown {
        self.breakdown
    }
}

/// Trait for anything that contributes fortune to a tool
pub trait FortuneSource: Send + Sync {
    /// Unique identifier for this source
    fn id(&self) -> &str;

    /// Priority for application order (higher = applied later)
    /// Default priority is 0. Later sources overwrite earlier contributions
    /// that share a label.
    /// Suggested priorities:
    /// - Tool itself: 0-10
    /// - Reforge and upgrades: 20-30
    /// - Ability text: 40
    /// - Enchantments: 50
    /// - Milestone-scaled enchantments: 60
    fn priority(&self) -> i32 {
        0
    }

    /// Apply this source's fortune to the accumulator
    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator);
}

/// Flat fortune of the tool itself
pub struct ToolBonusSource;

impl FortuneSource for ToolBonusSource {
    fn id(&self) -> &str {
        "tool_bonus"
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        acc.contribute("Tool Bonus", ctx.tool.fortune);
    }
}

/// Per-rarity stat row, read at the recombobulation-adjusted rarity
pub struct RarityStatSource;

impl FortuneSource for RarityStatSource {
    fn id(&self) -> &str {
        "rarity_stats"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        let rarity = ctx.item.stat_rarity();
        let fortune = ctx.tool.rarity_fortune.get(rarity).unwrap_or(0.0);
        acc.contribute("Tool Stats", fortune);
    }
}

/// Reforge stat row, read at the stated rarity
pub struct ReforgeSource;

impl FortuneSource for ReforgeSource {
    fn id(&self) -> &str {
        "reforge"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        let Some(reforge_id) = ctx.item.reforge_id() else {
            return;
        };
        match ctx.tables.reforge(reforge_id) {
            Some(reforge) => {
                acc.contribute(reforge.display_name(), reforge.fortune(ctx.item.rarity));
            }
            None => debug!(reforge = reforge_id, "unknown reforge, no fortune applied"),
        }
    }
}

/// Farming for Dummies books applied to the tool
pub struct FarmingForDummiesSource;

impl FortuneSource for FarmingForDummiesSource {
    fn id(&self) -> &str {
        "farming_for_dummies"
    }

    fn priority(&self) -> i32 {
        30
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        acc.contribute("Farming for Dummies", f64::from(ctx.item.farming_for_dummies()));
    }
}

/// Ability bonus parsed from the lore of counter-based hoes
pub struct AbilitySource;

impl FortuneSource for AbilitySource {
    fn id(&self) -> &str {
        "tool_ability"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        if ctx.tool.tool_type != ToolType::MathematicalHoe {
            return;
        }
        acc.contribute("Tool Ability", extract_ability_fortune(&ctx.item.lore));
    }
}

/// Flat enchantment fortune, including the crop-specific turbo family
pub struct EnchantmentSource;

impl FortuneSource for EnchantmentSource {
    fn id(&self) -> &str {
        "enchantments"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        for (name, level) in &ctx.item.enchantments {
            let level = *level;
            if level == 0 {
                continue;
            }

            if ctx.tables.turbo_crop(name) == Some(ctx.tool.crop) {
                acc.contribute("Turbo", f64::from(level) * ctx.tables.turbo_fortune_per_level());
                continue;
            }

            let Some(enchant) = ctx.tables.enchantment(name) else {
                trace!(enchantment = %name, "not a farming enchantment");
                continue;
            };
            match enchant.fortune_at(level) {
                Some(fortune) => acc.contribute(enchant.name.as_str(), fortune),
                None => trace!(enchantment = %name, level, "no flat fortune at this level"),
            }
        }
    }
}

/// Dedication, scaled by the player's milestone for the tool's crop
pub struct MilestoneSource;

impl FortuneSource for MilestoneSource {
    fn id(&self) -> &str {
        "milestone"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn apply(&self, ctx: &FortuneContext<'_>, acc: &mut FortuneAccumulator) {
        let milestone = ctx.player.milestone(ctx.tool.crop);
        if milestone == 0 {
            return;
        }
        let Some(level) = ctx.item.enchantment(DEDICATION) else {
            return;
        };
        let Some(enchant) = ctx.tables.enchantment(DEDICATION) else {
            return;
        };
        if let Some(multiplier) = enchant.multiplier_at(level) {
            acc.contribute(enchant.name.as_str(), multiplier * f64::from(milestone));
        }
    }
}

/// The built-in sources, in evaluation order
pub fn default_sources() -> [&'static dyn FortuneSource; 7] {
    [
        &ToolBonusSource,
        &RarityStatSource,
        &ReforgeSource,
        &FarmingForDummiesSource,
        &AbilitySource,
        &EnchantmentSource,
        &MilestoneSource,
    ]
}
