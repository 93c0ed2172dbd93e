//! Expected crop yields and NPC income
//!
//! Base drops for `b` blocks broken at fortune `f` are
//! `b × drops_per_break × (f + 100) / 100`, then adjusted per crop:
//! dicer crops add their average bonus rolls, replenishing crops lose one drop
//! per block broken, everything else is used as is.

mod result;
mod special;

pub use result::DetailedDropsResult;
pub use special::{armor_pieces_for, average_special_crops, dicer_bonus, SpecialCropDrops};

use crate::config::{CropInfo, GameTables, BLESSED, BOUNTIFUL};
use crate::error::FarmingError;
use crate::types::Crop;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Share of base drops paid out as extra coins by the Bountiful reforge
pub const BOUNTIFUL_COIN_SHARE: f64 = 0.2;

/// Options shared by the yield calculations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YieldOptions {
    /// Blocks broken
    pub blocks_broken: f64,
    /// Farming fortune; the crop's maximum attainable fortune when absent
    #[serde(default)]
    pub farming_fortune: Option<f64>,
    /// Whether the tool carries the Bountiful reforge
    #[serde(default)]
    pub bountiful: bool,
    /// Whether a Mooshroom Cow pet is active
    #[serde(default)]
    pub mooshroom: bool,
}

impl YieldOptions {
    /// Options for a number of blocks broken at maximum fortune
    pub fn new(blocks_broken: f64) -> Self {
        YieldOptions {
            blocks_broken,
            ..YieldOptions::default()
        }
    }

    pub fn with_fortune(mut self, fortune: f64) -> Self {
        self.farming_fortune = Some(fortune);
        self
    }

    pub fn with_bountiful(mut self, bountiful: bool) -> Self {
        self.bountiful = bountiful;
        self
    }

    pub fn with_mooshroom(mut self, mooshroom: bool) -> Self {
        self.mooshroom = mooshroom;
        self
    }
}

/// Options for solving the fortune needed to reach a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FortuneRequiredOptions {
    pub crop: Crop,
    pub blocks_broken: f64,
    /// Target collection
    pub collection: f64,
    /// Back out average dicer bonus drops first
    #[serde(default)]
    pub include_dicers: bool,
    /// Back out Mooshroom Cow mushrooms first
    #[serde(default)]
    pub include_mooshroom: bool,
}

/// Nothing drops without positive fortune or with a negative or NaN block count
fn is_degenerate(fortune: f64, blocks_broken: f64) -> bool {
    fortune.is_nan() || fortune <= 0.0 || blocks_broken.is_nan() || blocks_broken < 0.0
}

fn base_drops(info: &CropInfo, blocks_broken: f64, fortune: f64) -> f64 {
    blocks_broken * info.drops * (fortune + 100.0) / 100.0
}

/// Expected collection for a crop
///
/// Returns zero when the resolved fortune is not positive or `blocks_broken`
/// is negative or NaN.
pub fn expected_drops(
    tables: &GameTables,
    crop: Crop,
    blocks_broken: f64,
    fortune: Option<f64>,
) -> f64 {
    let Some(info) = tables.crop(crop) else {
        debug!(%crop, "no crop data, expecting no drops");
        return 0.0;
    };

    let fortune = fortune.unwrap_or(info.max_fortune);
    if is_degenerate(fortune, blocks_broken) {
        return 0.0;
    }

    let base = base_drops(info, blocks_broken, fortune);
    if tables.dicer(crop).is_some() {
        (base + dicer_bonus(tables, crop, blocks_broken)).round()
    } else if info.replenish {
        (base - blocks_broken).round()
    } else {
        base.round()
    }
}

/// Expected collection for every crop
pub fn average_drops_all_crops(tables: &GameTables, options: &YieldOptions) -> BTreeMap<Crop, f64> {
    Crop::ALL
        .iter()
        .map(|&crop| {
            let drops =
                expected_drops(tables, crop, options.blocks_broken, options.farming_fortune);
            (crop, drops)
        })
        .collect()
}

/// Fortune assumed when the caller gives none.
///
/// The maximum fortune table assumes a Bountiful tool, so anyone not using
/// Bountiful is credited the Blessed/Bountiful difference instead.
fn default_fortune(tables: &GameTables, info: &CropInfo, bountiful: bool) -> f64 {
    if bountiful {
        return info.max_fortune;
    }
    let max_of = |id: &str| tables.reforge(id).map(|r| r.max_fortune()).unwrap_or(0.0);
    info.max_fortune + max_of(BLESSED) - max_of(BOUNTIFUL)
}

/// Expected collection and NPC income with per-source attribution
pub fn detailed_drops(
    tables: &GameTables,
    crop: Crop,
    options: &YieldOptions,
) -> DetailedDropsResult {
    let Some(info) = tables.crop(crop) else {
        debug!(%crop, "no crop data, expecting no drops");
        return DetailedDropsResult::default();
    };

    let fortune = options
        .farming_fortune
        .unwrap_or_else(|| default_fortune(tables, info, options.bountiful));
    let blocks = options.blocks_broken;

    let mut result = DetailedDropsResult::with_fortune(fortune);
    if is_degenerate(fortune, blocks) {
        return result;
    }

    let base = base_drops(info, blocks, fortune);
    let normal = base.round();
    result.other_collection_mut().set("Normal", normal);

    if options.bountiful {
        result.set_coin_source("Bountiful", (base * BOUNTIFUL_COIN_SHARE).round());
    }

    if options.mooshroom {
        let mushrooms = (blocks * info.breaks_per_block()).round();
        result.other_collection_mut().set("Mushroom", mushrooms);
        result.set_coin_source("Mooshroom", mushrooms * info.npc);
    }

    if let Some(special) = average_special_crops(tables, crop, blocks, armor_pieces_for(crop)) {
        let amount = special.amount.round();
        result.other_collection_mut().set(special.name.as_str(), amount);
        result.set_coin_source(special.name, amount * special.npc);
    }

    if let Some(dicer) = tables.dicer(crop) {
        let bonus = dicer_bonus(tables, crop, blocks).round();
        result.other_collection_mut().set("Collection", normal);
        result.other_collection_mut().set("Dicer RNG", bonus);
        result.set_coin_source("Collection", normal * info.npc);
        result.set_coin_source(dicer.label.as_str(), bonus * info.npc);
        result.set_collection(normal + bonus);
    } else if info.replenish {
        let replenished = blocks.round();
        let collection = normal - replenished;
        result.other_collection_mut().set("Replenish", -replenished);
        result.set_coin_source("Collection", collection * info.npc);
        result.set_collection(collection);
    } else {
        result.other_collection_mut().set("Collection", normal);
        result.set_coin_source("Collection", normal * info.npc);
        result.set_collection(normal);
    }

    result
}

/// Detailed drops for every crop, with seeds folded into wheat and Mooshroom
/// mushrooms folded into the mushroom collection
pub fn detailed_average_drops_all_crops(
    tables: &GameTables,
    options: &YieldOptions,
) -> BTreeMap<Crop, DetailedDropsResult> {
    let mut results: BTreeMap<Crop, DetailedDropsResult> = Crop::ALL
        .iter()
        .map(|&crop| (crop, detailed_drops(tables, crop, options)))
        .collect();

    fold_seeds_into_wheat(tables, &mut results, options);
    if options.mooshroom {
        fold_mooshroom(&mut results);
    }

    results
}

fn fold_seeds_into_wheat(
    tables: &GameTables,
    results: &mut BTreeMap<Crop, DetailedDropsResult>,
    options: &YieldOptions,
) {
    let Some(seeds) = results.get(&Crop::Seeds).cloned() else {
        return;
    };
    // Nothing was computed for seeds (no fortune or negative blocks)
    if !seeds.other_collection().contains("Normal") {
        return;
    }

    let seed_price = tables.crop(Crop::Seeds).map(|info| info.npc).unwrap_or(0.0);
    let bonus_seeds = seeds.collection() - options.blocks_broken;

    let Some(wheat) = results.get_mut(&Crop::Wheat) else {
        return;
    };
    wheat.other_collection_mut().set("Seeds", bonus_seeds);
    wheat.set_coin_source("Seeds", bonus_seeds * seed_price);
    if options.bountiful {
        if let Some(bountiful) = seeds.coin_sources().get("Bountiful") {
            wheat.set_coin_source("Bountiful (Seeds)", bountiful);
        }
    }
}

fn fold_mooshroom(results: &mut BTreeMap<Crop, DetailedDropsResult>) {
    let Some(mushroom) = results.get_mut(&Crop::Mushroom) else {
        return;
    };
    let Some(mushrooms) = mushroom.other_collection().get("Mushroom") else {
        return;
    };
    mushroom.other_collection_mut().rename("Mushroom", "Mooshroom");
    mushroom.add_collection(mushrooms);
}

/// Fortune needed to reach a collection
///
/// Solves the base formula for fortune after removing optional dicer and
/// Mooshroom drops from the target, rounding up. Feeding the answer back
/// through [`expected_drops`] need not reproduce the target exactly: this
/// side rounds up while the forward side rounds to nearest, and the
/// replenish adjustment is not inverted.
pub fn try_fortune_required_for_collection(
    tables: &GameTables,
    options: &FortuneRequiredOptions,
) -> Result<i64, FarmingError> {
    let crop = options.crop;
    let info = tables
        .crop(crop)
        .ok_or_else(|| FarmingError::InvalidInput(format!("no crop data for {}", crop)))?;

    let blocks = options.blocks_broken;
    let divisor = blocks * info.drops;
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(FarmingError::InvalidInput(format!(
            "cannot solve fortune for {} with {} blocks broken at {} drops per break",
            crop, blocks, info.drops
        )));
    }

    let mut target = options.collection;
    if options.include_dicers {
        target -= dicer_bonus(tables, crop, blocks);
    }
    if options.include_mooshroom && crop == Crop::Mushroom {
        target -= (blocks * info.breaks_per_block()).round();
    }

    let fortune = (target / divisor * 100.0 - 100.0).ceil();
    if !fortune.is_finite() {
        return Err(FarmingError::InvalidInput(format!(
            "collection {} does not yield a finite fortune",
            options.collection
        )));
    }
    Ok(fortune as i64)
}

/// Fortune needed to reach a collection, zero for degenerate inputs
pub fn fortune_required_for_collection(
    tables: &GameTables,
    options: &FortuneRequiredOptions,
) -> i64 {
    try_fortune_required_for_collection(tables, options).unwrap_or_else(|err| {
        warn!(%err, "fortune requirement could not be solved");
        0
    })
}

/// NPC coins for selling an amount of a crop
pub fn npc_profit(tables: &GameTables, crop: Crop, amount: f64) -> f64 {
    tables.crop(crop).map(|info| amount * info.npc).unwrap_or(0.0)
}
