//! Enumeration types shared by the configuration and decision layers.
//!
//! Every enumeration parses case-insensitively from its `SCREAMING_SNAKE_CASE`
//! name (the form used in configuration files) and serializes back to the
//! same form. Parsing is provided by [`strum::EnumString`], so `"deep_dark"`,
//! `"DEEP_DARK"` and `"Deep_Dark"` all yield [`Biome::DeepDark`].

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// World difficulty tier.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Difficulty {
    /// No hostile spawns; the base chance is always zero.
    Peaceful,
    /// Easy difficulty.
    Easy,
    /// Normal difficulty.
    Normal,
    /// Hard difficulty, the only tier on which riders are attached.
    Hard,
}

impl Difficulty {
    /// Whether this is the hardest tier.
    pub const fn is_hardest(self) -> bool {
        matches!(self, Self::Hard)
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// The dimension a world belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Environment {
    /// The overworld.
    Normal,
    /// The nether.
    Nether,
    /// The end.
    TheEnd,
    /// A plugin- or datapack-defined dimension.
    Custom,
}

// ---------------------------------------------------------------------------
// Biome
// ---------------------------------------------------------------------------

/// Biome at a spawn location.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Biome {
    // --- Caves ---
    /// Sculk-covered deep caves.
    DeepDark,
    /// Caves filled with dripstone.
    DripstoneCaves,
    /// Caves overgrown with azalea and moss.
    LushCaves,

    // --- Oceans and rivers ---
    /// Temperate ocean.
    Ocean,
    /// Deep temperate ocean.
    DeepOcean,
    /// Cold ocean.
    ColdOcean,
    /// Deep cold ocean.
    DeepColdOcean,
    /// Frozen ocean.
    FrozenOcean,
    /// Deep frozen ocean.
    DeepFrozenOcean,
    /// Lukewarm ocean.
    LukewarmOcean,
    /// Deep lukewarm ocean.
    DeepLukewarmOcean,
    /// Warm ocean.
    WarmOcean,
    /// River.
    River,
    /// Frozen river.
    FrozenRiver,

    // --- Dry ---
    /// Desert.
    Desert,
    /// Badlands.
    Badlands,
    /// Eroded badlands.
    ErodedBadlands,
    /// Wooded badlands.
    WoodedBadlands,
    /// Savanna.
    Savanna,
    /// Savanna plateau.
    SavannaPlateau,
    /// Windswept savanna.
    WindsweptSavanna,

    // --- Temperate ---
    /// Plains.
    Plains,
    /// Sunflower plains.
    SunflowerPlains,
    /// Meadow.
    Meadow,
    /// Cherry grove.
    CherryGrove,
    /// Forest.
    Forest,
    /// Flower forest.
    FlowerForest,
    /// Birch forest.
    BirchForest,
    /// Old growth birch forest.
    OldGrowthBirchForest,
    /// Dark forest.
    DarkForest,
    /// Swamp.
    Swamp,
    /// Mangrove swamp.
    MangroveSwamp,
    /// Jungle.
    Jungle,
    /// Sparse jungle.
    SparseJungle,
    /// Bamboo jungle.
    BambooJungle,
    /// Mushroom fields.
    MushroomFields,
    /// Beach.
    Beach,
    /// Stony shore.
    StonyShore,

    // --- Cold and mountains ---
    /// Taiga.
    Taiga,
    /// Old growth pine taiga.
    OldGrowthPineTaiga,
    /// Old growth spruce taiga.
    OldGrowthSpruceTaiga,
    /// Snowy taiga.
    SnowyTaiga,
    /// Snowy plains.
    SnowyPlains,
    /// Snowy beach.
    SnowyBeach,
    /// Ice spikes.
    IceSpikes,
    /// Grove.
    Grove,
    /// Snowy slopes.
    SnowySlopes,
    /// Frozen peaks.
    FrozenPeaks,
    /// Jagged peaks.
    JaggedPeaks,
    /// Stony peaks.
    StonyPeaks,
    /// Windswept hills.
    WindsweptHills,
    /// Windswept gravelly hills.
    WindsweptGravellyHills,
    /// Windswept forest.
    WindsweptForest,

    // --- Nether ---
    /// Nether wastes.
    NetherWastes,
    /// Soul sand valley.
    SoulSandValley,
    /// Crimson forest.
    CrimsonForest,
    /// Warped forest.
    WarpedForest,
    /// Basalt deltas.
    BasaltDeltas,

    // --- End ---
    /// The central end island.
    TheEnd,
    /// Small end islands.
    SmallEndIslands,
    /// End midlands.
    EndMidlands,
    /// End highlands.
    EndHighlands,
    /// End barrens.
    EndBarrens,

    // --- Other ---
    /// The void.
    TheVoid,
    /// A datapack-defined biome.
    Custom,
}

impl Biome {
    /// Whether the biome is an ocean or river variant.
    pub const fn is_watery(self) -> bool {
        matches!(
            self,
            Self::Ocean
                | Self::DeepOcean
                | Self::ColdOcean
                | Self::DeepColdOcean
                | Self::FrozenOcean
                | Self::DeepFrozenOcean
                | Self::LukewarmOcean
                | Self::DeepLukewarmOcean
                | Self::WarmOcean
                | Self::River
                | Self::FrozenRiver
        )
    }
}

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Creature type being spawned, substituted, or attached as a rider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EntityKind {
    // --- Arthropods ---
    /// Spider.
    Spider,
    /// Cave spider, the kind substituted into deep spawns.
    CaveSpider,
    /// Silverfish.
    Silverfish,
    /// Endermite.
    Endermite,

    // --- Undead ---
    /// Zombie, the default rider.
    Zombie,
    /// Husk, the desert rider.
    Husk,
    /// Drowned, the ocean and river rider.
    Drowned,
    /// Zombified piglin, the nether rider.
    ZombifiedPiglin,
    /// Zombie villager.
    ZombieVillager,
    /// Skeleton.
    Skeleton,
    /// Stray.
    Stray,
    /// Wither skeleton.
    WitherSkeleton,
    /// Phantom.
    Phantom,

    // --- Other hostiles ---
    /// Creeper.
    Creeper,
    /// Enderman.
    Enderman,
    /// Witch.
    Witch,
    /// Slime.
    Slime,
    /// Magma cube.
    MagmaCube,
    /// Blaze.
    Blaze,
    /// Ghast.
    Ghast,
    /// Piglin.
    Piglin,
    /// Pillager.
    Pillager,
    /// Guardian.
    Guardian,
    /// Warden.
    Warden,

    // --- Passive ---
    /// Bat.
    Bat,
    /// Glow squid.
    GlowSquid,
    /// Axolotl.
    Axolotl,
}

impl EntityKind {
    /// The kind substituted for ordinary spawns deep underground.
    pub const REPLACEMENT: Self = Self::CaveSpider;
}

// ---------------------------------------------------------------------------
// SpawnReason
// ---------------------------------------------------------------------------

/// Why the host is spawning a creature.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum SpawnReason {
    /// Ordinary world spawning.
    Natural,
    /// Spawned as a rider on another creature.
    Jockey,
    /// Spawned by a mob spawner block.
    Spawner,
    /// Spawned from a spawn egg.
    SpawnerEgg,
    /// Born from breeding.
    Breeding,
    /// Spawned by a command.
    Command,
    /// Called in as reinforcements.
    Reinforcements,
    /// Part of a patrol.
    Patrol,
    /// Spawned during chunk generation.
    ChunkGen,
    /// Spawned by a plugin.
    Custom,
    /// Unknown or unspecified cause.
    Default,
}

impl SpawnReason {
    /// Whether the reason is natural world spawning.
    pub const fn is_natural(self) -> bool {
        matches!(self, Self::Natural)
    }
}

// ---------------------------------------------------------------------------
// SpawnDistribution
// ---------------------------------------------------------------------------

/// Shape of the curve that scales the base spawn chance by height.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SpawnDistribution {
    /// The base chance everywhere in range.
    #[default]
    Constant,
    /// Scales linearly from full chance at the floor to zero at the top.
    Linear,
    /// Scales with the square of the linear fraction.
    Hyperbolic,
    /// Scales with the logarithm of the depth below the top of the range.
    Logarithmic,
}
