//! Asset-budget policy for constrained hardware.
//!
//! The game ships animated sprite sheets, colour variants and
//! full-screen intro/outro images.  On the single-board build there is
//! not enough memory for all of it, so a pure policy, queried exactly
//! once at startup, decides per asset group how much to load: which
//! animation frames (stride), how many colour variants, and whether the
//! full-screen sequences load at all.

/// Every loadable asset group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetGroup {
    /// Animated snake head sheet.
    SnakeHead,
    /// Static snake body sprite.
    SnakeBody,
    /// Animated worm (regular food) sheet.
    Worm,
    /// Bonus fruit sprite.
    BonusFruit,
    /// Red food-burst particle sheet.
    ParticleFood,
    /// White collision particle sheet.
    ParticleCollision,
    /// Rainbow bonus particle sheet.
    ParticleRainbow,
    /// Hue-shifted player colour variants.
    PlayerVariants,
    /// Full-screen title / game-over / high-score images.
    Screens,
}

impl AssetGroup {
    /// Animation frames in the full-fidelity sheet.
    pub fn nominal_frames(self) -> usize {
        match self {
            AssetGroup::SnakeHead => 8,
            AssetGroup::Worm => 6,
            AssetGroup::ParticleFood
            | AssetGroup::ParticleCollision
            | AssetGroup::ParticleRainbow => 12,
            AssetGroup::SnakeBody
            | AssetGroup::BonusFruit
            | AssetGroup::PlayerVariants
            | AssetGroup::Screens => 1,
        }
    }
}

/// How much of an asset group to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadPlan {
    /// Keep every `frame_stride`-th animation frame; 1 keeps them all.
    pub frame_stride: usize,
    /// Colour variants to load.
    pub variant_count: usize,
    /// Whether full-screen intro/outro sequences load at all.
    pub load_sequences: bool,
}

impl LoadPlan {
    /// The unconstrained plan; also the default for any group without a
    /// low-memory rule.
    pub const fn everything() -> Self {
        Self {
            frame_stride: 1,
            variant_count: PLAYER_VARIANTS,
            load_sequences: true,
        }
    }
}

/// Colour variants shipped with the game.
pub const PLAYER_VARIANTS: usize = 4;

/// The policy.  Pure and total: every group has a defined plan for both
/// flag values, and the same inputs always yield the same plan.
pub fn plan(group: AssetGroup, low_memory: bool) -> LoadPlan {
    if !low_memory {
        return LoadPlan::everything();
    }
    match group {
        AssetGroup::SnakeHead
        | AssetGroup::Worm
        | AssetGroup::ParticleFood
        | AssetGroup::ParticleCollision
        | AssetGroup::ParticleRainbow => LoadPlan {
            frame_stride: 2,
            variant_count: 1,
            load_sequences: true,
        },
        AssetGroup::PlayerVariants => LoadPlan {
            frame_stride: 1,
            variant_count: 1,
            load_sequences: true,
        },
        AssetGroup::Screens => LoadPlan {
            frame_stride: 1,
            variant_count: 1,
            load_sequences: false,
        },
        _ => LoadPlan::everything(),
    }
}

/// The plans as actually loaded, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct AssetCatalog {
    low_memory: bool,
}

impl AssetCatalog {
    pub fn new(low_memory: bool) -> Self {
        Self { low_memory }
    }

    pub fn plan(&self, group: AssetGroup) -> LoadPlan {
        plan(group, self.low_memory)
    }

    /// Animation frames available after the stride is applied.
    pub fn frames(&self, group: AssetGroup) -> usize {
        let plan = self.plan(group);
        let nominal = group.nominal_frames();
        ((nominal + plan.frame_stride - 1) / plan.frame_stride).max(1)
    }

    /// Whether the full-screen images for menus and outros exist.
    pub fn screens_loaded(&self) -> bool {
        self.plan(AssetGroup::Screens).load_sequences
    }
}
