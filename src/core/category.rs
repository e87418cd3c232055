//=========================================================================
// Node Categories
//=========================================================================
//
// Bitmask classification of scene nodes, used to route commands.
//
// Each category owns one bit so categories combine with `|`:
//   PLAYER_AIRCRAFT | ALLIED_AIRCRAFT → "every friendly aircraft"
//
// A command reaches a node when the two masks share at least one bit.
//
//=========================================================================

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Category ============================================================

bitflags! {
    /// Classification of a scene node for command dispatch.
    ///
    /// The empty mask matches nothing. Plain container and decoration
    /// nodes report [`Category::SCENE`], which no gameplay command targets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Category: u32 {
        /// Structural nodes (root, layers, backgrounds).
        const SCENE           = 1 << 0;

        /// The aircraft steered by the local player.
        const PLAYER_AIRCRAFT = 1 << 1;

        /// Friendly aircraft not under direct control.
        const ALLIED_AIRCRAFT = 1 << 2;

        /// Hostile aircraft.
        const ENEMY_AIRCRAFT  = 1 << 3;
    }
}

impl Category {
    /// Returns `true` if a command tagged `mask` should act on a node of
    /// this category.
    #[inline]
    pub fn accepts(self, mask: Category) -> bool {
        self.intersects(mask)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
