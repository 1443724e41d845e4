// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Single-Level Walk
//!
//! Interprets one page-table entry at one level of the hierarchy:
//! validates presence, rejects malformed superpage entries, and either
//! completes the translation (superpage shortcut) or produces the
//! value the next level interprets.

use log::trace;

use crate::addr::{page_index, pl1_index, pl2_index};
use crate::bits::bits;
use crate::fault::Fault;
use crate::phys::PhysMem;
use crate::pte::PtEntry;

/// A level of the page-table hierarchy, counted down from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Root level; a leaf here maps a 4 GB superpage
    Pl3,

    /// A leaf here maps a 4 MB superpage
    Pl2,

    /// Resolves the final 4 KB frame
    Pl1,
}

impl Level {
    /// Root-to-page traversal order
    pub const WALK_ORDER: [Level; 3] = [Level::Pl3, Level::Pl2, Level::Pl1];

    /// The linear-address field indexing the table (or page) this
    /// level's entry points at.
    #[inline]
    pub const fn index_of(self, linear: u32) -> u32 {
        match self {
            Level::Pl3 => pl2_index(linear),
            Level::Pl2 => pl1_index(linear),
            Level::Pl1 => page_index(linear),
        }
    }

    /// Hierarchy depth, for diagnostics
    pub const fn depth(self) -> u32 {
        match self {
            Level::Pl3 => 3,
            Level::Pl2 => 2,
            Level::Pl1 => 1,
        }
    }
}

/// Outcome of interpreting a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStep {
    /// A superpage completed the translation; payload is the physical
    /// address.
    Mapped(u32),

    /// The walk continues. The payload is the next-level entry value,
    /// or the final 4 KB physical address when leaving level 1.
    Next(u32),
}

/// Interpret `entry` at `level` for the translation of `linear`.
///
/// `entry` may be arbitrary untrusted bits; no input panics or reads
/// outside what `mem` defines. Permission bits are not inspected here
/// (the translator checks them across all levels at once), so this
/// function never reports [`Fault::Violation`].
///
/// Performs exactly one `read_phys` when `entry` is a non-leaf
/// pointer, and none otherwise.
pub fn walk_one_level<M: PhysMem>(
    mem: &M,
    entry: PtEntry,
    linear: u32,
    level: Level,
) -> Result<WalkStep, Fault> {
    if !entry.is_present() {
        trace!("pl{} entry {:#010x}: not present", level.depth(), entry.raw);
        return Err(Fault::NotPresent);
    }

    if entry.is_leaf() {
        return match level {
            Level::Pl3 => {
                // 4 GB superpage: bits 31:12 are reserved and must be
                // zero. Bits 11:0 are ignored; a page spanning the
                // whole address space has no sub-page offset bits.
                if entry.raw >> 12 != 0 {
                    return Err(Fault::Malformed);
                }
                trace!("pl3 leaf: 4 GB page, identity-maps {:#010x}", linear);
                Ok(WalkStep::Mapped(linear))
            }
            Level::Pl2 => {
                // 4 MB superpage: the would-be PL1 index field
                // (bits 21:12) is reserved and must be zero.
                if bits(entry.raw, 21, 12) != 0 {
                    return Err(Fault::Malformed);
                }
                let phys = (entry.raw & 0xffc0_0000) | bits(linear, 21, 0);
                trace!("pl2 leaf: 4 MB page, {:#010x} -> {:#010x}", linear, phys);
                Ok(WalkStep::Mapped(phys))
            }
            // The final 4 KB frame: page index applied to the frame
            // base. Not a shortcut; the translator still owes the
            // permission check.
            Level::Pl1 => Ok(WalkStep::Next(entry.frame_base() + page_index(linear))),
        };
    }

    // Non-leaf: fetch the next-level entry from the table this entry
    // points at.
    let index = level.index_of(linear);
    let fetched = mem.read_phys(entry.frame_base().wrapping_add(index * 4));
    trace!(
        "pl{} table {:#010x}[{:#x}] -> {:#010x}",
        level.depth(),
        entry.frame_base(),
        index,
        fetched
    );
    Ok(WalkStep::Next(fetched))
}
