// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Linear-to-Physical Translation
//!
//! Drives the three-level walk and performs the final permission check
//! across every level traversed.

use log::debug;

use crate::fault::Fault;
use crate::phys::PhysMem;
use crate::pte::{Access, PtEntry};
use crate::walk::{walk_one_level, Level, WalkStep};

/// Translate `linear` for `access` through the tables rooted at
/// `root`.
///
/// `root` is the contents of the top-level page-table-base register,
/// interpreted as a PL3 entry. On success the physical address is
/// returned; otherwise the fault that stopped the walk.
///
/// Permission bits are ANDed across every level traversed: a page is
/// only as permissive as its most restrictive ancestor. Note that
/// superpage mappings (a leaf at PL3 or PL2) complete before the
/// permission check runs, so they are never refused with
/// [`Fault::Violation`].
///
/// `NotPresent` and `Malformed` faults abort the walk at the level
/// that detects them; `Violation` can only be reported once the walk
/// has reached the bottom level intact.
pub fn linear_to_phys<M: PhysMem>(
    mem: &M,
    root: PtEntry,
    linear: u32,
    access: Access,
) -> Result<u32, Fault> {
    let mut entry = root;
    let mut walked = [PtEntry::zero(); 3];
    let mut phys = 0;

    for (slot, level) in Level::WALK_ORDER.into_iter().enumerate() {
        walked[slot] = entry;
        match walk_one_level(mem, entry, linear, level) {
            Ok(WalkStep::Mapped(addr)) => return Ok(addr),
            Ok(WalkStep::Next(next)) => {
                phys = next;
                entry = PtEntry::from_raw(next);
            }
            Err(fault) => {
                debug!(
                    "translate {:#010x}: {} fault at pl{}",
                    linear,
                    fault,
                    level.depth()
                );
                return Err(fault);
            }
        }
    }

    // All three levels were present, well-formed and non-terminal; the
    // access is legal only if every entry on the path grants it.
    if walked.iter().any(|e| !e.permits(access)) {
        debug!("translate {:#010x}: {:?} permission violation", linear, access);
        return Err(Fault::Violation);
    }

    Ok(phys)
}
