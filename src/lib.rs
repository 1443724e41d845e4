// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Software Page-Table Walker
//!
//! This crate emulates the address-translation logic of a three-level
//! hierarchical page table over 32-bit linear addresses, as performed by
//! hardware or a hypervisor's shadow MMU. Given the contents of the
//! top-level page-table-base register and a linear address, it produces
//! the physical address or the fault that stopped the walk.
//!
//! # Design
//!
//! - **Three-level walk**: PL3 (root) → PL2 → PL1 → 4 KB page
//! - **4 GB superpages**: leaf entries at the root level
//! - **4 MB superpages**: leaf entries at level 2
//! - **Injected physical memory**: table fetches go through the
//!   [`PhysMem`] capability, so a translation is a pure function of its
//!   inputs plus reads of the backing store
//!
//! # Address Layout
//!
//! ```text
//! Level 3 (root) → Level 2  → Level 1  → 4 KB page
//! 1 entry        → 1024     → 1024     → 4096 bytes
//!                  10 bits  → 10 bits  → 12 bits
//! = 32-bit linear address (4 GB)
//! ```
//!
//! # Usage
//!
//! ```
//! use ptwalk::{linear_to_phys, Access, FlatMem, PtEntry};
//!
//! // A guest memory image holding a PL2 table at 0x1000 and a PL1
//! // table at 0x2000, mapping linear 0x1004 to the frame at 0x3000.
//! let mut image = [0u8; 0x4000];
//! image[0x1000..0x1004].copy_from_slice(&0x0000_200fu32.to_le_bytes());
//! image[0x2004..0x2008].copy_from_slice(&0x0000_301fu32.to_le_bytes());
//!
//! let mem = FlatMem::new(&image);
//! let root = PtEntry::from_raw(0x0000_100f);
//! assert_eq!(linear_to_phys(&mem, root, 0x0000_1004, Access::Read), Ok(0x0000_3004));
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod addr;
pub mod bits;
pub mod fault;
pub mod phys;
pub mod pte;
pub mod translate;
pub mod walk;

pub use fault::Fault;
pub use phys::{FlatMem, PhysMem};
pub use pte::{Access, PtEntry, PteFlags};
pub use translate::linear_to_phys;
pub use walk::{walk_one_level, Level, WalkStep};
