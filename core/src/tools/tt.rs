//! The shared transposition table: three-entry clusters, age-based
//! replacement, and lock-light concurrent access that tolerates torn reads
//! by re-validating the stored key after the fact.
//!
//! The table is sized in megabytes to a power-of-two cluster count so that
//! `key -> cluster` reduction is a mask, not a modulo. Entries compress the
//! search value into 16 bits and the best move into a 16-bit (src, dest,
//! promotion) triple; full move metadata is cheap to recompute from the
//! board at the point of use, so it isn't duplicated here.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::core::piece_move::BitMove;
use crate::core::score::{self, Value};
use crate::core::sq::SQ;
use crate::core::PieceType;

const CLUSTER_SIZE: usize = 3;
const GENERATION_DELTA: u8 = 4;
const GENERATION_MASK: u8 = 0xFC;
const BOUND_MASK: u8 = 0x03;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Bound {
    None = 0,
    Upper = 1,
    Lower = 2,
    Exact = 3,
}

impl Bound {
    fn from_u8(b: u8) -> Bound {
        match b & BOUND_MASK {
            1 => Bound::Upper,
            2 => Bound::Lower,
            3 => Bound::Exact,
            _ => Bound::None,
        }
    }
}

/// Packs `src`, `dest` and `promotion` into 16 bits for storage. The engine's
/// full `BitMove` carries more (captured piece, check hint, ...) that a TT
/// probe recomputes from the board rather than trusting a stale encoding.
#[inline]
pub fn compact_move(m: BitMove) -> u16 {
    if m.is_null() {
        return 0;
    }
    let src = m.get_src().0 as u16 & 0x3F;
    let dest = m.get_dest().0 as u16 & 0x3F;
    let promo = match m.promotion() {
        PieceType::N => 1u16,
        PieceType::B => 2,
        PieceType::R => 3,
        PieceType::Q => 4,
        _ => 0,
    };
    src | (dest << 6) | (promo << 12)
}

#[inline]
pub fn expand_move(packed: u16) -> (SQ, SQ, PieceType) {
    let src = SQ((packed & 0x3F) as u8);
    let dest = SQ(((packed >> 6) & 0x3F) as u8);
    let promo = match (packed >> 12) & 0xF {
        1 => PieceType::N,
        2 => PieceType::B,
        3 => PieceType::R,
        4 => PieceType::Q,
        _ => PieceType::None,
    };
    (src, dest, promo)
}

/// Rewrites a mate-distance score from "plies from the current node" to
/// "plies from the root" before it's stored.
#[inline]
pub fn value_to_tt(v: Value, ply: i32) -> Value {
    if v >= score::MATE_IN_MAX_PLY {
        v + ply
    } else if v <= score::MATED_IN_MAX_PLY {
        v - ply
    } else {
        v
    }
}

/// The inverse of [`value_to_tt`], applied on probe.
#[inline]
pub fn value_from_tt(v: Value, ply: i32) -> Value {
    if v == score::NONE {
        return score::NONE;
    }
    if v >= score::MATE_IN_MAX_PLY {
        v - ply
    } else if v <= score::MATED_IN_MAX_PLY {
        v + ply
    } else {
        v
    }
}

#[derive(Copy, Clone)]
pub struct Entry {
    key16: u16,
    move16: u16,
    value: i16,
    eval: i16,
    depth: u8,
    gen_bound: u8,
}

impl Entry {
    const EMPTY: Entry = Entry {
        key16: 0,
        move16: 0,
        value: 0,
        eval: 0,
        depth: 0,
        gen_bound: 0,
    };

    #[inline(always)]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline(always)]
    pub fn value(&self) -> Value {
        self.value as Value
    }

    #[inline(always)]
    pub fn eval(&self) -> Value {
        self.eval as Value
    }

    #[inline(always)]
    pub fn bound(&self) -> Bound {
        Bound::from_u8(self.gen_bound)
    }

    #[inline(always)]
    pub fn packed_move(&self) -> u16 {
        self.move16
    }

    #[inline(always)]
    fn generation(&self) -> u8 {
        self.gen_bound & GENERATION_MASK
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bound() == Bound::None
    }

    /// Writes a search result into this slot, preferring to keep the
    /// existing move when the new store doesn't supply one.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        key16: u16,
        value: Value,
        bound: Bound,
        depth: u8,
        packed_move: u16,
        eval: Value,
        generation: u8,
    ) {
        if packed_move != 0 || key16 != self.key16 {
            self.move16 = packed_move;
        }

        if key16 != self.key16
            || depth as u16 + 4 > self.depth as u16
            || bound == Bound::Exact
        {
            self.key16 = key16;
            self.value = value.clamp(i16::MIN as Value, i16::MAX as Value) as i16;
            self.eval = eval.clamp(i16::MIN as Value, i16::MAX as Value) as i16;
            self.depth = depth;
            self.gen_bound = generation | bound as u8;
        }
    }

    /// Replacement-worth metric: newer generations and deeper searches are
    /// worth more; an older generation is penalised regardless of depth.
    fn worth(&self, current_generation: u8) -> i32 {
        let age = current_generation.wrapping_sub(self.generation()) as i32 / GENERATION_DELTA as i32;
        self.depth as i32 - age * 2
    }
}

#[repr(align(32))]
struct Cluster {
    entries: [Entry; CLUSTER_SIZE],
}

impl Cluster {
    fn empty() -> Cluster {
        Cluster {
            entries: [Entry::EMPTY; CLUSTER_SIZE],
        }
    }
}

pub struct TranspositionTable {
    clusters: UnsafeCell<Vec<Cluster>>,
    cluster_count: UnsafeCell<usize>,
    generation: AtomicU8,
}

// The table is accessed by many search threads without a lock. Writers race
// on individual entries; a torn read is caught by re-validating `key16`
// after the fact, and a lost update just costs a wasted re-search, never
// memory unsafety, since every field here is plain-old-data.
unsafe impl Sync for TranspositionTable {}

impl TranspositionTable {
    pub fn new(mb_size: usize) -> TranspositionTable {
        let tt = TranspositionTable {
            clusters: UnsafeCell::new(Vec::new()),
            cluster_count: UnsafeCell::new(0),
            generation: AtomicU8::new(0),
        };
        tt.resize_to_megabytes(mb_size);
        tt
    }

    /// Reallocates the table. Must not be called while a search thread may
    /// be probing concurrently.
    pub fn resize_to_megabytes(&self, mb_size: usize) {
        let bytes = mb_size.max(1) * 1024 * 1024;
        let cluster_bytes = std::mem::size_of::<Cluster>();
        let mut count = (bytes / cluster_bytes).max(1);
        count = count.next_power_of_two() >> 1;
        let count = count.max(1);
        unsafe {
            *self.cluster_count.get() = count;
            *self.clusters.get() = (0..count).map(|_| Cluster::empty()).collect();
        }
    }

    pub fn clear(&self) {
        unsafe {
            for cluster in (*self.clusters.get()).iter_mut() {
                *cluster = Cluster::empty();
            }
        }
        self.generation.store(0, Ordering::Relaxed);
    }

    #[inline(always)]
    fn cluster_count(&self) -> usize {
        unsafe { *self.cluster_count.get() }
    }

    #[inline(always)]
    fn cluster_index(&self, key: u64) -> usize {
        // mulhi reduction: uniform without a modulo, assumes cluster_count is a power of two.
        (((key as u128) * (self.cluster_count() as u128)) >> 64) as usize
    }

    pub fn new_search(&self) {
        self.generation
            .fetch_add(GENERATION_DELTA, Ordering::Relaxed);
    }

    pub fn generation(&self) -> u8 {
        self.generation.load(Ordering::Relaxed)
    }

    /// Looks up `key`. Returns whether it was a validated hit, and a
    /// reference to the slot that should be written to on this node's
    /// return (the matching entry on a hit, otherwise the least-valuable
    /// entry in the cluster).
    pub fn probe(&self, key: u64) -> (bool, &mut Entry) {
        let key16 = (key >> 48) as u16;
        let idx = self.cluster_index(key);
        let cluster = unsafe { &mut (*self.clusters.get())[idx] };

        for entry in cluster.entries.iter_mut() {
            if entry.key16 == 0 || entry.key16 == key16 {
                if entry.key16 == 0 {
                    entry.key16 = key16;
                    return (false, entry);
                }
                // re-validate: a torn concurrent write could have left key16
                // matching by coincidence after a partial update.
                if entry.key16 == key16 {
                    return (true, entry);
                }
            }
        }

        let generation = self.generation();
        let replace = cluster
            .entries
            .iter_mut()
            .min_by_key(|e| e.worth(generation))
            .expect("cluster is never empty");
        replace.key16 = key16;
        (false, replace)
    }

    pub fn prefetch(&self, key: u64) {
        let idx = self.cluster_index(key);
        let cluster = unsafe { &(*self.clusters.get())[idx] };
        let ptr = cluster as *const Cluster as *const i8;
        #[cfg(target_arch = "x86_64")]
        unsafe {
            std::arch::x86_64::_mm_prefetch(ptr, std::arch::x86_64::_MM_HINT_T0);
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            let _ = ptr;
        }
    }

    /// Approximate per-mille occupancy, sampled over the first 1000 clusters
    /// (matches the UCI `hashfull` reporting convention).
    pub fn hash_percent(&self) -> usize {
        let sample = self.cluster_count().min(1000);
        if sample == 0 {
            return 0;
        }
        let generation = self.generation();
        let clusters = unsafe { &*self.clusters.get() };
        let filled: usize = clusters[..sample]
            .iter()
            .flat_map(|c| c.entries.iter())
            .filter(|e| !e.is_empty() && e.generation() == generation)
            .count();
        filled * 1000 / (sample * CLUSTER_SIZE)
    }
}
