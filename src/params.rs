//! Decomposition parameters and statistics (§6, ambient configuration/metrics).

use crate::error::{Error, Result};
use std::ops::AddAssign;
use std::time::Duration;

/// `decomposeStrategy`: exactly one of `{DISTRIBUTED_PIVOT, DISTRIBUTED_DELTASUM}`
/// and exactly one of `{CONCENTRATED_PIVOT, CONCENTRATED_THREESUM}` must be set.
///
/// A plain `u8` bitset, in the style of `examples/original_source/include/cmr/seymour.h`'s
/// `CMR_SEYMOUR_NODE_TYPE`/`THREESUM` flag constants, rather than a hand-rolled
/// newtype wrapping a crate macro this small a use doesn't warrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecomposeStrategy(pub u8);

impl DecomposeStrategy {
    pub const DISTRIBUTED_PIVOT: Self = Self(0b0001);
    pub const DISTRIBUTED_DELTASUM: Self = Self(0b0010);
    pub const CONCENTRATED_PIVOT: Self = Self(0b0100);
    pub const CONCENTRATED_THREESUM: Self = Self(0b1000);

    const DISTRIBUTED_MASK: u8 = Self::DISTRIBUTED_PIVOT.0 | Self::DISTRIBUTED_DELTASUM.0;
    const CONCENTRATED_MASK: u8 = Self::CONCENTRATED_PIVOT.0 | Self::CONCENTRATED_THREESUM.0;

    fn validate(self) -> Result<()> {
        if (self.0 & Self::DISTRIBUTED_MASK).count_ones() != 1 {
            return Err(Error::InvalidParameters(
                "exactly one of DISTRIBUTED_PIVOT/DISTRIBUTED_DELTASUM must be set".into(),
            ));
        }
        if (self.0 & Self::CONCENTRATED_MASK).count_ones() != 1 {
            return Err(Error::InvalidParameters(
                "exactly one of CONCENTRATED_PIVOT/CONCENTRATED_THREESUM must be set".into(),
            ));
        }
        Ok(())
    }
}

impl std::ops::BitOr for DecomposeStrategy {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Defaults grounded in `examples/original_source/src/cmr/seymour.c:23-30`:
/// series-parallel and direct-graphicness on by default, planarity
/// re-checking and full-graph construction off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecompositionParameters {
    pub stop_when_irregular: bool,
    pub stop_when_nongraphic: bool,
    pub stop_when_noncographic: bool,
    pub stop_when_neither_graphic_nor_cographic: bool,
    pub series_parallel: bool,
    pub planarity_check: bool,
    pub direct_graphicness: bool,
    pub prefer_graphicness: bool,
    pub construct_leaf_graphs: bool,
    pub construct_all_graphs: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub decompose_strategy: DecomposeStrategy,
    pub deadline: Option<Duration>,
}

impl Default for DecompositionParameters {
    fn default() -> Self {
        Self {
            stop_when_irregular: false,
            stop_when_nongraphic: false,
            stop_when_noncographic: false,
            stop_when_neither_graphic_nor_cographic: false,
            series_parallel: true,
            planarity_check: false,
            direct_graphicness: true,
            prefer_graphicness: true,
            construct_leaf_graphs: false,
            construct_all_graphs: false,
            decompose_strategy: DecomposeStrategy::DISTRIBUTED_PIVOT
                | DecomposeStrategy::CONCENTRATED_PIVOT,
            deadline: None,
        }
    }
}

impl DecompositionParameters {
    pub fn validate(&self) -> Result<()> {
        self.decompose_strategy.validate()
    }
}

/// Totals and timings per stage and per sub-algorithm (§6).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statistics {
    pub one_sum_calls: u64,
    pub series_parallel_calls: u64,
    pub graphicness_calls: u64,
    pub network_calls: u64,
    pub extension_calls: u64,
    pub graphic_test_calls: u64,
    pub enumeration_calls: u64,
    pub enumeration_candidates: u64,
    pub total_time: Duration,
}

impl AddAssign for Statistics {
    fn add_assign(&mut self, rhs: Self) {
        self.one_sum_calls += rhs.one_sum_calls;
        self.series_parallel_calls += rhs.series_parallel_calls;
        self.graphicness_calls += rhs.graphicness_calls;
        self.network_calls += rhs.network_calls;
        self.extension_calls += rhs.extension_calls;
        self.graphic_test_calls += rhs.graphic_test_calls;
        self.enumeration_calls += rhs.enumeration_calls;
        self.enumeration_candidates += rhs.enumeration_candidates;
        self.total_time += rhs.total_time;
    }
}
