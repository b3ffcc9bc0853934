use borsh::{BorshDeserialize, BorshSerialize};
use std::convert::TryFrom;
use std::ops::{Deref, DerefMut};

use crate::{BackstopError, RewardSums};

/// Sparse `(epoch, scale) -> (S, G)` map.
///
/// Only the latest epoch and, inside it, the latest scale ever grow:
/// ```text
/// [
///   [sum_e0_s0, sum_e0_s1, ...],   <- epoch 0, frozen once epoch 1 starts
///   [sum_e1_s0],                   <- epoch 1
/// ]
/// ```
/// so a vector of vectors is enough. Missing entries read as zero.
#[derive(PartialEq, Eq, Debug, Clone, BorshSerialize, BorshDeserialize)]
pub struct EpochToScaleToSum {
    pub hmap: Vec<Vec<RewardSums>>,
}

impl Default for EpochToScaleToSum {
    fn default() -> Self {
        EpochToScaleToSum {
            hmap: vec![vec![RewardSums::default()]],
        }
    }
}

impl EpochToScaleToSum {
    pub fn get_sum(&self, epoch: u64, scale: u64) -> Option<RewardSums> {
        let e = usize::try_from(epoch).ok()?;
        let s = usize::try_from(scale).ok()?;
        self.hmap.get(e).and_then(|scales| scales.get(s)).copied()
    }

    pub fn sum_or_zero(&self, epoch: u64, scale: u64) -> RewardSums {
        self.get_sum(epoch, scale).unwrap_or_default()
    }

    pub fn set_sum(
        &mut self,
        epoch: u64,
        scale: u64,
        sum: RewardSums,
    ) -> Result<(), BackstopError> {
        let epoch =
            usize::try_from(epoch).map_err(|_| BackstopError::InvalidEpochScaleTransition)?;
        let scale =
            usize::try_from(scale).map_err(|_| BackstopError::InvalidEpochScaleTransition)?;
        let num_epochs = self.hmap.len();
        match epoch {
            e if e + 1 == num_epochs => {
                // same current epoch
                let num_scales = self.hmap[e].len();
                match scale {
                    s if s + 1 == num_scales => {
                        self.hmap[e][s] = sum;
                    }
                    s if s == num_scales => {
                        self.hmap[e].push(sum);
                    }
                    _ => {
                        return Err(BackstopError::InvalidEpochScaleTransition);
                    }
                }
            }
            e if e == num_epochs => {
                // new epoch
                if scale != 0 {
                    return Err(BackstopError::InvalidEpochScaleTransition);
                }
                self.hmap.push(vec![sum]);
            }
            _ => {
                // past epochs are frozen
                return Err(BackstopError::InvalidEpochScaleTransition);
            }
        };

        Ok(())
    }

    pub fn num_epochs(&self) -> usize {
        self.hmap.len()
    }

    pub fn checkpoint(&self) -> SumsCheckpoint {
        let latest_epoch = self.hmap.last();
        SumsCheckpoint {
            num_epochs: self.hmap.len(),
            num_scales: latest_epoch.map_or(0, Vec::len),
            latest: latest_epoch.and_then(|scales| scales.last()).copied(),
        }
    }

    /// Undo every `set_sum` since `checkpoint`. `set_sum` only overwrites
    /// the latest bucket and appends after it, so this touches O(1) entries.
    pub fn rollback(&mut self, checkpoint: SumsCheckpoint) {
        self.hmap.truncate(checkpoint.num_epochs);
        if let Some(scales) = self.hmap.last_mut() {
            scales.truncate(checkpoint.num_scales);
            if let (Some(bucket), Some(latest)) = (scales.last_mut(), checkpoint.latest) {
                *bucket = latest;
            }
        }
    }

    #[cfg(test)]
    pub fn from(v: Vec<Vec<RewardSums>>) -> Self {
        EpochToScaleToSum { hmap: v }
    }
}

/// Shape of the map and value of the only bucket `set_sum` may overwrite
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct SumsCheckpoint {
    num_epochs: usize,
    num_scales: usize,
    latest: Option<RewardSums>,
}

/// Sum map writes made during one operation.
///
/// Rolled back on drop unless `commit` was called, so an operation that
/// bails out with `?` leaves the map as it found it.
pub struct StagedSums<'a> {
    sums: &'a mut EpochToScaleToSum,
    checkpoint: SumsCheckpoint,
    committed: bool,
}

impl<'a> StagedSums<'a> {
    pub fn new(sums: &'a mut EpochToScaleToSum) -> Self {
        let checkpoint = sums.checkpoint();
        StagedSums {
            sums,
            checkpoint,
            committed: false,
        }
    }

    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for StagedSums<'_> {
    type Target = EpochToScaleToSum;

    fn deref(&self) -> &EpochToScaleToSum {
        self.sums
    }
}

impl DerefMut for StagedSums<'_> {
    fn deref_mut(&mut self) -> &mut EpochToScaleToSum {
        self.sums
    }
}

impl Drop for StagedSums<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.sums.rollback(self.checkpoint);
        }
    }
}
