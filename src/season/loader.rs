//! Season loading and validation.
//!
//! A season that loads is safe to plan against: every track is present once,
//! ladders match their declared max rank, steps are contiguous, all crest
//! currency ids are known and the bonus id table agrees with the tracks.

use super::types::{Season, TrackKey};
use crate::crests::Crest;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BUILTIN_SEASON: &str = include_str!("data/tww_s3.json");

#[derive(Debug, Error)]
pub enum SeasonError {
    #[error("failed to parse season config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read season config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("season is missing the currency id for {crest} crests")]
    MissingCurrency { crest: Crest },
    #[error("track {track} is defined more than once")]
    DuplicateTrack { track: TrackKey },
    #[error("track {track} is missing")]
    MissingTrack { track: TrackKey },
    #[error("track {track} has max rank 0")]
    ZeroMaxRank { track: TrackKey },
    #[error("track {track} declares max rank {max_rank} but lists {entries} item levels")]
    RankTableLength {
        track: TrackKey,
        max_rank: u8,
        entries: usize,
    },
    #[error("track {track} item level at rank {rank} does not increase")]
    NonIncreasingLadder { track: TrackKey, rank: u8 },
    #[error("track {track} has {found} steps, expected {expected}")]
    StepCount {
        track: TrackKey,
        expected: usize,
        found: usize,
    },
    #[error("track {track} step {index} goes {from}->{to}, expected it to leave rank {expected}")]
    StepOrder {
        track: TrackKey,
        index: usize,
        from: u8,
        to: u8,
        expected: u8,
    },
    #[error("bonus id {bonus_id}: {reason}")]
    BonusId { bonus_id: u32, reason: String },
    #[error("hero breakpoint rank {rank} is outside 1..={max_rank}")]
    Breakpoint { rank: u8, max_rank: u8 },
}

impl Season {
    /// The season embedded in the binary.
    pub fn builtin() -> Result<Self, SeasonError> {
        Self::from_json_str(BUILTIN_SEASON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SeasonError> {
        let mut season: Season = serde_json::from_str(json)?;
        season.validate()?;
        season.fingerprint = compute_fingerprint(&season)?;
        log::debug!(
            "loaded season {} ({} tracks, {} bonus ids)",
            season.id,
            season.tracks.len(),
            season.bonus_ids.len()
        );
        Ok(season)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeasonError> {
        let contents = fs::read_to_string(path).map_err(|source| SeasonError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&mut self) -> Result<(), SeasonError> {
        for crest in Crest::all() {
            let id = self
                .currencies
                .crest(crest)
                .ok_or(SeasonError::MissingCurrency { crest })?;
            self.crest_ids[crest.index()] = id;
        }

        let mut seen = HashSet::new();
        for track in &self.tracks {
            if !seen.insert(track.key) {
                return Err(SeasonError::DuplicateTrack { track: track.key });
            }
        }
        if let Some(&track) = TrackKey::all().iter().find(|key| !seen.contains(*key)) {
            return Err(SeasonError::MissingTrack { track });
        }
        self.tracks.sort_by_key(|track| track.key);

        for track in &self.tracks {
            if track.max_rank == 0 {
                return Err(SeasonError::ZeroMaxRank { track: track.key });
            }
            if track.ilvl_by_rank.len() != track.max_rank as usize {
                return Err(SeasonError::RankTableLength {
                    track: track.key,
                    max_rank: track.max_rank,
                    entries: track.ilvl_by_rank.len(),
                });
            }
            for (idx, pair) in track.ilvl_by_rank.windows(2).enumerate() {
                if pair[1] <= pair[0] {
                    return Err(SeasonError::NonIncreasingLadder {
                        track: track.key,
                        rank: idx as u8 + 2,
                    });
                }
            }
            let expected = track.max_rank as usize - 1;
            if track.steps.len() != expected {
                return Err(SeasonError::StepCount {
                    track: track.key,
                    expected,
                    found: track.steps.len(),
                });
            }
            for (index, step) in track.steps.iter().enumerate() {
                let from = index as u8 + 1;
                if step.from != from || step.to != from + 1 {
                    return Err(SeasonError::StepOrder {
                        track: track.key,
                        index,
                        from: step.from,
                        to: step.to,
                        expected: from,
                    });
                }
            }
        }

        let mut bonus_seen = HashSet::new();
        for entry in &self.bonus_ids {
            if !bonus_seen.insert(entry.bonus_id) {
                return Err(SeasonError::BonusId {
                    bonus_id: entry.bonus_id,
                    reason: "listed more than once".to_string(),
                });
            }
            if entry.rank == 0 || entry.rank > entry.max_rank {
                return Err(SeasonError::BonusId {
                    bonus_id: entry.bonus_id,
                    reason: format!("rank {} outside 1..={}", entry.rank, entry.max_rank),
                });
            }
            // Groups without a track mapping fall through to ilvl inference.
            if let Some(key) = self.track_for_group(entry.group) {
                let max_rank = self.track(key).max_rank;
                if entry.max_rank != max_rank {
                    return Err(SeasonError::BonusId {
                        bonus_id: entry.bonus_id,
                        reason: format!(
                            "max rank {} disagrees with {} max rank {}",
                            entry.max_rank, key, max_rank
                        ),
                    });
                }
            }
        }

        let hero_max = self.track(TrackKey::Hero).max_rank;
        let breakpoint = self.hero_policy.breakpoint_rank;
        if breakpoint == 0 || breakpoint > hero_max {
            return Err(SeasonError::Breakpoint {
                rank: breakpoint,
                max_rank: hero_max,
            });
        }

        Ok(())
    }
}

fn compute_fingerprint(season: &Season) -> Result<String, SeasonError> {
    let canonical = serde_json::to_vec(season)?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(format!("{:x}", hasher.finalize()))
}
