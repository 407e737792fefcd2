use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{LiveTokenStyle, RenameConfig};
use crate::consts::RENAME_LOG_PREFIX;
use crate::error::Result;
use crate::filter::Filter;
use crate::group::{ActiveFrames, GroupMetadata, GroupingMode, GroupsProvider};
use crate::rename::{Annotation, FilenameAnnotator, RenameReport, SkipReason};
use crate::state::StageStateStore;

use super::event::{Stage, StageEvent};

/// What handling an event did.
#[derive(Debug)]
pub enum StageEffect {
    Ignored,
    Renamed(RenameReport),
    Persisted { filter: Filter, frames: u32 },
    NotPersisted(SkipReason),
}

/// Dispatches host stage events to the rename passes.
#[derive(Clone, Debug)]
pub struct StageCoordinator {
    output_dir: PathBuf,
    config: RenameConfig,
}

impl StageCoordinator {
    pub fn new(output_dir: impl Into<PathBuf>, config: RenameConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            config,
        }
    }

    pub fn master_dir(&self) -> PathBuf {
        self.output_dir.join(&self.config.master_subdir)
    }

    pub fn state_store(&self) -> StageStateStore {
        StageStateStore::new(self.output_dir.join(&self.config.state_subdir))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Handle one event. Unrecognised stages and outcomes other than
    /// completion are ignored.
    pub fn handle(&self, event: &StageEvent<'_>, groups: &dyn GroupsProvider) -> Result<StageEffect> {
        let Some(stage) = event.completed_stage() else {
            debug!(stage = event.stage, outcome = ?event.outcome, "ignoring event");
            return Ok(StageEffect::Ignored);
        };

        match stage {
            Stage::AstrometricSolution => {
                info!("{RENAME_LOG_PREFIX} Solving done. Renaming files...");
                let report = self.rename_from_groups(event, groups)?;
                info!("{RENAME_LOG_PREFIX} Renaming complete.");
                Ok(StageEffect::Renamed(report))
            }
            Stage::Integration => self.persist_frame_count(event),
            Stage::Autocrop => {
                info!("{RENAME_LOG_PREFIX} Autocrop done. Renaming files...");
                let report = self.rename_from_state()?;
                info!("{RENAME_LOG_PREFIX} Renaming complete.");
                Ok(StageEffect::Renamed(report))
            }
        }
    }

    /// Live pass: annotate with frame count and exposure aggregated over the
    /// post-calibration groups. A per-group event limits the pass to that
    /// group's filter; if that filter cannot be resolved nothing is renamed.
    pub fn rename_from_groups(
        &self,
        event: &StageEvent<'_>,
        groups: &dyn GroupsProvider,
    ) -> Result<RenameReport> {
        let scope = match event.group {
            Some(group) => match GroupMetadata::extract(group).filter {
                Some(filter) => Some(filter),
                None => {
                    warn!(
                        "{RENAME_LOG_PREFIX} {}: {}",
                        SkipReason::NoFilterToken,
                        group.describe()
                    );
                    return Ok(RenameReport::default());
                }
            },
            None => None,
        };
        let totals = aggregate_groups(groups);
        let style = self.config.live.style;

        let annotator = self
            .annotator(&self.config.live.anchor)?
            .restrict_to(scope);
        annotator.annotate(|filter| {
            let (frames, total_seconds) = *totals.get(filter)?;
            let frames = match frames {
                ActiveFrames::Count(n) => n,
                ActiveFrames::Unknown => return None,
            };
            Some(match style {
                LiveTokenStyle::FramesAndTotal => Annotation::FramesAndTotal {
                    frames,
                    total_seconds,
                },
                LiveTokenStyle::TotalOnly => Annotation::Total {
                    frames,
                    total_seconds,
                },
            })
        })
    }

    /// Integration: remember the active frame count of the event's group.
    pub fn persist_frame_count(&self, event: &StageEvent<'_>) -> Result<StageEffect> {
        let Some(group) = event.group else {
            warn!("{RENAME_LOG_PREFIX} {}", SkipReason::NoGroup);
            return Ok(StageEffect::NotPersisted(SkipReason::NoGroup));
        };

        let meta = GroupMetadata::extract(group);
        match meta.annotatable() {
            Ok((filter, frames)) => {
                self.state_store().put(filter, frames)?;
                info!(%filter, frames, "{RENAME_LOG_PREFIX} stored stacked frame count");
                Ok(StageEffect::Persisted {
                    filter: filter.clone(),
                    frames,
                })
            }
            Err(reason) => {
                meta.report_unusable(group);
                Ok(StageEffect::NotPersisted(reason))
            }
        }
    }

    /// Deferred pass: annotate with the frame counts stored at integration.
    pub fn rename_from_state(&self) -> Result<RenameReport> {
        let store = self.state_store();
        self.annotator(&self.config.deferred.anchor)?
            .annotate(|filter| store.get(filter).map(|frames| Annotation::Stacked { frames }))
    }

    fn annotator(&self, anchor: &str) -> Result<FilenameAnnotator> {
        FilenameAnnotator::new(
            self.master_dir(),
            &self.config.candidate_pattern,
            &self.config.filter_pattern,
            anchor,
        )
    }
}

/// Sum active frames and exposure per filter. A group with an unknown frame
/// count makes its filter's count unknown.
fn aggregate_groups(groups: &dyn GroupsProvider) -> HashMap<Filter, (ActiveFrames, f64)> {
    let mut totals: HashMap<Filter, (ActiveFrames, f64)> = HashMap::new();

    for group in groups.groups_for_mode(GroupingMode::Post) {
        let meta = GroupMetadata::extract(group);
        meta.report_unusable(group);
        let Some(filter) = meta.filter else {
            continue;
        };

        let entry = totals
            .entry(filter)
            .or_insert((ActiveFrames::Count(0), 0.0));
        entry.0 = match (entry.0, meta.active_frames) {
            (ActiveFrames::Count(a), ActiveFrames::Count(b)) => {
                ActiveFrames::Count(a.saturating_add(b))
            }
            _ => ActiveFrames::Unknown,
        };
        entry.1 += meta.total_exposure_seconds.max(0.0);
    }

    totals
}
