//! Edit operations on the clip list.
//!
//! Every mutation of a [`Project`]'s clips is an `EditCommand`. Applying a
//! command reports whether it changed anything; a command that targets a
//! clip that no longer exists is a silent no-op.

use tracing::{debug, warn};

use crate::clip::{Clip, ClipId, ClipPatch};
use crate::project::Project;

/// A mutation of the clip list.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// Append a clip. Rejected unless its track exists with a matching kind
    /// and its duration is positive.
    AddClip(Clip),
    /// Merge a partial update into an existing clip.
    UpdateClip { id: ClipId, patch: ClipPatch },
    /// Remove a clip.
    DeleteClip { id: ClipId },
    /// Discard every clip and install a new list.
    ReplaceClips(Vec<Clip>),
}

impl EditCommand {
    /// Apply this command to a project. Returns whether the clip list changed.
    pub fn apply(self, project: &mut Project) -> bool {
        let changed = match self {
            Self::AddClip(clip) => {
                let track_ok = project
                    .track(clip.track_id)
                    .is_some_and(|track| track.kind == clip.kind);
                if !track_ok {
                    warn!(clip = %clip.id, kind = ?clip.kind, "clip does not match any track");
                    false
                } else if !(clip.duration.is_finite() && clip.duration > 0.0) {
                    warn!(
                        clip = %clip.id,
                        duration = clip.duration,
                        "clip duration must be positive"
                    );
                    false
                } else {
                    debug!(clip = %clip.id, name = %clip.name, start = clip.start_time, "add clip");
                    project.clips_mut().push(clip);
                    true
                }
            }
            Self::UpdateClip { id, patch } => {
                let Some(index) = project.clips().iter().position(|c| c.id == id) else {
                    debug!(clip = %id, "update of unknown clip ignored");
                    return false;
                };
                // Dry run first so an unchanged clip does not copy a shared list.
                let mut candidate = project.clips()[index].clone();
                if patch.apply_to(&mut candidate) {
                    project.clips_mut()[index] = candidate;
                    true
                } else {
                    false
                }
            }
            Self::DeleteClip { id } => {
                let Some(index) = project.clips().iter().position(|c| c.id == id) else {
                    debug!(clip = %id, "delete of unknown clip ignored");
                    return false;
                };
                project.clips_mut().remove(index);
                debug!(clip = %id, "delete clip");
                true
            }
            Self::ReplaceClips(clips) => {
                debug!(count = clips.len(), "replace clip list");
                project.replace_clips(clips);
                true
            }
        };

        if changed {
            project.bump_revision();
        }
        changed
    }
}
