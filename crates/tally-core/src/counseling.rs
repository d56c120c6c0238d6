//! Counseling session edits.
//!
//! Sessions allow any status to replace any other; there is no transition
//! table, but every status change is logged so manual overrides leave a
//! trail.

use uuid::Uuid;

use crate::{
  Entity, Error, Result,
  conduct::{CounselingSession, SessionUpdate},
  store::ConductStore,
};

/// Apply a session edit, logging status transitions.
pub async fn update_session<S: ConductStore>(
  store:      &S,
  session_id: Uuid,
  update:     SessionUpdate,
) -> Result<CounselingSession, S::Error> {
  let before = store
    .get_session(session_id)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::CounselingSession, id: session_id })?;

  let after = store
    .update_session(session_id, update)
    .await
    .map_err(Error::Store)?
    .ok_or(Error::NotFound { entity: Entity::CounselingSession, id: session_id })?;

  if before.status != after.status {
    tracing::info!(
      %session_id,
      from = ?before.status,
      to = ?after.status,
      "counseling session status changed"
    );
  }

  Ok(after)
}
