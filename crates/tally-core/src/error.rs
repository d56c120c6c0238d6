//! Error types for `tally-core`.
//!
//! Core operations are generic over the storage backend, so the error type
//! carries the backend's own error in its `Store` variant.

use thiserror::Error;
use uuid::Uuid;

/// The entity kinds an [`Error::NotFound`] can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
  Staff,
  Student,
  CounselingSession,
}

impl std::fmt::Display for Entity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Staff => write!(f, "staff user"),
      Self::Student => write!(f, "student"),
      Self::CounselingSession => write!(f, "counseling session"),
    }
  }
}

#[derive(Debug, Error)]
pub enum Error<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: Uuid },

  #[error("staff user {0} is inactive")]
  InactiveAuthor(Uuid),

  #[error("violation points must be at least 1, got {0}")]
  InvalidPoints(i64),

  /// The invariant check found a cached point total that disagrees with the
  /// summed violation records. Never auto-corrected; see
  /// [`crate::ledger::reconcile_point_total`].
  #[error(
    "student {student_id}: cached point total {cached} disagrees with ledger sum {computed}"
  )]
  PointTotalDrift {
    student_id: Uuid,
    cached:     i64,
    computed:   i64,
  },

  #[error("no students in class {0:?}")]
  EmptyClass(String),

  #[error("store error: {0}")]
  Store(#[source] E),
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
