//! Caller-supplied predicate capabilities.
//!
//! Predicates must be total, pure, and fast: the scene predicate runs once
//! per scene at dataset construction, the trajectory predicate once per
//! request at iteration time. A predicate that cannot evaluate its input
//! returns an error (conventionally [`crate::MotionsetError::Predicate`]),
//! which aborts iteration. Plain `bool` closures are adapted via blanket
//! impls.

use std::collections::BTreeSet;

use crate::{
    foundation::error::MotionsetResult,
    scene::tags::{SceneTags, TrajectoryTag},
};

/// Scene-level inclusion predicate, evaluated against a scene's tag record.
pub trait SceneTagsFilter {
    /// Decide whether a scene with these tags is part of the dataset.
    fn accept(&self, tags: &SceneTags) -> MotionsetResult<bool>;
}

/// Request-level inclusion predicate, evaluated against a request's
/// trajectory tags.
pub trait TrajectoryTagsFilter {
    /// Decide whether a request with these trajectory tags yields an
    /// example.
    fn accept(&self, tags: &BTreeSet<TrajectoryTag>) -> MotionsetResult<bool>;
}

#[derive(Clone, Copy, Debug, Default)]
/// The trivial predicate; accepts everything. Default for both filter
/// slots.
pub struct AcceptAll;

impl SceneTagsFilter for AcceptAll {
    fn accept(&self, _tags: &SceneTags) -> MotionsetResult<bool> {
        Ok(true)
    }
}

impl TrajectoryTagsFilter for AcceptAll {
    fn accept(&self, _tags: &BTreeSet<TrajectoryTag>) -> MotionsetResult<bool> {
        Ok(true)
    }
}

impl<F> SceneTagsFilter for F
where
    F: Fn(&SceneTags) -> bool,
{
    fn accept(&self, tags: &SceneTags) -> MotionsetResult<bool> {
        Ok(self(tags))
    }
}

impl<F> TrajectoryTagsFilter for F
where
    F: Fn(&BTreeSet<TrajectoryTag>) -> bool,
{
    fn accept(&self, tags: &BTreeSet<TrajectoryTag>) -> MotionsetResult<bool> {
        Ok(self(tags))
    }
}
