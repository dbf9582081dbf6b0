//! Result projection.
//!
//! The projector is a pure function from applied records back to the
//! caller-visible return value. Output order is restored by correlating
//! record identifiers against input position - identifier is the
//! correlation key, not index - so internal execution order never leaks
//! into the returned container.

use crate::codec::decode_record;
use crate::entity::EntityModel;
use crate::error::{CoreError, CoreResult};
use crate::marker::ReturnShape;
use reposit_store::{EntityId, Record};
use std::collections::HashMap;

/// Parameter shape of one repository call.
///
/// All container shapes are supported uniformly; the output container
/// shape always matches the input container shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<T> {
    /// One entity instance.
    Single(T),
    /// An ordered sequence of entity instances. Fixed-size arrays enter
    /// through this variant and are restored at the repository surface.
    Many(Vec<T>),
}

/// Shape tag of an [`Input`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Single-entity parameter.
    Single,
    /// Sequence or array parameter.
    Many,
}

impl<T> Input<T> {
    /// Returns the input's shape tag.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        match self {
            Self::Single(_) => Shape::Single,
            Self::Many(_) => Shape::Many,
        }
    }

    /// Returns the number of entities in the input.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(entities) => entities.len(),
        }
    }

    /// Returns `true` if the input holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unwraps the input into an ordered entity vector.
    #[must_use]
    pub fn into_entities(self) -> Vec<T> {
        match self {
            Self::Single(entity) => vec![entity],
            Self::Many(entities) => entities,
        }
    }
}

/// Caller-visible return value, shape-matching the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output<T> {
    /// Declared-unit method; outcomes were discarded.
    Unit,
    /// Single updated entity.
    Single(T),
    /// Ordered sequence of updated entities, one per input entity.
    Many(Vec<T>),
}

impl<T> Output<T> {
    /// Unwraps a single-entity output.
    #[must_use]
    pub fn into_single(self) -> Option<T> {
        match self {
            Self::Single(entity) => Some(entity),
            _ => None,
        }
    }

    /// Unwraps a sequence output.
    #[must_use]
    pub fn into_many(self) -> Option<Vec<T>> {
        match self {
            Self::Many(entities) => Some(entities),
            _ => None,
        }
    }
}

/// Builds the caller-visible return value from applied records.
///
/// `input_ids` is the identifier of each input entity, in input order;
/// `records` is the applied record per entity in whatever order the engine
/// produced them. Identifiers must be distinct within one bulk call.
///
/// # Errors
///
/// Returns [`CoreError::Projection`] if the record count differs from the
/// input count or a record cannot be correlated to an input identifier.
/// Both indicate an engine defect, not a recoverable condition.
pub fn project<T: EntityModel>(
    shape: Shape,
    returns: ReturnShape,
    input_ids: &[EntityId],
    records: Vec<Record>,
) -> CoreResult<Output<T>> {
    if records.len() != input_ids.len() {
        return Err(CoreError::projection(format!(
            "expected {} outcomes, got {}",
            input_ids.len(),
            records.len()
        )));
    }

    if returns == ReturnShape::Unit {
        return Ok(Output::Unit);
    }

    let mut by_id: HashMap<EntityId, Record> =
        records.into_iter().map(|record| (record.id, record)).collect();

    let mut entities = Vec::with_capacity(input_ids.len());
    for id in input_ids {
        let record = by_id
            .remove(id)
            .ok_or_else(|| CoreError::projection(format!("no outcome for identifier {id}")))?;
        entities.push(decode_record(&record)?);
    }

    match shape {
        Shape::Single => {
            let entity = entities
                .pop()
                .ok_or_else(|| CoreError::projection("single input produced no outcome"))?;
            Ok(Output::Single(entity))
        }
        Shape::Many => Ok(Output::Many(entities)),
    }
}
