//! CBOR entity codec.
//!
//! Entities are stored as opaque CBOR payloads. The record's version field
//! is authoritative: decoding stamps it onto the entity, so a payload that
//! carries a stale serialized version is corrected on the way out.

use crate::entity::EntityModel;
use crate::error::{CoreError, CoreResult};
use reposit_store::Record;

/// Encodes an entity into an opaque payload.
///
/// # Errors
///
/// Returns [`CoreError::Codec`] if serialization fails.
pub fn encode_entity<T: EntityModel>(entity: &T) -> CoreResult<Vec<u8>> {
    let mut payload = Vec::new();
    ciborium::into_writer(entity, &mut payload).map_err(|e| CoreError::codec(e.to_string()))?;
    Ok(payload)
}

/// Decodes a record back into an entity, stamping the record's version.
///
/// # Errors
///
/// Returns [`CoreError::Codec`] if deserialization fails.
pub fn decode_record<T: EntityModel>(record: &Record) -> CoreResult<T> {
    let mut entity: T =
        ciborium::from_reader(record.payload.as_slice()).map_err(|e| CoreError::codec(e.to_string()))?;
    entity.set_version(record.version);
    Ok(entity)
}
