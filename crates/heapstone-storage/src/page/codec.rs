//! Field encoding within a slot.

use std::sync::Arc;

use bytes::{Buf, BufMut};

use heapstone_common::constants::TEXT_FIELD_LEN;
use heapstone_common::{FieldType, HeapPageId, HeapstoneError, HeapstoneResult, Row, Schema, Value};

/// Decodes one slot's bytes into a row of `schema`.
pub(crate) fn decode_row(
    mut slot: &[u8],
    schema: &Arc<Schema>,
    page_id: HeapPageId,
) -> HeapstoneResult<Row> {
    let mut row = Row::new(Arc::clone(schema));
    for (index, field) in schema.fields().iter().enumerate() {
        let value = decode_value(&mut slot, field.field_type, page_id)?;
        row.set(index, value)?;
    }
    Ok(row)
}

fn decode_value(
    buf: &mut &[u8],
    field_type: FieldType,
    page_id: HeapPageId,
) -> HeapstoneResult<Value> {
    if buf.remaining() < field_type.encoded_size() {
        return Err(HeapstoneError::corruption(page_id, "slot ends inside a field"));
    }
    match field_type {
        FieldType::Int => Ok(Value::Int(buf.get_i32())),
        FieldType::Text => {
            let len = buf.get_i32();
            let payload = &buf[..TEXT_FIELD_LEN];
            let len = usize::try_from(len)
                .ok()
                .filter(|&len| len <= TEXT_FIELD_LEN)
                .ok_or_else(|| {
                    HeapstoneError::corruption(page_id, format!("invalid text length {len}"))
                })?;
            let text = std::str::from_utf8(&payload[..len])
                .map_err(|e| HeapstoneError::corruption(page_id, format!("invalid UTF-8: {e}")))?
                .to_string();
            buf.advance(TEXT_FIELD_LEN);
            Ok(Value::Text(text))
        }
    }
}

/// Encodes every field of `row` in `schema` order.
///
/// Fails if a field is unset or holds a value of the wrong type.
pub(crate) fn encode_row<B: BufMut>(
    row: &Row,
    schema: &Schema,
    out: &mut B,
) -> HeapstoneResult<()> {
    if row.num_fields() != schema.num_fields() {
        return Err(HeapstoneError::invalid_argument(format!(
            "row has {} fields but schema has {}",
            row.num_fields(),
            schema.num_fields()
        )));
    }
    for (index, field) in schema.fields().iter().enumerate() {
        let value = row.get(index)?.ok_or_else(|| {
            HeapstoneError::invalid_argument(format!("field {index} ({}) is unset", field.name))
        })?;
        encode_value(value, field.field_type, out)?;
    }
    Ok(())
}

fn encode_value<B: BufMut>(
    value: &Value,
    field_type: FieldType,
    out: &mut B,
) -> HeapstoneResult<()> {
    match (value, field_type) {
        (Value::Int(v), FieldType::Int) => out.put_i32(*v),
        (Value::Text(s), FieldType::Text) => {
            let bytes = truncate_to_boundary(s, TEXT_FIELD_LEN).as_bytes();
            out.put_i32(bytes.len() as i32);
            out.put_slice(bytes);
            out.put_bytes(0, TEXT_FIELD_LEN - bytes.len());
        }
        (value, expected) => {
            return Err(HeapstoneError::TypeMismatch {
                expected,
                actual: value.field_type(),
            })
        }
    }
    Ok(())
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char
/// boundary.
fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
