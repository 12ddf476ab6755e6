//! Built-in codec functions registered by default.

use bytes::Bytes;
use derive_more::{Display, Error};
use serde::de::IntoDeserializer;

use crate::registry::{CodecError, DecodeSink};

/// JSON deserialization failure with the path of the offending field.
#[derive(Debug, Display, Error)]
#[display("at '{path}': {source}")]
struct JsonPathError {
    path: String,
    source: erased_serde::Error,
}

/// A `text/plain` body was asked to encode something that is not a scalar.
#[derive(Debug, Display, Error)]
#[display("text/plain body must be a string, number or boolean, got {kind}")]
struct NotText {
    kind: &'static str,
}

pub(crate) fn json_encode(value: &dyn erased_serde::Serialize) -> Result<Bytes, CodecError> {
    Ok(serde_json::to_vec(&value)?.into())
}

/// Decode JSON, tracking the path so failures name the field at fault.
pub(crate) fn json_decode(data: &[u8], sink: &mut DecodeSink<'_>) -> Result<(), CodecError> {
    let mut de = serde_json::Deserializer::from_slice(data);
    let mut track = serde_path_to_error::Track::new();

    let result = {
        let tracked = serde_path_to_error::Deserializer::new(&mut de, &mut track);
        let mut erased = <dyn erased_serde::Deserializer>::erase(tracked);
        sink(&mut erased)
    };
    result.map_err(|source| JsonPathError {
        path: track.path().to_string(),
        source,
    })?;

    // Reject trailing garbage after the document.
    de.end()?;
    Ok(())
}

pub(crate) fn xml_encode(value: &dyn erased_serde::Serialize) -> Result<Bytes, CodecError> {
    Ok(quick_xml::se::to_string(&value)?.into())
}

pub(crate) fn xml_decode(data: &[u8], sink: &mut DecodeSink<'_>) -> Result<(), CodecError> {
    let text = std::str::from_utf8(data)?;
    let mut de = quick_xml::de::Deserializer::from_str(text);
    let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
    sink(&mut erased)?;
    Ok(())
}

pub(crate) fn text_encode(value: &dyn erased_serde::Serialize) -> Result<Bytes, CodecError> {
    let text = match serde_json::to_value(&value)? {
        serde_json::Value::String(text) => text,
        serde_json::Value::Number(number) => number.to_string(),
        serde_json::Value::Bool(flag) => flag.to_string(),
        serde_json::Value::Null => return Err(NotText { kind: "null" }.into()),
        serde_json::Value::Array(_) => return Err(NotText { kind: "an array" }.into()),
        serde_json::Value::Object(_) => return Err(NotText { kind: "an object" }.into()),
    };
    Ok(text.into())
}

/// Decode plain text into types that deserialize from a string, such as
/// unit-variant enums or string newtypes.
pub(crate) fn text_decode(data: &[u8], sink: &mut DecodeSink<'_>) -> Result<(), CodecError> {
    let text = std::str::from_utf8(data)?;
    let de: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
        text.into_deserializer();
    let mut erased = <dyn erased_serde::Deserializer>::erase(de);
    sink(&mut erased)?;
    Ok(())
}

pub(crate) fn form_encode(value: &dyn erased_serde::Serialize) -> Result<Bytes, CodecError> {
    Ok(serde_html_form::to_string(&value)?.into())
}
