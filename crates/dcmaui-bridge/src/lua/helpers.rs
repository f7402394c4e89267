use crate::bridge::SharedBridge;
use crate::error::BridgeError;
use crate::props::{decode_id_list, decode_props, DecodeError, PropValue, PropertySet};
use crate::stub::CollectingSink;
use mlua::{Lua, LuaSerdeExt, Result, Value};

/// Get the bridge from Lua app_data
pub fn get_bridge(lua: &Lua) -> Result<SharedBridge> {
    lua.app_data_ref::<SharedBridge>()
        .ok_or_else(|| mlua::Error::RuntimeError("DCMAUI bridge not registered".into()))
        .map(|b| b.clone())
}

/// Get the buffer that collects events for `poll_events`
pub fn get_event_buffer(lua: &Lua) -> Result<CollectingSink> {
    lua.app_data_ref::<CollectingSink>()
        .ok_or_else(|| mlua::Error::RuntimeError("DCMAUI event buffer not registered".into()))
        .map(|s| s.clone())
}

/// Props may be given as a table, a JSON string or nil (empty).
pub fn props_arg(lua: &Lua, value: Value) -> std::result::Result<PropertySet, BridgeError> {
    match value {
        Value::Nil => Ok(PropertySet::new()),
        Value::String(s) => Ok(decode_props(&s.to_string_lossy())?),
        Value::Table(_) => match lua.from_value::<PropValue>(value) {
            Ok(PropValue::Map(map)) => Ok(map),
            Ok(other) => Err(DecodeError::Shape {
                expected: "a table of properties",
                found: other.type_name(),
            }
            .into()),
            Err(err) => Err(DecodeError::Script(err.to_string()).into()),
        },
        other => Err(DecodeError::Shape {
            expected: "a table or JSON string",
            found: other.type_name(),
        }
        .into()),
    }
}

/// Id and event type lists may be given as a sequence table or a JSON array.
pub fn id_list_arg(value: Value) -> std::result::Result<Vec<String>, BridgeError> {
    match value {
        Value::Nil => Ok(Vec::new()),
        Value::String(s) => Ok(decode_id_list(&s.to_string_lossy())?),
        Value::Table(table) => table
            .sequence_values::<String>()
            .collect::<Result<Vec<_>>>()
            .map_err(|err| DecodeError::Script(err.to_string()).into()),
        other => Err(DecodeError::Shape {
            expected: "a table or JSON string",
            found: other.type_name(),
        }
        .into()),
    }
}

/// Lua-style result: `true` or `false, "CODE: message"`.
pub fn report(result: std::result::Result<(), BridgeError>) -> (bool, Option<String>) {
    match result {
        Ok(()) => (true, None),
        Err(err) => (false, Some(format!("{}: {}", err.code(), err))),
    }
}
