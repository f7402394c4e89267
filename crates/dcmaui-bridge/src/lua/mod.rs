pub mod helpers;

use crate::bridge::SharedBridge;
use crate::stub::CollectingSink;
use helpers::{get_bridge, get_event_buffer, id_list_arg, props_arg, report};
use mlua::{Lua, LuaSerdeExt, Result, Table, Value};

/// Build the `dcmaui` module table for a Lua state.
///
/// The bridge is stored in the state's app_data, and its event sink is
/// replaced by a buffer that scripts drain with `poll_events()`. Commands
/// return `true` or `false, "CODE: message"`; they never raise.
pub fn register_bridge_module(lua: &Lua, bridge: SharedBridge) -> Result<Table> {
    let buffer = CollectingSink::new();
    bridge.lock().set_event_sink(buffer.as_sink());
    lua.set_app_data(bridge);
    lua.set_app_data(buffer);

    let module = lua.create_table()?;

    // dcmaui.initialize()
    module.set(
        "initialize",
        lua.create_function(|lua, ()| {
            get_bridge(lua)?.lock().initialize();
            Ok(true)
        })?,
    )?;

    // dcmaui.create_view(id, kind, props)
    module.set(
        "create_view",
        lua.create_function(|lua, (id, kind, props): (String, String, Value)| {
            let bridge = get_bridge(lua)?;
            let result = props_arg(lua, props)
                .and_then(|props| bridge.lock().create_view_with_props(&id, &kind, &props));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.update_view(id, props)
    module.set(
        "update_view",
        lua.create_function(|lua, (id, props): (String, Value)| {
            let bridge = get_bridge(lua)?;
            if let Err(err) = bridge.lock().ensure_view(&id) {
                return Ok(report(Err(err)));
            }
            let result = props_arg(lua, props)
                .and_then(|props| bridge.lock().update_view_with_props(&id, &props));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.delete_view(id)
    module.set(
        "delete_view",
        lua.create_function(|lua, id: String| {
            Ok(report(get_bridge(lua)?.lock().destroy_view(&id)))
        })?,
    )?;

    // dcmaui.attach_view(child, parent, index?) - 1-based index, nil appends,
    // anything below 1 inserts at the front
    module.set(
        "attach_view",
        lua.create_function(
            |lua, (child, parent, index): (String, String, Option<i64>)| {
                let index = match index {
                    Some(i) => usize::try_from(i.saturating_sub(1)).unwrap_or(0),
                    None => usize::MAX,
                };
                Ok(report(
                    get_bridge(lua)?.lock().attach_view(&child, &parent, index),
                ))
            },
        )?,
    )?;

    // dcmaui.set_children(parent, ids)
    module.set(
        "set_children",
        lua.create_function(|lua, (parent, ids): (String, Value)| {
            let bridge = get_bridge(lua)?;
            let result =
                id_list_arg(ids).and_then(|ids| bridge.lock().set_children_ids(&parent, &ids));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.add_event_listeners(id, types)
    module.set(
        "add_event_listeners",
        lua.create_function(|lua, (id, types): (String, Value)| {
            let bridge = get_bridge(lua)?;
            let result =
                id_list_arg(types).and_then(|types| bridge.lock().add_event_listeners(&id, &types));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.remove_event_listeners(id, types)
    module.set(
        "remove_event_listeners",
        lua.create_function(|lua, (id, types): (String, Value)| {
            let bridge = get_bridge(lua)?;
            let result = id_list_arg(types)
                .and_then(|types| bridge.lock().remove_event_listeners(&id, &types));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.simulate_event(id, name, data?)
    module.set(
        "simulate_event",
        lua.create_function(|lua, (id, name, data): (String, String, Value)| {
            let bridge = get_bridge(lua)?;
            let result = props_arg(lua, data)
                .and_then(|data| bridge.lock().simulate_event_with_data(&id, &name, data));
            Ok(report(result))
        })?,
    )?;

    // dcmaui.dispatch_events() -> count
    module.set(
        "dispatch_events",
        lua.create_function(|lua, ()| {
            let emitter = get_bridge(lua)?.lock().emitter();
            Ok(emitter.dispatch_pending())
        })?,
    )?;

    // dcmaui.poll_events() -> { {viewId=, eventType=, data=}, ... }
    module.set(
        "poll_events",
        lua.create_function(|lua, ()| {
            let events = get_event_buffer(lua)?.take_events();
            lua.to_value(&events)
        })?,
    )?;

    // dcmaui.view_info(id) -> table | nil, err
    module.set(
        "view_info",
        lua.create_function(|lua, id: String| {
            let info = get_bridge(lua)?.lock().view_info(&id);
            match info {
                Ok(info) => Ok((lua.to_value(&info)?, None)),
                Err(err) => Ok((Value::Nil, Some(format!("{}: {}", err.code(), err)))),
            }
        })?,
    )?;

    // dcmaui.describe_tree() -> string
    module.set(
        "describe_tree",
        lua.create_function(|lua, ()| Ok(get_bridge(lua)?.lock().describe_tree()))?,
    )?;

    // dcmaui.kinds() -> sorted list of registered component kinds
    module.set(
        "kinds",
        lua.create_function(|lua, ()| {
            let bridge = get_bridge(lua)?;
            let kinds: Vec<String> = bridge
                .lock()
                .registered_kinds()
                .into_iter()
                .map(str::to_string)
                .collect();
            Ok(kinds)
        })?,
    )?;

    Ok(module)
}
