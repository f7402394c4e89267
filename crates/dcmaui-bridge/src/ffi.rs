//! C ABI for native hosts.
//!
//! Every call takes the handle returned by [`dcmaui_bridge_new`]. Results are
//! `1` on success and `0` on failure; the failure reason is logged. Panics
//! never unwind across this boundary.

use crate::bridge::{Bridge, SharedBridge};
use crate::config::BridgeConfig;
use crate::error::Result;
use crate::events::EventSink;
use crate::native::{NativeView, RootContainer};
use crate::props::{decode_id_list, PropertySet};
use std::ffi::{c_void, CStr, CString};
use std::os::raw::c_char;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Called for every event raised by a native view. Pointers are only valid
/// for the duration of the call; `data_json` is a JSON object.
pub type DcmauiEventCallback = extern "C" fn(
    user_data: *mut c_void,
    view_id: *const c_char,
    event_type: *const c_char,
    data_json: *const c_char,
);

pub type DcmauiMountCallback =
    extern "C" fn(user_data: *mut c_void, view_id: *const c_char, view_type: *const c_char);

pub type DcmauiUnmountCallback = extern "C" fn(user_data: *mut c_void, view_id: *const c_char);

/// Opaque handle owned by the host.
pub struct DcmauiBridge {
    bridge: SharedBridge,
}

impl DcmauiBridge {
    /// The shared bridge behind this handle, e.g. to expose it to Lua as well.
    pub fn shared(&self) -> SharedBridge {
        Arc::clone(&self.bridge)
    }
}

/// Host-owned pointer that the host promises to keep valid and thread-safe.
#[derive(Clone, Copy)]
struct UserData(*mut c_void);

unsafe impl Send for UserData {}
unsafe impl Sync for UserData {}

struct CEventSink {
    callback: DcmauiEventCallback,
    user_data: UserData,
}

impl EventSink for CEventSink {
    fn on_event(&self, view_id: &str, event_type: &str, data: &PropertySet) {
        let json = match serde_json::to_string(data) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(view_id, event_type, error = %err, "failed to encode event data");
                return;
            }
        };
        let (Ok(view_id), Ok(event_type), Ok(json)) =
            (CString::new(view_id), CString::new(event_type), CString::new(json))
        else {
            tracing::warn!("event contains an interior NUL byte, dropped");
            return;
        };
        (self.callback)(
            self.user_data.0,
            view_id.as_ptr(),
            event_type.as_ptr(),
            json.as_ptr(),
        );
    }
}

struct CRootContainer {
    mount: DcmauiMountCallback,
    unmount: DcmauiUnmountCallback,
    user_data: UserData,
}

impl RootContainer for CRootContainer {
    fn mount(&mut self, view_id: &str, view: &dyn NativeView) {
        let (Ok(id), Ok(view_type)) = (CString::new(view_id), CString::new(view.type_name()))
        else {
            tracing::warn!(view_id, "cannot mount a view id with an interior NUL byte");
            return;
        };
        (self.mount)(self.user_data.0, id.as_ptr(), view_type.as_ptr());
    }

    fn unmount(&mut self, view_id: &str) {
        let Ok(id) = CString::new(view_id) else {
            tracing::warn!(view_id, "cannot unmount a view id with an interior NUL byte");
            return;
        };
        (self.unmount)(self.user_data.0, id.as_ptr());
    }
}

/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

fn invalid_args(op: &'static str) -> i8 {
    tracing::warn!(op, "null or non UTF-8 argument");
    0
}

fn with_bridge(
    handle: *const DcmauiBridge,
    op: &'static str,
    f: impl FnOnce(&mut Bridge) -> Result<()>,
) -> i8 {
    // SAFETY: the host passes a pointer from `dcmaui_bridge_new` or null.
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        tracing::warn!(op, "called with a null bridge handle");
        return 0;
    };
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut bridge = handle.bridge.lock();
        f(&mut bridge)
    }));
    match outcome {
        Ok(Ok(())) => 1,
        Ok(Err(err)) => {
            tracing::warn!(op, code = err.code(), error = %err, "bridge call failed");
            0
        }
        Err(_) => {
            tracing::error!(op, "panic caught at the C boundary");
            0
        }
    }
}

/// Create a bridge. `config_json` may be null for the default config.
/// Returns null when the config is invalid.
///
/// # Safety
/// `config_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_bridge_new(config_json: *const c_char) -> *mut DcmauiBridge {
    let config = if config_json.is_null() {
        Ok(BridgeConfig::default())
    } else {
        match c_str(config_json) {
            Some(json) => BridgeConfig::from_json(json),
            None => {
                invalid_args("bridgeNew");
                return std::ptr::null_mut();
            }
        }
    };

    match config.and_then(Bridge::new) {
        Ok(bridge) => Box::into_raw(Box::new(DcmauiBridge {
            bridge: bridge.into_shared(),
        })),
        Err(err) => {
            tracing::warn!(code = err.code(), error = %err, "failed to create bridge");
            std::ptr::null_mut()
        }
    }
}

/// # Safety
/// `handle` must come from `dcmaui_bridge_new` and not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_bridge_free(handle: *mut DcmauiBridge) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
}

/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_initialize(handle: *const DcmauiBridge) -> i8 {
    with_bridge(handle, "initialize", |bridge| {
        bridge.initialize();
        Ok(())
    })
}

/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_create_view(
    handle: *const DcmauiBridge,
    view_id: *const c_char,
    kind: *const c_char,
    props_json: *const c_char,
) -> i8 {
    let (Some(view_id), Some(kind), Some(props)) =
        (c_str(view_id), c_str(kind), c_str(props_json))
    else {
        return invalid_args("createView");
    };
    with_bridge(handle, "createView", |bridge| {
        bridge.create_view(view_id, kind, props)
    })
}

/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_update_view(
    handle: *const DcmauiBridge,
    view_id: *const c_char,
    props_json: *const c_char,
) -> i8 {
    let (Some(view_id), Some(props)) = (c_str(view_id), c_str(props_json)) else {
        return invalid_args("updateView");
    };
    with_bridge(handle, "updateView", |bridge| bridge.update_view(view_id, props))
}

/// # Safety
/// `handle` must be null or a live handle; `view_id` must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_delete_view(
    handle: *const DcmauiBridge,
    view_id: *const c_char,
) -> i8 {
    let Some(view_id) = c_str(view_id) else {
        return invalid_args("deleteView");
    };
    with_bridge(handle, "deleteView", |bridge| bridge.destroy_view(view_id))
}

/// A negative `index` appends.
///
/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_attach_view(
    handle: *const DcmauiBridge,
    child_id: *const c_char,
    parent_id: *const c_char,
    index: i32,
) -> i8 {
    let (Some(child_id), Some(parent_id)) = (c_str(child_id), c_str(parent_id)) else {
        return invalid_args("attachView");
    };
    let index = usize::try_from(index).unwrap_or(usize::MAX);
    with_bridge(handle, "attachView", |bridge| {
        bridge.attach_view(child_id, parent_id, index)
    })
}

/// `child_ids_json` is a JSON array of view ids.
///
/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_set_children(
    handle: *const DcmauiBridge,
    parent_id: *const c_char,
    child_ids_json: *const c_char,
) -> i8 {
    let (Some(parent_id), Some(child_ids)) = (c_str(parent_id), c_str(child_ids_json)) else {
        return invalid_args("setChildren");
    };
    with_bridge(handle, "setChildren", |bridge| {
        bridge.set_children(parent_id, child_ids)
    })
}

/// `event_types_json` is a JSON array of event type names.
///
/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_add_event_listeners(
    handle: *const DcmauiBridge,
    view_id: *const c_char,
    event_types_json: *const c_char,
) -> i8 {
    let (Some(view_id), Some(types)) = (c_str(view_id), c_str(event_types_json)) else {
        return invalid_args("addEventListeners");
    };
    with_bridge(handle, "addEventListeners", |bridge| {
        let event_types = decode_id_list(types)?;
        bridge.add_event_listeners(view_id, &event_types)
    })
}

/// # Safety
/// `handle` must be null or a live handle; strings must be NUL-terminated.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_remove_event_listeners(
    handle: *const DcmauiBridge,
    view_id: *const c_char,
    event_types_json: *const c_char,
) -> i8 {
    let (Some(view_id), Some(types)) = (c_str(view_id), c_str(event_types_json)) else {
        return invalid_args("removeEventListeners");
    };
    with_bridge(handle, "removeEventListeners", |bridge| {
        let event_types = decode_id_list(types)?;
        bridge.remove_event_listeners(view_id, &event_types)
    })
}

/// Deliver queued events. Returns the number delivered, or -1 on failure.
///
/// The bridge lock is released before the callback runs, so the callback may
/// issue further commands on the same handle.
///
/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_dispatch_events(handle: *const DcmauiBridge) -> i32 {
    // SAFETY: the host passes a pointer from `dcmaui_bridge_new` or null.
    let Some(handle) = (unsafe { handle.as_ref() }) else {
        tracing::warn!(op = "dispatchEvents", "called with a null bridge handle");
        return -1;
    };
    let emitter = handle.bridge.lock().emitter();
    match panic::catch_unwind(AssertUnwindSafe(|| emitter.dispatch_pending())) {
        Ok(delivered) => i32::try_from(delivered).unwrap_or(i32::MAX),
        Err(_) => {
            tracing::error!(op = "dispatchEvents", "panic caught at the C boundary");
            -1
        }
    }
}

/// Install the event callback. A null callback clears it.
///
/// # Safety
/// `handle` must be null or a live handle. `user_data` must stay valid, and
/// be usable from any thread, until the callback is replaced.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_set_event_callback(
    handle: *const DcmauiBridge,
    callback: Option<DcmauiEventCallback>,
    user_data: *mut c_void,
) -> i8 {
    let user_data = UserData(user_data);
    with_bridge(handle, "setEventCallback", |bridge| {
        match callback {
            Some(callback) => bridge.set_event_sink(Arc::new(CEventSink {
                callback,
                user_data,
            })),
            None => bridge.clear_event_sink(),
        }
        Ok(())
    })
}

/// Bind the platform root container through a pair of callbacks.
///
/// # Safety
/// `handle` must be null or a live handle. `user_data` must stay valid, and
/// be usable from any thread, until the container is replaced.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_set_root_callbacks(
    handle: *const DcmauiBridge,
    mount: Option<DcmauiMountCallback>,
    unmount: Option<DcmauiUnmountCallback>,
    user_data: *mut c_void,
) -> i8 {
    let (Some(mount), Some(unmount)) = (mount, unmount) else {
        return invalid_args("setRootCallbacks");
    };
    let user_data = UserData(user_data);
    with_bridge(handle, "setRootCallbacks", |bridge| {
        bridge.set_root_container(Box::new(CRootContainer {
            mount,
            unmount,
            user_data,
        }));
        Ok(())
    })
}

/// Text dump of the view tree. Free the result with `dcmaui_string_free`.
/// Returns null on failure.
///
/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_describe_tree(handle: *const DcmauiBridge) -> *mut c_char {
    let mut tree = String::new();
    if with_bridge(handle, "logViewTree", |bridge| {
        tree = bridge.describe_tree();
        Ok(())
    }) == 0
    {
        return std::ptr::null_mut();
    }
    match CString::new(tree) {
        Ok(tree) => tree.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// # Safety
/// `s` must be null or a string returned by this library.
#[no_mangle]
pub unsafe extern "C" fn dcmaui_string_free(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    drop(CString::from_raw(s));
}
