use anyhow::{Context, Result};
use dcmaui_bridge::stub::StubContainer;
use dcmaui_bridge::{register_bridge_module, Bridge, BridgeConfig};
use mlua::Lua;
use std::path::Path;

/// Run a Lua script against a fresh bridge exposed as the global `dcmaui`.
pub fn run_script(config: BridgeConfig, file: &Path) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut bridge = Bridge::new(config)?;
    bridge.set_root_container(Box::new(StubContainer::new()));
    let bridge = bridge.into_shared();

    let lua = Lua::new();
    let module = register_bridge_module(&lua, bridge.clone())?;
    lua.globals().set("dcmaui", module)?;

    lua.load(source.as_str())
        .set_name(file.display().to_string())
        .exec()
        .with_context(|| format!("script {} failed", file.display()))?;

    tracing::debug!(views = bridge.lock().views().len(), "script finished");
    Ok(())
}
