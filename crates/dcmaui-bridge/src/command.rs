use crate::bridge::Bridge;
use crate::error::Result;
use crate::props::PropertySet;
use serde::{Deserialize, Serialize};

/// One call on the bridge command surface, as it appears in a recorded
/// command stream: `{"method":"createView","viewId":"btn1",...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    Initialize,
    CreateView {
        view_id: String,
        #[serde(rename = "type")]
        kind: String,
        #[serde(default)]
        props: PropertySet,
    },
    UpdateView {
        view_id: String,
        #[serde(default)]
        props: PropertySet,
    },
    DeleteView {
        view_id: String,
    },
    AttachView {
        child_id: String,
        parent_id: String,
        #[serde(default)]
        index: usize,
    },
    SetChildren {
        parent_id: String,
        child_ids: Vec<String>,
    },
    AddEventListeners {
        view_id: String,
        event_types: Vec<String>,
    },
    RemoveEventListeners {
        view_id: String,
        event_types: Vec<String>,
    },
    SimulateEvent {
        view_id: String,
        event_name: String,
        #[serde(default)]
        data: PropertySet,
    },
    DispatchEvents,
    ResetViewRegistry,
    GetViewInfo {
        view_id: String,
    },
    LogViewTree,
}

impl Command {
    pub fn method(&self) -> &'static str {
        match self {
            Command::Initialize => "initialize",
            Command::CreateView { .. } => "createView",
            Command::UpdateView { .. } => "updateView",
            Command::DeleteView { .. } => "deleteView",
            Command::AttachView { .. } => "attachView",
            Command::SetChildren { .. } => "setChildren",
            Command::AddEventListeners { .. } => "addEventListeners",
            Command::RemoveEventListeners { .. } => "removeEventListeners",
            Command::SimulateEvent { .. } => "simulateEvent",
            Command::DispatchEvents => "dispatchEvents",
            Command::ResetViewRegistry => "resetViewRegistry",
            Command::GetViewInfo { .. } => "getViewInfo",
            Command::LogViewTree => "logViewTree",
        }
    }
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "camelCase")]
pub enum CommandOutput {
    Done,
    Dispatched(usize),
    ViewInfo(PropertySet),
    Tree(String),
}

impl Bridge {
    /// Run a single decoded command.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutput> {
        tracing::trace!(method = command.method(), "executing command");
        match command {
            Command::Initialize => {
                self.initialize();
            }
            Command::CreateView {
                view_id,
                kind,
                props,
            } => self.create_view_with_props(&view_id, &kind, &props)?,
            Command::UpdateView { view_id, props } => {
                self.update_view_with_props(&view_id, &props)?
            }
            Command::DeleteView { view_id } => self.destroy_view(&view_id)?,
            Command::AttachView {
                child_id,
                parent_id,
                index,
            } => self.attach_view(&child_id, &parent_id, index)?,
            Command::SetChildren {
                parent_id,
                child_ids,
            } => self.set_children_ids(&parent_id, &child_ids)?,
            Command::AddEventListeners {
                view_id,
                event_types,
            } => self.add_event_listeners(&view_id, &event_types)?,
            Command::RemoveEventListeners {
                view_id,
                event_types,
            } => self.remove_event_listeners(&view_id, &event_types)?,
            Command::SimulateEvent {
                view_id,
                event_name,
                data,
            } => self.simulate_event_with_data(&view_id, &event_name, data)?,
            Command::DispatchEvents => return Ok(CommandOutput::Dispatched(self.dispatch_events())),
            Command::ResetViewRegistry => self.reset_views()?,
            Command::GetViewInfo { view_id } => {
                return self.view_info(&view_id).map(CommandOutput::ViewInfo);
            }
            Command::LogViewTree => return Ok(CommandOutput::Tree(self.describe_tree())),
        }
        Ok(CommandOutput::Done)
    }
}
