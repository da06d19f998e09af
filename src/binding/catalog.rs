//! The dashboard's edge table.

use crate::binding::edge::BindingEdge;
use crate::binding::error::BindingResult;
use crate::binding::graph::BindingGraph;
use crate::binding::handlers;
use crate::binding::slot::SlotId;

pub const UPLOAD_DATASET: &str = "upload_dataset";
pub const SELECT_ARCHIVED_FILE: &str = "select_archived_file";
pub const UPDATE_CHART: &str = "update_chart";
pub const POPULATE_FILE_LIST: &str = "populate_file_list";
pub const RESET_DATASET: &str = "reset_dataset";

/// Every edge of the dashboard, in declaration order
pub fn default_edges() -> Vec<BindingEdge> {
    vec![
        BindingEdge::new(UPLOAD_DATASET, handlers::upload_dataset)
            .trigger(SlotId::UploadContents)
            .output(SlotId::TableData)
            .output(SlotId::FileList)
            .output(SlotId::StatusMessage)
            .output(SlotId::CurrentFilename)
            .errors_to(SlotId::StatusMessage),
        BindingEdge::new(SELECT_ARCHIVED_FILE, handlers::select_archived_file)
            .trigger(SlotId::FileListClick)
            .context(SlotId::FileList)
            .output(SlotId::TableData)
            .output(SlotId::StatusMessage)
            .output(SlotId::CurrentFilename)
            .errors_to(SlotId::StatusMessage),
        BindingEdge::new(UPDATE_CHART, handlers::update_chart)
            .trigger(SlotId::SelectedColumn)
            .trigger(SlotId::TableData)
            .output(SlotId::Chart),
        BindingEdge::new(POPULATE_FILE_LIST, handlers::populate_file_list)
            .trigger(SlotId::AppStart)
            .trigger(SlotId::FileListRefresh)
            .output(SlotId::FileList)
            .output(SlotId::StatusMessage)
            .errors_to(SlotId::StatusMessage),
        BindingEdge::new(RESET_DATASET, handlers::reset_dataset)
            .trigger(SlotId::ResetDataset)
            .output(SlotId::TableData)
            .output(SlotId::StatusMessage)
            .output(SlotId::CurrentFilename)
            .errors_to(SlotId::StatusMessage),
    ]
}

/// Compile [`default_edges`].
pub fn default_graph() -> BindingResult<BindingGraph> {
    BindingGraph::new(default_edges())
}
