//! Handlers of the default dashboard edges.
//!
//! Each handler reads its declared slots, works with the dataset store and
//! the archive, and returns the writes for its outputs. Errors returned here
//! end up in the status slot.

use crate::binding::edge::{HandlerContext, SlotView};
use crate::binding::slot::{SlotId, SlotValue, SlotWrites};
use crate::data::aggregate::{group_average, ChartFigure};
use crate::data::store::DatasetOrigin;
use crate::error::{DashError, Result, ResultExt};
use crate::types::StatusMessage;

/// Parse an upload, make it the active dataset and archive its bytes.
///
/// The store is rolled back if archiving fails, so the table never shows
/// data that was not saved.
pub fn upload_dataset(ctx: &mut HandlerContext<'_>, view: &SlotView<'_>) -> Result<SlotWrites> {
    let Some(upload) = view.upload(SlotId::UploadContents)? else {
        return Ok(SlotWrites::new());
    };
    let name = upload.original_name.as_str();

    let previous = ctx.store.snapshot();
    let dataset = ctx
        .store
        .load_from_bytes(&upload.bytes, name)
        .with_context(|| format!("Could not load {}", name))?;

    let record = match ctx.archive.save(&upload.bytes, name) {
        Ok(record) => record,
        Err(e) => {
            ctx.store.restore(previous);
            return Err(e.with_context(format!("Could not archive {}", name)));
        }
    };
    tracing::info!("Archived upload {} as {}", name, record.generated_name);

    let mut writes = SlotWrites::new()
        .set(SlotId::TableData, SlotValue::Table(dataset.clone()))
        .set(
            SlotId::CurrentFilename,
            SlotValue::OptionalText(Some(record.generated_name.clone())),
        );

    let status = match ctx.archive.records() {
        Ok(files) => {
            writes.push(SlotId::FileList, SlotValue::FileList(files));
            StatusMessage::success(format!(
                "Loaded {} ({}), saved as {}",
                name,
                dataset.shape_label(),
                record.generated_name
            ))
        }
        Err(e) => {
            tracing::warn!("Archive listing failed after upload: {}", e);
            StatusMessage::warning(format!(
                "Loaded {} and saved as {}, but the file list could not be refreshed: {}",
                name, record.generated_name, e
            ))
        }
    };
    writes.push(SlotId::StatusMessage, SlotValue::Status(status));
    Ok(writes)
}

/// Load the clicked archive entry as the active dataset.
pub fn select_archived_file(
    ctx: &mut HandlerContext<'_>,
    view: &SlotView<'_>,
) -> Result<SlotWrites> {
    let Some(index) = view.index(SlotId::FileListClick)? else {
        return Ok(SlotWrites::new());
    };
    let files = view.file_list(SlotId::FileList)?;
    let entry = files.get(index).ok_or_else(|| {
        DashError::NotFound(format!(
            "entry {} is not in the file list ({} files)",
            index + 1,
            files.len()
        ))
    })?;
    let name = entry.generated_name.clone();

    let dataset = ctx
        .archive
        .load(&name)
        .with_context(|| format!("Could not open {}", name))?;
    let shape = dataset.shape_label();
    let dataset = ctx
        .store
        .replace(dataset, DatasetOrigin::Archive { name: name.clone() });
    tracing::info!("Loaded archived file {} ({})", name, shape);

    Ok(SlotWrites::new()
        .set(SlotId::TableData, SlotValue::Table(dataset))
        .set(
            SlotId::StatusMessage,
            SlotValue::Status(StatusMessage::success(format!("Loaded {} ({})", name, shape))),
        )
        .set(SlotId::CurrentFilename, SlotValue::OptionalText(Some(name))))
}

/// Recompute the grouped-average chart for the selected column.
pub fn update_chart(ctx: &mut HandlerContext<'_>, view: &SlotView<'_>) -> Result<SlotWrites> {
    let column = view.text(SlotId::SelectedColumn)?;
    let table = view.table(SlotId::TableData)?;

    let figure = if column.is_empty() {
        ChartFigure::placeholder("Select a column to chart")
    } else if !table.has_column(column) {
        ChartFigure::placeholder(format!(
            "Column '{}' is not in the current dataset",
            column
        ))
    } else {
        group_average(table, &ctx.chart.group_column, column)
    };

    Ok(SlotWrites::new().set(SlotId::Chart, SlotValue::Chart(figure)))
}

/// Refresh the archive listing.
pub fn populate_file_list(
    ctx: &mut HandlerContext<'_>,
    _view: &SlotView<'_>,
) -> Result<SlotWrites> {
    let files = ctx
        .archive
        .records()
        .context("Could not list archived files")?;
    tracing::debug!("Archive holds {} files", files.len());
    Ok(SlotWrites::new().set(SlotId::FileList, SlotValue::FileList(files)))
}

/// Reload the default dataset.
pub fn reset_dataset(ctx: &mut HandlerContext<'_>, _view: &SlotView<'_>) -> Result<SlotWrites> {
    let dataset = ctx
        .store
        .load_default()
        .context("Could not reload the default dataset")?;
    let status = StatusMessage::success(format!(
        "Loaded default dataset from {} ({})",
        ctx.store.source_description(),
        dataset.shape_label()
    ));
    Ok(SlotWrites::new()
        .set(SlotId::TableData, SlotValue::Table(dataset))
        .set(SlotId::StatusMessage, SlotValue::Status(status))
        .set(SlotId::CurrentFilename, SlotValue::OptionalText(None)))
}
