use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("blocks and measures must have the same length ({blocks} blocks, {measures} measures)")]
    LengthMismatch { blocks: usize, measures: usize },
    #[error("no block or measure registered for fragment block id {block_id:?}")]
    MissingBlock { block_id: String },
    #[error("block {block_id:?} expected {expected} block/measure, found {found}")]
    KindMismatch {
        block_id: String,
        expected: &'static str,
        found: String,
    },
    #[error("list block {block_id:?} has no item {item_id:?}")]
    MissingListItem { block_id: String, item_id: String },
    #[error("list block {block_id:?} has no measure for item {item_id:?}")]
    MissingListItemMeasure { block_id: String, item_id: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid render input: {0}")]
    Json(#[from] serde_json::Error),
}
