/// Reasons a widget constructor can reject its input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// A table needs at least one column and one row.
    #[error("table needs at least one header and one row")]
    EmptyTable,
    /// A table row does not have one cell per header.
    #[error("table row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A list needs at least one item.
    #[error("list needs at least one item")]
    EmptyList,
}
