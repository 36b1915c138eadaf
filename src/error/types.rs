use thiserror::Error;

/// Unified result type for the splitter distribution engine.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the distribution engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("item `{0}` not found")]
    NotFound(String),
    #[error("item `{0}` is not a group")]
    NotAGroup(String),
    #[error("item `{child}` is not a child of `{parent}`")]
    NotAChild { parent: String, child: String },
    #[error("items `{start}` and `{end}` are not adjacent siblings")]
    NotAdjacent { start: String, end: String },
    #[error("item id `{0}` is already in use")]
    DuplicateId(String),
    #[error("malformed size `{0}`, expected `<number>px` or `<number>fr`")]
    MalformedSize(String),
    #[error("group `{0}` has no items")]
    EmptyGroup(String),
    #[error("the last item of the root cannot be removed")]
    LastItem,
    #[error("cannot transfer space from a {from} pane into a {into} pane")]
    UnsupportedTransfer {
        from: &'static str,
        into: &'static str,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
