use super::node::NodeId;

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("edge attribute out of range: {0}")]
    AttributeError(String),
    #[error("error with provided dataset: {0}")]
    DatasetError(String),
    #[error("{0}")]
    InternalError(String),
}
