use thiserror::Error;
use tilegrid::{ClassId, GridError};

/// Configuration inconsistencies found while resolving the classes of a tile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("combination rule for aggregate {aggregate} has no input classes")]
    EmptyCombination { aggregate: ClassId },

    #[error("aggregate class {aggregate} is not declared in the precedence list")]
    AggregateNotInPrecedence { aggregate: ClassId },

    #[error(
        "class {class}, an input of aggregate {aggregate}, is not declared in the precedence list"
    )]
    CombinationInputNotInPrecedence { aggregate: ClassId, class: ClassId },

    #[error("classification code(s) {classes:?} present in the tile are neither prioritised nor ignored")]
    UnhandledClasses { classes: Vec<u8> },

    #[error("class(es) {classes:?} are both prioritised and ignored")]
    IgnoredAndPrioritized { classes: Vec<ClassId> },
}

/// Anything that stops a tile from being turned into a class map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no layer labelled {class} in the stack")]
    MissingLayer { class: ClassId },

    #[error("{labels} labels for {layers} layers")]
    LabelCount { labels: usize, layers: usize },
}
