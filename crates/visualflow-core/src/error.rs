pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    DuplicateNode { id: String },

    UnknownEndpoint {
        source: String,
        target: String,
        missing: String,
    },

    Cycle { id: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateNode { id } => write!(f, "duplicate node id: {id}"),
            Error::UnknownEndpoint {
                source,
                target,
                missing,
            } => write!(
                f,
                "edge {source} -> {target} references unknown node: {missing}"
            ),
            Error::Cycle { id } => write!(f, "graph is not acyclic: cycle through node {id}"),
        }
    }
}

impl std::error::Error for Error {}
