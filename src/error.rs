use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocstatsError>;

#[derive(Error, Debug)]
pub enum DocstatsError {
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Cannot check out '{branch}': {reason}")]
    Checkout { branch: String, reason: String },
    #[error("Cannot acquire repository {url}: {reason}")]
    Acquire { url: String, reason: String },
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Other: {0}")]
    Other(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

impl DocstatsError {
    pub fn checkout(branch: &str, reason: impl ToString) -> Self {
        DocstatsError::Checkout {
            branch: branch.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn acquire(url: &str, reason: impl ToString) -> Self {
        DocstatsError::Acquire {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

// gix errors are large; keep them boxed so `Result<T>` stays small.
impl From<gix::open::Error> for DocstatsError {
    fn from(err: gix::open::Error) -> Self {
        DocstatsError::Git(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for DocstatsError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        DocstatsError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for DocstatsError {
    fn from(err: gix::object::commit::Error) -> Self {
        DocstatsError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for DocstatsError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        DocstatsError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for DocstatsError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        DocstatsError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for DocstatsError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        DocstatsError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for DocstatsError {
    fn from(err: gix::objs::decode::Error) -> Self {
        DocstatsError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for DocstatsError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        DocstatsError::DiffTreeToTree(Box::new(err))
    }
}
