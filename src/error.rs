use crate::token::Token;
use crate::management::State;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("token identity must be 128 bits, got {0} bytes")]
    InvalidIdentity(usize),
    #[error("malformed document: `{field}` {problem}")]
    MalformedDocument { field: &'static str, problem: &'static str },
    #[error("a factory producing `{0}` is already registered")]
    DuplicateRegistration(&'static str),
    #[error("no factory registered for `{0}`")]
    UnknownType(String),
    #[error("no colony with id {0}")]
    UnknownToken(Token),
    #[error("colony data belongs to dimension {found}, but this manager owns dimension {expected}")]
    PartitionMismatch { expected: i32, found: i32 },
    #[error("colony radius {0} is beyond the world border ({max})", max = crate::colony::MAX_RADIUS)]
    RadiusOutOfRange(u32),
    #[error("token {0} already names a colony")]
    TokenInUse(Token),
    #[error("unable to construct colony: {0}")]
    ColonyConstructionFailed(#[source] Box<Error>),
    #[error("colony manager is {0:?}, not ready")]
    NotReady(State),
    #[error("teardown of colony {colony} failed: {reason}")]
    Teardown { colony: Token, reason: String },
    #[error("nbt: {0}")]
    Nbt(#[from] fastnbt::error::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}
impl Error {
    pub(crate) fn malformed(field: &'static str, problem: &'static str) -> Self {
        Error::MalformedDocument { field, problem }
    }
}
