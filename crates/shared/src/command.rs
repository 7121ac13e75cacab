use crate::mealplan::{Family, SectionKind};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("cannot paste a {clipboard} section into {target}")]
    IncompatibleKind {
        clipboard: SectionKind,
        target: Family,
    },

    #[error("clipboard is empty")]
    ClipboardEmpty,

    #[error("{family} must keep between 1 and 3 sections (currently {len})")]
    BoundsExceeded { family: Family, len: usize },

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("invalid portion scale {0}")]
    InvalidPortionScale(f64),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! out_of_range {
    ($what:literal, $index:expr, $len:expr $(,)?) => {
        return Err($crate::Error::IndexOutOfRange {
            what: $what,
            index: $index,
            len: $len,
        })
    };
}
