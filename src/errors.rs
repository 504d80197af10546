use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    num::ParseIntError,
};

pub struct LifeError {
    err: anyhow::Error,
}

impl Debug for LifeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let anyhow_str = format!("{:?}", self.err).replace("\n", " ");
        f.debug_tuple("").field(&anyhow_str).finish()
    }
}

impl Display for LifeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({:#})", self.err)
    }
}

impl From<anyhow::Error> for LifeError {
    fn from(err: anyhow::Error) -> LifeError {
        LifeError { err }
    }
}

impl std::convert::From<ParseIntError> for LifeError {
    fn from(err: ParseIntError) -> LifeError {
        let msg = format!("parse int err: '{:#}'", err);
        let anyhow_err = anyhow::Error::msg(msg);
        LifeError { err: anyhow_err }
    }
}

impl std::convert::From<tokio::task::JoinError> for LifeError {
    fn from(err: tokio::task::JoinError) -> LifeError {
        let msg = format!("tokio task join error: {}", err);
        let anyhow_err = anyhow::Error::msg(msg);
        LifeError { err: anyhow_err }
    }
}
