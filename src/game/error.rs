use std::fmt;

#[derive(Debug)]
pub enum Error {
    UnknownBuilding(String),
    UnknownClient(String),
    NoActiveSession(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownBuilding(name) => write!(f, "no building plan named {}", name),
            Error::UnknownClient(username) => {
                write!(f, "no registered client named {}", username)
            }
            Error::NoActiveSession(username) => {
                write!(f, "no active session contains {}", username)
            }
        }
    }
}

impl std::error::Error for Error {}
