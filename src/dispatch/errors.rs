use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::api_client::ClientError;

/// Failure of one device in a dispatch round
///
/// The message carries the whole cause chain of `error`, so this type has no
/// source of its own.
#[derive(Error, Debug)]
#[error("device {address}: {}", describe(.error))]
pub struct DispatchError {
    pub address: String,
    pub error: ClientError,
}

impl DispatchError {
    pub fn new(address: impl Into<String>, error: ClientError) -> Self {
        Self {
            address: address.into(),
            error,
        }
    }
}

fn describe(error: &ClientError) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        message.push_str(": ");
        message.push_str(&err.to_string());
        cause = err.source();
    }
    message
}

/// Every device failure of one dispatch round
///
/// Never empty: [`MultiError::from_errors`] returns `None` instead.
#[derive(Debug)]
pub struct MultiError {
    errors: Vec<DispatchError>,
}

impl MultiError {
    pub fn from_errors(errors: Vec<DispatchError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DispatchError> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<DispatchError> {
        self.errors
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => Ok(()),
            [only] => write!(f, "{only}"),
            errors => {
                write!(f, "{} errors occurred", errors.len())?;
                for err in errors {
                    write!(f, "\n\t{err}")?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for MultiError {}

impl<'a> IntoIterator for &'a MultiError {
    type Item = &'a DispatchError;
    type IntoIter = std::slice::Iter<'a, DispatchError>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
