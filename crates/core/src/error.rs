use thiserror::Error;

use crate::navigation::NavigateError;
use crate::route::RouteTableError;
use crate::shell::ShellError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    RouteTable(#[from] RouteTableError),
    #[error(transparent)]
    Navigate(#[from] NavigateError),
    #[error(transparent)]
    Shell(#[from] ShellError),
}
