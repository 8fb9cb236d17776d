mod pattern;
mod table;

pub use pattern::{Params, PathPattern, PatternError};
pub use table::{
    Resolution, RouteDef, RouteEntry, RouteMatch, RouteTable, RouteTableError, ViewId,
    ViewResolver,
};
