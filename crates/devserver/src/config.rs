//! Config modules, applied in file-name order after the framework's own.

mod body_limit;
mod store;
