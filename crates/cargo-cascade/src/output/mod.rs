mod status;
mod version;

pub(crate) use status::{PlainTextStatusFormatter, StatusFormatter};
pub(crate) use version::format_outcome;
