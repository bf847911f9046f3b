mod add;
mod status;
mod version;

pub use add::{AddInput, AddOperation, AddResult};
pub use status::{StatusOperation, StatusOutput};
pub use version::{
    ChangelogUpdate, GitOutcome, VersionInput, VersionOperation, VersionOutcome, VersionOutput,
    tag_name,
};
