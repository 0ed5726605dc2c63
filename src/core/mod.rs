pub mod error;
pub mod types;

pub use error::{AdminError, Result};
pub use types::{
    ActivityAction, ActivityDetails, ActivityEntry, ContentDocument, ContentMap, ContentRecord,
    Section, UserId,
};
