//! Title registry - issuance and custody tracking of property title tokens

mod model;
mod service;

pub use model::{ApproveTitleRequest, MintTitleRequest, OwnerResponse, Title};
pub use service::{RegistryError, TitleRegistry};
