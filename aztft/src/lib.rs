//! Translates Azure resource ids into the azurerm resource types and import ids Terraform
//! expects.
//!
//! [`Aztft`] is the entry point. The lower level pieces are public as well:
//! [`tfid`] builds import ids, [`resolve`] picks the type of polymorphic resources and
//! [`populate`] derives association ids from live state.

pub mod catalog;
pub mod client;
pub mod error;
pub mod lro;
pub mod populate;
pub mod query;
pub mod resolve;
pub mod tfid;
pub mod util;

pub use aztft_core::armid::ResourceId;
pub use catalog::Catalog;
pub use error::{Error, ErrorKind, Result};
pub use query::{Aztft, Resolved};
