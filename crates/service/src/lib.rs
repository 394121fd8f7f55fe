//! Service layer for the date store.
//! - `model` holds the persisted document and the collection names.
//! - `calendar` expands `fromDate..=toDate` pairs into day strings.
//! - `storage` abstracts where the document lives.
//! - `dates` runs every read-modify-write cycle against storage.

pub mod calendar;
pub mod dates;
pub mod errors;
pub mod model;
pub mod storage;

pub use dates::DateService;
pub use errors::ServiceError;
pub use model::{Collection, StoreDocument};
