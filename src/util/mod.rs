//! Pure helpers shared by pages: dates, pagination, hover state, form
//! validation, and durable storage.

pub mod dates;
pub mod hover;
pub mod pagination;
pub mod storage;
pub mod validate;
