//! Storage Module
//!
//! Persistent storage layer: one directory per namespace, one file per
//! document.
//!
//! ## Directory Layout
//! ```text
//! {root}/
//! ├── shop/                      (database)
//! │   ├── orders/                (collection)
//! │   │   ├── o1.msgpack         (document "o1")
//! │   │   └── o2.msgpack
//! │   └── customers/
//! └── blog/
//! ```
//!
//! There is no manifest and no index: directory presence is existence,
//! file contents are the whole record.

mod codec;
mod layout;
mod manager;

pub use codec::{decode_document, encode_document};
pub use layout::{validate_name, Layout};
pub use manager::StorageManager;
