//! Protocol Module
//!
//! The in-process contract a transport layer drives.
//!
//! ## Flow
//! ```text
//! transport request ──decode──▶ Command ──Store::execute──▶ Response ──encode──▶ JSON envelope
//! ```
//!
//! ### Commands
//! | Command            | Route (REST transport)                         |
//! |--------------------|------------------------------------------------|
//! | CreateDatabase     | `POST /dbs`                                    |
//! | ListDatabases      | `GET /dbs`                                     |
//! | DeleteDatabase     | `DELETE /dbs/{db}`                             |
//! | CreateCollection   | `POST /dbs/{db}/collections`                   |
//! | ListCollections    | `GET /dbs/{db}/collections`                    |
//! | DeleteCollection   | `DELETE /dbs/{db}/collections/{name}`          |
//! | CreateDocument     | `POST .../documents`                           |
//! | ReadDocument       | `GET .../documents/{id}`                       |
//! | UpdateDocument     | `PUT .../documents/{id}`                       |
//! | DeleteDocument     | `DELETE .../documents/{id}`                    |
//! | ListDocuments      | `GET .../documents?filter[f]=v&sort_by=..`     |
//!
//! ### Status Codes
//! - Ok (200), Created (201), NotFound (404), BadRequest (400), Error (500)

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{Response, Status};
pub use codec::{
    decode_create_collection, decode_create_database, decode_document_body, decode_list_query,
    encode_response, split_query_string,
};
