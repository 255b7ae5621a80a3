//! Case-insensitive, multi-valued HTTP header collection with sorted, live
//! iteration.
//!
//! ```
//! use rustynet_headers::{Headers, HeadersInit};
//!
//! let headers = Headers::try_from(HeadersInit::from([("Accept", "text/html"), ("accept", "*/*")])).unwrap();
//! headers.set("Host", "example.com").unwrap();
//!
//! assert_eq!(headers.get("ACCEPT").unwrap().as_deref(), Some("text/html,*/*"));
//! assert_eq!(headers.keys().collect::<Vec<_>>(), ["accept", "host"]);
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use error::{HeadersError, Result};
pub use http::headers::{Headers, RawHeaders};
pub use http::init::HeadersInit;
pub use http::iter::{Entries, Keys, Values};
