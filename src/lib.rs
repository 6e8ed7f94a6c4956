//! Proactive HTTP content negotiation.
//!
//! Given the preference headers a client sent (`Accept`, `Accept-Language`,
//! `Accept-Charset`, `Accept-Encoding`) and, optionally, the representations
//! the server can produce, this crate computes which representations best
//! satisfy the client, ordered by preference (RFC 7231 section 5.3).
//!
//! Negotiation is a pure computation over strings: the crate holds no
//! connection state and performs no I/O. Malformed header segments never
//! fail a call; they simply contribute nothing to the result.
//!
//! # Examples
//!
//! Negotiating against a request's headers through the [`Negotiator`] facade:
//!
//! ```
//! use http::{HeaderMap, header};
//! use negotiator::Negotiator;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     header::ACCEPT,
//!     "text/html, application/json;q=0.8".parse().unwrap(),
//! );
//!
//! let negotiator = Negotiator::new(&headers);
//! let best = negotiator.media_type(&["application/json", "text/html"]);
//! assert_eq!(best, Some("text/html".to_string()));
//! ```
//!
//! Each dimension can also be driven from a raw header value:
//!
//! ```
//! use negotiator::AcceptLanguage;
//!
//! let accept = AcceptLanguage::parse("en-US, fr;q=0.8, de;q=0.2");
//! assert_eq!(accept.preferred(&["fr", "de"]), vec!["fr", "de"]);
//! ```

pub mod charset;
pub mod encoding;
pub mod language;
pub mod media_type;
pub mod negotiator;
pub mod specificity;

mod tokenizer;

pub use charset::{AcceptCharset, Charset};
pub use encoding::{AcceptEncoding, Encoding};
pub use language::{AcceptLanguage, Language};
pub use media_type::{Accept, MediaType};
pub use negotiator::Negotiator;
pub use specificity::Specificity;
