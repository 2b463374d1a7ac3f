//! PartyRun client HTTP infrastructure.
//!
//! Implements the data source ports of the [`model`] crate over HTTP.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request shaping, and response
//! adaptation live here. Callers above this crate see only [`model::Outcome`]
//! values; reqwest errors, status codes, and wire DTOs stop at this boundary.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`transport`] | `Transport` port, `ApiRequest`, `RawResponse`, `TransportError` |
//! | [`http`] | reqwest-backed `HttpTransport` |
//! | [`adapter`] | `ApiClient`: the response adapter producing outcomes |
//! | [`datasource`] | one data source per remote capability |

pub mod adapter;
pub mod datasource;
pub mod http;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use adapter::{adapt_discarding, adapt_response, ApiClient, DECODE_FAILURE_MESSAGE};
pub use datasource::{
    BattleDataSourceImpl, MatchDataSourceImpl, MemberDataSourceImpl, MyPageDataSourceImpl,
    SignInDataSourceImpl,
};
pub use http::{HttpTransport, TransportBuildError};
pub use transport::{
    ApiRequest, HttpMethod, MultipartFile, RawResponse, RequestBody, Transport, TransportError,
};

#[cfg(test)]
pub use transport::MockTransport;
