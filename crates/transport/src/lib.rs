pub mod error;
pub mod http;
pub mod memory;
pub mod request;
pub mod transport;

pub use common::{EntityId, FilterSet};
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use memory::InMemoryTransport;
pub use request::{API_KEY_HEADER, ApiRequest, ApiResponse, Method};
pub use transport::{Transport, TransportExt};
