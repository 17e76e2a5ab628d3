pub mod connector;
pub mod error;
pub mod mongo;

pub use connector::{ConnectionConfig, ConnectionInfo, Connector};
pub use error::ConnectionError;
pub use mongo::MongoConnector;
