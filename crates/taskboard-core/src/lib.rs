pub mod checklist;
pub mod config;
pub mod due;
pub mod edit;
pub mod error;
pub mod gateway;
pub mod render;
pub mod scheduler;
pub mod schema;
pub mod store;
pub mod sync;

pub use config::BoardConfig;
pub use error::{
  BoardError,
  GatewayError,
  ValidationError
};
pub use gateway::{
  DeleteTarget,
  TaskGateway,
  TaskSource
};
pub use store::TaskStore;
