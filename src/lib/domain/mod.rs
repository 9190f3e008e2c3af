pub mod types;

pub use types::{ChatTurn, ClientRecord, ResponseShape, ResultSet, USER_SPEAKER};
