pub mod etl;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod runner;

pub use crate::domain::model::Record;
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
