mod lapak_error;
mod storage_error;

pub use lapak_error::{LapakError, LapakResult};
pub use storage_error::StorageError;
