mod record;
mod result_set;
mod row;

pub use record::DbRecord;
pub use result_set::ResultSet;
pub use row::DbRow;
