mod record;
mod table;

pub use self::record::{build_record, AreaGeometry, FeatureRecord, RESERVED_COLUMNS};
pub use self::table::{FeatureTable, FeatureTableAssembler};
