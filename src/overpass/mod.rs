mod client;
mod nominatim;
mod query;

pub use self::client::{OverpassClient, DEFAULT_URL};
pub use self::nominatim::resolve_area;
pub use self::query::{area_query, bbox_query, Bbox};
