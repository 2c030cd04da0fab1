pub mod card;
pub mod iso;
pub mod rating;
pub mod review_log;
pub mod review_session;
pub mod scheduler;

pub use card::Card;
pub use rating::Rating;
pub use review_log::ReviewLog;
pub use review_session::ReviewSession;
pub use scheduler::{LeitnerScheduler, OnFail, SchedulerConfig};

use serde::Serialize;
use serde_json::{Map, Value};

/// Encodes a record through its `Serialize` impl. Records here serialize to a JSON object
/// with string keys and no floats, which `serde_json` cannot fail on.
fn to_map<T: Serialize>(record: &T) -> Map<String, Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map,
        other => unreachable!("record did not encode to a mapping: {:?}", other),
    }
}
