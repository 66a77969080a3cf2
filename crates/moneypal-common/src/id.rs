use snowflake::SnowflakeIdBucket;
use std::sync::Mutex;

static ID_GENERATOR: Mutex<Option<SnowflakeIdBucket>> = Mutex::new(None);

/// Initializes the process-wide Snowflake ID generator.
///
/// `machine_id` and `node_id` must each be in 0-31. Calling this more than
/// once replaces the generator; IDs remain unique as long as no two
/// processes share the same (machine_id, node_id) pair.
pub fn init(machine_id: i32, node_id: i32) {
    let mut gen = ID_GENERATOR.lock().unwrap();
    *gen = Some(SnowflakeIdBucket::new(machine_id, node_id));
}

/// Returns the next Snowflake ID as a string.
///
/// Falls back to a (1, 1) generator when [`init`] was never called, so
/// library tests do not need explicit setup.
pub fn next_id() -> String {
    let mut gen = ID_GENERATOR.lock().unwrap();
    let bucket = gen.get_or_insert_with(|| SnowflakeIdBucket::new(1, 1));
    bucket.get_id().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        init(1, 1);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            assert!(seen.insert(next_id()));
        }
    }

    #[test]
    fn ids_are_numeric_strings() {
        init(1, 1);
        assert!(next_id().parse::<i64>().is_ok());
    }
}
