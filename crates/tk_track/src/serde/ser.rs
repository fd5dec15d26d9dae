use serde_core::ser::{SerializeMap, SerializeSeq};
use serde_core::{Serialize, Serializer};

use crate::record::{Record, TAG_FIELD, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::UInt(v) => serializer.serialize_u64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(record) => record.serialize(serializer),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = self.type_path().is_some() as usize;
        let mut map = serializer.serialize_map(Some(self.field_len() + tagged))?;

        // The tag entry leads so that readers can dispatch before
        // consuming the fields.
        if let Some(type_path) = self.type_path() {
            map.serialize_entry(TAG_FIELD, type_path)?;
        }
        for (name, value) in self.iter_fields() {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::record::{Record, Value};

    #[test]
    fn records_print_the_tag_entry_first() {
        let record = Record::tagged("demo::Pair").with("x", 1).with("y", 2);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"__class__":"demo::Pair","x":1,"y":2}"#);
    }

    #[test]
    fn untagged_records_serialize_as_plain_maps() {
        let record = Record::new().with("flag", true);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"flag":true}"#);
    }

    #[test]
    fn values_cover_all_variants() {
        let value = Value::Seq(alloc::vec![
            Value::Bool(false),
            Value::Int(-3),
            Value::UInt(u64::MAX),
            Value::Float(0.5),
            Value::Str("hi".into()),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[false,-3,18446744073709551615,0.5,"hi"]"#);
    }
}
