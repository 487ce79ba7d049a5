use std::time::{Duration, SystemTime};

use serde_core::{Serialize, Serializer};

use super::array_serializer::ArraySerializer;
use super::object_serializer::ObjectSerializer;

use crate::policy::EncodingPolicy;
use crate::{Node, Number};

// -----------------------------------------------------------------------------
// EmitDriver

/// Serializes a [`Node`] tree with the formatters of a policy.
///
/// # Emission Rules
///
/// - Numbers: the policy's [`NumberFormat`](crate::policy::NumberFormat)
///   output as a string when set, otherwise a native integer or float.
/// - Dates: the policy's [`DateFormat`](crate::policy::DateFormat) output
///   when set, otherwise milliseconds since the Unix epoch (negative before
///   it).
/// - Objects: a map in projection order.
///
/// # Examples
///
/// ```
/// use vc_json_reflect::{Node, Number};
/// use vc_json_reflect::policy::EncodingPolicy;
/// use vc_json_reflect::serde::EmitDriver;
///
/// let node = Node::Array(vec![Node::Number(Number::Unsigned(7)), Node::Null]);
/// let policy = EncodingPolicy::new();
///
/// let json = serde_json::to_string(&EmitDriver::new(&node, &policy)).unwrap();
/// assert_eq!(json, "[7,null]");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmitDriver<'a> {
    node: &'a Node,
    policy: &'a EncodingPolicy,
}

impl<'a> EmitDriver<'a> {
    #[inline]
    pub const fn new(node: &'a Node, policy: &'a EncodingPolicy) -> Self {
        Self { node, policy }
    }
}

impl Serialize for EmitDriver<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.node {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(v) => serializer.serialize_bool(*v),
            Node::Number(number) => match self.policy.number_format() {
                Some(format) => serializer.serialize_str(&format.format(*number)),
                None => match *number {
                    Number::Signed(v) => serializer.serialize_i64(v),
                    Number::Unsigned(v) => serializer.serialize_u64(v),
                    Number::Float(v) => serializer.serialize_f64(v),
                },
            },
            Node::Text(text) => serializer.serialize_str(text),
            Node::Date(time) => match self.policy.date_format() {
                Some(format) => serializer.serialize_str(&format.format(*time)),
                None => serializer.serialize_i64(epoch_millis(*time)),
            },
            Node::Array(items) => ArraySerializer {
                items,
                policy: self.policy,
            }
            .serialize(serializer),
            Node::Object(object) => ObjectSerializer {
                object,
                policy: self.policy,
            }
            .serialize(serializer),
        }
    }
}

/// Returns the milliseconds between the Unix epoch and `time`, saturating
/// at the bounds of `i64`.
pub fn epoch_millis(time: SystemTime) -> i64 {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(after) => millis(after),
        Err(before) => millis(before.duration()).saturating_neg(),
    }
}

#[inline]
fn millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::{Duration, SystemTime};

    use super::{EmitDriver, epoch_millis};
    use crate::policy::{DateFormat, EncodingPolicy, NumberFormat};
    use crate::projection::{GrowableProjection, Projection};
    use crate::{Node, Number};

    #[derive(Debug)]
    struct Hex;

    impl NumberFormat for Hex {
        fn format(&self, number: Number) -> String {
            match number {
                Number::Unsigned(v) => format!("{v:#x}"),
                other => other.to_string(),
            }
        }

        fn box_clone(&self) -> Box<dyn NumberFormat> {
            Box::new(Hex)
        }
    }

    #[derive(Debug)]
    struct Seconds;

    impl DateFormat for Seconds {
        fn format(&self, time: SystemTime) -> String {
            format!("{}s", epoch_millis(time) / 1000)
        }

        fn box_clone(&self) -> Box<dyn DateFormat> {
            Box::new(Seconds)
        }
    }

    fn emit(node: &Node, policy: &EncodingPolicy) -> String {
        serde_json::to_string(&EmitDriver::new(node, policy)).unwrap()
    }

    #[test]
    fn epoch_millis_is_signed() {
        let after = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        let before = SystemTime::UNIX_EPOCH - Duration::from_millis(250);
        assert_eq!(epoch_millis(after), 1500);
        assert_eq!(epoch_millis(before), -250);
        assert_eq!(epoch_millis(SystemTime::UNIX_EPOCH), 0);
    }

    #[test]
    fn objects_keep_projection_order() {
        let mut object = GrowableProjection::new();
        object.push(Arc::from("z"), Node::Bool(true));
        object.push(Arc::from("a"), Node::Text("x".to_owned()));
        let node = Node::Object(object.into());

        assert_eq!(emit(&node, &EncodingPolicy::new()), r#"{"z":true,"a":"x"}"#);
    }

    #[test]
    fn formatters_apply_on_emission() {
        let date = SystemTime::UNIX_EPOCH + Duration::from_secs(60);
        let node = Node::Array(vec![
            Node::Number(Number::Unsigned(255)),
            Node::Number(Number::Float(1.5)),
            Node::Date(date),
        ]);

        let plain = EncodingPolicy::new();
        assert_eq!(emit(&node, &plain), "[255,1.5,60000]");

        let formatted = EncodingPolicy::new().with_number_format(Hex).with_date_format(Seconds);
        assert_eq!(emit(&node, &formatted), r#"["0xff","1.5","60s"]"#);
    }
}
