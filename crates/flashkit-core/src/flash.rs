//! Stored flash values and their classification.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{FlashClass, FlashMessage};

/// A value held in a session's flash slot.
///
/// Application code may store either an already classified message or any
/// other value; the latter is classified when the flashes are rendered.
/// Serialised untagged, so a stored object that has the message shape comes
/// back as [`Flash::Classified`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flash {
    /// Message that already carries a class.
    Classified(FlashMessage),
    /// Anything else.
    Raw(Value),
}

impl Flash {
    /// Store an arbitrary serialisable value.
    ///
    /// # Errors
    /// Returns error if `value` cannot be represented as JSON.
    pub fn raw<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Raw)
    }

    /// Resolve this value into a message record.
    #[must_use]
    pub fn classify(self) -> FlashMessage {
        classify(self)
    }
}

/// Resolve a stored value into a message record.
///
/// Never fails: anything without the message shape degrades to its textual
/// form with class [`FlashClass::Standard`].
#[must_use]
pub fn classify(flash: Flash) -> FlashMessage {
    match flash {
        Flash::Classified(message) => message,
        Flash::Raw(Value::String(text)) => FlashMessage::standard(text),
        Flash::Raw(value) => {
            message_shape(&value).unwrap_or_else(|| FlashMessage::standard(value.to_string()))
        }
    }
}

/// Object carrying a string `Message` and a recognised `Class`.
fn message_shape(value: &Value) -> Option<FlashMessage> {
    let map = value.as_object()?;
    let message = map.get("Message")?.as_str()?;
    let class = map.get("Class")?.as_str()?.parse::<FlashClass>().ok()?;
    Some(FlashMessage::new(message, class))
}

impl From<FlashMessage> for Flash {
    fn from(message: FlashMessage) -> Self {
        Self::Classified(message)
    }
}

impl From<Value> for Flash {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<&str> for Flash {
    fn from(text: &str) -> Self {
        Self::Raw(Value::String(text.to_string()))
    }
}

impl From<String> for Flash {
    fn from(text: String) -> Self {
        Self::Raw(Value::String(text))
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Flash {
                fn from(value: $ty) -> Self {
                    Self::Raw(Value::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(bool, i8, i16, i32, i64, u8, u16, u32, u64);

// Floats keep their own text: JSON numbers widen f32 and have no NaN or inf.
macro_rules! impl_from_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Flash {
                fn from(value: $ty) -> Self {
                    Self::Raw(Value::String(value.to_string()))
                }
            }
        )*
    };
}

impl_from_float!(f32, f64);

impl From<Flash> for FlashMessage {
    fn from(flash: Flash) -> Self {
        classify(flash)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_classified_passes_through() {
        for class in FlashClass::ALL {
            let message = FlashMessage::new("Success test.", class);
            assert_eq!(classify(message.clone().into()), message);
        }
    }

    #[test]
    fn test_string_becomes_standard() {
        let message = classify("Just a string.".into());
        assert_eq!(message, FlashMessage::standard("Just a string."));
    }

    #[test]
    fn test_non_string_uses_textual_form() {
        assert_eq!(classify(123_i32.into()).message, "123");
        assert_eq!(classify(1.5_f64.into()).message, "1.5");
        assert_eq!(classify(true.into()).message, "true");
        assert_eq!(classify(Value::Null.into()).message, "null");
        assert_eq!(classify(json!([1, "a"]).into()).message, r#"[1,"a"]"#);
        assert_eq!(classify(123_i32.into()).class, FlashClass::Standard);
    }

    #[test]
    fn test_floats_use_their_own_text() {
        assert_eq!(classify(1.1_f32.into()).message, "1.1");
        assert_eq!(classify(f64::NAN.into()).message, "NaN");
        assert_eq!(classify(f64::INFINITY.into()).message, "inf");
        assert_eq!(classify(f32::NEG_INFINITY.into()).message, "-inf");
        assert_eq!(classify(1.1_f32.into()).class, FlashClass::Standard);
    }

    #[test]
    fn test_raw_object_with_message_shape_is_recognised() {
        let flash = Flash::Raw(json!({"Message": "Saved.", "Class": "warning"}));
        assert_eq!(classify(flash), FlashMessage::warning("Saved."));
    }

    #[test]
    fn test_raw_object_with_unknown_class_is_standard() {
        let value = json!({"Message": "Saved.", "Class": "alert"});
        let message = classify(Flash::Raw(value.clone()));
        assert_eq!(message.class, FlashClass::Standard);
        assert_eq!(message.message, value.to_string());
    }

    #[test]
    fn test_untagged_deserialization() {
        let flashes: Vec<Flash> = serde_json::from_str(
            r#"[{"Message":"a","Class":"info"},"b",7,{"Message":"c","Class":"nope"}]"#,
        )
        .unwrap();

        assert_eq!(flashes[0], Flash::Classified(FlashMessage::info("a")));
        assert_eq!(flashes[1], Flash::Raw(json!("b")));
        assert_eq!(flashes[2], Flash::Raw(json!(7)));
        assert!(matches!(flashes[3], Flash::Raw(_)));
    }

    #[test]
    fn test_raw_from_serialisable() {
        #[derive(Serialize)]
        struct Point {
            x: i32,
        }

        let flash = Flash::raw(&Point { x: 3 }).unwrap();
        assert_eq!(classify(flash).message, r#"{"x":3}"#);
    }
}
