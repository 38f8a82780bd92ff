use kvui_core::KvError;

/// Typed reply from a command executor.
///
/// Only the shapes the browser decodes are kept apart; everything else
/// (maps, doubles, pushes, ...) arrives as `Other` with a debug rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nil,
    Ok,
    Status(String),
    Int(i64),
    Bulk(Vec<u8>),
    Array(Vec<Reply>),
    Other(String),
}

impl Reply {
    pub fn bulk(value: impl Into<String>) -> Self {
        Reply::Bulk(value.into().into_bytes())
    }

    pub fn status(value: impl Into<String>) -> Self {
        Reply::Status(value.into())
    }

    pub fn bulk_array<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reply::Array(items.into_iter().map(Reply::bulk).collect())
    }

    /// Decodes a string reply. `Nil` means the key or field was absent.
    pub fn into_string(self) -> Result<Option<String>, KvError> {
        match self {
            Reply::Nil => Ok(None),
            Reply::Ok => Ok(Some("OK".to_string())),
            Reply::Status(status) => Ok(Some(status)),
            Reply::Bulk(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            other => Err(KvError::decode(format!("expected string, got {}", other.shape()))),
        }
    }

    /// Decodes a list-of-strings reply. `Nil` decodes to an empty list and
    /// nil elements to empty strings.
    pub fn into_strings(self) -> Result<Vec<String>, KvError> {
        match self {
            Reply::Nil => Ok(Vec::new()),
            Reply::Array(items) => items
                .into_iter()
                .map(|item| item.into_string().map(Option::unwrap_or_default))
                .collect(),
            other => Err(KvError::decode(format!("expected array, got {}", other.shape()))),
        }
    }

    /// Decodes an integer reply, parsing textual integers as well.
    pub fn into_int(self) -> Result<i64, KvError> {
        match self {
            Reply::Int(value) => Ok(value),
            Reply::Status(text) => parse_int(&text),
            Reply::Bulk(bytes) => parse_int(&String::from_utf8_lossy(&bytes)),
            other => Err(KvError::decode(format!("expected integer, got {}", other.shape()))),
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Ok => "OK",
            Reply::Status(_) => "status",
            Reply::Int(_) => "integer",
            Reply::Bulk(_) => "bulk string",
            Reply::Array(_) => "array",
            Reply::Other(_) => "unsupported reply",
        }
    }
}

fn parse_int(text: &str) -> Result<i64, KvError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| KvError::decode(format!("invalid integer '{}'", text)))
}

impl From<redis::Value> for Reply {
    fn from(value: redis::Value) -> Self {
        match value {
            redis::Value::Nil => Reply::Nil,
            redis::Value::Okay => Reply::Ok,
            redis::Value::SimpleString(status) => Reply::Status(status),
            redis::Value::Int(value) => Reply::Int(value),
            redis::Value::BulkString(bytes) => Reply::Bulk(bytes),
            redis::Value::Array(items) | redis::Value::Set(items) => {
                Reply::Array(items.into_iter().map(Reply::from).collect())
            }
            redis::Value::VerbatimString { text, .. } => Reply::Bulk(text.into_bytes()),
            other => Reply::Other(format!("{:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_decoding() {
        assert_eq!(Reply::bulk("simulator").into_string(), Ok(Some("simulator".into())));
        assert_eq!(Reply::status("hash").into_string(), Ok(Some("hash".into())));
        assert_eq!(Reply::Nil.into_string(), Ok(None));
        assert!(matches!(Reply::Int(3).into_string(), Err(KvError::Decode(_))));
    }

    #[test]
    fn strings_decoding() {
        assert_eq!(
            Reply::bulk_array(["a", "b"]).into_strings(),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Reply::Nil.into_strings(), Ok(Vec::new()));
        assert_eq!(
            Reply::Array(vec![Reply::Nil, Reply::bulk("x")]).into_strings(),
            Ok(vec![String::new(), "x".to_string()])
        );
        assert!(matches!(Reply::bulk("a").into_strings(), Err(KvError::Decode(_))));
    }

    #[test]
    fn int_decoding_accepts_text() {
        assert_eq!(Reply::Int(16).into_int(), Ok(16));
        assert_eq!(Reply::bulk("16").into_int(), Ok(16));
        assert!(matches!(Reply::bulk("sixteen").into_int(), Err(KvError::Decode(_))));
        assert!(matches!(Reply::Nil.into_int(), Err(KvError::Decode(_))));
    }

    #[test]
    fn converts_wire_values() {
        let wire = redis::Value::Array(vec![
            redis::Value::BulkString(b"databases".to_vec()),
            redis::Value::BulkString(b"16".to_vec()),
        ]);
        assert_eq!(Reply::from(wire), Reply::bulk_array(["databases", "16"]));
        assert_eq!(Reply::from(redis::Value::Okay), Reply::Ok);
        assert_eq!(
            Reply::from(redis::Value::SimpleString("string".into())),
            Reply::status("string")
        );
    }
}
