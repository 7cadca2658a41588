use mf_core::eyre::{bail, eyre, Result};
use mf_core::{StoredMessage, Value};
use rusqlite::{types, Row};

/// rusqlite does offer Serde to Value conversion, but it
/// converts everything to strings!
pub fn json_to_value(input: &Value) -> Result<types::Value> {
    let ok = match input {
        Value::Number(n) if n.is_i64() => {
            types::Value::Integer(n.as_i64().ok_or_else(|| eyre!("Invalid Number {:?}", n))?)
        }
        Value::Number(n) if n.is_u64() => {
            let value = n.as_u64().ok_or_else(|| eyre!("Invalid Number {:?}", n))?;
            let converted: i64 = value.try_into()?;
            types::Value::Integer(converted)
        }
        Value::Bool(n) => types::Value::Integer(*n as i64),
        Value::String(n) => types::Value::Text(n.clone()),
        _ => bail!("Invalid type: {}", &input),
    };
    Ok(ok)
}

pub trait RowConversion: Sized {
    fn from_row(row: &Row<'_>) -> Result<Self>;
}

impl RowConversion for StoredMessage {
    fn from_row(row: &Row<'_>) -> Result<Self> {
        // The flags column only exists in stores created with the
        // flagged layout.
        let flags = row.get::<_, Option<i64>>("flags").unwrap_or(None);
        Ok(StoredMessage {
            msgid: row.get("msgid")?,
            msgdate: row.get("msgdate")?,
            msgfrom: row.get("msgfrom")?,
            msgsubject: row.get("msgsubject")?,
            folder: row.get("folder")?,
            flags,
        })
    }
}
