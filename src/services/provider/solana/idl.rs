//! Anchor IDL lookup and account decoding.
//!
//! Programs built with Anchor may publish their IDL on chain. When they do,
//! accounts they own can be decoded into readable JSON: the first 8 bytes of
//! the account select the account type, the rest is borsh data laid out as
//! that type describes.
//!
//! Both IDL generations are understood: legacy IDLs with inline account
//! types and hashed discriminators, and newer IDLs with explicit
//! `discriminator` arrays and account types listed under `types`.
use std::io::Read;

use borsh::BorshDeserialize;
use flate2::read::ZlibDecoder;
use serde_json::{json, Map, Number, Value};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::{
    constants::{
        ANCHOR_ACCOUNT_NAMESPACE, ANCHOR_IDL_HEADER_BYTES, ANCHOR_IDL_SEED, MAX_IDL_TYPE_DEPTH,
    },
    utils::base64_decode,
};

#[derive(Error, Debug, PartialEq)]
pub enum IdlError {
    #[error("IDL account data is truncated")]
    Truncated,

    #[error("Failed to inflate IDL: {0}")]
    Inflate(String),

    #[error("Invalid IDL: {0}")]
    Invalid(String),

    #[error("Unsupported IDL type: {0}")]
    UnsupportedType(String),

    #[error("Account data does not match its IDL type: {0}")]
    Data(String),
}

/// Address of the IDL account published for `program_id`.
pub fn idl_address(program_id: &Pubkey) -> Result<Pubkey, IdlError> {
    let (base, _) = Pubkey::find_program_address(&[], program_id);
    Pubkey::create_with_seed(&base, ANCHOR_IDL_SEED, program_id)
        .map_err(|e| IdlError::Invalid(e.to_string()))
}

/// Raw bytes of a `jsonParsed` account whose data the node left base64 encoded.
///
/// Accounts the node knows how to parse (token accounts and the like) carry
/// an object instead and yield `None`.
pub fn encoded_account_data(account_info: &Value) -> Option<Vec<u8>> {
    match account_info.get("data")?.as_array()?.as_slice() {
        [Value::String(data), Value::String(encoding)] if encoding == "base64" => {
            base64_decode(data).ok()
        }
        _ => None,
    }
}

fn account_discriminator(name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{ANCHOR_ACCOUNT_NAMESPACE}:{name}"));
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&digest[..8]);
    discriminator
}

fn read<T: BorshDeserialize>(data: &mut &[u8]) -> Result<T, IdlError> {
    T::deserialize(data).map_err(|e| IdlError::Data(e.to_string()))
}

fn number<T: Into<Number>>(value: T) -> Value {
    Value::Number(value.into())
}

fn float(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

#[derive(Debug, Clone)]
pub struct AnchorIdl {
    idl: Value,
}

impl AnchorIdl {
    pub fn new(idl: Value) -> Self {
        Self { idl }
    }

    /// Parses the contents of a program's IDL account.
    pub fn from_idl_account(data: &[u8]) -> Result<Self, IdlError> {
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(
            data.get(ANCHOR_IDL_HEADER_BYTES..ANCHOR_IDL_HEADER_BYTES + 4)
                .ok_or(IdlError::Truncated)?,
        );
        let start = ANCHOR_IDL_HEADER_BYTES + 4;
        let len = u32::from_le_bytes(len_bytes) as usize;
        let compressed = data.get(start..start + len).ok_or(IdlError::Truncated)?;

        let mut json = Vec::new();
        ZlibDecoder::new(compressed)
            .read_to_end(&mut json)
            .map_err(|e| IdlError::Inflate(e.to_string()))?;
        let idl = serde_json::from_slice(&json).map_err(|e| IdlError::Invalid(e.to_string()))?;
        Ok(Self::new(idl))
    }

    /// Decodes `data` as whichever IDL account type its discriminator names.
    ///
    /// Returns `None` when no account type matches.
    pub fn decode_account(&self, data: &[u8]) -> Result<Option<Value>, IdlError> {
        let Some((discriminator, mut body)) = data.split_first_chunk::<8>() else {
            return Ok(None);
        };

        let accounts = self
            .idl
            .get("accounts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        for account in accounts {
            let name = account
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| IdlError::Invalid("account without a name".into()))?;
            if self.discriminator_of(account, name)? != *discriminator {
                continue;
            }

            let type_def = match account.get("type") {
                Some(type_def) => type_def,
                None => self.type_def(name)?,
            };
            return self.decode_type_def(type_def, &mut body, 0).map(Some);
        }
        Ok(None)
    }

    fn discriminator_of(&self, account: &Value, name: &str) -> Result<[u8; 8], IdlError> {
        let Some(explicit) = account.get("discriminator") else {
            return Ok(account_discriminator(name));
        };
        let bytes: Vec<u8> = serde_json::from_value(explicit.clone())
            .map_err(|e| IdlError::Invalid(format!("discriminator of {name}: {e}")))?;
        bytes
            .try_into()
            .map_err(|_| IdlError::Invalid(format!("discriminator of {name} is not 8 bytes")))
    }

    fn type_def(&self, name: &str) -> Result<&Value, IdlError> {
        self.idl
            .get("types")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .chain(
                self.idl
                    .get("accounts")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten(),
            )
            .filter(|def| def.get("name").and_then(Value::as_str) == Some(name))
            .find_map(|def| def.get("type"))
            .ok_or_else(|| IdlError::Invalid(format!("type {name} is not defined")))
    }

    fn decode_type_def(
        &self,
        type_def: &Value,
        data: &mut &[u8],
        depth: usize,
    ) -> Result<Value, IdlError> {
        match type_def.get("kind").and_then(Value::as_str) {
            Some("struct") => {
                let fields = type_def.get("fields").unwrap_or(&Value::Null);
                self.decode_fields(fields, data, depth)
            }
            Some("enum") => {
                let variants = type_def
                    .get("variants")
                    .and_then(Value::as_array)
                    .ok_or_else(|| IdlError::Invalid("enum without variants".into()))?;
                let tag: u8 = read(data)?;
                let variant = variants
                    .get(tag as usize)
                    .ok_or_else(|| IdlError::Data(format!("enum tag {tag} out of range")))?;
                let name = variant
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| IdlError::Invalid("variant without a name".into()))?;
                let fields = variant.get("fields").unwrap_or(&Value::Null);
                let mut object = Map::new();
                object.insert(name.to_string(), self.decode_fields(fields, data, depth)?);
                Ok(Value::Object(object))
            }
            Some("type") => {
                let alias = type_def
                    .get("alias")
                    .ok_or_else(|| IdlError::Invalid("type alias without a target".into()))?;
                self.decode(alias, data, depth + 1)
            }
            _ => Err(IdlError::UnsupportedType(type_def.to_string())),
        }
    }

    /// Named fields decode to an object, tuple fields to an array.
    fn decode_fields(
        &self,
        fields: &Value,
        data: &mut &[u8],
        depth: usize,
    ) -> Result<Value, IdlError> {
        let fields = match fields {
            Value::Null => return Ok(json!({})),
            Value::Array(fields) => fields,
            other => return Err(IdlError::Invalid(format!("fields: {other}"))),
        };

        let named = fields
            .iter()
            .all(|field| field.get("name").and_then(Value::as_str).is_some());
        if named && !fields.is_empty() {
            let mut object = Map::new();
            for field in fields {
                let name = field.get("name").and_then(Value::as_str).unwrap_or_default();
                let field_type = field
                    .get("type")
                    .ok_or_else(|| IdlError::Invalid(format!("field {name} has no type")))?;
                object.insert(name.to_string(), self.decode(field_type, data, depth + 1)?);
            }
            Ok(Value::Object(object))
        } else {
            fields
                .iter()
                .map(|field_type| self.decode(field_type, data, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
    }

    fn decode(&self, field_type: &Value, data: &mut &[u8], depth: usize) -> Result<Value, IdlError> {
        if depth > MAX_IDL_TYPE_DEPTH {
            return Err(IdlError::UnsupportedType("type nesting too deep".into()));
        }

        let object = match field_type {
            Value::String(primitive) => return decode_primitive(primitive, data),
            Value::Object(object) => object,
            other => return Err(IdlError::UnsupportedType(other.to_string())),
        };

        if let Some(inner) = object.get("vec") {
            let len: u32 = read(data)?;
            if len as usize > data.len() {
                return Err(IdlError::Data(format!("vector of {len} items overruns data")));
            }
            return (0..len)
                .map(|_| self.decode(inner, data, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }
        if let Some(inner) = object.get("option") {
            let tag: u8 = read(data)?;
            return match tag {
                0 => Ok(Value::Null),
                _ => self.decode(inner, data, depth + 1),
            };
        }
        if let Some(inner) = object.get("coption") {
            let tag: u32 = read(data)?;
            return match tag {
                0 => Ok(Value::Null),
                _ => self.decode(inner, data, depth + 1),
            };
        }
        if let Some(array) = object.get("array") {
            let (inner, len) = match array.as_array().map(Vec::as_slice) {
                Some([inner, len]) => (inner, len.as_u64()),
                _ => (&Value::Null, None),
            };
            let len = len.ok_or_else(|| IdlError::UnsupportedType(array.to_string()))?;
            return (0..len)
                .map(|_| self.decode(inner, data, depth + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }
        if let Some(defined) = object.get("defined") {
            let name = defined
                .as_str()
                .or_else(|| defined.get("name").and_then(Value::as_str))
                .ok_or_else(|| IdlError::UnsupportedType(defined.to_string()))?;
            let type_def = self.type_def(name)?;
            return self.decode_type_def(type_def, data, depth + 1);
        }

        Err(IdlError::UnsupportedType(field_type.to_string()))
    }
}

/// Integers wider than 32 bits are rendered as decimal strings.
fn decode_primitive(primitive: &str, data: &mut &[u8]) -> Result<Value, IdlError> {
    let value = match primitive {
        "bool" => Value::Bool(read(data)?),
        "u8" => number(read::<u8>(data)?),
        "i8" => number(read::<i8>(data)?),
        "u16" => number(read::<u16>(data)?),
        "i16" => number(read::<i16>(data)?),
        "u32" => number(read::<u32>(data)?),
        "i32" => number(read::<i32>(data)?),
        "u64" => Value::String(read::<u64>(data)?.to_string()),
        "i64" => Value::String(read::<i64>(data)?.to_string()),
        "u128" => Value::String(read::<u128>(data)?.to_string()),
        "i128" => Value::String(read::<i128>(data)?.to_string()),
        "f32" => float(read::<f32>(data)? as f64),
        "f64" => float(read::<f64>(data)?),
        "string" => Value::String(read(data)?),
        "bytes" => json!(read::<Vec<u8>>(data)?),
        "publicKey" | "pubkey" => {
            Value::String(Pubkey::new_from_array(read::<[u8; 32]>(data)?).to_string())
        }
        other => return Err(IdlError::UnsupportedType(other.to_string())),
    };
    Ok(value)
}
