//! Minimal ABI codec for the credential contract.
//!
//! Encodes calldata and decodes return data for exactly the five calls
//! this adapter makes. Static arguments occupy one 32-byte head word;
//! dynamic strings get an offset word in the head and a length-prefixed,
//! right-padded tail. Function selectors are the first 4 bytes of the
//! keccak-256 of the canonical signature.

use educred_core::{ContentId, EthAddress, TokenId};
use thiserror::Error;

/// Selector for `mintCredential(address,string,string,string)`.
pub const SEL_MINT_CREDENTIAL: &str = "b2ec64fd";
/// Selector for `getCredential(uint256)`.
pub const SEL_GET_CREDENTIAL: &str = "8dd18d2d";
/// Selector for `balanceOf(address)`.
pub const SEL_BALANCE_OF: &str = "70a08231";
/// Selector for `tokenOfOwnerByIndex(address,uint256)`.
pub const SEL_TOKEN_OF_OWNER_BY_INDEX: &str = "2f745c59";
/// Selector for `tokenURI(uint256)`.
pub const SEL_TOKEN_URI: &str = "c87b56dd";

/// Decoding failures. The adapter maps these into read errors with the
/// offending endpoint attached.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("return data is not valid hex: {0}")]
    InvalidHex(String),
    #[error("return data truncated: needed {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },
    #[error("value does not fit in u64")]
    Overflow,
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("empty return data")]
    Empty,
}

/// One encodable argument.
pub enum Token {
    Address(EthAddress),
    Uint(u64),
    Str(String),
}

/// Encode a function call: `0x` + selector + head/tail argument encoding.
pub fn encode_call(selector: &str, args: &[Token]) -> String {
    let head_size = args.len() * 32;
    let mut head = String::with_capacity(head_size * 2);
    let mut tail = String::new();

    for arg in args {
        match arg {
            Token::Address(addr) => head.push_str(&encode_address(addr)),
            Token::Uint(v) => head.push_str(&encode_uint(*v)),
            Token::Str(s) => {
                let offset = head_size + tail.len() / 2;
                head.push_str(&encode_uint(offset as u64));
                tail.push_str(&encode_string_tail(s));
            }
        }
    }

    format!("0x{selector}{head}{tail}")
}

/// One 32-byte word holding a left-padded u64.
fn encode_uint(v: u64) -> String {
    format!("{v:064x}")
}

/// One 32-byte word holding a left-padded address.
fn encode_address(addr: &EthAddress) -> String {
    format!("{:0>64}", addr.as_str()[2..].to_ascii_lowercase())
}

/// Length word plus UTF-8 bytes right-padded to a 32-byte boundary.
fn encode_string_tail(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = encode_uint(bytes.len() as u64);
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.push_str(&"00".repeat(32 - rem));
    }
    out
}

/// Decoded `getCredential` return tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCredential {
    pub recipient: String,
    pub institution: String,
    pub course_name: String,
    pub issue_date: u64,
    pub content_id: String,
    pub verified: bool,
}

/// Decode the return of `getCredential(uint256)`:
/// a dynamic tuple `(address,string,string,uint256,string,bool)`.
pub fn decode_credential(data: &str) -> Result<DecodedCredential, AbiError> {
    let bytes = hex_to_bytes(data)?;
    if bytes.is_empty() {
        return Err(AbiError::Empty);
    }

    // Head word: offset to the tuple body.
    let base = read_uint(&bytes, 0)? as usize;

    let recipient = read_address(&bytes, base)?;
    let institution_off = base + read_uint(&bytes, base + 32)? as usize;
    let course_off = base + read_uint(&bytes, base + 64)? as usize;
    let issue_date = read_uint(&bytes, base + 96)?;
    let content_off = base + read_uint(&bytes, base + 128)? as usize;
    let verified = read_uint(&bytes, base + 160)? != 0;

    Ok(DecodedCredential {
        recipient,
        institution: read_string(&bytes, institution_off)?,
        course_name: read_string(&bytes, course_off)?,
        issue_date,
        content_id: read_string(&bytes, content_off)?,
        verified,
    })
}

/// Decode a single-word uint return (`balanceOf`, `tokenOfOwnerByIndex`).
pub fn decode_uint(data: &str) -> Result<u64, AbiError> {
    let bytes = hex_to_bytes(data)?;
    if bytes.is_empty() {
        return Err(AbiError::Empty);
    }
    read_uint(&bytes, 0)
}

/// Decode a single dynamic-string return (`tokenURI`).
pub fn decode_string(data: &str) -> Result<String, AbiError> {
    let bytes = hex_to_bytes(data)?;
    if bytes.is_empty() {
        return Err(AbiError::Empty);
    }
    let offset = read_uint(&bytes, 0)? as usize;
    read_string(&bytes, offset)
}

fn hex_to_bytes(data: &str) -> Result<Vec<u8>, AbiError> {
    let hex = data.strip_prefix("0x").unwrap_or(data);
    if hex.len() % 2 != 0 {
        return Err(AbiError::InvalidHex(data.to_string()));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| AbiError::InvalidHex(data.to_string()))
        })
        .collect()
}

fn word(bytes: &[u8], offset: usize) -> Result<&[u8], AbiError> {
    bytes
        .get(offset..offset + 32)
        .ok_or(AbiError::Truncated {
            needed: offset + 32,
            got: bytes.len(),
        })
}

fn read_uint(bytes: &[u8], offset: usize) -> Result<u64, AbiError> {
    let w = word(bytes, offset)?;
    if w[..24].iter().any(|&b| b != 0) {
        return Err(AbiError::Overflow);
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&w[24..32]);
    Ok(u64::from_be_bytes(buf))
}

fn read_address(bytes: &[u8], offset: usize) -> Result<String, AbiError> {
    let w = word(bytes, offset)?;
    let hex: String = w[12..32].iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("0x{hex}"))
}

fn read_string(bytes: &[u8], offset: usize) -> Result<String, AbiError> {
    let len = read_uint(bytes, offset)? as usize;
    let start = offset + 32;
    let payload = bytes.get(start..start + len).ok_or(AbiError::Truncated {
        needed: start + len,
        got: bytes.len(),
    })?;
    String::from_utf8(payload.to_vec()).map_err(|_| AbiError::InvalidUtf8)
}

/// Calldata for `mintCredential(address,string,string,string)`.
pub fn mint_credential_calldata(
    recipient: &EthAddress,
    institution: &str,
    course_name: &str,
    content_id: &ContentId,
) -> String {
    encode_call(
        SEL_MINT_CREDENTIAL,
        &[
            Token::Address(recipient.clone()),
            Token::Str(institution.to_string()),
            Token::Str(course_name.to_string()),
            Token::Str(content_id.as_str().to_string()),
        ],
    )
}

/// Calldata for `getCredential(uint256)`.
pub fn get_credential_calldata(token_id: TokenId) -> String {
    encode_call(SEL_GET_CREDENTIAL, &[Token::Uint(token_id.as_u64())])
}

/// Calldata for `balanceOf(address)`.
pub fn balance_of_calldata(owner: &EthAddress) -> String {
    encode_call(SEL_BALANCE_OF, &[Token::Address(owner.clone())])
}

/// Calldata for `tokenOfOwnerByIndex(address,uint256)`.
pub fn token_of_owner_by_index_calldata(owner: &EthAddress, index: u64) -> String {
    encode_call(
        SEL_TOKEN_OF_OWNER_BY_INDEX,
        &[Token::Address(owner.clone()), Token::Uint(index)],
    )
}

/// Calldata for `tokenURI(uint256)`.
pub fn token_uri_calldata(token_id: TokenId) -> String {
    encode_call(SEL_TOKEN_URI, &[Token::Uint(token_id.as_u64())])
}
