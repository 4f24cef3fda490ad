//! Grammar for affiliate codes.
//!
//! Private codes are six alphanumerics, public codes are `xxx-xxx`. In both the
//! last character must be an uppercase letter or one of `2 3 4 6 7 9`, which
//! keeps 0/1/5/8 out of the position people most often misread.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PRIVATE_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{5}[A-Z234679]$").unwrap();
    static ref PUBLIC_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]{3}-[A-Za-z0-9]{2}[A-Z234679]$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Private,
    Public,
    Invalid,
}

pub fn is_private_code(code: &str) -> bool {
    PRIVATE_CODE_REGEX.is_match(code)
}

pub fn is_public_code(code: &str) -> bool {
    PUBLIC_CODE_REGEX.is_match(code)
}

pub fn is_any_code(code: &str) -> bool {
    is_private_code(code) || is_public_code(code)
}

pub fn classify(code: &str) -> CodeKind {
    if is_private_code(code) {
        CodeKind::Private
    } else if is_public_code(code) {
        CodeKind::Public
    } else {
        CodeKind::Invalid
    }
}
