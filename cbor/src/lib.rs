//! The CBOR subset that Plutus Data values use.
#![no_std]
extern crate alloc;

pub mod decode;
pub mod encode;

mod decode_seq;


#[cfg(test)]
mod encode_tests;
