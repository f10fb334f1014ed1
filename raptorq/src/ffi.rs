//! Thin C ABI shell (spec §1 Non-goals: no OTI container, no transport —
//! just enough for a caller in another language to encode/decode a
//! buffer). Mirrors the teacher's `fec_module_*` handle pattern
//! (`rust/fec/src/lib.rs`): opaque boxed pointer, null-checked at every
//! boundary, paired init/free functions.
use std::ptr;
use std::slice;

use crate::decoder::Decoder;
use crate::encoder::Encoder;

#[no_mangle]
pub extern "C" fn raptorq_encoder_new(data: *const u8, len: usize, symbol_size: usize) -> *mut Encoder {
    if data.is_null() || symbol_size == 0 {
        return ptr::null_mut();
    }
    let slice = unsafe { slice::from_raw_parts(data, len) };
    match Encoder::new(slice, symbol_size) {
        Ok(enc) => Box::into_raw(Box::new(enc)),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn raptorq_encoder_free(handle: *mut Encoder) {
    if handle.is_null() {
        return;
    }
    unsafe { drop(Box::from_raw(handle)) };
}

/// Writes the encoded symbol for `esi` into `out` (must be
/// `symbol_size` bytes). Returns `0` on success, negative on error.
#[no_mangle]
pub extern "C" fn raptorq_encoder_encode_symbol(handle: *mut Encoder, esi: u32, out: *mut u8) -> i32 {
    if handle.is_null() || out.is_null() {
        return -1;
    }
    let enc = unsafe { &*handle };
    match enc.encode_symbol(esi) {
        Ok(symbol) => {
            let out_slice = unsafe { slice::from_raw_parts_mut(out, symbol.len()) };
            out_slice.copy_from_slice(&symbol);
            0
        }
        Err(_) => -2,
    }
}

#[no_mangle]
pub extern "C" fn raptorq_decoder_new(k: u32, symbol_size: usize) -> *mut Decoder {
    match Decoder::new(k, symbol_size) {
        Ok(dec) => Box::into_raw(Box::new(dec)),
        Err(_) => ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "C" fn raptorq_decoder_free(handle: *mut Decoder) {
    if handle.is_null() {
        return;
    }
    unsafe { drop(Box::from_raw(handle)) };
}

#[no_mangle]
pub extern "C" fn raptorq_decoder_add_symbol(handle: *mut Decoder, esi: u32, data: *const u8, len: usize) -> i32 {
    if handle.is_null() || data.is_null() {
        return -1;
    }
    let dec = unsafe { &mut *handle };
    let slice = unsafe { slice::from_raw_parts(data, len) };
    match dec.add_symbol(esi, slice) {
        Ok(()) => 0,
        Err(_) => -2,
    }
}

/// Writes up to `out_len` bytes of the reconstructed object into `out`,
/// returning the number of bytes written, or a negative code if decoding
/// is not yet possible.
#[no_mangle]
pub extern "C" fn raptorq_decoder_decode(handle: *mut Decoder, out: *mut u8, out_len: usize) -> i64 {
    if handle.is_null() || out.is_null() {
        return -1;
    }
    let dec = unsafe { &*handle };
    match dec.decode() {
        Ok(object) => {
            let n = object.len().min(out_len);
            let out_slice = unsafe { slice::from_raw_parts_mut(out, n) };
            out_slice.copy_from_slice(&object[..n]);
            n as i64
        }
        Err(_) => -2,
    }
}
