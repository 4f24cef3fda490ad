use rand::Rng;

/// Symbols used for invite tokens: no 0/O/o, 1/I/i/l, 5/S/s, 8.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRTUVWXYZabcdefghjkmnptuvxy234679";

pub const DEFAULT_TOKEN_LEN: usize = 8;

pub fn generate_invite_token(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..TOKEN_ALPHABET.len());
            TOKEN_ALPHABET[idx] as char
        })
        .collect()
}
