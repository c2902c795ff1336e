use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use zeroize::Zeroizing;

use crate::seed::Seed;

const BUFFER_LEN: usize = 256;
const WORD_LEN: usize = 4;
const WORD_SPAN: u64 = 1 << 32;

// Keyed with the big-endian seed bytes and a zero nonce; the keystream is
// read as consecutive little-endian u32 words.
pub(crate) struct KeystreamRng {
    cipher: ChaCha20,
    buffer: Zeroizing<[u8; BUFFER_LEN]>,
    pos: usize,
}

impl KeystreamRng {
    pub(crate) fn new(seed: &Seed) -> Self {
        let mut rng = Self {
            cipher: ChaCha20::new(seed.as_be_bytes().into(), &[0u8; 12].into()),
            buffer: Zeroizing::new([0u8; BUFFER_LEN]),
            pos: 0,
        };
        rng.refill();
        rng
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(self.buffer.as_mut_slice());
        self.pos = 0;
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        if self.pos + WORD_LEN > BUFFER_LEN {
            self.refill();
        }

        let word = u32::from_le_bytes([
            self.buffer[self.pos],
            self.buffer[self.pos + 1],
            self.buffer[self.pos + 2],
            self.buffer[self.pos + 3],
        ]);
        self.pos += WORD_LEN;
        word
    }

    /// Uniform index in `0..bound`. Callers keep `bound` within
    /// `1..=MAX_LENGTH`.
    pub(crate) fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0 && bound as u64 <= u64::from(u32::MAX));

        let bound = bound as u64;
        let rejection_threshold = WORD_SPAN - (WORD_SPAN % bound);

        loop {
            let word = u64::from(self.next_u32());
            if word < rejection_threshold {
                return (word % bound) as usize;
            }
        }
    }

    pub(crate) fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.below(items.len());
        items.get(index)
    }

    pub(crate) fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}
