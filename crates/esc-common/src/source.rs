//! `Source` — source text plus the identity metadata every later pass
//! needs.

/// Content-addressed handle to a compilation unit's source text.
///
/// The digest is used as half of the code-cache key and is
/// computed lazily on first access since not every compile needs it
/// (e.g. sources under the cache threshold never touch the cache).
#[derive(Clone, Debug)]
pub struct Source {
    text: String,
    url: String,
    digest: once_cell::sync::OnceCell<[u8; 32]>,
}

impl Source {
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Source {
            text: text.into(),
            url: url.into(),
            digest: once_cell::sync::OnceCell::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// A 256-bit content digest of the source text, computed with a
    /// simple FNV-1a-derived mix (the real digest used by the code
    /// cache is blake3, owned by `esc-cache`; this is a stable
    /// structural identity usable without pulling the hashing crate
    /// into every consumer of `Source`).
    pub fn digest(&self) -> &[u8; 32] {
        self.digest.get_or_init(|| fnv_digest(self.text.as_bytes()))
    }
}

fn fnv_digest(bytes: &[u8]) -> [u8; 32] {
    let mut state: u64 = 0xcbf29ce484222325;
    let mut out = [0u8; 32];
    for (i, chunk) in bytes.chunks(1).enumerate() {
        state ^= chunk[0] as u64;
        state = state.wrapping_mul(0x100000001b3);
        out[i % 32] ^= (state & 0xff) as u8;
    }
    out
}
