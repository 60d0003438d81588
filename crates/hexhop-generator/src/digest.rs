use crate::{GenerateError, Generator};
use async_trait::async_trait;
use hexhop_core::shortcode::CODE_WIDTH;
use hexhop_core::{CodeLookup, ShortCode};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

/// Length of a SHA-256 digest, hex-encoded.
const DIGEST_HEX_LEN: usize = 64;

/// Number of full-width candidate blocks in a digest.
///
/// 64 is not a multiple of 7, which leaves a 1-character remainder
/// after 9 full blocks. The remainder is not a candidate: a single hex
/// character carries too little entropy to be worth the collision
/// risk.
const CANDIDATE_BLOCKS: usize = DIGEST_HEX_LEN / CODE_WIDTH;

/// Derives short codes by block-stepping over a SHA-256 digest.
///
/// The URL is hashed once; the hex digest is partitioned into
/// sequential non-overlapping [`CODE_WIDTH`]-character blocks, and the
/// first block that is either unused or already bound to the same URL
/// becomes the code. Stepping to the next block on collision keeps
/// generation bounded and deterministic per URL, with no global
/// re-hash loop.
#[derive(Debug, Clone, Default)]
pub struct Sha256Generator;

impl Sha256Generator {
    pub fn new() -> Self {
        Self
    }
}

fn digest_hex(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

fn candidate_blocks(digest: &str) -> impl Iterator<Item = &str> {
    (0..CANDIDATE_BLOCKS).map(move |i| &digest[i * CODE_WIDTH..(i + 1) * CODE_WIDTH])
}

#[async_trait]
impl Generator for Sha256Generator {
    async fn generate(
        &self,
        url: &str,
        lookup: &dyn CodeLookup,
    ) -> Result<ShortCode, GenerateError> {
        let digest = digest_hex(url);
        trace!(digest = %digest, "derived digest for url");

        for block in candidate_blocks(&digest) {
            match lookup.url_for_code(block).await? {
                None => {
                    debug!(code = %block, "claimed unused candidate block");
                    return Ok(ShortCode::new_unchecked(block));
                }
                Some(existing) if existing == url => {
                    debug!(code = %block, "re-using code already bound to this url");
                    return Ok(ShortCode::new_unchecked(block));
                }
                Some(_) => {
                    trace!(code = %block, "candidate block bound to a different url");
                }
            }
        }

        Err(GenerateError::Exhausted)
    }
}
