//! Splitting an unbounded sequence into bounded batches.

use std::iter::FusedIterator;

use crate::error::ChunkError;

/// Batch size used when the caller has no preference.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Lazily group `iter` into batches of `chunk_size` items.
///
/// Each batch is yielded as soon as it fills. The final batch holds the
/// remainder and is never empty; an empty input yields no batches.
pub fn chunkify<I>(iter: I, chunk_size: usize) -> Result<Chunks<I::IntoIter>, ChunkError>
where
    I: IntoIterator,
{
    if chunk_size == 0 {
        return Err(ChunkError::ZeroChunkSize);
    }
    Ok(Chunks {
        inner: iter.into_iter(),
        chunk_size,
        done: false,
    })
}

/// Iterator returned by [`chunkify`].
///
/// Single consumer: it owns its position in the underlying iterator.
#[derive(Debug)]
pub struct Chunks<I> {
    inner: I,
    chunk_size: usize,
    done: bool,
}

impl<I> Chunks<I> {
    /// The configured batch size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size.min(1024));
        while chunk.len() < self.chunk_size {
            match self.inner.next() {
                Some(item) => chunk.push(item),
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let (lo, hi) = self.inner.size_hint();
        let n = self.chunk_size;
        (lo.div_ceil(n), hi.map(|h| h.div_ceil(n)))
    }
}

impl<I: Iterator> FusedIterator for Chunks<I> {}
